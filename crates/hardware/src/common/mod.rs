//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the simulator. It includes:
//! 1. **Address Layout:** Decomposition of addresses into tag, set index, and block offset.
//! 2. **Constants:** Address width and the fixed result artifact name.
//! 3. **Memory Access:** Classification of trace records (Instruction/Load/Store/Modify).
//! 4. **Error Handling:** Configuration, trace, parse, and summary error types.

/// Address layout and decomposition.
pub mod addr;

/// Common constants used throughout the simulator.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types for configuration, trace input, and result output.
pub mod error;

pub use addr::{AddressLayout, DecomposedAddress};
pub use constants::{ADDRESS_BITS, MAX_CACHE_LINES, RESULTS_FILE};
pub use data::AccessKind;
pub use error::{ConfigError, ParseError, SummaryError, TraceError};
