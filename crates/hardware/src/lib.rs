//! Trace-driven cache simulator library.
//!
//! This crate replays Valgrind memory traces against a set-associative cache
//! with LRU replacement and counts hits, misses, and evictions:
//! 1. **Common:** Address decomposition, access kinds, constants, and error types.
//! 2. **Config:** Cache parameters (`s`, `E`, `b`, trace) and validated geometry.
//! 3. **Core:** The cache model: line storage, age-counter LRU, and access resolution.
//! 4. **Simulation:** Trace parsing, replay, and trace loading.
//! 5. **Stats:** Hit/miss/eviction counters and the final summary.
//!
//! ```
//! use csim_core::config::CacheGeometry;
//! use csim_core::sim::{NullObserver, replay::replay_trace};
//! use csim_core::CacheSim;
//!
//! let geometry = CacheGeometry::new(1, 1, 1).unwrap();
//! let mut cache = CacheSim::new(&geometry);
//! let trace = "L 0,1\nL 2,1\nL 4,1\n";
//! replay_trace(&mut cache, trace.as_bytes(), &mut NullObserver).unwrap();
//!
//! assert_eq!(cache.stats().summary().to_string(), "hits:0 misses:3 evictions:1");
//! ```

/// Common types and constants (address layout, access kinds, errors).
pub mod common;
/// Simulator configuration (raw parameters, JSON loading, validated geometry).
pub mod config;
/// Cache model (line store, LRU aging, access resolution).
pub mod core;
/// Trace parsing, replay, and file loading.
pub mod sim;
/// Hit/miss/eviction statistics and summary output.
pub mod stats;

/// Raw simulator parameters; merge CLI flags over a JSON file, then validate.
pub use crate::config::{CacheConfig, CacheGeometry};
/// The cache simulator and its per-access outcome.
pub use crate::core::{AccessOutcome, CacheSim};
/// Final `(hits, misses, evictions)` triple.
pub use crate::stats::Summary;
