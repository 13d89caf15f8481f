//! Trace replay and loading.
//!
//! Provides the trace record parser, the replay loop that drives a cache
//! from parsed records, and helpers for opening trace files.

/// Trace file opening and file replay.
pub mod loader;
/// Replay loop and outcome observers.
pub mod replay;
/// Trace line parsing.
pub mod trace;

pub use replay::{NullObserver, ReplayObserver, ReplayReport, TraceReplayer, VerboseObserver};
pub use trace::AccessRecord;
