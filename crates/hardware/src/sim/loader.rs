//! Trace loading.
//!
//! This module opens trace sources and replays them against a cache. It performs:
//! 1. **Trace opening:** Wraps the trace file in a buffered reader, reporting an unreadable path as `TraceError::Open`.
//! 2. **File replay:** Streams the opened trace through a `TraceReplayer` with logging at start and finish.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::info;

use super::replay::{ReplayObserver, ReplayReport, replay_trace};
use crate::common::error::TraceError;
use crate::core::cache::CacheSim;

/// Opens a trace file for buffered line reading.
///
/// # Arguments
///
/// * `path` - Path to the trace file.
///
/// # Errors
///
/// `TraceError::Open` if the file cannot be opened.
pub fn open_trace(path: &Path) -> Result<BufReader<File>, TraceError> {
    let file = File::open(path).map_err(|source| TraceError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Opens `path` and replays every record in it against `cache`.
///
/// If the file cannot be opened the cache is left untouched.
///
/// # Arguments
///
/// * `cache` - Cache to mutate; its statistics accumulate the replay.
/// * `path` - Trace file to read.
/// * `observer` - Receives each record's outcomes.
///
/// # Errors
///
/// `TraceError::Open` if the trace cannot be opened, otherwise any error from
/// [`replay_trace`].
pub fn replay_file<O: ReplayObserver + ?Sized>(
    cache: &mut CacheSim,
    path: &Path,
    observer: &mut O,
) -> Result<ReplayReport, TraceError> {
    let reader = open_trace(path)?;
    info!(trace = %path.display(), "replaying trace");

    let report = replay_trace(cache, reader, observer)?;
    info!(
        trace = %path.display(),
        records = report.records,
        malformed = report.malformed,
        summary = %cache.stats().summary(),
        "trace replayed"
    );
    Ok(report)
}
