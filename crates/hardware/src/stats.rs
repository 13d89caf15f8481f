//! Simulation statistics collection and reporting.
//!
//! This module tracks the outcome counters of a cache replay. It provides:
//! 1. **Accumulation:** Hit, miss, and eviction counters that only ever increase.
//! 2. **Summary:** An immutable `(hits, misses, evictions)` triple taken at the end of a replay.
//! 3. **Reporting:** The exact `hits:<n> misses:<n> evictions:<n>` line and the
//!    `.csim_results` artifact consumed by grading tools.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::common::constants::RESULTS_FILE;
use crate::common::error::SummaryError;
use crate::core::cache::AccessOutcome;

/// Running hit/miss/eviction counters for one cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Accesses whose tag was resident.
    pub hits: u64,
    /// Accesses whose tag was not resident.
    pub misses: u64,
    /// Misses that displaced a valid line.
    pub evictions: u64,
}

impl CacheStats {
    /// Folds one resolved access into the counters.
    ///
    /// `MissWithEviction` counts as both a miss and an eviction.
    #[inline]
    pub const fn record(&mut self, outcome: AccessOutcome) {
        match outcome {
            AccessOutcome::Hit => self.hits += 1,
            AccessOutcome::Miss => self.misses += 1,
            AccessOutcome::MissWithEviction => {
                self.misses += 1;
                self.evictions += 1;
            }
        }
    }

    /// Takes an immutable snapshot of the counters.
    pub const fn summary(&self) -> Summary {
        Summary {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
        }
    }
}

/// Final `(hits, misses, evictions)` triple of a replay.
///
/// `Display` renders the exact line graders compare against:
///
/// ```
/// use csim_core::stats::Summary;
///
/// let summary = Summary::new(4, 5, 2);
/// assert_eq!(summary.to_string(), "hits:4 misses:5 evictions:2");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Summary {
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl Summary {
    /// Creates a summary from explicit counts.
    pub const fn new(hits: u64, misses: u64, evictions: u64) -> Self {
        Self {
            hits,
            misses,
            evictions,
        }
    }

    /// Number of hits.
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of misses.
    pub const fn misses(&self) -> u64 {
        self.misses
    }

    /// Number of evictions.
    pub const fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Total resolved accesses (`hits + misses`).
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that hit, or `0.0` when nothing was accessed.
    pub fn hit_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// The result artifact contents: three space-separated integers and a newline.
    pub fn result_line(&self) -> String {
        format!("{} {} {}\n", self.hits, self.misses, self.evictions)
    }

    /// Writes `result_line()` to `RESULTS_FILE` inside `dir`, replacing any previous file.
    ///
    /// # Errors
    ///
    /// `SummaryError::Write` if the file cannot be created or written.
    pub fn write_results(&self, dir: &Path) -> Result<PathBuf, SummaryError> {
        let path = dir.join(RESULTS_FILE);
        fs::write(&path, self.result_line()).map_err(|source| SummaryError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits:{} misses:{} evictions:{}",
            self.hits, self.misses, self.evictions
        )
    }
}

impl From<CacheStats> for Summary {
    fn from(stats: CacheStats) -> Self {
        stats.summary()
    }
}
