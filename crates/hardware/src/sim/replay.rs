//! Trace replay.
//!
//! This module drives a `CacheSim` from a stream of trace lines. It performs:
//! 1. **Filtering:** Instruction fetches are ignored; malformed lines are logged and skipped.
//! 2. **Dispatch:** Loads and stores resolve one access, modifies resolve two on the same address.
//! 3. **Reporting:** Each data record's outcomes are passed to a `ReplayObserver`.
//!
//! Replay is strictly sequential: a record is fully resolved, including all
//! line aging, before the next line is read.

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use super::trace::AccessRecord;
use crate::common::data::AccessKind;
use crate::common::error::{ParseError, TraceError};
use crate::core::cache::{AccessOutcome, CacheSim};

/// Receives the outcome of every replayed record.
///
/// Observation is a side channel only; the cache statistics are complete
/// whether or not anything listens.
pub trait ReplayObserver {
    /// Called once per Load/Store/Modify record with its one or two outcomes.
    ///
    /// # Errors
    ///
    /// An I/O error aborts the replay with `TraceError::Report`.
    fn on_record(&mut self, record: &AccessRecord, outcomes: &[AccessOutcome]) -> io::Result<()>;

    /// Called for each line that could not be parsed. `line_no` is 1-based.
    fn on_malformed(&mut self, _line_no: u64, _line: &str, _error: &ParseError) {}
}

/// Observer that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl ReplayObserver for NullObserver {
    fn on_record(&mut self, _record: &AccessRecord, _outcomes: &[AccessOutcome]) -> io::Result<()> {
        Ok(())
    }
}

/// Observer that prints each record with its outcomes, e.g. `M 20,1 miss hit`.
#[derive(Debug)]
pub struct VerboseObserver<W: Write> {
    out: W,
}

impl<W: Write> VerboseObserver<W> {
    /// Wraps a writer.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReplayObserver for VerboseObserver<W> {
    fn on_record(&mut self, record: &AccessRecord, outcomes: &[AccessOutcome]) -> io::Result<()> {
        write!(
            self.out,
            "{} {:x},{}",
            record.kind, record.address, record.size
        )?;
        for outcome in outcomes {
            write!(self.out, " {outcome}")?;
        }
        writeln!(self.out)
    }
}

/// Line accounting for one replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplayReport {
    /// Lines read, including skipped ones.
    pub lines: u64,
    /// Load/Store/Modify records replayed.
    pub records: u64,
    /// Cache accesses resolved (Modify counts two).
    pub accesses: u64,
    /// Instruction-fetch records ignored.
    pub instructions: u64,
    /// Lines skipped because they did not parse.
    pub malformed: u64,
}

/// Replays trace records against a cache.
pub struct TraceReplayer<'a, O: ReplayObserver + ?Sized> {
    cache: &'a mut CacheSim,
    observer: &'a mut O,
    report: ReplayReport,
}

impl<O: ReplayObserver + ?Sized> std::fmt::Debug for TraceReplayer<'_, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraceReplayer")
            .field("cache", &self.cache)
            .field("report", &self.report)
            .finish_non_exhaustive()
    }
}

impl<'a, O: ReplayObserver + ?Sized> TraceReplayer<'a, O> {
    /// Creates a replayer that mutates `cache` and reports to `observer`.
    pub fn new(cache: &'a mut CacheSim, observer: &'a mut O) -> Self {
        Self {
            cache,
            observer,
            report: ReplayReport::default(),
        }
    }

    /// Resolves one record against the cache.
    ///
    /// Instruction records are counted and otherwise ignored. A Modify
    /// performs a load then a store to the same address.
    ///
    /// # Errors
    ///
    /// `TraceError::Report` if the observer fails.
    pub fn replay_record(&mut self, record: &AccessRecord) -> Result<(), TraceError> {
        let count = record.kind.cache_accesses();
        if count == 0 {
            self.report.instructions += 1;
            return Ok(());
        }

        let mut outcomes = [AccessOutcome::Hit; 2];
        for slot in &mut outcomes[..count] {
            *slot = self.cache.access(record.address);
        }
        let outcomes = &outcomes[..count];

        debug_assert!(
            record.kind != AccessKind::Modify || outcomes[1].is_hit(),
            "store half of a modify must hit the line its load installed"
        );
        debug!(
            op = %record.kind,
            addr = format_args!("{:#x}", record.address),
            size = record.size,
            ?outcomes,
            "replayed record"
        );

        self.report.records += 1;
        self.report.accesses += count as u64;
        self.observer
            .on_record(record, outcomes)
            .map_err(TraceError::Report)
    }

    /// Parses and replays one raw trace line. Malformed lines are skipped.
    ///
    /// # Errors
    ///
    /// `TraceError::Report` if the observer fails.
    pub fn replay_line(&mut self, line: &str) -> Result<(), TraceError> {
        self.report.lines += 1;
        match AccessRecord::parse(line) {
            Ok(record) => self.replay_record(&record),
            Err(ParseError::Empty) => Ok(()),
            Err(error) => {
                self.report.malformed += 1;
                warn!(line = self.report.lines, %error, "skipping malformed trace line");
                self.observer.on_malformed(self.report.lines, line, &error);
                Ok(())
            }
        }
    }

    /// Replays every line of `reader` until end of input.
    ///
    /// Lines that are not valid UTF-8 are decoded lossily and then fail to
    /// parse like any other malformed line.
    ///
    /// # Errors
    ///
    /// `TraceError::Read` if the reader fails; counts accumulated up to
    /// that point remain in the cache.
    pub fn replay<R: BufRead>(mut self, mut reader: R) -> Result<ReplayReport, TraceError> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            self.replay_line(line.trim_end_matches(['\r', '\n']))?;
        }

        debug!(
            lines = self.report.lines,
            records = self.report.records,
            accesses = self.report.accesses,
            malformed = self.report.malformed,
            "replay complete"
        );
        Ok(self.report)
    }

    /// Line accounting so far.
    pub const fn report(&self) -> &ReplayReport {
        &self.report
    }
}

/// Replays `reader` against `cache`, reporting to `observer`.
///
/// # Errors
///
/// See [`TraceReplayer::replay`].
pub fn replay_trace<R: BufRead, O: ReplayObserver + ?Sized>(
    cache: &mut CacheSim,
    reader: R,
    observer: &mut O,
) -> Result<ReplayReport, TraceError> {
    TraceReplayer::new(cache, observer).replay(reader)
}
