//! Set-Associative Cache Simulator.
//!
//! This module implements a set-associative cache with LRU replacement. It
//! models residency only: each access is classified as a hit, a miss, or a
//! miss that evicts a valid line, and the outcome is folded into the cache's
//! statistics. No block contents, timing, or write policy are modeled.

/// Flat line storage with per-set lookup, aging, and victim selection.
pub mod store;

use std::fmt;

use tracing::trace;

use self::store::CacheStore;
use crate::common::addr::AddressLayout;
use crate::config::CacheGeometry;
use crate::stats::CacheStats;

/// Classification of a single cache access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessOutcome {
    /// The tag was resident.
    Hit,
    /// The tag was absent and was installed in a free line.
    Miss,
    /// The tag was absent, the set was full, and its LRU line was replaced.
    MissWithEviction,
}

impl AccessOutcome {
    /// Whether the access hit.
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }

    /// Whether the access displaced a valid line.
    pub const fn evicted(self) -> bool {
        matches!(self, Self::MissWithEviction)
    }
}

impl fmt::Display for AccessOutcome {
    /// Formats the outcome the way verbose traces print it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hit => write!(f, "hit"),
            Self::Miss => write!(f, "miss"),
            Self::MissWithEviction => write!(f, "miss eviction"),
        }
    }
}

/// Cache simulator: owns the line store and its statistics.
///
/// Constructed once from a validated `CacheGeometry`; the store is dropped
/// with the simulator.
#[derive(Debug)]
pub struct CacheSim {
    store: CacheStore,
    layout: AddressLayout,
    stats: CacheStats,
}

impl CacheSim {
    /// Creates an empty cache with the given shape.
    ///
    /// # Arguments
    ///
    /// * `geometry` - Validated set count, associativity, and address layout.
    pub fn new(geometry: &CacheGeometry) -> Self {
        Self {
            store: CacheStore::new(geometry.num_sets(), geometry.associativity()),
            layout: geometry.layout(),
            stats: CacheStats::default(),
        }
    }

    /// Resolves one access to `addr`.
    ///
    /// On a hit the matching line becomes most recently used and every other
    /// line in the set ages. On a miss every line in the set ages, then the
    /// tag is installed in the lowest free way, or in place of the oldest
    /// line if the set is full.
    ///
    /// # Returns
    ///
    /// The outcome, which has already been recorded in `stats()`.
    pub fn access(&mut self, addr: u64) -> AccessOutcome {
        let fields = self.layout.decompose(addr);
        let set = fields.set_index;

        let outcome = if let Some(way) = self.store.find(set, fields.tag) {
            self.store.touch(set, way);
            AccessOutcome::Hit
        } else {
            self.store.age(set);
            if let Some(way) = self.store.find_free(set) {
                self.store.install(set, way, fields.tag);
                AccessOutcome::Miss
            } else {
                let victim = self.store.find_lru(set);
                self.store.install(set, victim, fields.tag);
                AccessOutcome::MissWithEviction
            }
        };

        trace!(
            addr = format_args!("{addr:#x}"),
            set,
            tag = format_args!("{:#x}", fields.tag),
            %outcome,
            "cache access"
        );

        self.stats.record(outcome);
        outcome
    }

    /// Whether the block containing `addr` is resident. Does not age any line.
    pub fn contains(&self, addr: u64) -> bool {
        let fields = self.layout.decompose(addr);
        self.store.contains(fields.set_index, fields.tag)
    }

    /// Counters accumulated so far.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Read-only view of the line store.
    pub const fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Address layout this cache decomposes with.
    pub const fn layout(&self) -> AddressLayout {
        self.layout
    }
}
