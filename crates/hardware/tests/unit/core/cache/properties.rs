//! Replacement invariants over random access streams.
//!
//! Each generated stream is resolved by `CacheSim` and, in lockstep, by a
//! plain recency-list model of true LRU. Because every access to a set ages
//! all of its lines, age counters order a full set exactly like the list, so
//! the two must agree on every outcome.

use csim_core::AccessOutcome;
use proptest::prelude::*;

use crate::common::harness::TestContext;

/// Reference LRU: each set is a list of tags, most recently used first.
struct ListLru {
    sets: Vec<Vec<u64>>,
    ways: usize,
}

impl ListLru {
    fn new(num_sets: usize, ways: usize) -> Self {
        Self {
            sets: vec![Vec::new(); num_sets],
            ways,
        }
    }

    fn access(&mut self, set: usize, tag: u64) -> AccessOutcome {
        let lines = &mut self.sets[set];
        if let Some(pos) = lines.iter().position(|&t| t == tag) {
            let t = lines.remove(pos);
            lines.insert(0, t);
            return AccessOutcome::Hit;
        }
        lines.insert(0, tag);
        if lines.len() > self.ways {
            lines.pop();
            AccessOutcome::MissWithEviction
        } else {
            AccessOutcome::Miss
        }
    }
}

fn geometry() -> impl Strategy<Value = (u32, usize, u32)> {
    (1u32..=3, 1usize..=4, 1u32..=3)
}

/// Addresses drawn from a narrow range so sets fill and conflict.
fn stream() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..512, 1..200)
}

proptest! {
    #[test]
    fn counters_are_consistent((s, e, b) in geometry(), addrs in stream()) {
        let mut ctx = TestContext::new(s, e, b);
        let outcomes = ctx.access_all(&addrs);
        let stats = *ctx.cache.stats();

        prop_assert_eq!(stats.hits + stats.misses, addrs.len() as u64);
        prop_assert!(stats.evictions <= stats.misses);
        prop_assert_eq!(
            stats.evictions,
            outcomes.iter().filter(|o| o.evicted()).count() as u64
        );
    }

    #[test]
    fn outcome_matches_set_state((s, e, b) in geometry(), addrs in stream()) {
        let mut ctx = TestContext::new(s, e, b);
        for addr in addrs {
            let set = ctx.layout.decompose(addr).set_index;
            let resident = ctx.cache.contains(addr);
            let full = ctx.cache.store().occupancy(set) == e;

            let outcome = ctx.cache.access(addr);
            let expected = match (resident, full) {
                (true, _) => AccessOutcome::Hit,
                (false, false) => AccessOutcome::Miss,
                (false, true) => AccessOutcome::MissWithEviction,
            };
            prop_assert_eq!(outcome, expected);
            prop_assert!(ctx.cache.contains(addr));
            prop_assert!(ctx.cache.store().occupancy(set) <= e);
        }
    }

    #[test]
    fn agrees_with_list_lru((s, e, b) in geometry(), addrs in stream()) {
        let mut ctx = TestContext::new(s, e, b);
        let mut model = ListLru::new(1 << s, e);
        for addr in addrs {
            let fields = ctx.layout.decompose(addr);
            let expected = model.access(fields.set_index, fields.tag);
            prop_assert_eq!(ctx.cache.access(addr), expected);
        }
    }

    /// The store half of a Modify always hits the line its load installed.
    #[test]
    fn repeat_access_always_hits((s, e, b) in geometry(), addrs in stream()) {
        let mut ctx = TestContext::new(s, e, b);
        for addr in addrs {
            let _ = ctx.cache.access(addr);
            prop_assert_eq!(ctx.cache.access(addr), AccessOutcome::Hit);
        }
    }
}
