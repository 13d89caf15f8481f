use csim_core::common::AddressLayout;
use csim_core::config::CacheGeometry;
use csim_core::sim::replay::replay_trace;
use csim_core::sim::{NullObserver, ReplayReport};
use csim_core::stats::Summary;
use csim_core::{AccessOutcome, CacheSim};
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A cache plus helpers for driving it from addresses or inline traces.
pub struct TestContext {
    pub cache: CacheSim,
    pub layout: AddressLayout,
}

impl TestContext {
    /// Builds a cache with `2^s` sets of `e` lines and `2^b`-byte blocks.
    pub fn new(s: u32, e: usize, b: u32) -> Self {
        init_tracing();
        let geometry = CacheGeometry::new(s, e, b).unwrap();
        Self {
            cache: CacheSim::new(&geometry),
            layout: geometry.layout(),
        }
    }

    /// Resolves each address in order and returns the outcomes.
    pub fn access_all(&mut self, addrs: &[u64]) -> Vec<AccessOutcome> {
        addrs.iter().map(|&a| self.cache.access(a)).collect()
    }

    /// Replays an inline trace with no observer.
    pub fn replay(&mut self, trace: &str) -> ReplayReport {
        replay_trace(&mut self.cache, trace.as_bytes(), &mut NullObserver).unwrap()
    }

    /// Builds an address from its fields under this cache's layout.
    pub fn addr(&self, tag: u64, set: u64, offset: u64) -> u64 {
        compose(self.layout, tag, set, offset)
    }

    pub fn summary(&self) -> Summary {
        self.cache.stats().summary()
    }
}

/// Inverse of `AddressLayout::decompose` for in-range fields.
pub fn compose(layout: AddressLayout, tag: u64, set: u64, offset: u64) -> u64 {
    (tag << (layout.set_bits + layout.block_bits)) | (set << layout.block_bits) | offset
}
