//! Cache model.
//!
//! This module contains the simulated hardware: the set-associative cache,
//! its line storage, and the access-resolution algorithm that classifies each
//! access and maintains LRU ages.

/// Set-associative cache with age-counter LRU replacement.
pub mod cache;

pub use self::cache::{AccessOutcome, CacheSim};
