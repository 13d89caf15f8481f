//! # Simulation Tests
//!
//! Trace parsing, replay dispatch and observation, and file loading.
