//! # Configuration Tests
//!
//! Tests for JSON deserialization, flag-over-file layering, and geometry
//! validation.

use std::fs;
use std::path::Path;

use csim_core::common::{ConfigError, MAX_CACHE_LINES};
use csim_core::config::{CacheConfig, CacheGeometry};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn full(s: u32, e: usize, b: u32, t: &str) -> CacheConfig {
    CacheConfig {
        set_bits: Some(s),
        associativity: Some(e),
        block_bits: Some(b),
        trace: Some(t.into()),
    }
}

// ══════════════════════════════════════════════════════════
// 1. Deserialization
// ══════════════════════════════════════════════════════════

#[test]
fn test_config_default_is_empty() {
    let config = CacheConfig::default();
    assert_eq!(config.set_bits, None);
    assert_eq!(config.associativity, None);
    assert_eq!(config.block_bits, None);
    assert_eq!(config.trace, None);
}

#[test]
fn test_json_flag_letter_aliases() {
    let json = r#"{ "s": 4, "E": 1, "b": 4, "t": "traces/yi.trace" }"#;
    let config: CacheConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config, full(4, 1, 4, "traces/yi.trace"));
}

#[test]
fn test_json_long_names() {
    let json = r#"{ "set_bits": 2, "associativity": 4, "block_bits": 3, "trace": "t.trace" }"#;
    let config: CacheConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config, full(2, 4, 3, "t.trace"));
}

#[test]
fn test_json_partial_leaves_fields_unset() {
    let config: CacheConfig = serde_json::from_str(r#"{ "E": 2 }"#).unwrap();
    assert_eq!(config.associativity, Some(2));
    assert_eq!(config.set_bits, None);
    assert_eq!(config.trace, None);
}

#[test]
fn test_json_unknown_field_rejected() {
    let result: Result<CacheConfig, _> = serde_json::from_str(r#"{ "s": 1, "policy": "fifo" }"#);
    assert!(result.is_err());
}

#[test]
fn test_json_negative_rejected() {
    let result: Result<CacheConfig, _> = serde_json::from_str(r#"{ "s": -1 }"#);
    assert!(result.is_err());
}

// ══════════════════════════════════════════════════════════
// 2. File loading
// ══════════════════════════════════════════════════════════

#[test]
fn test_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache.json");
    fs::write(&path, r#"{ "s": 5, "E": 1, "b": 5, "t": "traces/trans.trace" }"#).unwrap();

    let config = CacheConfig::from_json_file(&path).unwrap();
    assert_eq!(config, full(5, 1, 5, "traces/trans.trace"));
}

#[test]
fn test_from_json_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let err = CacheConfig::from_json_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Read { path: p, .. } if p == path));
}

#[test]
fn test_from_json_file_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "{ s = 4 }").unwrap();

    let err = CacheConfig::from_json_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

// ══════════════════════════════════════════════════════════
// 3. Layering
// ══════════════════════════════════════════════════════════

#[test]
fn test_merge_overrides_win() {
    let file = full(4, 1, 4, "file.trace");
    let flags = CacheConfig {
        associativity: Some(8),
        trace: Some("flag.trace".into()),
        ..CacheConfig::default()
    };

    let merged = file.merge(flags);
    assert_eq!(merged, full(4, 8, 4, "flag.trace"));
}

#[test]
fn test_merge_with_empty_is_identity() {
    let file = full(1, 2, 3, "x.trace");
    assert_eq!(file.clone().merge(CacheConfig::default()), file);
    assert_eq!(CacheConfig::default().merge(file.clone()), file);
}

// ══════════════════════════════════════════════════════════
// 4. Validation
// ══════════════════════════════════════════════════════════

/// Missing parameters are reported by flag, in `s`, `E`, `b` order.
#[rstest]
#[case(CacheConfig { set_bits: None, ..full(1, 1, 1, "t") }, "-s")]
#[case(CacheConfig { associativity: None, ..full(1, 1, 1, "t") }, "-E")]
#[case(CacheConfig { block_bits: None, ..full(1, 1, 1, "t") }, "-b")]
#[case(CacheConfig::default(), "-s")]
fn test_missing_parameter(#[case] config: CacheConfig, #[case] flag: &str) {
    let err = config.geometry().unwrap_err();
    assert!(matches!(err, ConfigError::MissingArgument(f) if f == flag));
}

#[test]
fn test_missing_trace() {
    let config = CacheConfig {
        trace: None,
        ..full(1, 1, 1, "t")
    };
    assert!(config.geometry().is_ok());
    assert!(matches!(
        config.trace_path(),
        Err(ConfigError::MissingArgument("-t"))
    ));
}

#[test]
fn test_trace_path() {
    let config = full(1, 1, 1, "traces/yi.trace");
    assert_eq!(config.trace_path().unwrap(), Path::new("traces/yi.trace"));
}

#[rstest]
#[case(0, 1, 1, "s")]
#[case(1, 0, 1, "E")]
#[case(1, 1, 0, "b")]
#[case(0, 0, 0, "s")]
fn test_zero_parameter(#[case] s: u32, #[case] e: usize, #[case] b: u32, #[case] name: &str) {
    let err = CacheGeometry::new(s, e, b).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroParameter(n) if n == name));
}

#[test]
fn test_too_wide_geometry() {
    let err = CacheGeometry::new(33, 1, 32).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::GeometryTooWide {
            set_bits: 33,
            block_bits: 32
        }
    ));
}

#[test]
fn test_capacity_overflow() {
    let err = CacheGeometry::new(32, 2, 1).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::CapacityOverflow {
            set_bits: 32,
            associativity: 2
        }
    ));

    let err = CacheGeometry::new(60, 1, 4).unwrap_err();
    assert!(matches!(err, ConfigError::CapacityOverflow { .. }));
}

/// Geometries whose line store would not fit in host memory are rejected
/// before anything is allocated.
#[rstest]
#[case(31, 2, 1)]
#[case(26, 2, 1)]
#[case(27, 1, 1)]
#[case(1, 1 << 26, 1)]
#[case(20, usize::MAX, 1)]
fn test_unallocatable_geometry_rejected(#[case] s: u32, #[case] e: usize, #[case] b: u32) {
    let err = CacheGeometry::new(s, e, b).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::CapacityOverflow { set_bits, associativity }
            if set_bits == s && associativity == e
    ));
}

#[test]
fn test_line_cap_is_inclusive() {
    let geometry = CacheGeometry::new(26, 1, 1).unwrap();
    assert_eq!(geometry.total_lines() as u64, MAX_CACHE_LINES);

    let geometry = CacheGeometry::new(25, 2, 6).unwrap();
    assert_eq!(geometry.num_sets(), 1 << 25);
    assert_eq!(geometry.total_lines() as u64, MAX_CACHE_LINES);
}

#[test]
fn test_geometry_derived_values() {
    let geometry = CacheGeometry::new(4, 2, 5).unwrap();
    assert_eq!(geometry.set_bits(), 4);
    assert_eq!(geometry.block_bits(), 5);
    assert_eq!(geometry.num_sets(), 16);
    assert_eq!(geometry.associativity(), 2);
    assert_eq!(geometry.block_bytes(), 32);
    assert_eq!(geometry.total_lines(), 32);
    assert_eq!(geometry.layout().set_bits, 4);
    assert_eq!(geometry.layout().block_bits, 5);
}

#[test]
fn test_geometry_from_config() {
    let geometry = full(2, 4, 3, "t").geometry().unwrap();
    assert_eq!(geometry, CacheGeometry::new(2, 4, 3).unwrap());
}

/// `s + b = 64` is the widest legal layout; the tag is then empty.
#[test]
fn test_full_width_geometry_allowed() {
    let geometry = CacheGeometry::new(1, 1, 63).unwrap();
    assert_eq!(geometry.num_sets(), 2);
    assert_eq!(geometry.block_bytes(), 1 << 63);
}
