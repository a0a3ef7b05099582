//! Test infrastructure for ADIF parsing
//!
//! Provides fixture loading and seeded random log generation.
#![allow(dead_code)]

mod generators;

use std::path::PathBuf;

pub use generators::Gen;

/// Path of a file under `tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

/// Raw bytes of a fixture file.
pub fn fixture_bytes(name: &str) -> Vec<u8> {
    std::fs::read(fixture(name)).unwrap_or_else(|e| panic!("reading fixture {}: {}", name, e))
}
