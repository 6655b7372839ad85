#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use csv_insight::dataset::Dataset;

/// Returns the absolute path to a fixture under `tests/data`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Loads a fixture CSV from disk into a parsed dataset.
pub fn load_fixture(name: &str) -> Dataset {
    let path = fixture_path(name);
    let bytes = fs::read(&path).unwrap_or_else(|err| panic!("reading fixture {path:?}: {err}"));
    Dataset::from_bytes(&bytes).unwrap_or_else(|err| panic!("parsing fixture {path:?}: {err}"))
}
