//! Fixture loading and management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// A single fixture test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    /// Operation under test: `normalize`, `to_binary`, `to_text`, `pton`, `ntop`.
    pub function: String,
    /// RFC section or other provenance for the expectation.
    pub reference: String,
    /// Input parameters (`address`, `bytes_hex`, `family`).
    pub inputs: serde_json::Value,
    /// Expected output; binary values are lowercase hex, failures `err:<code>`.
    pub expected_output: String,
    /// Octet policy this case applies to: `decimal`, `strict`, or `both`.
    pub mode: String,
}

/// A collection of fixture cases for one operation family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Family name.
    pub family: String,
    /// UTC timestamp of capture.
    pub captured_at: String,
    /// Individual test cases.
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load fixture set from a file path.
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content).map_err(|source| HarnessError::Fixture {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Lists fixture files: `path` itself if it is a file, otherwise every
/// `*.json` directly under it, sorted by name.
pub fn fixture_paths(path: &Path) -> Result<Vec<PathBuf>, HarnessError> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let p = entry?.path();
        if p.extension().is_some_and(|ext| ext == "json") {
            paths.push(p);
        }
    }
    if paths.is_empty() {
        return Err(HarnessError::NoFixtures(path.to_path_buf()));
    }
    paths.sort();
    Ok(paths)
}

/// Loads every fixture set under `path` (see [`fixture_paths`]).
pub fn load_fixture_sets(path: &Path) -> Result<Vec<(PathBuf, FixtureSet)>, HarnessError> {
    fixture_paths(path)?
        .into_iter()
        .map(|p| FixtureSet::from_file(&p).map(|set| (p, set)))
        .collect()
}
