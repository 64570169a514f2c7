//! Conformance testing harness for ipcanon.
//!
//! This crate provides:
//! - Fixture loading: JSON reference data for every codec operation
//! - Execution: dispatch a fixture case to `ipcanon-core`
//! - Verification: compare outputs against fixtures, with diffs
//! - Report generation: markdown + JSON conformance reports
//! - Structured logging: JSONL run logs and an artifact index

#![forbid(unsafe_code)]

pub mod config;
pub mod diff;
pub mod error;
pub mod execute;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod structured_log;
pub mod verify;

pub use error::HarnessError;
pub use fixtures::{FixtureCase, FixtureSet};
pub use report::ConformanceReport;
pub use runner::TestRunner;
pub use verify::VerificationResult;
