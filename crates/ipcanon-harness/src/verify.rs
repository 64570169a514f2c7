//! Comparison of one executed case against its fixture expectation.

use serde::{Deserialize, Serialize};

use crate::diff::render_diff;
use crate::fixtures::FixtureCase;

/// Outcome of running one fixture case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    pub case_name: String,
    pub reference: String,
    pub function: String,
    pub passed: bool,
    pub expected: String,
    pub actual: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
    /// Wall time of the core call.
    #[serde(default)]
    pub latency_ns: u64,
}

impl VerificationResult {
    /// Compares `actual` with the expected output of `case`. A mismatch
    /// carries a rendered diff.
    #[must_use]
    pub fn compare(case: &FixtureCase, case_name: String, actual: String, latency_ns: u64) -> Self {
        let passed = actual == case.expected_output;
        let diff = (!passed).then(|| render_diff(&case.expected_output, &actual));
        Self {
            case_name,
            reference: case.reference.clone(),
            function: case.function.clone(),
            passed,
            expected: case.expected_output.clone(),
            actual,
            diff,
            latency_ns,
        }
    }
}
