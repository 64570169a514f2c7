//! Conformance report generation.

use serde::{Deserialize, Serialize};

use crate::verify::VerificationResult;

/// Summary of one or more runner passes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformanceReport {
    pub title: String,
    pub mode: String,
    pub timestamp: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<VerificationResult>,
}

impl ConformanceReport {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        mode: impl Into<String>,
        timestamp: impl Into<String>,
        results: Vec<VerificationResult>,
    ) -> Self {
        let passed = results.iter().filter(|r| r.passed).count();
        Self {
            title: title.into(),
            mode: mode.into(),
            timestamp: timestamp.into(),
            total: results.len(),
            passed,
            failed: results.len() - passed,
            results,
        }
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Render as markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", self.title));
        out.push_str(&format!("- Mode: {}\n", self.mode));
        out.push_str(&format!("- Generated: {}\n", self.timestamp));
        out.push_str(&format!(
            "- Passed: {}/{} ({} failed)\n\n",
            self.passed, self.total, self.failed
        ));
        out.push_str("| Case | Function | Reference | Status |\n");
        out.push_str("|------|----------|-----------|--------|\n");
        for r in &self.results {
            let status = if r.passed { "PASS" } else { "FAIL" };
            out.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                r.case_name, r.function, r.reference, status
            ));
        }

        let failures: Vec<&VerificationResult> =
            self.results.iter().filter(|r| !r.passed).collect();
        if !failures.is_empty() {
            out.push_str("\n## Failures\n");
            for r in failures {
                out.push_str(&format!("\n### {}\n\n```\n", r.case_name));
                out.push_str(r.diff.as_deref().unwrap_or("(no diff)"));
                out.push_str("\n```\n");
            }
        }
        out
    }

    /// Render as pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
