//! Runs fixture sets under one octet policy.

use std::time::Instant;

use crate::execute::execute_fixture_case;
use crate::fixtures::{FixtureCase, FixtureSet};
use crate::verify::VerificationResult;

/// Prefix on the actual output of a case the harness could not execute.
pub const UNSUPPORTED_PREFIX: &str = "unsupported:";

const BOTH_MODES: &str = "both";

/// Executes the cases of a fixture set that apply to one mode.
pub struct TestRunner {
    pub campaign: String,
    /// `decimal` or `strict`.
    pub mode: String,
}

impl TestRunner {
    #[must_use]
    pub fn new(campaign: impl Into<String>, mode: impl Into<String>) -> Self {
        Self {
            campaign: campaign.into(),
            mode: mode.into(),
        }
    }

    /// Whether `case` runs under this runner's mode.
    #[must_use]
    pub fn applies_to(&self, case: &FixtureCase) -> bool {
        case.mode.eq_ignore_ascii_case(BOTH_MODES) || case.mode.eq_ignore_ascii_case(&self.mode)
    }

    pub fn run(&self, set: &FixtureSet) -> Vec<VerificationResult> {
        set.cases
            .iter()
            .filter(|case| self.applies_to(case))
            .map(|case| self.verify(case))
            .collect()
    }

    /// Executes one case under this runner's mode, whatever mode the case
    /// itself names.
    #[must_use]
    pub fn verify(&self, case: &FixtureCase) -> VerificationResult {
        let started = Instant::now();
        let actual = execute_fixture_case(&case.function, &case.inputs, &self.mode)
            .unwrap_or_else(|err| format!("{UNSUPPORTED_PREFIX}{err}"));
        let latency_ns = u64::try_from(started.elapsed().as_nanos()).unwrap_or(u64::MAX);
        VerificationResult::compare(case, self.label(case), actual, latency_ns)
    }

    // `both` cases are labelled with the active mode.
    fn label(&self, case: &FixtureCase) -> String {
        if case.mode.eq_ignore_ascii_case(BOTH_MODES) {
            format!("{} [{}]", case.name, self.mode)
        } else {
            case.name.clone()
        }
    }
}
