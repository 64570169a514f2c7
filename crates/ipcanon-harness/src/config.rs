//! Harness runtime configuration.
//!
//! The default octet policy is set via the `IPCANON_OCTET_POLICY`
//! environment variable:
//! - `decimal` (default): leading zeros in dotted-quad octets are accepted.
//! - `strict`: leading zeros are rejected, matching `inet_pton`.
//!
//! Unknown values fall back to `decimal`. The variable is read once per
//! process and cached.

use std::sync::atomic::{AtomicU8, Ordering};

use ipcanon_core::OctetPolicy;

/// Environment variable naming the default octet policy.
pub const OCTET_POLICY_ENV: &str = "IPCANON_OCTET_POLICY";

// Atomic cache: 0=unresolved, 1=Decimal, 2=Strict.
static CACHED_POLICY: AtomicU8 = AtomicU8::new(0);

const POLICY_UNRESOLVED: u8 = 0;
const POLICY_DECIMAL: u8 = 1;
const POLICY_STRICT: u8 = 2;

fn policy_to_u8(policy: OctetPolicy) -> u8 {
    match policy {
        OctetPolicy::Decimal => POLICY_DECIMAL,
        OctetPolicy::Strict => POLICY_STRICT,
    }
}

fn u8_to_policy(v: u8) -> OctetPolicy {
    match v {
        POLICY_STRICT => OctetPolicy::Strict,
        _ => OctetPolicy::Decimal,
    }
}

/// Get the configured octet policy (reads env var on first call, caches thereafter).
///
/// Two threads racing on the first call both read the same variable, so the
/// value they store is identical.
#[must_use]
pub fn octet_policy() -> OctetPolicy {
    let cached = CACHED_POLICY.load(Ordering::Acquire);
    if cached != POLICY_UNRESOLVED {
        return u8_to_policy(cached);
    }

    let policy = std::env::var(OCTET_POLICY_ENV)
        .map(|v| OctetPolicy::from_str_loose(&v))
        .unwrap_or_default();
    CACHED_POLICY.store(policy_to_u8(policy), Ordering::Release);
    policy
}

/// Maps a runner mode string (`decimal`, `strict`) to a policy, falling back
/// to the configured default for anything else.
#[must_use]
pub fn policy_for_mode(mode: &str) -> OctetPolicy {
    match mode.to_ascii_lowercase().as_str() {
        "decimal" => OctetPolicy::Decimal,
        "strict" => OctetPolicy::Strict,
        _ => octet_policy(),
    }
}
