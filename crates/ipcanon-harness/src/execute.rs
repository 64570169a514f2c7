//! Dispatches a fixture case to the core operations.
//!
//! Every operation's result is flattened to one string so it can be compared
//! with `FixtureCase::expected_output`: text results verbatim, binary results
//! as lowercase hex, failures as `err:<code>`.

use ipcanon_core::{
    AddrError, AddressFamily, ParseOptions, normalize_with, ntop, pton, to_binary_with, to_text,
};

use crate::config::policy_for_mode;

/// Prefix marking an expected failure.
pub const ERROR_PREFIX: &str = "err:";

/// Renders bytes as lowercase hex.
#[must_use]
pub fn hex_lower(bytes: &[u8]) -> String {
    use std::fmt::Write;
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(&mut out, "{b:02x}");
    }
    out
}

/// Parses lowercase or uppercase hex; `None` on odd length or bad digits.
#[must_use]
pub fn parse_hex(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 || !s.is_ascii() {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect()
}

/// Flattens a core result into the fixture output form.
#[must_use]
pub fn render_outcome(result: Result<String, AddrError>) -> String {
    match result {
        Ok(text) => text,
        Err(err) => format!("{ERROR_PREFIX}{}", err.code()),
    }
}

/// The outer `Err` rejects the fixture; the inner one is a core failure the
/// fixture may expect.
fn family_input(inputs: &serde_json::Value) -> Result<Result<AddressFamily, AddrError>, String> {
    match inputs.get("family").and_then(|v| v.as_str()) {
        Some("inet" | "AF_INET") => Ok(Ok(AddressFamily::Inet)),
        Some("inet6" | "AF_INET6") | None => Ok(Ok(AddressFamily::Inet6)),
        Some(other) => other
            .parse::<i32>()
            .map(AddressFamily::from_raw)
            .map_err(|_| format!("unknown family '{other}'")),
    }
}

fn str_input<'a>(inputs: &'a serde_json::Value, key: &str) -> Result<&'a str, String> {
    inputs
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing string input '{key}'"))
}

fn bytes_input(inputs: &serde_json::Value) -> Result<Vec<u8>, String> {
    let raw = str_input(inputs, "bytes_hex")?;
    parse_hex(raw).ok_or_else(|| format!("bad hex in 'bytes_hex': {raw:?}"))
}

/// Executes one fixture operation under `mode` and returns its flattened
/// output. `Err` means the fixture itself is unusable (unknown function or
/// missing inputs), not that the operation failed.
pub fn execute_fixture_case(
    function: &str,
    inputs: &serde_json::Value,
    mode: &str,
) -> Result<String, String> {
    let opts = ParseOptions::default().with_octets(policy_for_mode(mode));
    let output = match function {
        "normalize" => render_outcome(normalize_with(str_input(inputs, "address")?, &opts)),
        "to_binary" => render_outcome(
            to_binary_with(str_input(inputs, "address")?, &opts).map(|b| hex_lower(&b)),
        ),
        "to_text" => render_outcome(to_text(&bytes_input(inputs)?)),
        "pton" => match family_input(inputs)? {
            Ok(family) => render_outcome(
                pton(family, str_input(inputs, "address")?).map(|b| hex_lower(&b)),
            ),
            Err(err) => render_outcome(Err(err)),
        },
        "ntop" => match family_input(inputs)? {
            Ok(family) => render_outcome(ntop(family, &bytes_input(inputs)?)),
            Err(err) => render_outcome(Err(err)),
        },
        other => return Err(format!("unknown function '{other}'")),
    };
    Ok(output)
}
