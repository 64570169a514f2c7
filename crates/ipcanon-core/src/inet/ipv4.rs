//! Dotted-quad IPv4 parsing and rendering.

use crate::error::AddrError;
use crate::options::OctetPolicy;

/// Parse a dotted-quad IPv4 text address into exactly 4 bytes.
///
/// The text must hold exactly four non-empty, all-digit parts. A part whose
/// value exceeds 255 is `OutOfRange`; anything else malformed (wrong part
/// count, stray characters, more than three digits, a leading zero under
/// [`OctetPolicy::Strict`]) is `InvalidFormat`.
pub fn parse_ipv4(s: &str, policy: OctetPolicy) -> Result<[u8; 4], AddrError> {
    if s.is_empty() || s.split('.').count() != 4 {
        return Err(AddrError::InvalidFormat);
    }

    let mut octets = [0u8; 4];
    for (octet, part) in octets.iter_mut().zip(s.split('.')) {
        *octet = parse_octet(part, policy)?;
    }
    Ok(octets)
}

fn parse_octet(part: &str, policy: OctetPolicy) -> Result<u8, AddrError> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AddrError::InvalidFormat);
    }
    // Saturate so an absurdly long run of digits still reports as a range error.
    let value = part
        .bytes()
        .fold(0u32, |acc, b| acc.saturating_mul(10).saturating_add(u32::from(b - b'0')));
    let value = u8::try_from(value).map_err(|_| AddrError::OutOfRange)?;
    if part.len() > 3 {
        return Err(AddrError::InvalidFormat);
    }
    // Reject leading zeros (octal ambiguity).
    if policy.rejects_leading_zeros() && part.len() > 1 && part.starts_with('0') {
        return Err(AddrError::InvalidFormat);
    }
    Ok(value)
}

/// Formats 4 bytes as dotted-decimal text.
#[must_use]
pub fn format_ipv4(addr: &[u8; 4]) -> String {
    format!("{}.{}.{}.{}", addr[0], addr[1], addr[2], addr[3])
}
