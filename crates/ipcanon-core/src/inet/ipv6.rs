//! Colon-hex IPv6 parsing with `::` expansion and an optional embedded
//! dotted-quad tail.

use crate::error::AddrError;
use crate::options::ParseOptions;

use super::groups::{GROUP_COUNT, ipv4_mapped_groups};
use super::ipv4::parse_ipv4;

/// Characters that may appear anywhere in an address.
fn is_address_byte(b: u8) -> bool {
    b.is_ascii_hexdigit() || b == b':' || b == b'.'
}

/// Parses any accepted textual address into 8 hextet groups.
///
/// Accepts pure IPv6 (with at most one `::`), pure dotted-quad IPv4 (which
/// becomes its IPv4-mapped form), and IPv6 whose final 32 bits are written as
/// an embedded dotted quad.
pub fn parse_groups(s: &str, opts: &ParseOptions) -> Result<[u16; GROUP_COUNT], AddrError> {
    if s.is_empty() || !s.bytes().all(is_address_byte) {
        return Err(AddrError::InvalidFormat);
    }

    if !s.contains(':') {
        let octets = parse_ipv4(s, opts.octets)?;
        return Ok(ipv4_mapped_groups(octets));
    }

    parse_ipv6(s, opts)
}

/// Parses colon-hex text (with or without an embedded dotted-quad tail).
pub fn parse_ipv6(s: &str, opts: &ParseOptions) -> Result<[u16; GROUP_COUNT], AddrError> {
    // Split on "::" -- at most one occurrence allowed.
    let (front_str, back_str, has_double_colon) = match s.find("::") {
        Some(pos) => {
            if s[pos + 2..].contains("::") {
                return Err(AddrError::AmbiguousCompression);
            }
            (&s[..pos], &s[pos + 2..], true)
        }
        None => (s, "", false),
    };

    // Only the final segment of the whole address may be a dotted quad.
    let tail_side = if has_double_colon { back_str } else { front_str };
    let (tail_hex, ipv4_suffix) = match tail_side.rsplit_once(':') {
        Some((head, last)) if last.contains('.') => {
            (Some(head), Some(parse_ipv4(last, opts.octets)?))
        }
        None if tail_side.contains('.') => (None, Some(parse_ipv4(tail_side, opts.octets)?)),
        _ => (Some(tail_side), None),
    };

    let (front_str, back_str) = if has_double_colon {
        (front_str, tail_hex.unwrap_or(""))
    } else {
        (tail_hex.unwrap_or(""), "")
    };

    let front_groups = parse_hextets(front_str)?;
    let back_groups = parse_hextets(back_str)?;

    // Count total groups. An IPv4 suffix counts as 2.
    let ipv4_group_count = if ipv4_suffix.is_some() { 2 } else { 0 };
    let total_explicit = front_groups.len() + back_groups.len() + ipv4_group_count;

    let zeros_needed = if has_double_colon {
        GROUP_COUNT
            .checked_sub(total_explicit)
            .ok_or(AddrError::AmbiguousCompression)?
    } else if total_explicit == GROUP_COUNT {
        0
    } else {
        return Err(AddrError::AmbiguousCompression);
    };

    let mut all_groups: Vec<u16> = Vec::with_capacity(GROUP_COUNT);
    all_groups.extend_from_slice(&front_groups);
    all_groups.resize(all_groups.len() + zeros_needed, 0);
    all_groups.extend_from_slice(&back_groups);
    if let Some(v4) = ipv4_suffix {
        all_groups.push(u16::from_be_bytes([v4[0], v4[1]]));
        all_groups.push(u16::from_be_bytes([v4[2], v4[3]]));
    }

    <[u16; GROUP_COUNT]>::try_from(all_groups).map_err(|_| AddrError::AmbiguousCompression)
}

/// Parses a colon-separated run of hextets. An empty side yields no groups.
fn parse_hextets(side: &str) -> Result<Vec<u16>, AddrError> {
    if side.is_empty() {
        return Ok(Vec::new());
    }
    side.split(':').map(parse_hextet).collect()
}

fn parse_hextet(g: &str) -> Result<u16, AddrError> {
    if g.is_empty() || g.contains('.') {
        return Err(AddrError::InvalidFormat);
    }
    if g.len() > 4 {
        // Five or more significant digits cannot fit in 16 bits; padding
        // zeros beyond four digits is merely malformed.
        return if g.trim_start_matches('0').len() > 4 {
            Err(AddrError::OutOfRange)
        } else {
            Err(AddrError::InvalidFormat)
        };
    }
    u16::from_str_radix(g, 16).map_err(|_| AddrError::InvalidFormat)
}
