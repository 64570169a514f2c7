//! Internet address normalization.
//!
//! Converts between human-readable IP addresses, their canonical text, and
//! the 16-byte binary representation. IPv4 addresses travel through their
//! IPv4-mapped IPv6 form and come back out as dotted quads.
//! All logic is safe Rust with no syscalls.

pub mod binary;
pub mod canonical;
pub mod groups;
pub mod ipv4;
pub mod ipv6;

pub use binary::BINARY_LEN;
pub use canonical::{ZeroRun, longest_zero_run};
pub use groups::{AddressGroups, GROUP_COUNT};

use crate::error::AddrError;
use crate::options::ParseOptions;

/// Raw value of the IPv4 address family.
pub const AF_INET: i32 = 2;

/// Raw value of the IPv6 address family.
pub const AF_INET6: i32 = 10;

// ---------------------------------------------------------------------------
// normalize / to_binary / to_text
// ---------------------------------------------------------------------------

/// Returns the canonical text form of `address`.
///
/// Equivalent to [`normalize_with`] under default options.
pub fn normalize(address: &str) -> Result<String, AddrError> {
    normalize_with(address, &ParseOptions::default())
}

/// Parses `address` and re-renders it canonically.
pub fn normalize_with(address: &str, opts: &ParseOptions) -> Result<String, AddrError> {
    AddressGroups::parse_with(address, opts).map(|groups| groups.to_string())
}

/// Converts text to its 16-byte network-order form (pton-equivalent).
///
/// Dotted-quad input yields the IPv4-mapped encoding.
pub fn to_binary(address: &str) -> Result<[u8; BINARY_LEN], AddrError> {
    to_binary_with(address, &ParseOptions::default())
}

/// [`to_binary`] under explicit options.
pub fn to_binary_with(address: &str, opts: &ParseOptions) -> Result<[u8; BINARY_LEN], AddrError> {
    AddressGroups::parse_with(address, opts).map(|groups| groups.to_bytes())
}

/// Converts 16 network-order bytes to canonical text (ntop-equivalent).
///
/// Fails with `InvalidLength` for any other input size.
pub fn to_text(bytes: &[u8]) -> Result<String, AddrError> {
    AddressGroups::from_bytes(bytes).map(|groups| groups.to_string())
}

// ---------------------------------------------------------------------------
// Family-specific pton / ntop
// ---------------------------------------------------------------------------

/// Address family selector for [`pton`] and [`ntop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    /// 4-byte IPv4.
    Inet,
    /// 16-byte IPv6.
    Inet6,
}

impl AddressFamily {
    /// Maps a raw `AF_*` value.
    pub const fn from_raw(af: i32) -> Result<Self, AddrError> {
        match af {
            AF_INET => Ok(Self::Inet),
            AF_INET6 => Ok(Self::Inet6),
            family => Err(AddrError::UnsupportedFamily { family }),
        }
    }

    #[must_use]
    pub const fn raw(self) -> i32 {
        match self {
            Self::Inet => AF_INET,
            Self::Inet6 => AF_INET6,
        }
    }

    /// Size of the binary form.
    #[must_use]
    pub const fn binary_len(self) -> usize {
        match self {
            Self::Inet => 4,
            Self::Inet6 => BINARY_LEN,
        }
    }
}

/// Converts an IP address from text to binary form for one family.
///
/// `Inet` accepts only a dotted quad and yields 4 bytes; `Inet6` accepts
/// every textual syntax and yields 16. Octets are parsed strictly (no
/// leading zeros).
pub fn pton(family: AddressFamily, src: &str) -> Result<Vec<u8>, AddrError> {
    let opts = ParseOptions::strict();
    match family {
        AddressFamily::Inet => ipv4::parse_ipv4(src, opts.octets).map(|octets| octets.to_vec()),
        AddressFamily::Inet6 => to_binary_with(src, &opts).map(|bytes| bytes.to_vec()),
    }
}

/// Converts an IP address from binary to text form for one family.
///
/// `src` must be exactly [`AddressFamily::binary_len`] bytes.
pub fn ntop(family: AddressFamily, src: &[u8]) -> Result<String, AddrError> {
    match family {
        AddressFamily::Inet => {
            let octets: [u8; 4] = src.try_into().map_err(|_| AddrError::InvalidLength {
                len: src.len(),
                expected: family.binary_len(),
            })?;
            Ok(ipv4::format_ipv4(&octets))
        }
        AddressFamily::Inet6 => to_text(src),
    }
}

// ===========================================================================
// Tests
// ===========================================================================
