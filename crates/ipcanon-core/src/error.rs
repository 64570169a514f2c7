//! Failure kinds reported by the parsers and codecs.

use thiserror::Error;

/// Every way an address conversion can fail.
///
/// Failures are terminal for the call that produced them; nothing is
/// partially parsed or coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum AddrError {
    /// Syntactic violation: stray characters, empty or misplaced groups,
    /// a malformed dotted quad.
    #[error("invalid address format")]
    InvalidFormat,
    /// A hextet above `0xffff` or an octet above 255.
    #[error("address component out of range")]
    OutOfRange,
    /// `::` usage that cannot be reconciled with the 8-group total.
    #[error("ambiguous or inconsistent `::` compression")]
    AmbiguousCompression,
    /// Binary input of the wrong size.
    #[error("binary address must be {expected} bytes, got {len}")]
    InvalidLength { len: usize, expected: usize },
    /// Raw address family value other than `AF_INET` / `AF_INET6`.
    #[error("unsupported address family {family}")]
    UnsupportedFamily { family: i32 },
}

impl AddrError {
    /// Stable snake_case identifier, used in fixtures and logs.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidFormat => "invalid_format",
            Self::OutOfRange => "out_of_range",
            Self::AmbiguousCompression => "ambiguous_compression",
            Self::InvalidLength { .. } => "invalid_length",
            Self::UnsupportedFamily { .. } => "unsupported_family",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let all = [
            AddrError::InvalidFormat,
            AddrError::OutOfRange,
            AddrError::AmbiguousCompression,
            AddrError::InvalidLength {
                len: 3,
                expected: 16,
            },
            AddrError::UnsupportedFamily { family: 99 },
        ];
        let mut codes: Vec<&str> = all.iter().map(AddrError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
    }

    #[test]
    fn invalid_length_message_names_both_sizes() {
        let err = AddrError::InvalidLength {
            len: 15,
            expected: 16,
        };
        assert_eq!(err.to_string(), "binary address must be 16 bytes, got 15");
    }
}
