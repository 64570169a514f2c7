//! Parser options.
//!
//! The only tunable is how dotted-quad octets are read:
//! - `decimal` (default): standard decimal parsing. Leading zeros are
//!   accepted (`010` is ten) as long as the octet has at most three digits.
//! - `strict`: leading zeros are rejected, as `inet_pton` does, so that no
//!   octet can be mistaken for octal.
//!
//! Options are always passed in by the caller. Nothing here reads the
//! environment.

/// How decimal octets in dotted-quad text are validated.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OctetPolicy {
    /// Leading zeros allowed, at most three digits per octet.
    #[default]
    Decimal,
    /// No leading zeros (`0` itself is fine).
    Strict,
}

impl OctetPolicy {
    /// Parse from string (case-insensitive). Unknown values map to `Decimal`.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" | "pton" | "inet_pton" | "no-leading-zeros" => Self::Strict,
            _ => Self::Decimal,
        }
    }

    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Decimal => "decimal",
            Self::Strict => "strict",
        }
    }

    /// Returns true if a leading zero makes an octet invalid.
    #[must_use]
    pub const fn rejects_leading_zeros(self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Options for the text parsers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParseOptions {
    pub octets: OctetPolicy,
}

impl ParseOptions {
    /// Options matching the socket-layer `inet_pton` contract.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            octets: OctetPolicy::Strict,
        }
    }

    #[must_use]
    pub const fn with_octets(mut self, octets: OctetPolicy) -> Self {
        self.octets = octets;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_octet_policies() {
        assert_eq!(OctetPolicy::from_str_loose("strict"), OctetPolicy::Strict);
        assert_eq!(OctetPolicy::from_str_loose("STRICT"), OctetPolicy::Strict);
        assert_eq!(OctetPolicy::from_str_loose("pton"), OctetPolicy::Strict);
        assert_eq!(OctetPolicy::from_str_loose("decimal"), OctetPolicy::Decimal);
        assert_eq!(OctetPolicy::from_str_loose(" bogus "), OctetPolicy::Decimal);
    }

    #[test]
    fn default_is_decimal() {
        assert_eq!(ParseOptions::default().octets, OctetPolicy::Decimal);
        assert!(!OctetPolicy::default().rejects_leading_zeros());
    }

    #[test]
    fn strict_options_reject_leading_zeros() {
        assert!(ParseOptions::strict().octets.rejects_leading_zeros());
        assert_eq!(
            ParseOptions::strict().with_octets(OctetPolicy::Decimal),
            ParseOptions::default()
        );
    }

    #[test]
    fn names_round_trip_through_loose_parser() {
        for policy in [OctetPolicy::Decimal, OctetPolicy::Strict] {
            assert_eq!(OctetPolicy::from_str_loose(policy.as_str()), policy);
        }
    }
}
