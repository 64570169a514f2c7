//! The 8 x 16-bit group form every address is normalized through.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use crate::error::AddrError;
use crate::options::ParseOptions;

use super::{binary, canonical, ipv6};

/// Number of hextets in an IPv6 address.
pub const GROUP_COUNT: usize = 8;

/// Marker hextet of an IPv4-mapped address (`::ffff:a.b.c.d`).
pub const IPV4_MAPPED_MARKER: u16 = 0xffff;

/// Groups for the IPv4-mapped encoding of `octets`: 80 zero bits, 16 one
/// bits, then the 32 bits of the IPv4 address.
#[must_use]
pub const fn ipv4_mapped_groups(octets: [u8; 4]) -> [u16; GROUP_COUNT] {
    [
        0,
        0,
        0,
        0,
        0,
        IPV4_MAPPED_MARKER,
        u16::from_be_bytes([octets[0], octets[1]]),
        u16::from_be_bytes([octets[2], octets[3]]),
    ]
}

/// An IPv6 address as eight host-order hextets.
///
/// `Display` renders the canonical text; `FromStr` accepts every textual
/// syntax the parser does under default options.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AddressGroups(pub [u16; GROUP_COUNT]);

impl AddressGroups {
    /// The unspecified address `::`.
    pub const UNSPECIFIED: Self = Self([0; GROUP_COUNT]);

    /// Parses text under explicit options.
    pub fn parse_with(s: &str, opts: &ParseOptions) -> Result<Self, AddrError> {
        ipv6::parse_groups(s, opts).map(Self)
    }

    /// IPv4-mapped groups for a dotted-quad address.
    #[must_use]
    pub const fn from_ipv4(octets: [u8; 4]) -> Self {
        Self(ipv4_mapped_groups(octets))
    }

    /// Unpacks exactly 16 big-endian bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AddrError> {
        binary::unpack(bytes).map(Self)
    }

    /// Packs into 16 big-endian bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 16] {
        binary::pack(&self.0)
    }

    #[must_use]
    pub const fn groups(&self) -> &[u16; GROUP_COUNT] {
        &self.0
    }

    /// True when the upper 80 bits are zero, ignoring group 5.
    const fn has_zero_prefix(&self) -> bool {
        let g = &self.0;
        g[0] == 0 && g[1] == 0 && g[2] == 0 && g[3] == 0 && g[4] == 0
    }

    /// `::ffff:a.b.c.d`
    #[must_use]
    pub const fn is_ipv4_mapped(&self) -> bool {
        self.has_zero_prefix() && self.0[5] == IPV4_MAPPED_MARKER
    }

    /// Deprecated `::a.b.c.d` form.
    ///
    /// Only recognized when the embedded address has a non-zero upper half,
    /// so `::`, `::1` and other `::x` values keep their hex spelling.
    #[must_use]
    pub const fn is_ipv4_compatible(&self) -> bool {
        self.has_zero_prefix() && self.0[5] == 0 && self.0[6] != 0
    }

    /// The low 32 bits as IPv4 octets, when this value is IPv4-mapped or
    /// IPv4-compatible.
    #[must_use]
    pub const fn embedded_ipv4(&self) -> Option<[u8; 4]> {
        if self.is_ipv4_mapped() || self.is_ipv4_compatible() {
            Some(self.low_octets())
        } else {
            None
        }
    }

    pub(crate) const fn low_octets(&self) -> [u8; 4] {
        let hi = self.0[6].to_be_bytes();
        let lo = self.0[7].to_be_bytes();
        [hi[0], hi[1], lo[0], lo[1]]
    }
}

impl fmt::Display for AddressGroups {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        canonical::write_canonical(f, self)
    }
}

impl FromStr for AddressGroups {
    type Err = AddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, &ParseOptions::default())
    }
}

impl From<[u16; GROUP_COUNT]> for AddressGroups {
    fn from(groups: [u16; GROUP_COUNT]) -> Self {
        Self(groups)
    }
}

impl From<[u8; 16]> for AddressGroups {
    fn from(bytes: [u8; 16]) -> Self {
        Self(binary::unpack_array(&bytes))
    }
}

impl From<AddressGroups> for [u8; 16] {
    fn from(groups: AddressGroups) -> Self {
        groups.to_bytes()
    }
}

impl From<Ipv6Addr> for AddressGroups {
    fn from(addr: Ipv6Addr) -> Self {
        Self(addr.segments())
    }
}

impl From<AddressGroups> for Ipv6Addr {
    fn from(groups: AddressGroups) -> Self {
        Ipv6Addr::from(groups.0)
    }
}

impl From<Ipv4Addr> for AddressGroups {
    fn from(addr: Ipv4Addr) -> Self {
        Self::from_ipv4(addr.octets())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapped_groups_layout() {
        let g = AddressGroups::from_ipv4([192, 0, 2, 128]);
        assert_eq!(g.0, [0, 0, 0, 0, 0, 0xffff, 0xc000, 0x0280]);
        assert!(g.is_ipv4_mapped());
        assert!(!g.is_ipv4_compatible());
        assert_eq!(g.embedded_ipv4(), Some([192, 0, 2, 128]));
    }

    #[test]
    fn compatible_requires_nonzero_upper_half() {
        let compat = AddressGroups([0, 0, 0, 0, 0, 0, 0xc000, 0x0280]);
        assert!(compat.is_ipv4_compatible());
        assert_eq!(compat.embedded_ipv4(), Some([192, 0, 2, 128]));

        for g in [
            AddressGroups::UNSPECIFIED,
            AddressGroups([0, 0, 0, 0, 0, 0, 0, 1]),
            AddressGroups([0, 0, 0, 0, 0, 0, 0, 0xffff]),
        ] {
            assert!(!g.is_ipv4_compatible(), "{g:?}");
            assert_eq!(g.embedded_ipv4(), None);
        }
    }

    #[test]
    fn nonzero_prefix_is_never_embedded() {
        let g = AddressGroups([0, 0, 0, 0, 1, 0xffff, 0xc000, 0x0280]);
        assert!(!g.is_ipv4_mapped());
        assert_eq!(g.embedded_ipv4(), None);
    }

    #[test]
    fn std_conversions_agree() {
        let v6: Ipv6Addr = "2001:db8::1".parse().unwrap();
        let g = AddressGroups::from(v6);
        assert_eq!(g, "2001:db8::1".parse::<AddressGroups>().unwrap());
        assert_eq!(Ipv6Addr::from(g), v6);

        let v4 = Ipv4Addr::new(10, 1, 2, 3);
        assert_eq!(
            Ipv6Addr::from(AddressGroups::from(v4)),
            v4.to_ipv6_mapped()
        );
    }

    #[test]
    fn display_and_from_str() {
        let g: AddressGroups = "2001:DB8:0:0:1:0:0:1".parse().unwrap();
        assert_eq!(g.to_string(), "2001:db8::1:0:0:1");
        assert_eq!("nope".parse::<AddressGroups>(), Err(AddrError::InvalidFormat));
    }

    #[test]
    fn byte_conversions() {
        let mut bytes = [0u8; 16];
        bytes[15] = 1;
        let g = AddressGroups::from(bytes);
        assert_eq!(g.0[7], 1);
        assert_eq!(<[u8; 16]>::from(g), bytes);
        assert_eq!(AddressGroups::from_bytes(&bytes), Ok(g));
        assert_eq!(
            AddressGroups::from_bytes(&bytes[..4]),
            Err(AddrError::InvalidLength {
                len: 4,
                expected: 16
            })
        );
    }
}
