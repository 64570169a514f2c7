//! Lossless packing between hextet groups and 16 network-order bytes.

use crate::error::AddrError;

use super::groups::GROUP_COUNT;

/// Size of a binary IPv6 address.
pub const BINARY_LEN: usize = 16;

/// Writes each group big-endian into successive byte pairs.
#[must_use]
pub fn pack(groups: &[u16; GROUP_COUNT]) -> [u8; BINARY_LEN] {
    let mut out = [0u8; BINARY_LEN];
    for (pair, g) in out.chunks_exact_mut(2).zip(groups) {
        pair.copy_from_slice(&g.to_be_bytes());
    }
    out
}

/// Reverses [`pack`] for a fixed-size array.
#[must_use]
pub fn unpack_array(bytes: &[u8; BINARY_LEN]) -> [u16; GROUP_COUNT] {
    let mut groups = [0u16; GROUP_COUNT];
    for (g, pair) in groups.iter_mut().zip(bytes.chunks_exact(2)) {
        *g = u16::from_be_bytes([pair[0], pair[1]]);
    }
    groups
}

/// Reverses [`pack`]; fails with `InvalidLength` unless given exactly 16 bytes.
pub fn unpack(bytes: &[u8]) -> Result<[u16; GROUP_COUNT], AddrError> {
    let array: &[u8; BINARY_LEN] = bytes.try_into().map_err(|_| AddrError::InvalidLength {
        len: bytes.len(),
        expected: BINARY_LEN,
    })?;
    Ok(unpack_array(array))
}
