//! Canonical text rendering (RFC 5952).
//!
//! Groups are written in lowercase hex without leading zeros. The longest
//! run of two or more zero groups collapses to `::`; on a tie the leftmost
//! run wins, and a lone zero group is always written as `0`. IPv4-mapped
//! values render as a bare dotted quad and IPv4-compatible values as
//! `::a.b.c.d`.

use std::fmt;

use super::groups::{AddressGroups, GROUP_COUNT};
use super::ipv4::format_ipv4;

/// A maximal run of consecutive zero groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeroRun {
    pub start: usize,
    pub len: usize,
}

impl ZeroRun {
    /// One past the last group in the run.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Shortest run worth collapsing into `::`.
pub const MIN_COMPRESSED_RUN: usize = 2;

/// Finds the run to replace with `::`, if any.
///
/// The longest run wins and ties go to the lowest start index. Runs shorter
/// than [`MIN_COMPRESSED_RUN`] are never selected.
#[must_use]
pub fn longest_zero_run(groups: &[u16; GROUP_COUNT]) -> Option<ZeroRun> {
    let mut best: Option<ZeroRun> = None;
    let mut cur_start = 0usize;
    let mut cur_len = 0usize;

    // Trailing sentinel closes a run that reaches the last group.
    for (i, &g) in groups.iter().chain(std::iter::once(&1)).enumerate() {
        if g == 0 {
            if cur_len == 0 {
                cur_start = i;
            }
            cur_len += 1;
            continue;
        }
        // Strictly greater keeps the earlier run on ties.
        if cur_len >= MIN_COMPRESSED_RUN && best.is_none_or(|b| cur_len > b.len) {
            best = Some(ZeroRun {
                start: cur_start,
                len: cur_len,
            });
        }
        cur_len = 0;
    }
    best
}

/// Writes the canonical text of `addr`.
pub fn write_canonical<W: fmt::Write>(out: &mut W, addr: &AddressGroups) -> fmt::Result {
    if addr.is_ipv4_mapped() {
        return out.write_str(&format_ipv4(&addr.low_octets()));
    }
    if addr.is_ipv4_compatible() {
        out.write_str("::")?;
        return out.write_str(&format_ipv4(&addr.low_octets()));
    }
    write_hex(out, addr.groups())
}

/// Writes colon-hex text with zero-run compression and no dotted-quad tail.
pub fn write_hex<W: fmt::Write>(out: &mut W, groups: &[u16; GROUP_COUNT]) -> fmt::Result {
    match longest_zero_run(groups) {
        Some(run) => {
            write_joined(out, &groups[..run.start])?;
            out.write_str("::")?;
            write_joined(out, &groups[run.end()..])
        }
        None => write_joined(out, groups),
    }
}

fn write_joined<W: fmt::Write>(out: &mut W, groups: &[u16]) -> fmt::Result {
    for (i, g) in groups.iter().enumerate() {
        if i > 0 {
            out.write_char(':')?;
        }
        write!(out, "{g:x}")?;
    }
    Ok(())
}

/// Canonical text of `addr` as an owned string.
#[must_use]
pub fn canonicalize(addr: &AddressGroups) -> String {
    addr.to_string()
}
