//! # ipcanon-core
//!
//! Safe Rust address canonicalization.
//!
//! Converts IPv4 and IPv6 addresses between their textual and 16-byte binary
//! forms and renders the RFC 5952 canonical text. Every operation is a pure
//! function: no I/O, no logging, no process-wide state.

#![deny(unsafe_code)]

pub mod error;
pub mod inet;
pub mod options;

pub use error::AddrError;
pub use inet::{
    AF_INET, AF_INET6, AddressFamily, AddressGroups, BINARY_LEN, GROUP_COUNT, ZeroRun,
    longest_zero_run, normalize, normalize_with, ntop, pton, to_binary, to_binary_with, to_text,
};
pub use options::{OctetPolicy, ParseOptions};
