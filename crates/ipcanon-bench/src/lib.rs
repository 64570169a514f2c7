//! Shared inputs for the ipcanon benchmarks.

/// Textual addresses covering each parsing path.
pub const SAMPLE_ADDRESSES: &[(&str, &str)] = &[
    ("ipv4", "192.168.100.200"),
    ("mapped", "::ffff:192.0.2.128"),
    ("compressed", "2001:db8::1"),
    ("full_uppercase", "2001:0DB8:0000:0000:0000:FF00:0042:8329"),
    ("embedded", "64:ff9b::198.51.100.7"),
    ("unspecified", "::"),
];

/// Group patterns that stress zero-run selection.
pub const SAMPLE_GROUPS: &[(&str, [u16; 8])] = &[
    ("no_zeros", [1, 2, 3, 4, 5, 6, 7, 8]),
    ("tie", [0x2001, 0xdb8, 0, 0, 1, 0, 0, 1]),
    ("alternating", [0, 1, 0, 1, 0, 1, 0, 1]),
    ("trailing_run", [1, 0, 0, 2, 0, 0, 0, 0]),
    ("all_zero", [0; 8]),
];
