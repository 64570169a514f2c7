#![no_main]
use ipcanon_core::{ParseOptions, normalize, normalize_with, to_binary};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let Ok(canonical) = normalize(text) else {
        // Strict parsing accepts a subset of the default policy.
        assert!(normalize_with(text, &ParseOptions::strict()).is_err());
        return;
    };

    // Canonical text is a fixed point and names the same address.
    assert_eq!(normalize(&canonical).as_deref(), Ok(canonical.as_str()));
    assert_eq!(to_binary(&canonical), to_binary(text));
    assert!(!canonical.bytes().any(|b| b.is_ascii_uppercase()));
});
