#![no_main]
use ipcanon_core::{AddrError, AddressFamily, BINARY_LEN, ntop, to_binary, to_text};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    match to_text(data) {
        Ok(text) => {
            assert_eq!(data.len(), BINARY_LEN);
            let back = to_binary(&text).expect("formatted text must parse");
            assert_eq!(&back[..], data);
        }
        Err(err) => {
            assert_eq!(
                err,
                AddrError::InvalidLength {
                    len: data.len(),
                    expected: BINARY_LEN
                }
            );
        }
    }

    if data.len() == 4 {
        let text = ntop(AddressFamily::Inet, data).expect("four bytes format as IPv4");
        assert_eq!(text.split('.').count(), 4);
    }
});
