#![no_main]

use libfuzzer_sys::fuzz_target;

use tenure_record::{StakeInfo, StakeWord};

// Decoding is total; re-encoding a decoded word reproduces it exactly.
fuzz_target!(|data: &[u8]| {
    let Some(word) = StakeWord::from_slice(data) else {
        return;
    };
    let info = StakeInfo::decode(&word);
    assert_eq!(info.encode(), word);
    assert_eq!(info.is_empty(), word.is_zero());

    let hex = word.to_string();
    assert_eq!(hex.parse::<StakeWord>().ok(), Some(word));
});
