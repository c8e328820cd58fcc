#![no_main]

use libfuzzer_sys::fuzz_target;
use xrr_settings::XrrSettings;

const MAX_INPUT_SIZE: usize = 16 * 1024;

fuzz_target!(|data: &[u8]| {
    if data.len() > MAX_INPUT_SIZE {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(settings) = XrrSettings::from_toml(text) {
        assert_ne!(settings.threads, Some(0));
        assert!(settings.decimals <= 12);
    }
});
