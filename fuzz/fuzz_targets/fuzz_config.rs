#![no_main]
use libfuzzer_sys::fuzz_target;

use mcp_bookings::config::types::Config;

fuzz_target!(|data: &[u8]| {
    if let Ok(yaml) = std::str::from_utf8(data) {
        if let Ok(config) = serde_yml::from_str::<Config>(yaml) {
            for listing in &config.listings {
                let _ = listing.validate();
            }
        }
    }
});
