#![no_main]
use libfuzzer_sys::fuzz_target;

use mcp_bookings::domain::dates::DateRange;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Some((check_in, check_out)) = input.split_once('|') {
            if let Ok(range) = DateRange::parse(check_in, check_out) {
                // Accepted ranges always hold at least one night
                assert!(range.check_in() < range.check_out());
                assert!(range.nights() >= 1);
            }
        }
    }
});
