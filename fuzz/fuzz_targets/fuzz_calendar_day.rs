#![no_main]
use libfuzzer_sys::fuzz_target;

use mcp_bookings::domain::calendar::CalendarDay;

fuzz_target!(|data: &[u8]| {
    if let Ok(json) = std::str::from_utf8(data) {
        if let Ok(day) = serde_json::from_str::<CalendarDay>(json) {
            // Whatever deserializes must re-serialize and round-trip
            let out = serde_json::to_string(&day).unwrap();
            let back: CalendarDay = serde_json::from_str(&out).unwrap();
            assert_eq!(day, back);
        }
    }
});
