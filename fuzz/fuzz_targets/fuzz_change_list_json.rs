#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        if let Ok(records) = chronos::parse_json(content) {
            let tree = chronos::build(records);
            let _ = serde_json::to_string(&tree);
        }
    }
});
