#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Parsing and building from arbitrary status output should never panic
        let records = chronos::parse_porcelain(content);
        let tree = chronos::build(records);
        let _ = chronos::limit_depth(&tree, chronos::DEFAULT_MAX_DEPTH);
    }
});
