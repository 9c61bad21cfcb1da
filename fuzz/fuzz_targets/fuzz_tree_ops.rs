#![no_main]

use libfuzzer_sys::fuzz_target;

use chronos::tree::{expansion, selection};
use chronos::{build, limit_depth, ChangeRecord, SelectionState};

fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };
    let mut lines = content.lines();
    let Some(ops) = lines.next() else {
        return;
    };

    // First line drives toggles, the rest are paths
    let tree = build(lines.map(ChangeRecord::unchanged));
    let mut tree = limit_depth(&tree, 3);
    let ids: Vec<String> = tree.iter().map(|n| n.id().to_string()).collect();
    if ids.is_empty() {
        return;
    }

    for byte in ops.bytes() {
        let id = &ids[usize::from(byte) % ids.len()];
        tree = match byte % 3 {
            0 => selection::toggle(&tree, id, true).tree,
            1 => selection::toggle(&tree, id, false).tree,
            _ => expansion::toggle(&tree, id),
        };
    }

    for node in tree.iter().filter(|n| n.is_folder()) {
        let states: Vec<SelectionState> = node.children().iter().map(|c| c.selection()).collect();
        assert_eq!(node.selection(), SelectionState::aggregate(states.iter()));
    }
});
