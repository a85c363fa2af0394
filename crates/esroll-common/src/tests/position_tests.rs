use crate::position::{LineMap, Location};

#[test]
fn test_location_first_line() {
    let map = LineMap::build("const a = 1;");
    assert_eq!(map.line_count(), 1);
    assert_eq!(map.location(0), Location { line: 1, column: 1 });
    assert_eq!(map.location(6), Location { line: 1, column: 7 });
}

#[test]
fn test_location_after_newlines() {
    let text = "a;\nbb;\n\ncc;";
    let map = LineMap::build(text);
    assert_eq!(map.line_count(), 4);
    // 'b' at offset 3 starts line 2
    assert_eq!(map.location(3), Location { line: 2, column: 1 });
    // empty line 3 starts at offset 7
    assert_eq!(map.location(7), Location { line: 3, column: 1 });
    assert_eq!(map.location(9), Location { line: 4, column: 2 });
}

#[test]
fn test_location_clamps_past_end() {
    let map = LineMap::build("x\ny");
    assert_eq!(map.location(100).line, 2);
}
