use crate::source_text::SourceText;

#[test]
fn test_whole_text_round_trips() {
    let text = SourceText::new("let a = 1;");
    assert_eq!(text.to_string(), "let a = 1;");
    assert_eq!(text.len(), 10);
}

#[test]
fn test_snip_uses_absolute_offsets() {
    let text = SourceText::new("let a = 1;\nlet b = 2;");
    let second = text.snip(11, 21);
    assert_eq!(second.to_string(), "let b = 2;");
    assert_eq!(second.window().start, 11);
}

#[test]
fn test_snip_is_independent_of_parent() {
    let text = SourceText::new("export function foo() {}");
    let mut view = text.snip(0, 24);
    view.remove(0, 7);
    assert_eq!(view.to_string(), "function foo() {}");
    assert_eq!(text.to_string(), "export function foo() {}");
}

#[test]
fn test_remove_merges_overlapping_ranges() {
    let mut text = SourceText::new("0123456789");
    text.remove(2, 4).remove(3, 6).remove(8, 9);
    assert_eq!(text.to_string(), "01679");
    assert_eq!(text.len(), 5);
}

#[test]
fn test_remove_outside_window_is_ignored() {
    let text = SourceText::new("aaa bbb ccc");
    let mut middle = text.snip(4, 7);
    middle.remove(0, 3);
    middle.remove(8, 11);
    assert_eq!(middle.to_string(), "bbb");
}

#[test]
fn test_snip_carries_existing_removals() {
    let mut text = SourceText::new("export const x = 1;");
    text.remove(0, 7);
    let inner = text.snip(0, 13);
    assert_eq!(inner.to_string(), "const ");
}
