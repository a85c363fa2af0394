//! Editable view over a module's source text.
//!
//! A `SourceText` is a window `[start, end)` into an immutable, shared source
//! string plus a set of removed byte ranges. Offsets are always absolute
//! positions in the original text, so a view snipped out of another view can
//! be edited with the same node offsets the parser produced.

use crate::span::Span;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct SourceText {
    original: Arc<str>,
    window: Span,
    /// Sorted, non-overlapping removed ranges inside `window`.
    removed: SmallVec<[Span; 2]>,
}

impl SourceText {
    /// A view over the whole text.
    pub fn new(text: impl Into<Arc<str>>) -> SourceText {
        let original: Arc<str> = text.into();
        let window = Span::new(0, original.len() as u32);
        SourceText {
            original,
            window,
            removed: SmallVec::new(),
        }
    }

    /// The full underlying text, ignoring the window and removals.
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn window(&self) -> Span {
        self.window
    }

    /// Extract an independent view of `[start, end)`.
    ///
    /// The range is clamped to this view's window; removals already applied
    /// to the overlapping part are carried over.
    pub fn snip(&self, start: u32, end: u32) -> SourceText {
        let window = self.clamp(start, end);
        let removed = self
            .removed
            .iter()
            .filter_map(|r| {
                let s = r.start.max(window.start);
                let e = r.end.min(window.end);
                (s < e).then_some(Span::new(s, e))
            })
            .collect();
        SourceText {
            original: Arc::clone(&self.original),
            window,
            removed,
        }
    }

    /// Remove `[start, end)` from this view. Overlapping and adjacent
    /// removals are merged; ranges outside the window are ignored.
    pub fn remove(&mut self, start: u32, end: u32) -> &mut Self {
        let range = self.clamp(start, end);
        if range.is_empty() {
            return self;
        }

        let mut merged = range;
        self.removed.retain(|r| {
            if r.end < merged.start || r.start > merged.end {
                true
            } else {
                merged = merged.cover(*r);
                false
            }
        });
        let at = self
            .removed
            .iter()
            .position(|r| r.start > merged.start)
            .unwrap_or(self.removed.len());
        self.removed.insert(at, merged);
        self
    }

    /// Number of bytes that `to_string` would produce.
    pub fn len(&self) -> usize {
        let removed: u32 = self.removed.iter().map(|r| r.len()).sum();
        (self.window.len() - removed) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clamp(&self, start: u32, end: u32) -> Span {
        let s = start.clamp(self.window.start, self.window.end);
        let e = end.clamp(s, self.window.end);
        Span::new(s, e)
    }

    fn slice(&self, start: u32, end: u32) -> &str {
        self.original
            .get(start as usize..end as usize)
            .unwrap_or_default()
    }
}

impl fmt::Display for SourceText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cursor = self.window.start;
        for r in &self.removed {
            f.write_str(self.slice(cursor, r.start))?;
            cursor = r.end;
        }
        f.write_str(self.slice(cursor, self.window.end))
    }
}
