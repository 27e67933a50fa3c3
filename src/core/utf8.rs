//! Grapheme-cluster primitives.
//!
//! Every column in the engine is a grapheme index. Anything that slices,
//! inserts into, or measures line text goes through these helpers so that
//! an emoji ZWJ sequence or a base + combining mark pair moves as one unit.

use unicode_segmentation::UnicodeSegmentation;

/// Number of extended grapheme clusters in `text`
pub fn grapheme_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// The cluster at grapheme index `i`, if any
pub fn grapheme_at(text: &str, i: usize) -> Option<&str> {
    text.graphemes(true).nth(i)
}

/// Byte offset where grapheme `n` starts (grapheme → byte).
///
/// `n == grapheme_count(text)` yields `text.len()`; anything past that is `None`.
pub fn grapheme_byte_index(text: &str, n: usize) -> Option<usize> {
    let mut seen = 0;
    for (idx, _) in text.grapheme_indices(true) {
        if seen == n {
            return Some(idx);
        }
        seen += 1;
    }
    if seen == n { Some(text.len()) } else { None }
}

/// Same as [`grapheme_byte_index`] but clamps out-of-range indices to the end
pub fn byte_offset(text: &str, n: usize) -> usize {
    grapheme_byte_index(text, n).unwrap_or(text.len())
}

/// Grapheme column at or before a byte offset (byte → grapheme).
/// A byte in the middle of a cluster counts that cluster as passed.
pub fn byte_to_grapheme_col(text: &str, byte_offset: usize) -> usize {
    let mut col = 0;
    for (idx, _) in text.grapheme_indices(true) {
        if idx >= byte_offset {
            break;
        }
        col += 1;
    }
    col
}

/// Half-open grapheme slice `[from, to)`; indices clamp to the text
pub fn slice_by_graphemes(text: &str, from: usize, to: usize) -> &str {
    if from >= to {
        return "";
    }
    let start = byte_offset(text, from);
    let end = byte_offset(text, to);
    &text[start..end]
}

/// Insert `insertion` before grapheme `at` (or at the end when `at` is past it)
pub fn insert_at_grapheme(text: &str, at: usize, insertion: &str) -> String {
    let byte = byte_offset(text, at);
    let mut out = String::with_capacity(text.len() + insertion.len());
    out.push_str(&text[..byte]);
    out.push_str(insertion);
    out.push_str(&text[byte..]);
    out
}

/// All clusters of `text` in order
pub fn graphemes(text: &str) -> Vec<&str> {
    text.graphemes(true).collect()
}

/// Blank means a single space or tab cluster
pub fn is_blank(g: &str) -> bool {
    matches!(g, " " | "\t")
}

/// Get the display width of a single character (for monospace terminal display)
/// Returns 0 for control characters, 1 for ASCII, 2 for wide CJK characters, etc.
pub fn char_width(c: char) -> usize {
    unicode_width::UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Display width of a grapheme cluster.
///
/// Emoji presentation sequences report the width of their first scalar so a
/// family emoji counts as one wide glyph instead of three.
pub fn grapheme_width(g: &str) -> usize {
    let mut chars = g.chars();
    match chars.next() {
        Some(first) if g.contains('\u{200d}') || g.contains('\u{fe0f}') => {
            char_width(first).max(2)
        }
        Some(first) => char_width(first) + chars.map(char_width).sum::<usize>(),
        None => 0,
    }
}

fn advance(visual_x: usize, grapheme: &str, tab_width: usize) -> usize {
    if grapheme == "\t" {
        let tab_width = tab_width.max(1);
        (visual_x / tab_width + 1) * tab_width
    } else {
        visual_x + grapheme_width(grapheme)
    }
}

/// Visual width of text up to a grapheme index, with tab expansion
pub fn visual_width_up_to(text: &str, grapheme_idx: usize, tab_width: usize) -> usize {
    text.graphemes(true)
        .take(grapheme_idx)
        .fold(0, |x, g| advance(x, g, tab_width))
}

/// Grapheme index whose cell covers `target_visual_x`.
/// Past the end of the text this is the grapheme count.
pub fn grapheme_index_from_visual_x(text: &str, target_visual_x: usize, tab_width: usize) -> usize {
    let mut current_visual_x = 0;
    for (i, grapheme) in text.graphemes(true).enumerate() {
        let next = advance(current_visual_x, grapheme, tab_width);
        if next > target_visual_x {
            return i;
        }
        current_visual_x = next;
    }
    grapheme_count(text)
}

/// Split a line into soft-wrapped display rows of at most `width` cells.
///
/// Returns the grapheme index each display row starts at; the first entry is
/// always 0. A cluster wider than the row still gets a row of its own.
pub fn wrap_segments(text: &str, width: usize, tab_width: usize) -> Vec<usize> {
    let mut starts = vec![0];
    if width == 0 {
        return starts;
    }
    let mut row_x = 0;
    for (i, grapheme) in text.graphemes(true).enumerate() {
        let w = advance(row_x, grapheme, tab_width) - row_x;
        if row_x > 0 && row_x + w > width {
            starts.push(i);
            row_x = 0;
        }
        row_x = advance(row_x, grapheme, tab_width);
    }
    starts
}
