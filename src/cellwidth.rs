//! Cell-width oracle (C1).
//!
//! Maps a single grapheme cluster, the current column offset, and the configured tab size to a
//! display-cell width. Every caller elsewhere in the crate (vertical motion, tab expansion, view
//! clipping) goes through [`cell_width`] so that "how wide is this on screen" has exactly one
//! definition.

use unicode_width::UnicodeWidthChar;

/// Returns `true` if `ch` is one of the two Unicode "Regional Indicator Symbol Letter" code
/// points used to compose flag emoji (U+1F1E6..=U+1F1FF).
fn is_regional_indicator(ch: char) -> bool {
    matches!(ch, '\u{1F1E6}'..='\u{1F1FF}')
}

/// Returns `true` if `ch` renders at double width: East-Asian Wide/Fullwidth per UAX #11, or a
/// wide emoji base as classified by `unicode-width`.
fn is_wide_scalar(ch: char) -> bool {
    UnicodeWidthChar::width(ch) == Some(2)
}

/// Computes the display-cell width of a single grapheme cluster.
///
/// `column_offset` is the cell column the cluster would start at, used only to expand tabs to
/// the next tab stop. `tab_size` must be at least 1 (the caller is responsible for that
/// invariant; this function clamps defensively to 1).
///
/// Width never depends on any cluster other than the one passed in.
pub fn cell_width(cluster: &str, column_offset: u64, tab_size: u64) -> u64 {
    let tab_size = tab_size.max(1);

    let mut chars = cluster.chars();
    let Some(first) = chars.next() else {
        return 0;
    };

    if first == '\n' || first == '\r' {
        return 0;
    }

    if first == '\t' && chars.as_str().is_empty() {
        return tab_size - (column_offset % tab_size);
    }

    let second = chars.next();
    if let Some(second) = second {
        if chars.as_str().is_empty() && is_regional_indicator(first) && is_regional_indicator(second)
        {
            return 1;
        }
    }

    let has_wide = std::iter::once(first)
        .chain(second)
        .chain(chars)
        .any(is_wide_scalar);

    if has_wide { 2 } else { 1 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cluster_is_zero_width() {
        assert_eq!(cell_width("", 0, 4), 0);
    }

    #[test]
    fn newline_is_zero_width() {
        assert_eq!(cell_width("\n", 5, 4), 0);
        assert_eq!(cell_width("\r", 5, 4), 0);
    }

    #[test]
    fn tab_expands_to_next_stop() {
        assert_eq!(cell_width("\t", 1, 4), 3);
        assert_eq!(cell_width("\t", 0, 4), 4);
        assert_eq!(cell_width("\t", 4, 4), 4);
    }

    #[test]
    fn wide_cjk_character_is_two_cells() {
        assert_eq!(cell_width("界", 0, 4), 2);
    }

    #[test]
    fn combining_mark_cluster_is_narrow() {
        // "a" + combining grave accent (U+0300) forms one grapheme cluster.
        assert_eq!(cell_width("a\u{0300}", 0, 4), 1);
    }

    #[test]
    fn regional_indicator_pair_collapses_to_one_flag_cell() {
        // Regional indicators for "U" and "S" (forms a flag).
        let flag = "\u{1F1FA}\u{1F1F8}";
        assert_eq!(cell_width(flag, 0, 4), 1);
    }

    #[test]
    fn ascii_is_narrow() {
        assert_eq!(cell_width("a", 0, 4), 1);
    }
}
