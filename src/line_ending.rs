//! Line-ending detection and normalization (part of C11, the file collaborator).
//!
//! The kernel's text tree always stores LF-normalized text, so every position computation in
//! the locator/mutator algebra stays newline-agnostic. The preferred line ending is detected on
//! load and re-applied on save.

/// The newline sequence a document prefers to be saved with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    /// Unix-style `'\n'`.
    Lf,
    /// Windows-style `"\r\n"`.
    Crlf,
}

impl LineEnding {
    /// Detects the dominant line ending in `text`: CRLF if any `"\r\n"` appears, else LF.
    pub fn detect_in_text(text: &str) -> Self {
        if text.contains("\r\n") {
            Self::Crlf
        } else {
            Self::Lf
        }
    }

    /// Strips `"\r\n"` down to `"\n"` so the text tree only ever sees LF.
    pub fn normalize_to_lf(text: &str) -> String {
        if text.contains("\r\n") {
            text.replace("\r\n", "\n")
        } else {
            text.to_string()
        }
    }

    /// Converts LF-normalized `text` to this line ending for saving.
    pub fn apply_to_text(self, text: &str) -> String {
        match self {
            Self::Lf => text.to_string(),
            Self::Crlf => text.replace('\n', "\r\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_crlf() {
        assert_eq!(LineEnding::detect_in_text("a\r\nb"), LineEnding::Crlf);
        assert_eq!(LineEnding::detect_in_text("a\nb"), LineEnding::Lf);
    }

    #[test]
    fn normalize_and_reapply_roundtrip() {
        let original = "a\r\nb\r\nc";
        let le = LineEnding::detect_in_text(original);
        let normalized = LineEnding::normalize_to_lf(original);
        assert_eq!(normalized, "a\nb\nc");
        assert_eq!(le.apply_to_text(&normalized), original);
    }
}
