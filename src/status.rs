//! Status messages (§6): the small, host-rendered notices the orchestrator produces after a
//! mutator runs ("New file", "file changed on disk", search wrapped, …).

/// The style a status message should be rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusStyle {
    /// A successful operation (e.g. "saved").
    Success,
    /// An error the user should notice.
    Error,
    /// Neutral information (e.g. "New file").
    Info,
}

/// A single status-bar message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    /// How the message should be rendered.
    pub style: StatusStyle,
    /// The message text.
    pub text: String,
}

impl StatusMessage {
    /// Builds a success message.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            style: StatusStyle::Success,
            text: text.into(),
        }
    }

    /// Builds an error message.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            style: StatusStyle::Error,
            text: text.into(),
        }
    }

    /// Builds an informational message.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            style: StatusStyle::Info,
            text: text.into(),
        }
    }
}
