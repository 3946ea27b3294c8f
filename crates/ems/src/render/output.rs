//! Output mode control.
//!
//! [`OutputMode`] decides between templated text (styled or plain) and
//! structured serialization of the records.

/// Controls how a view is printed.
///
/// This is the user-facing enum for the `--output` flag.
///
/// - `Auto` - Terminal styling on an attended terminal, plain text otherwise
/// - `Term` - Always apply terminal styling
/// - `Text` - Never apply styling
/// - `Json`, `Yaml`, `Csv` - Serialize the records directly (skip templates)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputMode {
    /// Auto-detect: terminal gets Term, pipe gets Text
    #[default]
    Auto,
    /// Always use terminal styling
    Term,
    /// Plain text
    Text,
    /// Records as pretty JSON
    Json,
    /// Records as YAML
    Yaml,
    /// Records as CSV, one row per record
    Csv,
}

impl OutputMode {
    /// Returns true if this mode serializes records instead of rendering a template.
    pub fn is_structured(&self) -> bool {
        matches!(self, OutputMode::Json | OutputMode::Yaml | OutputMode::Csv)
    }

    /// Resolves `Auto` to `Term` or `Text` by checking whether stdout is a
    /// terminal someone is looking at.
    ///
    /// Other modes are returned unchanged.
    pub fn resolve_auto(&self) -> OutputMode {
        match self {
            OutputMode::Auto => {
                if console::user_attended() {
                    OutputMode::Term
                } else {
                    OutputMode::Text
                }
            }
            other => *other,
        }
    }

    /// Converts this mode to a [`TextMode`].
    ///
    /// Returns `None` for structured modes, which bypass templates.
    pub fn to_text_mode(&self) -> Option<TextMode> {
        match self.resolve_auto() {
            OutputMode::Term => Some(TextMode::Styled),
            OutputMode::Text => Some(TextMode::Plain),
            _ => None,
        }
    }
}

/// Whether templates emit ANSI styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMode {
    /// Apply styles
    Styled,
    /// Plain text
    Plain,
}
