//! # formatpilot
//!
//! Convert Markdown or HTML into plain text that reads well on LinkedIn.
//!
//! LinkedIn posts do not render Markdown or HTML, so the conversion rewrites
//! each construct into a plain-text equivalent:
//!
//! - **bold** becomes UPPERCASE (and acts as a section header when followed by text)
//! - *italics* are unwrapped
//! - lists become `•` bullets
//! - blockquotes get a `> ` prefix, inline code keeps its backticks
//! - tables are flattened to `a | b` lines
//! - `:emoji:` shortcodes become Unicode glyphs
//! - an over-length warning is appended past the character limit
//!
//! ## Design
//!
//! Markdown is first rendered to HTML by a [`MarkdownParser`] (by default
//! [`CmarkParser`], backed by `pulldown-cmark`). The HTML then goes through a
//! fixed, ordered chain of [`Rules`]. Each rule is a pure text rewrite; the
//! order matters because later rules rely on the shape left by earlier ones.
//!
//! ## Example
//!
//! ```rust
//! use formatpilot::FormatPilot;
//!
//! let pilot = FormatPilot::new();
//! let text = pilot.convert_markdown("**Negrito** e *itálico*").unwrap();
//! assert_eq!(text, "NEGRITO\n\ne itálico");
//! ```
//!
//! ## Example (HTML string)
//!
//! ```rust
//! use formatpilot::FormatPilot;
//!
//! let pilot = FormatPilot::new();
//! let text = pilot.convert_html("<ul><li>Item 1</li><li>Item 2</li></ul>");
//! assert_eq!(text, "• Item 1\n• Item 2");
//! ```

use std::path::PathBuf;

mod formatter;
pub mod markdown;
mod rules;
mod service;
mod utilities;

pub use formatter::LinkedInFormatter;
pub use markdown::{CmarkParser, MarkdownParser};
pub use rules::{length_warning, linkedin_rules, Rule, Rules, BULLET, QUOTE_PREFIX};
pub use service::{Format, FormatPilot, Options, DEFAULT_CHARACTER_LIMIT};

/// Boxed error returned by [`MarkdownParser`] implementations
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error type for formatpilot operations
#[derive(Debug, thiserror::Error)]
pub enum FormatPilotError {
    #[error("Markdown to HTML conversion failed: {0}")]
    Parse(#[source] BoxError),

    #[error("Invalid format `{0}`: use 'markdown' or 'html'")]
    InvalidFormat(String),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, FormatPilotError>;

/// Convert Markdown to LinkedIn text with the default options.
pub fn markdown_to_linkedin(markdown: &str) -> Result<String> {
    FormatPilot::new().convert_markdown(markdown)
}
