//! Markdown parsing support.
//!
//! The rewrite chain works on HTML, so Markdown input is rendered to HTML
//! first. Any Markdown-to-HTML renderer can be plugged in through
//! [`MarkdownParser`]; [`CmarkParser`] is the default.

use pulldown_cmark::{html, Options, Parser};

use crate::BoxError;

/// Renders Markdown to HTML.
pub trait MarkdownParser: Send + Sync {
    /// Render `markdown` to an HTML string
    fn to_html(&self, markdown: &str) -> Result<String, BoxError>;
}

/// [`MarkdownParser`] backed by `pulldown-cmark`.
///
/// # Example
///
/// ```rust
/// use formatpilot::{CmarkParser, MarkdownParser};
///
/// let html = CmarkParser::new().to_html("**Hello**").unwrap();
/// assert_eq!(html, "<p><strong>Hello</strong></p>");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CmarkParser {
    options: Options,
}

impl CmarkParser {
    /// Parser with tables, strikethrough and task lists enabled
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_TASKLISTS);
        Self { options }
    }

    /// Parser with an explicit `pulldown-cmark` option set
    pub fn with_options(options: Options) -> Self {
        Self { options }
    }
}

impl Default for CmarkParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownParser for CmarkParser {
    fn to_html(&self, markdown: &str) -> Result<String, BoxError> {
        let parser = Parser::new_ext(markdown, self.options);
        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, parser);
        Ok(output.trim().to_string())
    }
}
