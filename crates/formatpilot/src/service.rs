//! FormatPilot - the main entry point for LinkedIn text conversion.

use std::fmt;
use std::str::FromStr;

use crate::markdown::{CmarkParser, MarkdownParser};
use crate::rules::Rules;
use crate::{FormatPilotError, Result};

/// LinkedIn's post length limit
pub const DEFAULT_CHARACTER_LIMIT: usize = 3000;

/// Options for FormatPilot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Characters allowed before the length warning is appended
    pub character_limit: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            character_limit: DEFAULT_CHARACTER_LIMIT,
        }
    }
}

/// Input format accepted by [`FormatPilot::convert_text`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Markdown,
    Html,
}

impl FromStr for Format {
    type Err = FormatPilotError;

    fn from_str(tag: &str) -> Result<Self> {
        match tag {
            "markdown" => Ok(Format::Markdown),
            "html" => Ok(Format::Html),
            other => Err(FormatPilotError::InvalidFormat(other.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Markdown => f.write_str("markdown"),
            Format::Html => f.write_str("html"),
        }
    }
}

/// The main service for converting Markdown and HTML to LinkedIn text
pub struct FormatPilot {
    options: Options,
    rules: Rules,
    parser: Box<dyn MarkdownParser>,
}

impl FormatPilot {
    /// Create a new FormatPilot with default options
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Create a FormatPilot with custom options
    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            rules: Rules::new(),
            parser: Box::new(CmarkParser::new()),
        }
    }

    /// Replace the Markdown parser
    pub fn with_parser<P>(mut self, parser: P) -> Self
    where
        P: MarkdownParser + 'static,
    {
        self.parser = Box::new(parser);
        self
    }

    /// Rewrite HTML into LinkedIn text. Never fails.
    pub fn rewrite(&self, html: &str) -> String {
        let _span = tracing::debug_span!("rewrite", input_bytes = html.len()).entered();
        let output = self.rules.apply(html, &self.options);
        tracing::debug!(output_bytes = output.len(), "rewrite finished");
        output
    }

    /// Render Markdown to HTML without rewriting it
    pub fn markdown_to_html(&self, markdown: &str) -> Result<String> {
        self.parser.to_html(markdown).map_err(FormatPilotError::Parse)
    }

    /// Convert Markdown to LinkedIn text
    pub fn convert_markdown(&self, markdown: &str) -> Result<String> {
        let html = self.markdown_to_html(markdown)?;
        Ok(self.rewrite(&html))
    }

    /// Convert HTML to LinkedIn text
    pub fn convert_html(&self, html: &str) -> String {
        self.rewrite(html)
    }

    /// Convert `text` according to a format tag, `"markdown"` or `"html"`
    pub fn convert_text(&self, text: &str, format: &str) -> Result<String> {
        self.convert(text, format.parse()?)
    }

    /// Convert `text` in the given format
    pub fn convert(&self, text: &str, format: Format) -> Result<String> {
        match format {
            Format::Markdown => self.convert_markdown(text),
            Format::Html => Ok(self.convert_html(text)),
        }
    }

    /// Get the current options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    /// The rewrite chain in use
    pub fn rules(&self) -> &Rules {
        &self.rules
    }
}

impl Default for FormatPilot {
    fn default() -> Self {
        Self::new()
    }
}
