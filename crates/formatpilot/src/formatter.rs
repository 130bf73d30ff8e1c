//! Post-conversion decoration and file entry point.

use std::fs;
use std::path::Path;

use crate::service::{Format, FormatPilot};
use crate::{FormatPilotError, Result};

/// Converts text and optionally decorates it.
///
/// In creative mode every non-blank line is prefixed with its word count,
/// e.g. `[3 words] one two three`.
pub struct LinkedInFormatter {
    converter: FormatPilot,
    creative: bool,
}

impl LinkedInFormatter {
    /// Create a formatter with a default converter
    pub fn new(creative: bool) -> Self {
        Self::with_converter(FormatPilot::new(), creative)
    }

    /// Create a formatter around an existing converter
    pub fn with_converter(converter: FormatPilot, creative: bool) -> Self {
        Self {
            converter,
            creative,
        }
    }

    /// Prefix each non-blank line with `[<n> words] `
    pub fn annotate_word_counts(text: &str) -> String {
        text.lines()
            .map(|line| {
                if line.trim().is_empty() {
                    line.to_string()
                } else {
                    let words = line.split_whitespace().count();
                    format!("[{} words] {}", words, line)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Apply the decoration if creative mode is on
    pub fn format_text(&self, text: &str) -> String {
        if self.creative {
            Self::annotate_word_counts(text)
        } else {
            text.to_string()
        }
    }

    pub fn format_markdown(&self, markdown: &str) -> Result<String> {
        let converted = self.converter.convert_markdown(markdown)?;
        Ok(self.format_text(&converted))
    }

    pub fn format_html(&self, html: &str) -> Result<String> {
        let converted = self.converter.convert_html(html);
        Ok(self.format_text(&converted))
    }

    /// Convert already-read text. `None` skips conversion and only decorates.
    pub fn format(&self, text: &str, format: Option<Format>) -> Result<String> {
        match format {
            Some(Format::Markdown) => self.format_markdown(text),
            Some(Format::Html) => self.format_html(text),
            None => Ok(self.format_text(text)),
        }
    }

    /// Read a UTF-8 file and format its content
    pub fn format_file(&self, path: impl AsRef<Path>, format: Option<Format>) -> Result<String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| FormatPilotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "read input file");
        self.format(&content, format)
    }
}

impl Default for LinkedInFormatter {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_annotate_word_counts() {
        assert_eq!(
            LinkedInFormatter::annotate_word_counts("NEGRITO\n\ne itálico"),
            "[1 words] NEGRITO\n\n[2 words] e itálico"
        );
    }

    #[test]
    fn test_plain_formatter_leaves_text() {
        let formatter = LinkedInFormatter::new(false);
        assert_eq!(formatter.format_text("a b"), "a b");
    }

    #[test]
    fn test_creative_markdown() {
        let formatter = LinkedInFormatter::new(true);
        let result = formatter.format_markdown("- Item 1\n- Item 2").unwrap();
        assert_eq!(result, "[3 words] • Item 1\n[3 words] • Item 2");
    }

    #[test]
    fn test_format_html() {
        let formatter = LinkedInFormatter::default();
        assert_eq!(formatter.format_html("<em>x</em>").unwrap(), "x");
    }

    #[test]
    fn test_format_file_markdown() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "**Título** corpo").unwrap();

        let formatter = LinkedInFormatter::new(false);
        let result = formatter
            .format_file(file.path(), Some(Format::Markdown))
            .unwrap();
        assert_eq!(result, "TÍTULO\n\ncorpo");
    }

    #[test]
    fn test_format_file_plain_only_decorates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "**raw** text").unwrap();

        let formatter = LinkedInFormatter::new(true);
        let result = formatter.format_file(file.path(), None).unwrap();
        assert_eq!(result, "[2 words] **raw** text");
    }

    #[test]
    fn test_format_file_missing() {
        let formatter = LinkedInFormatter::default();
        let err = formatter
            .format_file("/definitely/not/here.md", Some(Format::Markdown))
            .unwrap_err();
        assert!(matches!(err, FormatPilotError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.md"));
    }
}
