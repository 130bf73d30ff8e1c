//! LinkedIn rules for HTML to plain text conversion.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::Rule;
use crate::utilities::{
    char_len, collapse_blank_lines, flatten_row, prefix_lines, replace_innermost, strip_all,
    uppercase_text,
};

static BLOCK_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?(?:p|h[1-6])>").unwrap());
static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"<br\s*/?>\n?").unwrap());
static THEMATIC_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"<hr\s*/?>").unwrap());
static STRONG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<strong>(.*?)</strong>([^<\n]*)").unwrap());
static EMPHASIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<em>(.*?)</em>").unwrap());
static STRAY_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?(?:p|h[1-6]|strong|em)>").unwrap());
static CODE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<pre><code(?:\s[^>]*)?>(.*?)</code></pre>").unwrap());
static CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<code>(.*?)</code>").unwrap());
static BLOCKQUOTE_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<blockquote>").unwrap());
static BLOCKQUOTE_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"</blockquote>").unwrap());
static LIST_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<(ul|ol)(?:\s+start="(\d+)")?>"#).unwrap());
static LIST_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"</(?:ul|ol)>").unwrap());
static LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<li(?:\s[^>]*)?>(.*?)</li>").unwrap());
static TASK_CHECKBOX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<input[^>]*type="checkbox"[^>]*>\s*"#).unwrap());
static MARKDOWN_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());
static SHORTCODE: Lazy<Regex> = Lazy::new(|| Regex::new(r":([a-zA-Z0-9_+\-]+):").unwrap());
static HTML_TABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<table(?:\s[^>]*)?>(.*?)</table>").unwrap());
static TABLE_ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<tr(?:\s[^>]*)?>(.*?)</tr>").unwrap());
static TABLE_CELL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<t[hd](?:\s[^>]*)?>(.*?)</t[hd]>").unwrap());
static PIPE_TABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]*\|.*\|[ \t]*\n[ \t]*\|[ \t:|]*-[-:| \t]*\|[ \t]*\n(?:[ \t]*\|.*\|[ \t]*(?:\n|$))+",
    )
    .unwrap()
});
static SEPARATOR_ROW: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[|\s:-]+$").unwrap());

/// Bullet used for unordered list items
pub const BULLET: &str = "• ";

/// Prefix used for blockquote lines
pub const QUOTE_PREFIX: &str = "> ";

/// Create the LinkedIn rewrite chain, in application order
pub fn linkedin_rules() -> Vec<(&'static str, Rule)> {
    vec![
        ("block_tags", block_tags_rule()),
        ("bold", bold_rule()),
        ("italic", italic_rule()),
        ("stray_tags", stray_tags_rule()),
        ("code", code_rule()),
        ("blockquote", blockquote_rule()),
        ("list", list_rule()),
        ("link", link_rule()),
        ("emoji", emoji_rule()),
        ("table", table_rule()),
        ("normalize", normalize_rule()),
        ("length_guard", length_guard_rule()),
    ]
}

fn block_tags_rule() -> Rule {
    Rule::text(|text| {
        let text = LINE_BREAK.replace_all(text, "\n");
        let text = THEMATIC_BREAK.replace_all(&text, "---");
        strip_all(&text, &BLOCK_TAG)
    })
}

/// Bold is a section header when text follows it on the same line, and
/// inline emphasis when it ends the line.
fn bold_rule() -> Rule {
    Rule::text(|text| {
        let mut result = String::with_capacity(text.len());
        let mut last = 0;

        for caps in STRONG.captures_iter(text) {
            let (Some(whole), Some(inner), Some(after)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };

            result.push_str(&text[last..whole.start()]);
            result.push_str(&uppercase_text(inner.as_str()));

            let after = after.as_str();
            if !after.trim().is_empty() {
                result.push_str("\n\n");
                result.push_str(after.trim_start());
            }

            last = whole.end();
        }

        result.push_str(&text[last..]);
        result
    })
}

fn italic_rule() -> Rule {
    Rule::text(|text| EMPHASIS.replace_all(text, "$1").into_owned())
}

/// Unbalanced input can leave opening or closing tags behind
fn stray_tags_rule() -> Rule {
    Rule::text(|text| strip_all(text, &STRAY_TAG))
}

fn code_rule() -> Rule {
    Rule::text(|text| {
        let text = CODE_BLOCK.replace_all(text, |caps: &Captures| {
            format!("\n{}\n", caps[1].trim_end_matches('\n'))
        });
        CODE.replace_all(&text, |caps: &Captures| format!("`{}`", &caps[1]))
            .into_owned()
    })
}

fn blockquote_rule() -> Rule {
    Rule::text(|text| {
        replace_innermost(text, &BLOCKQUOTE_OPEN, &BLOCKQUOTE_CLOSE, |_, inner| {
            let quoted: Vec<String> = inner
                .trim()
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(|line| format!("{}{}", QUOTE_PREFIX, line.trim()))
                .collect();

            if quoted.is_empty() {
                return "\n".to_string();
            }
            format!("\n{}\n", quoted.join("\n"))
        })
    })
}

/// Marks where a rendered list starts, resolved by [`place_on_own_lines`]
const LIST_START: char = '\u{E000}';
/// Marks where a rendered list ends
const LIST_END: char = '\u{E001}';

fn list_rule() -> Rule {
    Rule::text(|text| {
        let rendered = replace_innermost(text, &LIST_OPEN, &LIST_CLOSE, |open, inner| {
            let ordered = &open[1] == "ol";
            let start: usize = open
                .get(2)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(1);

            // Inside a blockquote every line already carries the quote prefix
            let prefix = shared_quote_prefix(inner);
            let inner = if prefix.is_empty() {
                inner.to_string()
            } else {
                inner.replace(&format!("\n{}", prefix), "\n")
            };

            let items: Vec<String> = LIST_ITEM
                .captures_iter(&inner)
                .enumerate()
                .map(|(index, item)| {
                    let prefix = if ordered {
                        format!("{}. ", start + index)
                    } else {
                        BULLET.to_string()
                    };
                    let indent = " ".repeat(prefix.chars().count());
                    let content = place_on_own_lines(&item[1]);
                    let content = TASK_CHECKBOX.replace(&content, |caps: &Captures| {
                        if caps[0].contains("checked") {
                            "☑ "
                        } else {
                            "☐ "
                        }
                    });
                    prefix_lines(content.trim(), &prefix, &indent)
                })
                .collect();

            format!("{}{}{}", LIST_START, items.join("\n"), LIST_END)
        });
        place_on_own_lines(&rendered)
    })
}

/// Resolve the markers around rendered lists.
///
/// A list that would share a line with the text before or after it gets a
/// line break on that side; otherwise the markers vanish. A list opened right
/// after a quote prefix repeats that prefix on each of its lines.
fn place_on_own_lines(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut quote = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            LIST_START => {
                let line = &result[result.rfind('\n').map_or(0, |i| i + 1)..];
                if !line.is_empty() && quote_prefix(line) == line {
                    quote = line.to_string();
                } else if !result.is_empty() && !result.ends_with('\n') {
                    result.push('\n');
                }
            }
            LIST_END => {
                quote.clear();
                if matches!(chars.peek(), Some(&next) if next != '\n' && next != LIST_END) {
                    result.push('\n');
                }
            }
            '\n' if !quote.is_empty() => {
                result.push('\n');
                if matches!(chars.peek(), Some(&next) if next != '\n' && next != LIST_END) {
                    result.push_str(&quote);
                }
            }
            _ => result.push(c),
        }
    }

    result
}

/// Leading run of `> ` markers on `line`
fn quote_prefix(line: &str) -> &str {
    let mut end = 0;
    while line[end..].starts_with(QUOTE_PREFIX) {
        end += QUOTE_PREFIX.len();
    }
    &line[..end]
}

/// Quote prefix shared by every non-blank line after the first
fn shared_quote_prefix(text: &str) -> &str {
    let mut lines = text
        .split('\n')
        .skip(1)
        .filter(|line| !line.trim().is_empty());
    let Some(first) = lines.next() else {
        return "";
    };

    let mut prefix = quote_prefix(first);
    for line in lines {
        while !line.starts_with(prefix) {
            prefix = &prefix[..prefix.len() - QUOTE_PREFIX.len()];
        }
    }
    prefix
}

/// `[label](url)` left as literal text becomes an anchor LinkedIn links
fn link_rule() -> Rule {
    Rule::text(|text| {
        MARKDOWN_LINK
            .replace_all(text, r#"<a href="${2}">${1}</a>"#)
            .into_owned()
    })
}

fn emoji_rule() -> Rule {
    Rule::text(|text| {
        let mut result = String::with_capacity(text.len());
        let mut last = 0;
        let mut search_from = 0;

        while let Some(caps) = SHORTCODE.captures_at(text, search_from) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                break;
            };

            match emojis::get_by_shortcode(name.as_str()) {
                Some(emoji) => {
                    result.push_str(&text[last..whole.start()]);
                    result.push_str(emoji.as_str());
                    last = whole.end();
                    search_from = whole.end();
                }
                // The closing colon may open the next shortcode
                None => search_from = whole.end() - 1,
            }
        }

        result.push_str(&text[last..]);
        result
    })
}

fn table_rule() -> Rule {
    Rule::text(|text| {
        let text = HTML_TABLE.replace_all(text, |caps: &Captures| {
            TABLE_ROW
                .captures_iter(&caps[1])
                .map(|row| {
                    TABLE_CELL
                        .captures_iter(&row[1])
                        .map(|cell| cell[1].trim().to_string())
                        .collect::<Vec<_>>()
                        .join(" | ")
                })
                .collect::<Vec<_>>()
                .join("\n")
        });

        PIPE_TABLE
            .replace_all(&text, |caps: &Captures| {
                let block = &caps[0];
                let rows: Vec<String> = block
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty() && !SEPARATOR_ROW.is_match(line))
                    .map(flatten_row)
                    .collect();

                let mut flattened = rows.join("\n");
                if block.ends_with('\n') {
                    flattened.push('\n');
                }
                flattened
            })
            .into_owned()
    })
}

fn normalize_rule() -> Rule {
    Rule::text(collapse_blank_lines)
}

/// Appends a warning past the limit. Running it again on warned text that is
/// still too long appends a second warning.
fn length_guard_rule() -> Rule {
    Rule::new(|text, options| {
        let length = char_len(text);
        let limit = options.character_limit;
        if length <= limit {
            return text.to_string();
        }

        tracing::warn!(length, limit, "text exceeds the LinkedIn character limit");
        format!("{}{}", text, length_warning(length, limit))
    })
}

/// Warning appended by the length guard for a text of `length` characters
pub fn length_warning(length: usize, limit: usize) -> String {
    format!(
        "\n\n⚠️ Atenção: O texto possui {} caracteres e excede o limite de {} do LinkedIn.",
        length, limit
    )
}
