//! Text helpers shared by the rewrite rules.

use regex::{Captures, Regex};

/// Number of characters as LinkedIn counts them (Unicode scalar values)
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Remove every match of `pattern` until none is left.
///
/// Deleting one tag can glue its neighbours into a new tag (`<<p>p>`), so a
/// single pass is not enough. Each pass shortens the text, so this ends.
pub fn strip_all(text: &str, pattern: &Regex) -> String {
    let mut current = text.to_string();
    while pattern.is_match(&current) {
        current = pattern.replace_all(&current, "").into_owned();
    }
    current
}

/// Uppercase text while leaving markup and entities untouched.
///
/// `<em>` stays `<em>` so later rules still recognise it, and `&amp;` stays a
/// valid entity.
pub fn uppercase_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(&['<', '&'][..]) {
        result.push_str(&rest[..start].to_uppercase());
        rest = &rest[start..];

        let end = if rest.starts_with('<') {
            rest.find('>').map(|i| i + 1)
        } else {
            entity_len(rest)
        };

        match end {
            Some(end) => {
                result.push_str(&rest[..end]);
                rest = &rest[end..];
            }
            None => {
                // Lone `<` or `&`, uppercase it with the text that follows
                result.push_str(&rest[..1]);
                rest = &rest[1..];
            }
        }
    }

    result.push_str(&rest.to_uppercase());
    result
}

/// Length of an HTML entity such as `&amp;` or `&#39;` at the start of `text`
fn entity_len(text: &str) -> Option<usize> {
    let body = text.strip_prefix('&')?;
    let end = body.find(';')?;
    let name = &body[..end];
    let valid = !name.is_empty()
        && name.len() <= 10
        && (name.chars().all(|c| c.is_ascii_alphanumeric())
            || (name.starts_with('#') && name[1..].chars().all(|c| c.is_ascii_alphanumeric())));
    valid.then_some(end + 2)
}

/// Prefix the first line and indent the continuation lines.
///
/// Blank lines stay empty so that no trailing whitespace is produced.
pub fn prefix_lines(text: &str, prefix: &str, indent: &str) -> String {
    text.lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                format!("{}{}", prefix, line)
            } else if line.trim().is_empty() {
                String::new()
            } else {
                format!("{}{}", indent, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split a `| a | b |` row into trimmed cells joined by ` | `
pub fn flatten_row(row: &str) -> String {
    row.trim()
        .trim_matches('|')
        .split('|')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Rewrite nested constructs from the inside out.
///
/// Each `close` match is paired with the nearest unpaired `open` match before
/// it and the whole span is replaced with `render(open_captures, inner)`, where
/// `inner` already has its nested spans rendered. Closing tags without an
/// opener, and openers that are never closed, are left in place. Unlike a lazy
/// `open.*?close` pattern, nested blocks pair up correctly.
///
/// The input is scanned once, so sequential blocks cost linear time.
pub fn replace_innermost<F>(text: &str, open: &Regex, close: &Regex, mut render: F) -> String
where
    F: FnMut(&Captures, &str) -> String,
{
    enum Tag<'t> {
        Open(Captures<'t>),
        Close(usize, usize),
    }

    let mut tags: Vec<(usize, Tag<'_>)> = open
        .captures_iter(text)
        .filter_map(|caps| Some((caps.get(0)?.start(), Tag::Open(caps))))
        .chain(
            close
                .find_iter(text)
                .map(|m| (m.start(), Tag::Close(m.start(), m.end()))),
        )
        .collect();
    tags.sort_by_key(|(start, _)| *start);

    let mut result = String::with_capacity(text.len());
    // Unclosed openers: their position in `result` and their captures
    let mut pending: Vec<(usize, usize, Captures<'_>)> = Vec::new();
    let mut last = 0;

    for (start, tag) in tags {
        if start < last {
            continue;
        }
        result.push_str(&text[last..start]);
        last = start;

        match tag {
            Tag::Open(caps) => {
                let Some(whole) = caps.get(0) else {
                    continue;
                };
                let open_at = result.len();
                result.push_str(whole.as_str());
                pending.push((open_at, result.len(), caps));
                last = whole.end();
            }
            Tag::Close(close_start, close_end) => {
                match pending.pop() {
                    Some((open_at, inner_at, caps)) => {
                        let inner = result.split_off(inner_at);
                        result.truncate(open_at);
                        result.push_str(&render(&caps, &inner));
                    }
                    None => result.push_str(&text[close_start..close_end]),
                }
                last = close_end;
            }
        }
    }

    result.push_str(&text[last..]);
    result
}

/// Collapse runs of three or more newlines and trim the result
pub fn collapse_blank_lines(output: &str) -> String {
    let result = output.trim();

    let mut newline_count = 0;
    let mut processed = String::with_capacity(result.len());

    for c in result.chars() {
        if c == '\n' {
            newline_count += 1;
            if newline_count <= 2 {
                processed.push(c);
            }
        } else {
            newline_count = 0;
            processed.push(c);
        }
    }

    processed
}
