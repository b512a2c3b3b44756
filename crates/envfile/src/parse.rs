//! Line-oriented parser for `KEY=VALUE` env files.
//!
//! Responsibilities:
//! - Split file content into assignments, skipping blank and comment lines.
//! - Handle quoting: double quotes with escape sequences, literal single
//!   quotes, and bare values with trailing inline comments.
//!
//! Does NOT handle:
//! - Variable expansion (see `expand.rs`) or decryption (see `decrypt.rs`).
//! - Merging into a target mapping (see `source.rs`).
//!
//! Invariants:
//! - Parsing is all-or-nothing: a single bad line fails the whole file, so a
//!   malformed file never contributes a partial set of keys.
//! - `ParseIssue` carries a line number and a static reason, never the line
//!   content itself.

/// How a value was quoted in the source file.
///
/// Single-quoted values are exempt from variable expansion, so the quoting
/// style must survive until the expansion step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Quoting {
    Bare,
    Single,
    Double,
}

/// One `KEY=VALUE` assignment, unexpanded.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub key: String,
    pub value: String,
    pub quoting: Quoting,
}

/// A syntax error at a specific line. The offending content is deliberately
/// not captured.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ParseIssue {
    pub line: usize,
    pub reason: &'static str,
}

/// Parse a complete env file into its assignments, in file order.
pub(crate) fn parse_str(input: &str) -> Result<Vec<Entry>, ParseIssue> {
    let mut entries = Vec::new();

    for (idx, raw_line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix("export ").map_or(line, str::trim_start);

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            return Err(ParseIssue {
                line: line_no,
                reason: "missing '=' separator",
            });
        };

        let key = raw_key.trim_end();
        if !is_valid_key(key) {
            return Err(ParseIssue {
                line: line_no,
                reason: "invalid variable name",
            });
        }

        let (value, quoting) = parse_value(raw_value.trim_start(), line_no)?;
        entries.push(Entry {
            key: key.to_string(),
            value,
            quoting,
        });
    }

    Ok(entries)
}

/// Keys follow the usual shell identifier rules.
fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_value(raw: &str, line_no: usize) -> Result<(String, Quoting), ParseIssue> {
    if let Some(rest) = raw.strip_prefix('"') {
        let (value, consumed) = parse_double_quoted(rest, line_no)?;
        ensure_only_trailing_comment(&rest[consumed..], line_no)?;
        return Ok((value, Quoting::Double));
    }

    if let Some(rest) = raw.strip_prefix('\'') {
        let Some(end) = rest.find('\'') else {
            return Err(ParseIssue {
                line: line_no,
                reason: "unterminated single-quoted value",
            });
        };
        ensure_only_trailing_comment(&rest[end + 1..], line_no)?;
        return Ok((rest[..end].to_string(), Quoting::Single));
    }

    // Bare value: strip an inline comment (a '#' at the start of the value
    // or preceded by whitespace), then surrounding whitespace.
    let comment_start = raw
        .char_indices()
        .find(|&(i, c)| c == '#' && (i == 0 || raw[..i].ends_with(char::is_whitespace)))
        .map(|(i, _)| i);
    let value = comment_start.map_or(raw, |i| &raw[..i]);
    Ok((value.trim().to_string(), Quoting::Bare))
}

/// Parse the body of a double-quoted value, processing escape sequences.
/// Returns the decoded value and the number of input bytes consumed,
/// including the closing quote.
fn parse_double_quoted(rest: &str, line_no: usize) -> Result<(String, usize), ParseIssue> {
    let mut value = String::new();
    let mut chars = rest.char_indices();

    while let Some((pos, c)) = chars.next() {
        match c {
            '"' => return Ok((value, pos + 1)),
            '\\' => match chars.next() {
                Some((_, 'n')) => value.push('\n'),
                Some((_, 'r')) => value.push('\r'),
                Some((_, 't')) => value.push('\t'),
                Some((_, '\\')) => value.push('\\'),
                Some((_, '"')) => value.push('"'),
                Some((_, other)) => {
                    value.push('\\');
                    value.push(other);
                }
                None => {
                    return Err(ParseIssue {
                        line: line_no,
                        reason: "unterminated escape sequence",
                    });
                }
            },
            _ => value.push(c),
        }
    }

    Err(ParseIssue {
        line: line_no,
        reason: "unterminated double-quoted value",
    })
}

/// After a closing quote, only whitespace or an inline comment may follow.
fn ensure_only_trailing_comment(trailing: &str, line_no: usize) -> Result<(), ParseIssue> {
    let trailing = trailing.trim_start();
    if trailing.is_empty() || trailing.starts_with('#') {
        Ok(())
    } else {
        Err(ParseIssue {
            line: line_no,
            reason: "unexpected characters after closing quote",
        })
    }
}
