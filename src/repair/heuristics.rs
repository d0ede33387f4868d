//! Targeted textual rewrites for malformed JSON
//!
//! Each fix is independent and intentionally blunt: the rewrites run over
//! raw text, not a token stream, so they can touch string contents (the
//! global quote replacement is lossy for apostrophes inside values). The
//! relaxed parser is the fallback when these rewrites are not enough.

use once_cell::sync::Lazy;
use regex::Regex;

/// Identifier-like key immediately followed by `:`, preceded by `{` or `,`
static BARE_KEY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([{,]\s*)([A-Za-z_$][A-Za-z0-9_$]*)\s*:").unwrap());

/// Adjacent object close/open with a missing separator
static OBJECT_SEAM_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\}\s*\{").unwrap());

/// Comma immediately before a closing brace or bracket
static TRAILING_COMMA_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*([}\]])").unwrap());

/// Apply all textual fixes in their fixed order
pub fn apply(text: &str) -> String {
    let fixed = quote_bare_keys(text);
    let fixed = normalize_quotes(&fixed);
    let fixed = insert_object_separators(&fixed);
    let fixed = strip_trailing_commas(&fixed);
    escape_lone_backslashes(&fixed)
}

/// Wrap unquoted object keys in double quotes
pub fn quote_bare_keys(text: &str) -> String {
    BARE_KEY_REGEX
        .replace_all(text, "${1}\"${2}\":")
        .into_owned()
}

/// Replace all single quotes with double quotes (global, unconditional)
pub fn normalize_quotes(text: &str) -> String {
    text.replace('\'', "\"")
}

/// Insert a comma between adjacent `}{` occurrences
pub fn insert_object_separators(text: &str) -> String {
    OBJECT_SEAM_REGEX.replace_all(text, "},{").into_owned()
}

/// Remove trailing commas before a closing `}` or `]`
pub fn strip_trailing_commas(text: &str) -> String {
    TRAILING_COMMA_REGEX.replace_all(text, "${1}").into_owned()
}

/// Double any backslash that does not open a recognized escape sequence.
///
/// Recognized openers: `"` `\` `/` `b` `f` `n` `r` `t` `u`. A character scan
/// is used here rather than a regex since the `regex` crate has no lookahead.
pub fn escape_lone_backslashes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some(&next) if is_escape_opener(next) => {
                out.push('\\');
                out.push(next);
                chars.next();
            }
            _ => {
                out.push('\\');
                out.push('\\');
            }
        }
    }

    out
}

fn is_escape_opener(c: char) -> bool {
    matches!(c, '"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't' | 'u')
}
