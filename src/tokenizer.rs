// WHY: delimiter-based splitting is a heuristic for an unknown script; keeping it in
// one place lets both matchers see exactly the same tokens

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Punctuation that separates tokens in addition to whitespace
pub const DELIMITERS: &[char] = &['.', '-', '{', '}'];

/// Whitespace that separates tokens: ASCII only, vertical tab included.
/// A no-break space stays inside its token.
pub const LINE_WHITESPACE: &[char] = &[' ', '\t', '\n', '\u{000B}', '\u{000C}', '\r'];

/// True if `ch` belongs to the delimiter class
pub fn is_delimiter(ch: char) -> bool {
    LINE_WHITESPACE.contains(&ch) || DELIMITERS.contains(&ch)
}

/// Strip leading and trailing control characters and spaces (U+0000..=U+0020)
fn trim_token(token: &str) -> &str {
    token.trim_matches(|ch: char| ch <= ' ')
}

/// Split a line into trimmed, non-empty tokens
///
/// Consecutive delimiters never yield empty tokens. The returned iterator borrows
/// from `line` and can be recreated at any time for the same sequence.
pub fn tokenize(line: &str) -> impl Iterator<Item = &str> + Clone + '_ {
    line.split(is_delimiter)
        .map(trim_token)
        .filter(|token| !token.is_empty())
}

/// Optional preprocessing applied to tokens and dictionary words alike
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Normalization {
    /// Compare exactly as written
    #[default]
    None,
    /// Unicode lowercase before comparison
    Lowercase,
}

impl Normalization {
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            Normalization::None => Cow::Borrowed(text),
            Normalization::Lowercase => {
                let lowered = text.to_lowercase();
                if lowered == text {
                    Cow::Borrowed(text)
                } else {
                    Cow::Owned(lowered)
                }
            }
        }
    }
}
