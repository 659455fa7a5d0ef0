use crate::dictionary::Dictionary;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a token was attributed to a dictionary word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// The token itself is a dictionary word
    Exact,
    /// A bounded arrangement of the token's characters is a dictionary word
    Permutation,
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchKind::Exact => write!(f, "exact"),
            MatchKind::Permutation => write!(f, "permutation"),
        }
    }
}

/// One attribution of a source token to a word of a named language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvent {
    pub source_token: String,
    pub matched_word: String,
    pub kind: MatchKind,
    pub language: String,
    /// 1-based line the token came from
    pub line: usize,
}

impl fmt::Display for MatchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MatchKind::Exact => write!(
                f,
                "Matched word from {}: {} (line {})",
                self.language, self.source_token, self.line
            ),
            MatchKind::Permutation => write!(
                f,
                "Brute force match found in {}: {} -> {} (line {})",
                self.language, self.source_token, self.matched_word, self.line
            ),
        }
    }
}

/// Report every token that is a member of `dictionary`
///
/// Membership is exact string equality. Duplicated tokens produce duplicated
/// events, in token order.
pub fn match_exact<'a, I>(
    tokens: I,
    dictionary: &'a Dictionary,
    line: usize,
) -> impl Iterator<Item = MatchEvent> + 'a
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: 'a,
{
    tokens
        .into_iter()
        .filter(move |token| !token.is_empty() && dictionary.contains(token))
        .map(move |token| MatchEvent {
            source_token: token.to_string(),
            matched_word: token.to_string(),
            kind: MatchKind::Exact,
            language: dictionary.language().to_string(),
            line,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    #[test]
    fn test_single_exact_match() {
        let dictionary = Dictionary::from_lines("english", ["cat", "dog"]);
        let events: Vec<MatchEvent> = match_exact(["cat", "fish"], &dictionary, 1).collect();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].source_token, "cat");
        assert_eq!(events[0].matched_word, "cat");
        assert_eq!(events[0].kind, MatchKind::Exact);
        assert_eq!(events[0].language, "english");
    }

    #[test]
    fn test_case_sensitive_membership() {
        let dictionary = Dictionary::from_lines("latin", ["aqua"]);
        assert_eq!(match_exact(["Aqua", "AQUA"], &dictionary, 1).count(), 0);
    }

    #[test]
    fn test_duplicates_are_reported_in_order() {
        let dictionary = Dictionary::from_lines("latin", ["et", "in"]);
        let line = "in.aqua et-in";
        let matched: Vec<String> = match_exact(tokenize(line), &dictionary, 7)
            .map(|event| event.source_token)
            .collect();
        assert_eq!(matched, vec!["in", "et", "in"]);
    }

    #[test]
    fn test_empty_token_never_matches() {
        let dictionary = Dictionary::from_lines("latin", ["a"]);
        assert_eq!(match_exact([""], &dictionary, 1).count(), 0);
    }

    #[test]
    fn test_event_display() {
        let event = MatchEvent {
            source_token: "ab".to_string(),
            matched_word: "ba".to_string(),
            kind: MatchKind::Permutation,
            language: "latin".to_string(),
            line: 3,
        };
        assert_eq!(
            event.to_string(),
            "Brute force match found in latin: ab -> ba (line 3)"
        );
    }
}
