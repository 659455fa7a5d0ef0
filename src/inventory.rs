use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Set of distinct non-whitespace characters seen in a corpus
///
/// Characters are Unicode scalar values, so multi-byte glyphs keep their identity.
/// Iteration order is code point order, which keeps reports stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterInventory {
    characters: BTreeSet<char>,
}

impl CharacterInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the inventory of every line in `lines`
    pub fn collect<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut inventory = Self::new();
        for line in lines {
            inventory.add_line(line.as_ref());
        }
        inventory
    }

    /// Add the non-whitespace characters of one line
    pub fn add_line(&mut self, line: &str) {
        self.characters
            .extend(line.chars().filter(|&ch| !is_layout_whitespace(ch)));
    }

    pub fn contains(&self, ch: char) -> bool {
        self.characters.contains(&ch)
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.characters.iter().copied()
    }
}

impl fmt::Display for CharacterInventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, ch) in self.characters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{ch}")?;
        }
        write!(f, "]")
    }
}

impl Extend<char> for CharacterInventory {
    fn extend<T: IntoIterator<Item = char>>(&mut self, iter: T) {
        self.characters
            .extend(iter.into_iter().filter(|&ch| !is_layout_whitespace(ch)));
    }
}

/// Space, line and paragraph separators plus the ASCII layout controls
///
/// No-break spaces (U+00A0, U+2007, U+202F) and NEL are glyphs, while the
/// information separators U+001C..=U+001F count as whitespace.
pub fn is_layout_whitespace(ch: char) -> bool {
    match ch {
        '\u{001C}'..='\u{001F}' => true,
        '\u{0085}' | '\u{00A0}' | '\u{2007}' | '\u{202F}' => false,
        _ => ch.is_whitespace(),
    }
}
