//! Named word lists used as membership oracles.
//!
//! Each dictionary belongs to one language and is never merged with another.
//! Words are stored trimmed and otherwise exactly as written, so lookups are
//! case-sensitive unless a [`Normalization`] was applied at load time.

use crate::error::{Resource, Result};
use crate::reader::LineReader;
use crate::tokenizer::Normalization;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionary {
    language: String,
    words: HashSet<String>,
}

impl Dictionary {
    /// Build a dictionary from word-list lines, one word per line
    ///
    /// Lines are trimmed and blank lines are skipped.
    pub fn from_lines<I, S>(language: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_lines_normalized(language, lines, Normalization::None)
    }

    pub fn from_lines_normalized<I, S>(
        language: impl Into<String>,
        lines: I,
        normalization: Normalization,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = lines
            .into_iter()
            .filter_map(|line| {
                let word = line.as_ref().trim();
                if word.is_empty() {
                    None
                } else {
                    Some(normalization.apply(word).into_owned())
                }
            })
            .collect();

        Self {
            language: language.into(),
            words,
        }
    }

    /// Load a word list from disk
    pub async fn load(
        reader: &LineReader,
        source: &DictionarySource,
        normalization: Normalization,
    ) -> Result<Self> {
        let (lines, _stats) = reader
            .read_lines(&source.path, Resource::Dictionary(source.language.clone()))
            .await?;
        let dictionary = Self::from_lines_normalized(&source.language, lines, normalization);
        info!(
            "Loaded {} dictionary from {}: {} words",
            dictionary.language,
            source.path.display(),
            dictionary.len()
        );
        Ok(dictionary)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Outcome of loading one configured dictionary
pub type DictionaryLoad = Result<Dictionary>;

/// Load every source in order
///
/// A failing source yields an `Err` in its slot and never prevents the
/// remaining sources from loading.
pub async fn load_dictionaries(
    reader: &LineReader,
    sources: &[DictionarySource],
    normalization: Normalization,
) -> Vec<DictionaryLoad> {
    let mut loads = Vec::with_capacity(sources.len());
    for source in sources {
        let load = Dictionary::load(reader, source, normalization).await;
        if let Err(ref e) = load {
            warn!("Continuing without {} dictionary: {}", source.language, e);
        }
        loads.push(load);
    }
    loads
}

/// Where to load one named dictionary from
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DictionarySource {
    pub language: String,
    pub path: PathBuf,
}

impl DictionarySource {
    pub fn new(language: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self {
            language: language.into(),
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use tempfile::TempDir;

    #[test]
    fn test_from_lines_trims_and_skips_blank() {
        let dictionary = Dictionary::from_lines("latin", ["  aqua ", "", "   ", "terra\t"]);
        assert_eq!(dictionary.len(), 2);
        assert!(dictionary.contains("aqua"));
        assert!(dictionary.contains("terra"));
        assert!(!dictionary.contains(""));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let dictionary = Dictionary::from_lines("latin", ["Roma"]);
        assert!(dictionary.contains("Roma"));
        assert!(!dictionary.contains("roma"));
    }

    #[test]
    fn test_lowercase_normalization_at_load() {
        let dictionary =
            Dictionary::from_lines_normalized("latin", ["Roma", "AQUA"], Normalization::Lowercase);
        assert!(dictionary.contains("roma"));
        assert!(dictionary.contains("aqua"));
        assert!(!dictionary.contains("Roma"));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("malay_dictionary.txt");
        tokio::fs::write(&path, "air\nbatu\n\napi\n").await.unwrap();

        let source = DictionarySource::new("malay", &path);
        let dictionary = Dictionary::load(&LineReader::default(), &source, Normalization::None)
            .await
            .unwrap();

        assert_eq!(dictionary.language(), "malay");
        assert_eq!(dictionary.len(), 3);
        assert!(dictionary.contains("batu"));
    }

    #[tokio::test]
    async fn test_load_dictionaries_isolates_failures() {
        let temp_dir = TempDir::new().unwrap();
        let latin = temp_dir.path().join("latin_dictionary.txt");
        tokio::fs::write(&latin, "et\nin\n").await.unwrap();

        let sources = vec![
            DictionarySource::new("latin", &latin),
            DictionarySource::new("malay", temp_dir.path().join("malay_dictionary.txt")),
            DictionarySource::new("latin-again", &latin),
        ];
        let loads = load_dictionaries(&LineReader::default(), &sources, Normalization::None).await;

        assert_eq!(loads.len(), 3);
        assert_eq!(loads[0].as_ref().map(Dictionary::len).ok(), Some(2));
        assert!(loads[1].is_err());
        assert_eq!(loads[2].as_ref().map(Dictionary::language).ok(), Some("latin-again"));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let source = DictionarySource::new("proto-romance", temp_dir.path().join("missing.txt"));

        let err = Dictionary::load(&LineReader::default(), &source, Normalization::None)
            .await
            .unwrap_err();

        assert!(!err.is_fatal());
        assert!(matches!(
            err,
            AnalysisError::ResourceUnavailable { resource: Resource::Dictionary(ref lang), .. } if lang == "proto-romance"
        ));
    }
}
