use crate::analysis::{AnalysisReport, PermutationSummary};
use crate::dictionary::DictionarySource;
use crate::reader::ReadStats;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Per-dictionary line of the run statistics
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DictionaryStats {
    pub language: String,
    pub path: PathBuf,
    pub words_loaded: Option<usize>,
    pub exact_matches: usize,
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PermutationStats {
    pub language: String,
    pub tokens_tested: u64,
    pub matches: u64,
    pub candidates_tested: u64,
    pub aborted: u64,
}

impl From<&PermutationSummary> for PermutationStats {
    fn from(summary: &PermutationSummary) -> Self {
        Self {
            language: summary.language.clone(),
            tokens_tested: summary.tokens_tested,
            matches: summary.matches,
            candidates_tested: summary.candidates_tested,
            aborted: summary.aborted,
        }
    }
}

/// Summary of one run, written by `--stats-out`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RunStats {
    pub input: PathBuf,
    pub lines_read: u64,
    pub bytes_read: u64,
    pub distinct_characters: usize,
    pub tokens: usize,
    pub match_events: usize,
    pub dictionaries: Vec<DictionaryStats>,
    pub permutation: Option<PermutationStats>,
    pub total_processing_time_ms: u64,
}

impl RunStats {
    /// Combine read statistics, configured sources and the analysis report
    ///
    /// `sources` and `report.dictionaries` are in the same configured order.
    pub fn from_report(
        input: &ReadStats,
        sources: &[DictionarySource],
        report: &AnalysisReport,
        total_processing_time_ms: u64,
    ) -> Self {
        let dictionaries = sources
            .iter()
            .zip(&report.dictionaries)
            .map(|(source, dictionary)| DictionaryStats {
                language: source.language.clone(),
                path: source.path.clone(),
                words_loaded: dictionary.words_loaded,
                exact_matches: dictionary.exact_matches,
                error: dictionary.error.clone(),
            })
            .collect();

        Self {
            input: PathBuf::from(&input.file_path),
            lines_read: input.lines_read,
            bytes_read: input.bytes_read,
            distinct_characters: report.inventory.len(),
            tokens: report.token_count,
            match_events: report.events.len(),
            dictionaries,
            permutation: report.permutation.as_ref().map(PermutationStats::from),
            total_processing_time_ms,
        }
    }

    pub async fn write(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}
