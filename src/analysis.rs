//! Orchestration of one analysis run.
//!
//! The [`Analyzer`] reports the character inventory, then runs one exact pass per
//! dictionary in the order given, then a single brute-force pass against the
//! designated dictionary. Lines are visited in file order and tokens in split
//! order, so the resulting event sequence is fully deterministic.

use crate::dictionary::{Dictionary, DictionaryLoad};
use crate::error::{AnalysisError, Result};
use crate::inventory::CharacterInventory;
use crate::matcher::{match_exact, MatchEvent, MatchKind};
use crate::permutation::{PermutationMatcher, PermutationOutcome, DEFAULT_MAX_LENGTH};
use crate::report::ReportSink;
use crate::tokenizer::{tokenize, Normalization};
use rayon::prelude::*;
use serde::Serialize;
use std::borrow::Cow;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Tokens whose worst-case search exceeds this are logged before matching
const EXPENSIVE_TOKEN_CANDIDATES: u64 = 10_000_000;

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Dictionary used for the brute-force pass; `None` skips the pass
    pub brute_force_language: Option<String>,
    pub max_length: usize,
    /// Per-token cap on brute-force candidates
    pub candidate_budget: Option<u64>,
    /// Spread the brute-force pass over a rayon pool
    pub parallel: bool,
    /// Worker count for parallel mode, defaults to the CPU count
    pub jobs: Option<usize>,
    pub normalization: Normalization,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            brute_force_language: None,
            max_length: DEFAULT_MAX_LENGTH,
            candidate_budget: None,
            parallel: false,
            jobs: None,
            normalization: Normalization::None,
        }
    }
}

/// Per-dictionary outcome of the exact passes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DictionaryReport {
    pub language: String,
    pub words_loaded: Option<usize>,
    pub exact_matches: usize,
    pub error: Option<String>,
}

/// Totals of the brute-force pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PermutationSummary {
    pub language: String,
    pub tokens_tested: u64,
    pub matches: u64,
    pub candidates_tested: u64,
    pub aborted: u64,
}

impl PermutationSummary {
    fn record(&mut self, outcome: &PermutationOutcome) {
        self.tokens_tested += 1;
        self.candidates_tested += outcome.candidates_tested();
        match outcome {
            PermutationOutcome::Matched { .. } => self.matches += 1,
            PermutationOutcome::Aborted { .. } => self.aborted += 1,
            PermutationOutcome::NoMatch { .. } => {}
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub inventory: CharacterInventory,
    /// Every match in reporting order
    pub events: Vec<MatchEvent>,
    pub token_count: usize,
    pub dictionaries: Vec<DictionaryReport>,
    pub permutation: Option<PermutationSummary>,
}

/// Tokens of every line, normalized once and shared by all passes
type TokenizedLines<'a> = Vec<Vec<Cow<'a, str>>>;

pub struct Analyzer {
    config: AnalysisConfig,
    cancel: CancellationToken,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        if config.max_length == 0 {
            return Err(AnalysisError::config("max_length must be at least 1"));
        }
        if config.jobs == Some(0) {
            return Err(AnalysisError::config("jobs must be at least 1"));
        }
        Ok(Self {
            config,
            cancel: CancellationToken::new(),
        })
    }

    /// Share an externally owned cancellation token
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Distinct non-whitespace characters of `lines`
    pub fn inventory<S: AsRef<str>>(lines: &[S]) -> CharacterInventory {
        CharacterInventory::collect(lines)
    }

    /// Run the full analysis and forward everything to `sink`
    ///
    /// Dictionaries that failed to load are reported through
    /// [`ReportSink::resource_error`] in their configured position and skipped.
    /// Returns `Cancelled` if the cancellation token fires, after forwarding the
    /// matches found up to that point.
    pub fn analyze<S>(
        &self,
        lines: &[S],
        dictionaries: &[DictionaryLoad],
        sink: &mut dyn ReportSink,
    ) -> Result<AnalysisReport>
    where
        S: AsRef<str>,
    {
        let inventory = Self::inventory(lines);
        sink.inventory(&inventory);
        info!("Collected {} distinct characters from {} lines", inventory.len(), lines.len());

        let tokenized = self.tokenize_lines(lines);
        let token_count: usize = tokenized.iter().map(Vec::len).sum();
        debug!("Tokenized {} lines into {} tokens", lines.len(), token_count);

        let mut events = Vec::new();
        let mut reports = Vec::with_capacity(dictionaries.len());

        for load in dictionaries {
            match load {
                Ok(dictionary) => {
                    let found = self.exact_pass(&tokenized, dictionary, sink, &mut events)?;
                    reports.push(DictionaryReport {
                        language: dictionary.language().to_string(),
                        words_loaded: Some(dictionary.len()),
                        exact_matches: found,
                        error: None,
                    });
                }
                Err(error) => {
                    sink.resource_error(error);
                    reports.push(DictionaryReport {
                        language: failed_language(error),
                        words_loaded: None,
                        exact_matches: 0,
                        error: Some(error.to_string()),
                    });
                }
            }
        }

        let permutation = match self.brute_force_dictionary(dictionaries) {
            Some(dictionary) => Some(self.permutation_pass(&tokenized, dictionary, sink, &mut events)?),
            None => None,
        };

        info!("Analysis complete: {} match events", events.len());
        Ok(AnalysisReport {
            inventory,
            events,
            token_count,
            dictionaries: reports,
            permutation,
        })
    }

    fn tokenize_lines<'a, S: AsRef<str>>(&self, lines: &'a [S]) -> TokenizedLines<'a> {
        let normalization = self.config.normalization;
        lines
            .iter()
            .map(|line| {
                tokenize(line.as_ref())
                    .map(|token| normalization.apply(token))
                    .collect()
            })
            .collect()
    }

    fn brute_force_dictionary<'d>(&self, dictionaries: &'d [DictionaryLoad]) -> Option<&'d Dictionary> {
        let language = self.config.brute_force_language.as_deref()?;
        let found = dictionaries
            .iter()
            .filter_map(|load| load.as_ref().ok())
            .find(|dictionary| dictionary.language() == language);
        if found.is_none() {
            warn!("Skipping brute-force pass: {} dictionary is not loaded", language);
        }
        found
    }

    fn exact_pass(
        &self,
        tokenized: &TokenizedLines<'_>,
        dictionary: &Dictionary,
        sink: &mut dyn ReportSink,
        events: &mut Vec<MatchEvent>,
    ) -> Result<usize> {
        sink.pass_started(dictionary.language(), MatchKind::Exact, tokenized.len());
        let mut found = 0;

        for (index, tokens) in tokenized.iter().enumerate() {
            if self.cancel.is_cancelled() {
                return Err(cancel_pass(sink, dictionary.language(), MatchKind::Exact, found, index + 1));
            }
            for event in match_exact(tokens.iter().map(|token| &**token), dictionary, index + 1) {
                sink.matched(&event);
                events.push(event);
                found += 1;
            }
            sink.line_done();
        }

        info!("Exact pass against {}: {} matches", dictionary.language(), found);
        sink.pass_finished(dictionary.language(), MatchKind::Exact, found);
        Ok(found)
    }

    fn permutation_pass(
        &self,
        tokenized: &TokenizedLines<'_>,
        dictionary: &Dictionary,
        sink: &mut dyn ReportSink,
        events: &mut Vec<MatchEvent>,
    ) -> Result<PermutationSummary> {
        let matcher = PermutationMatcher::new()
            .with_max_length(self.config.max_length)
            .with_candidate_budget(self.config.candidate_budget)
            .with_cancellation(self.cancel.clone());

        for token in tokenized.iter().flatten() {
            let chars = token.chars().count();
            match matcher.worst_case_candidates(chars) {
                Some(worst) if worst <= EXPENSIVE_TOKEN_CANDIDATES => {}
                worst => debug!(token = %token, chars, ?worst, "Expensive brute-force token"),
            }
        }

        sink.pass_started(dictionary.language(), MatchKind::Permutation, tokenized.len());

        // empty in sequential mode, where tokens are matched inline below
        let outcomes = if self.config.parallel {
            self.match_parallel(&matcher, tokenized, dictionary)?
        } else {
            Vec::new()
        };

        let mut summary = PermutationSummary {
            language: dictionary.language().to_string(),
            ..Default::default()
        };

        for (index, tokens) in tokenized.iter().enumerate() {
            for (position, token) in tokens.iter().enumerate() {
                // parallel outcomes were computed up front, so a late cancel only shows here
                if self.cancel.is_cancelled() {
                    let matches = summary.matches as usize;
                    return Err(cancel_pass(sink, dictionary.language(), MatchKind::Permutation, matches, index + 1));
                }
                let outcome = match outcomes.get(index) {
                    Some(line_outcomes) => line_outcomes[position].clone(),
                    None => matcher.match_token(token, dictionary),
                };
                summary.record(&outcome);

                match outcome {
                    PermutationOutcome::Matched { word, .. } => {
                        let event = MatchEvent {
                            source_token: token.to_string(),
                            matched_word: word,
                            kind: MatchKind::Permutation,
                            language: dictionary.language().to_string(),
                            line: index + 1,
                        };
                        sink.matched(&event);
                        events.push(event);
                    }
                    PermutationOutcome::Aborted { candidates_tested } => {
                        if matcher.is_cancelled() {
                            let matches = summary.matches as usize;
                            return Err(cancel_pass(sink, dictionary.language(), MatchKind::Permutation, matches, index + 1));
                        }
                        debug!(token = %token, candidates_tested, "Candidate budget exhausted");
                    }
                    PermutationOutcome::NoMatch { .. } => {}
                }
            }
            sink.line_done();
        }

        info!(
            "Brute-force pass against {}: {} matches over {} tokens, {} candidates",
            summary.language, summary.matches, summary.tokens_tested, summary.candidates_tested
        );
        sink.pass_finished(dictionary.language(), MatchKind::Permutation, summary.matches as usize);
        Ok(summary)
    }

    /// Match every token on a rayon pool, keeping line and token order
    fn match_parallel(
        &self,
        matcher: &PermutationMatcher,
        tokenized: &TokenizedLines<'_>,
        dictionary: &Dictionary,
    ) -> Result<Vec<Vec<PermutationOutcome>>> {
        let jobs = self.config.jobs.unwrap_or_else(num_cpus::get);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .map_err(|e| AnalysisError::config(format!("failed to build worker pool: {e}")))?;

        info!("Running brute-force pass on {} workers", jobs);
        Ok(pool.install(|| {
            tokenized
                .par_iter()
                .map(|tokens| {
                    tokens
                        .iter()
                        .map(|token| matcher.match_token(token, dictionary))
                        .collect()
                })
                .collect()
        }))
    }
}

/// Close the pass on the sink so progress output is finished, then yield `Cancelled`
fn cancel_pass(sink: &mut dyn ReportSink, language: &str, kind: MatchKind, matches: usize, line: usize) -> AnalysisError {
    warn!("{} pass against {} cancelled at line {}", kind, language, line);
    sink.pass_finished(language, kind, matches);
    AnalysisError::Cancelled
}

fn failed_language(error: &AnalysisError) -> String {
    match error {
        AnalysisError::ResourceUnavailable {
            resource: crate::error::Resource::Dictionary(language),
            ..
        } => language.clone(),
        other => format!("<{other}>"),
    }
}
