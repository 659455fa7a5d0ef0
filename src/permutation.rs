//! Bounded brute-force matching of a token against a dictionary.
//!
//! Candidates are *arrangements with repetition* of the token's characters:
//! every position independently picks any character index of the token, so a
//! token of `L` characters yields `L^len` candidates of length `len`, repeats
//! included. This is broader than true permutations and is kept on purpose as
//! the observable matching behavior. Lengths run from 1 up to
//! `min(L, max_length)`, and the first dictionary hit ends the search.

use crate::dictionary::Dictionary;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

/// Longest arrangement tried for any token
pub const DEFAULT_MAX_LENGTH: usize = 5;

/// Candidates tested between two cancellation checks
const CANCEL_CHECK_INTERVAL: u64 = 1024;

/// Lazy generator of fixed-length arrangements with repetition
///
/// Driven by an explicit index stack (an odometer over character indices, the
/// first position most significant), so candidates come out in the same order a
/// depth-first build would produce them. Clone it or call [`reset`](Self::reset)
/// to replay the sequence.
#[derive(Debug, Clone)]
pub struct Arrangements<'a> {
    alphabet: &'a [char],
    indices: Vec<usize>,
    buffer: String,
    started: bool,
    exhausted: bool,
}

impl<'a> Arrangements<'a> {
    /// Arrangements of exactly `length` characters drawn from `alphabet`
    ///
    /// An empty alphabet or a zero length produces nothing.
    pub fn new(alphabet: &'a [char], length: usize) -> Self {
        Self {
            alphabet,
            indices: vec![0; length],
            buffer: String::with_capacity(length * 4),
            started: false,
            exhausted: alphabet.is_empty() || length == 0,
        }
    }

    pub fn length(&self) -> usize {
        self.indices.len()
    }

    /// Number of candidates in the full sequence, `None` on overflow
    pub fn total(&self) -> Option<u64> {
        if self.alphabet.is_empty() || self.indices.is_empty() {
            return Some(0);
        }
        (self.alphabet.len() as u64).checked_pow(self.indices.len() as u32)
    }

    pub fn reset(&mut self) {
        self.indices.iter_mut().for_each(|i| *i = 0);
        self.started = false;
        self.exhausted = self.alphabet.is_empty() || self.indices.is_empty();
    }

    /// Advance and borrow the next candidate without allocating
    pub fn next_candidate(&mut self) -> Option<&str> {
        if self.exhausted {
            return None;
        }

        if self.started && !self.advance() {
            self.exhausted = true;
            return None;
        }
        self.started = true;

        self.buffer.clear();
        let alphabet = self.alphabet;
        self.buffer.extend(self.indices.iter().map(|&i| alphabet[i]));
        Some(self.buffer.as_str())
    }

    /// Step the odometer, returning false once every position has wrapped
    fn advance(&mut self) -> bool {
        let radix = self.alphabet.len();
        for position in (0..self.indices.len()).rev() {
            self.indices[position] += 1;
            if self.indices[position] < radix {
                return true;
            }
            self.indices[position] = 0;
        }
        false
    }
}

impl Iterator for Arrangements<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.next_candidate().map(str::to_owned)
    }
}

/// Result of one brute-force search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PermutationOutcome {
    /// `word` was found among the arrangements of `length` characters
    Matched {
        word: String,
        length: usize,
        candidates_tested: u64,
    },
    /// Every length up to the cap was exhausted without a hit
    NoMatch { candidates_tested: u64 },
    /// Stopped early by cancellation or by the candidate budget
    Aborted { candidates_tested: u64 },
}

impl PermutationOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, PermutationOutcome::Matched { .. })
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, PermutationOutcome::Aborted { .. })
    }

    pub fn matched_word(&self) -> Option<&str> {
        match self {
            PermutationOutcome::Matched { word, .. } => Some(word),
            _ => None,
        }
    }

    pub fn candidates_tested(&self) -> u64 {
        match self {
            PermutationOutcome::Matched { candidates_tested, .. }
            | PermutationOutcome::NoMatch { candidates_tested }
            | PermutationOutcome::Aborted { candidates_tested } => *candidates_tested,
        }
    }
}

/// Brute-force matcher with a length cap and optional abort controls
#[derive(Debug, Clone)]
pub struct PermutationMatcher {
    max_length: usize,
    candidate_budget: Option<u64>,
    cancel: Option<CancellationToken>,
}

impl Default for PermutationMatcher {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            candidate_budget: None,
            cancel: None,
        }
    }
}

impl PermutationMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Stop a single token's search after this many candidates
    pub fn with_candidate_budget(mut self, budget: Option<u64>) -> Self {
        self.candidate_budget = budget;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }

    /// Search the arrangements of `token` for a word of `dictionary`
    pub fn match_token(&self, token: &str, dictionary: &Dictionary) -> PermutationOutcome {
        let alphabet: Vec<char> = token.chars().collect();
        let effective_length = alphabet.len().min(self.max_length);
        let mut tested = 0u64;

        for length in 1..=effective_length {
            let mut arrangements = Arrangements::new(&alphabet, length);
            while let Some(candidate) = arrangements.next_candidate() {
                if self.should_stop(tested) {
                    return PermutationOutcome::Aborted {
                        candidates_tested: tested,
                    };
                }
                tested += 1;

                if dictionary.contains(candidate) {
                    return PermutationOutcome::Matched {
                        word: candidate.to_string(),
                        length,
                        candidates_tested: tested,
                    };
                }
            }
        }

        PermutationOutcome::NoMatch {
            candidates_tested: tested,
        }
    }

    /// Upper bound on candidates tested for a token of `token_chars` characters
    pub fn worst_case_candidates(&self, token_chars: usize) -> Option<u64> {
        let effective_length = token_chars.min(self.max_length);
        (1..=effective_length).try_fold(0u64, |sum, length| {
            (token_chars as u64)
                .checked_pow(length as u32)
                .and_then(|count| sum.checked_add(count))
        })
    }

    fn should_stop(&self, tested: u64) -> bool {
        if self.candidate_budget.is_some_and(|budget| tested >= budget) {
            return true;
        }
        tested % CANCEL_CHECK_INTERVAL == 0 && self.is_cancelled()
    }
}

/// First dictionary word among the default-capped arrangements of `token`
pub fn match_by_permutation(token: &str, dictionary: &Dictionary) -> Option<String> {
    match PermutationMatcher::default().match_token(token, dictionary) {
        PermutationOutcome::Matched { word, .. } => Some(word),
        _ => None,
    }
}
