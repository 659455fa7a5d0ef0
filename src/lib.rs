pub mod analysis;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod inventory;
pub mod matcher;
pub mod permutation;
pub mod reader;
pub mod report;
pub mod stats;
pub mod tokenizer;

// Re-export the matching engine for convenient access
pub use analysis::{AnalysisConfig, AnalysisReport, Analyzer};
pub use dictionary::{load_dictionaries, Dictionary, DictionaryLoad, DictionarySource};
pub use error::{AnalysisError, Resource};
pub use inventory::CharacterInventory;
pub use matcher::{match_exact, MatchEvent, MatchKind};
pub use permutation::{match_by_permutation, Arrangements, PermutationMatcher, PermutationOutcome};
pub use report::{CollectingSink, ConsoleReporter, ReportSink};
pub use tokenizer::{tokenize, Normalization};
