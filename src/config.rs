//! Run configuration.
//!
//! A run is described by CLI arguments, optionally layered over a TOML run file.
//! CLI values win over file values; anything still unset falls back to the
//! built-in defaults, which analyze `textfile` against the Latin, Malay and
//! Proto-Romance word lists and brute-force against Latin.
//!
//! ```toml
//! input = "voynich.txt"
//! brute_force = "latin"
//! max_length = 5
//!
//! [[dictionary]]
//! language = "latin"
//! path = "dicts/latin.txt"
//! ```

use crate::analysis::AnalysisConfig;
use crate::dictionary::DictionarySource;
use crate::error::{AnalysisError, Result};
use crate::permutation::DEFAULT_MAX_LENGTH;
use crate::tokenizer::Normalization;
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_INPUT: &str = "textfile";
pub const DEFAULT_BRUTE_FORCE_LANGUAGE: &str = "latin";

/// Language/path pairs used when nothing else is configured
pub const DEFAULT_DICTIONARIES: &[(&str, &str)] = &[
    ("latin", "latin_dictionary.txt"),
    ("malay", "malay_dictionary.txt"),
    ("proto-romance", "proto_romance_dictionary.txt"),
];

#[derive(Parser, Debug, Default)]
#[command(name = "glyphmatch")]
#[command(about = "Glyph inventory and dictionary attribution for undeciphered-script corpora")]
#[command(version)]
pub struct Args {
    /// Text file to analyze [default: textfile]
    pub input: Option<PathBuf>,

    /// Dictionary as LANGUAGE=PATH; repeat for several, order is kept
    #[arg(long = "dict", value_name = "LANGUAGE=PATH")]
    pub dictionaries: Vec<String>,

    /// Language whose dictionary gets the brute-force pass [default: latin]
    #[arg(long, value_name = "LANGUAGE")]
    pub brute_force: Option<String>,

    /// Skip the brute-force pass entirely
    #[arg(long, conflicts_with = "brute_force")]
    pub no_brute_force: bool,

    /// Longest arrangement tried by the brute-force pass [default: 5]
    #[arg(long)]
    pub max_length: Option<usize>,

    /// Stop a token's brute-force search after this many candidates
    #[arg(long)]
    pub candidate_budget: Option<u64>,

    /// Run the brute-force pass on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Worker threads for --parallel
    #[arg(long, requires = "parallel")]
    pub jobs: Option<usize>,

    /// Lowercase tokens and dictionary words before matching
    #[arg(long)]
    pub lowercase: bool,

    /// TOML run file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Echo the input text before the analysis
    #[arg(long)]
    pub show_raw: bool,

    /// Suppress console progress bars
    #[arg(long)]
    pub no_progress: bool,

    /// Write run statistics as JSON to this path
    #[arg(long, value_name = "FILE")]
    pub stats_out: Option<PathBuf>,
}

/// Contents of a TOML run file; every field is optional
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RunFile {
    pub input: Option<PathBuf>,
    pub brute_force: Option<String>,
    pub max_length: Option<usize>,
    pub candidate_budget: Option<u64>,
    pub parallel: Option<bool>,
    pub jobs: Option<usize>,
    pub normalization: Option<Normalization>,
    #[serde(default, rename = "dictionary")]
    pub dictionaries: Vec<DictionarySource>,
}

impl RunFile {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| AnalysisError::config(format!("invalid run file: {e}")))
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            AnalysisError::config(format!("cannot read run file {}: {e}", path.display()))
        })?;
        Self::parse(&content)
    }
}

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub dictionaries: Vec<DictionarySource>,
    pub analysis: AnalysisConfig,
    pub show_raw: bool,
    pub show_progress: bool,
    pub stats_out: Option<PathBuf>,
}

impl RunConfig {
    /// Merge CLI arguments over the run file named by `--config`, if any
    pub async fn from_args(args: &Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => RunFile::load(path).await?,
            None => RunFile::default(),
        };
        Self::resolve(args, file)
    }

    pub fn resolve(args: &Args, file: RunFile) -> Result<Self> {
        let dictionaries = if !args.dictionaries.is_empty() {
            args.dictionaries
                .iter()
                .map(|entry| parse_dictionary_arg(entry))
                .collect::<Result<Vec<_>>>()?
        } else if !file.dictionaries.is_empty() {
            file.dictionaries
        } else {
            DEFAULT_DICTIONARIES
                .iter()
                .map(|(language, path)| DictionarySource::new(*language, path))
                .collect()
        };

        let brute_force_language = if args.no_brute_force {
            None
        } else {
            Some(
                args.brute_force
                    .clone()
                    .or(file.brute_force)
                    .unwrap_or_else(|| DEFAULT_BRUTE_FORCE_LANGUAGE.to_string()),
            )
        };

        let normalization = if args.lowercase {
            Normalization::Lowercase
        } else {
            file.normalization.unwrap_or_default()
        };

        let max_length = args.max_length.or(file.max_length).unwrap_or(DEFAULT_MAX_LENGTH);
        if max_length == 0 {
            return Err(AnalysisError::config("max_length must be at least 1"));
        }

        let config = Self {
            input: args
                .input
                .clone()
                .or(file.input)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT)),
            dictionaries,
            analysis: AnalysisConfig {
                brute_force_language,
                max_length,
                candidate_budget: args.candidate_budget.or(file.candidate_budget),
                parallel: args.parallel || file.parallel.unwrap_or(false),
                jobs: args.jobs.or(file.jobs),
                normalization,
            },
            show_raw: args.show_raw,
            show_progress: !args.no_progress,
            stats_out: args.stats_out.clone(),
        };

        debug!(?config, "Resolved run configuration");
        Ok(config)
    }
}

/// Parse `LANGUAGE=PATH`
pub fn parse_dictionary_arg(entry: &str) -> Result<DictionarySource> {
    let (language, path) = entry
        .split_once('=')
        .ok_or_else(|| AnalysisError::config(format!("expected LANGUAGE=PATH, got '{entry}'")))?;
    let language = language.trim();
    let path = path.trim();
    if language.is_empty() || path.is_empty() {
        return Err(AnalysisError::config(format!(
            "expected LANGUAGE=PATH, got '{entry}'"
        )));
    }
    Ok(DictionarySource::new(language, path))
}
