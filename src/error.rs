// WHY: one error taxonomy for the library so callers can tell a missing
// dictionary apart from a fatal input failure or a user abort

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which external resource a load failure refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// The primary text being analyzed
    Input,
    /// A named word list
    Dictionary(String),
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Input => write!(f, "input text"),
            Resource::Dictionary(language) => write!(f, "{language} dictionary"),
        }
    }
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A file could not be opened or decoded
    #[error("Failed to load {resource} from {}: {message}", .path.display())]
    ResourceUnavailable {
        resource: Resource,
        path: PathBuf,
        message: String,
    },

    /// Invalid run configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The run was aborted through its cancellation token
    #[error("Analysis cancelled")]
    Cancelled,
}

impl AnalysisError {
    pub fn unavailable(resource: Resource, path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        AnalysisError::ResourceUnavailable {
            resource,
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        AnalysisError::Config(message.into())
    }

    /// True for failures that end the whole run
    pub fn is_fatal(&self) -> bool {
        match self {
            AnalysisError::ResourceUnavailable { resource, .. } => *resource == Resource::Input,
            AnalysisError::Config(_) | AnalysisError::Cancelled => true,
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
