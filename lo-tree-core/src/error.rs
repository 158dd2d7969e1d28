use thiserror::Error;

use crate::lo::LoKind;

/// Boxed error returned by external collaborators (fetchers, writers).
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

/// Every failure the tree operations can surface. Nothing is recovered locally.
#[derive(Debug, Error)]
pub enum LoError {
    /// A precondition field was absent on the node an operation was given.
    #[error("learning object of type `{kind}` is missing required field `{field}`")]
    MissingField { field: &'static str, kind: LoKind },

    #[error("failed to fetch {url}")]
    Fetch {
        url: String,
        #[source]
        source: CollaboratorError,
    },

    #[error("failed to parse learning object: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to write {key}")]
    Write {
        key: String,
        #[source]
        source: CollaboratorError,
    },
}

impl LoError {
    pub fn missing(field: &'static str, kind: &LoKind) -> Self {
        LoError::MissingField {
            field,
            kind: kind.clone(),
        }
    }
}
