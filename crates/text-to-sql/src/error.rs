//! Pipeline error types.
//!
//! Every stage returns [`PipelineError`]; the pipeline tags it with the [`Stage`] that failed.
//! The tagged [`StageFailure`] is collapsed into a user-facing message only at the outer boundary.

use std::fmt;

use storage::StorageError;
use thiserror::Error;

/// Active state of one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Generating,
    Executing,
    Interpreting,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Generating => "SQL generation",
            Stage::Executing => "SQL execution",
            Stage::Interpreting => "result interpretation",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum PipelineError {
    /// The language model request failed or timed out.
    #[error("LLM request failed: {0:#}")]
    Gateway(anyhow::Error),

    /// Generated text is empty or not a single read-only statement; never sent to the store.
    #[error("Generated SQL was rejected: {0}")]
    MalformedGeneration(String),

    /// The store refused or failed to run the statement.
    #[error("SQL execution failed: {0}")]
    Execution(#[from] StorageError),

    #[error("Failed to serialize query results: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A pipeline error together with the stage that produced it.
#[derive(Error, Debug)]
#[error("{stage} failed: {error}")]
pub struct StageFailure {
    pub stage: Stage,
    #[source]
    pub error: PipelineError,
}

impl StageFailure {
    pub fn new(stage: Stage, error: PipelineError) -> Self {
        Self { stage, error }
    }
}
