//! Admin pipeline orchestration: generate → execute → interpret, each stage attempted once.

use std::sync::Arc;

use llm_client::LlmClient;
use storage::QueryStore;
use tracing::{error, info, instrument};

use crate::config::PipelineConfig;
use crate::error::{Stage, StageFailure};
use crate::executor::SqlExecutor;
use crate::generator::SqlGenerator;
use crate::interpreter::ResultInterpreter;
use crate::preview;

/// Successful admin answer: the explanation and the SQL that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminAnswer {
    pub answer: String,
    pub sql: String,
}

/// What the end user sees for one admin question. There is no partial success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    Answered { answer: String, sql: String },
    Failed { message: String },
}

impl PipelineOutcome {
    pub fn message(&self) -> &str {
        match self {
            PipelineOutcome::Answered { answer, .. } => answer,
            PipelineOutcome::Failed { message } => message,
        }
    }

    /// SQL is only present on success.
    pub fn sql(&self) -> Option<&str> {
        match self {
            PipelineOutcome::Answered { sql, .. } => Some(sql),
            PipelineOutcome::Failed { .. } => None,
        }
    }

    pub fn is_answered(&self) -> bool {
        matches!(self, PipelineOutcome::Answered { .. })
    }

    fn from_failure(failure: &StageFailure) -> Self {
        PipelineOutcome::Failed {
            message: format!(
                "An error occurred while processing your request: {}\n\n\
                 Try rephrasing the question or contact the administrator.",
                failure.error
            ),
        }
    }
}

impl From<AdminAnswer> for PipelineOutcome {
    fn from(answer: AdminAnswer) -> Self {
        PipelineOutcome::Answered {
            answer: answer.answer,
            sql: answer.sql,
        }
    }
}

#[derive(Clone)]
pub struct AdminPipeline {
    generator: SqlGenerator,
    executor: SqlExecutor,
    interpreter: ResultInterpreter,
}

impl AdminPipeline {
    pub fn new(
        generator: SqlGenerator,
        executor: SqlExecutor,
        interpreter: ResultInterpreter,
    ) -> Self {
        Self {
            generator,
            executor,
            interpreter,
        }
    }

    /// Wires all three stages to one gateway and one store.
    pub fn from_parts(
        llm: Arc<dyn LlmClient>,
        store: Arc<dyn QueryStore>,
        config: &PipelineConfig,
    ) -> Self {
        Self::new(
            SqlGenerator::new(llm.clone()),
            SqlExecutor::new(store),
            ResultInterpreter::new(llm, config.row_limit),
        )
    }

    /// Runs the stages in order and stops at the first failure, tagging it with its stage.
    pub async fn run(&self, question: &str) -> Result<AdminAnswer, StageFailure> {
        let sql = self
            .generator
            .generate(question)
            .await
            .map_err(|e| StageFailure::new(Stage::Generating, e))?;

        let rows = self
            .executor
            .execute(&sql)
            .await
            .map_err(|e| StageFailure::new(Stage::Executing, e))?;

        let answer = self
            .interpreter
            .interpret(question, &sql, &rows)
            .await
            .map_err(|e| StageFailure::new(Stage::Interpreting, e))?;

        Ok(AdminAnswer { answer, sql })
    }

    /// Never fails: a stage failure is logged and folded into a soft message without SQL.
    #[instrument(skip(self, question))]
    pub async fn run_admin(&self, question: &str) -> PipelineOutcome {
        info!(question = %preview(question, 100), "Processing admin question");

        match self.run(question).await {
            Ok(answer) => {
                info!(sql = %answer.sql, "Admin question answered");
                answer.into()
            }
            Err(failure) => {
                error!(stage = %failure.stage, error = %failure.error, "Admin pipeline failed");
                PipelineOutcome::from_failure(&failure)
            }
        }
    }
}
