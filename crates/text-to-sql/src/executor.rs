//! SQL execution stage: checks the statement kind and runs it once on the store.

use std::sync::Arc;

use storage::{QueryStore, Row};
use tracing::{error, info, instrument};

use crate::error::PipelineError;
use crate::guard::check_read_only;
use crate::preview;

#[derive(Clone)]
pub struct SqlExecutor {
    store: Arc<dyn QueryStore>,
}

impl SqlExecutor {
    pub fn new(store: Arc<dyn QueryStore>) -> Self {
        Self { store }
    }

    /// Returns the complete result set; bounding what goes onward is the caller's job.
    #[instrument(skip(self, sql))]
    pub async fn execute(&self, sql: &str) -> Result<Vec<Row>, PipelineError> {
        info!(sql = %preview(sql, 200), "Executing SQL");

        check_read_only(sql)?;

        let rows = self.store.query_readonly(sql).await.map_err(|e| {
            error!(error = %e, "Error executing SQL");
            PipelineError::Execution(e)
        })?;

        info!(rows = rows.len(), "SQL execution returned rows");
        Ok(rows)
    }
}
