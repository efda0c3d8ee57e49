//! Result interpretation stage: rows → natural-language answer via the LLM.

use std::sync::Arc;

use llm_client::LlmClient;
use prompt::{interpret_results_prompt, ChatMessage, DATA_ANALYST_DIRECTIVE};
use storage::{Message, Row};
use tracing::{error, info, instrument};

use crate::error::PipelineError;
use crate::preview;

#[derive(Clone)]
pub struct ResultInterpreter {
    llm: Arc<dyn LlmClient>,
    row_limit: usize,
}

impl ResultInterpreter {
    pub fn new(llm: Arc<dyn LlmClient>, row_limit: usize) -> Self {
        Self { llm, row_limit }
    }

    /// Returns the model's explanation verbatim.
    #[instrument(skip(self, question, sql, rows), fields(rows = rows.len()))]
    pub async fn interpret(
        &self,
        question: &str,
        sql: &str,
        rows: &[Row],
    ) -> Result<String, PipelineError> {
        info!(question = %preview(question, 100), "Interpreting results");

        let results = format_rows(rows, self.row_limit)?;
        let request = Message::system_prompt(interpret_results_prompt(question, sql, &results));

        let answer = self
            .llm
            .get_response(vec![ChatMessage::from(&request)], DATA_ANALYST_DIRECTIVE)
            .await
            .map_err(|e| {
                error!(error = %e, "Error interpreting results");
                PipelineError::Gateway(e)
            })?;

        info!(answer = %preview(&answer, 100), "Generated interpretation");
        Ok(answer)
    }
}

/// Serializes at most `limit` rows as pretty JSON and notes how many were left out.
///
/// Values are already JSON; dates and other non-native types arrive from the store as text.
pub fn format_rows(rows: &[Row], limit: usize) -> Result<String, PipelineError> {
    let shown = &rows[..rows.len().min(limit)];
    let mut out = serde_json::to_string_pretty(shown)?;
    let omitted = rows.len() - shown.len();
    if omitted > 0 {
        out.push_str(&format!("\n\n... and {} more rows omitted", omitted));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(n: usize) -> Row {
        let mut r = Row::new();
        r.insert("n".to_string(), json!(n));
        r
    }

    #[test]
    fn test_format_rows_without_truncation() {
        let rows: Vec<Row> = (0..3).map(row).collect();
        let out = format_rows(&rows, 50).unwrap();
        assert!(!out.contains("omitted"));
        assert_eq!(out.matches("\"n\":").count(), 3);
    }

    #[test]
    fn test_format_rows_exactly_at_limit() {
        let rows: Vec<Row> = (0..50).map(row).collect();
        let out = format_rows(&rows, 50).unwrap();
        assert!(!out.contains("omitted"));
    }

    #[test]
    fn test_format_rows_truncates_and_notes_remainder() {
        let rows: Vec<Row> = (0..75).map(row).collect();
        let out = format_rows(&rows, 50).unwrap();
        assert_eq!(out.matches("\"n\":").count(), 50);
        assert!(out.contains("\"n\": 49"));
        assert!(!out.contains("\"n\": 50"));
        assert!(out.ends_with("... and 25 more rows omitted"));
    }

    #[test]
    fn test_format_rows_empty() {
        assert_eq!(format_rows(&[], 50).unwrap(), "[]");
    }
}
