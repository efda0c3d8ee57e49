//! SQL generation stage: question → candidate SQL via the LLM.

use std::sync::Arc;

use llm_client::LlmClient;
use prompt::{text_to_sql_prompt, ChatMessage, SQL_EXPERT_DIRECTIVE};
use storage::Message;
use tracing::{error, info, instrument};

use crate::error::PipelineError;
use crate::preview;

const FENCE: &str = "```";

/// Turns a natural-language question into a SQL string using a fixed template.
#[derive(Clone)]
pub struct SqlGenerator {
    llm: Arc<dyn LlmClient>,
}

impl SqlGenerator {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Returns the bare SQL statement the model produced, with code fences removed.
    #[instrument(skip(self, question))]
    pub async fn generate(&self, question: &str) -> Result<String, PipelineError> {
        info!(question = %preview(question, 100), "Generating SQL");

        let request = Message::system_prompt(text_to_sql_prompt(question));
        let raw = self
            .llm
            .get_response(vec![ChatMessage::from(&request)], SQL_EXPERT_DIRECTIVE)
            .await
            .map_err(|e| {
                error!(error = %e, "Error generating SQL");
                PipelineError::Gateway(e)
            })?;

        let sql = strip_code_fence(&raw);
        if sql.is_empty() {
            return Err(PipelineError::MalformedGeneration(
                "the model returned no SQL".to_string(),
            ));
        }

        info!(sql = %sql, "Generated SQL");
        Ok(sql.to_string())
    }
}

/// Trims `text` and, if it contains a fenced code block, returns the block's body without
/// the fence markers and the optional language tag (```` ```sql ````). Text without a fence is
/// returned trimmed.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(open) = trimmed.find(FENCE) else {
        return trimmed;
    };
    let after_open = &trimmed[open + FENCE.len()..];
    let body = match after_open.find(FENCE) {
        Some(close) => &after_open[..close],
        None => after_open,
    };
    drop_language_tag(body).trim()
}

fn drop_language_tag(body: &str) -> &str {
    let Some((first_line, rest)) = body.split_once('\n') else {
        return body;
    };
    let tag = first_line.trim();
    let is_tag = tag.len() <= 16
        && tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+'))
        && !is_sql_keyword(tag);
    if is_tag {
        rest
    } else {
        body
    }
}

fn is_sql_keyword(word: &str) -> bool {
    ["select", "with", "values"]
        .iter()
        .any(|kw| word.eq_ignore_ascii_case(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_plain_text_is_trimmed() {
        assert_eq!(strip_code_fence("  SELECT 1;\n"), "SELECT 1;");
    }

    #[test]
    fn test_strip_fence_with_and_without_tag() {
        assert_eq!(strip_code_fence("```sql\nSELECT 1\n```"), "SELECT 1");
        assert_eq!(strip_code_fence("```SQL\nSELECT 1\n```"), "SELECT 1");
        assert_eq!(strip_code_fence("```sqlite\nSELECT 1\n```"), "SELECT 1");
        assert_eq!(strip_code_fence("```\nSELECT 1\n```"), "SELECT 1");
        assert_eq!(strip_code_fence("```SELECT 1```"), "SELECT 1");
    }

    #[test]
    fn test_strip_keeps_keyword_on_first_line() {
        assert_eq!(
            strip_code_fence("```select\n  count(*) from messages\n```"),
            "select\n  count(*) from messages"
        );
    }

    #[test]
    fn test_strip_unterminated_fence() {
        assert_eq!(strip_code_fence("```sql\nSELECT 2"), "SELECT 2");
    }

    #[test]
    fn test_strip_fence_after_prose() {
        assert_eq!(
            strip_code_fence("Here is the query:\n```sql\nSELECT 3\n```\nHope it helps."),
            "SELECT 3"
        );
    }

    #[test]
    fn test_strip_empty_fence() {
        assert_eq!(strip_code_fence("```sql\n```"), "");
        assert_eq!(strip_code_fence("   "), "");
    }
}
