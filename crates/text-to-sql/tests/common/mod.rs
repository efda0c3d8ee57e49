//! Test doubles shared by the text-to-sql integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use prompt::ChatMessage;
use storage::{QueryStore, Row, StorageError};

/// One recorded gateway request.
#[derive(Debug, Clone)]
pub struct LlmCall {
    pub messages: Vec<ChatMessage>,
    pub system_prompt: String,
}

/// LLM stub that replays queued replies in order and records every request.
#[derive(Default)]
pub struct ScriptedLlm {
    replies: Mutex<VecDeque<Result<String, String>>>,
    calls: Mutex<Vec<LlmCall>>,
}

impl ScriptedLlm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: &str) -> Self {
        self.replies.lock().unwrap().push_back(Ok(text.to_string()));
        self
    }

    pub fn fail(self, error: &str) -> Self {
        self.replies.lock().unwrap().push_back(Err(error.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<LlmCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl llm_client::LlmClient for ScriptedLlm {
    async fn get_response(
        &self,
        messages: Vec<ChatMessage>,
        system_prompt: &str,
    ) -> anyhow::Result<String> {
        self.calls.lock().unwrap().push(LlmCall {
            messages,
            system_prompt: system_prompt.to_string(),
        });
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(error)) => Err(anyhow::anyhow!(error)),
            None => Err(anyhow::anyhow!("no scripted reply left")),
        }
    }
}

/// Query store that returns fixed rows (or a fixed error) and records the SQL it was given.
pub struct StubStore {
    result: Result<Vec<Row>, String>,
    queries: Mutex<Vec<String>>,
}

impl StubStore {
    pub fn returning(rows: Vec<Row>) -> Self {
        Self {
            result: Ok(rows),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: &str) -> Self {
        Self {
            result: Err(error.to_string()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryStore for StubStore {
    async fn query_readonly(&self, sql: &str) -> Result<Vec<Row>, StorageError> {
        self.queries.lock().unwrap().push(sql.to_string());
        self.result
            .clone()
            .map_err(StorageError::InvalidArgument)
    }
}

/// Builds a row from `(column, value)` pairs, keeping column order.
pub fn row(pairs: &[(&str, serde_json::Value)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}
