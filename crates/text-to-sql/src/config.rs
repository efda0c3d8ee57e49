//! Pipeline policy: how many result rows reach the interpreter and how much history reaches chat.

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_ROW_LIMIT: usize = 50;
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Maximum rows serialized into the interpretation prompt (SQL_RESULT_ROW_LIMIT).
    pub row_limit: usize,
    /// Maximum prior messages sent with a normal-mode request (MAX_HISTORY_MESSAGES).
    pub history_limit: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            row_limit: DEFAULT_ROW_LIMIT,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

fn positive_var(name: &str, default: usize) -> Result<usize> {
    let raw = match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw,
        _ => return Ok(default),
    };
    let value: usize = raw
        .trim()
        .parse()
        .with_context(|| format!("{} must be a positive integer, got {}", name, raw))?;
    if value == 0 {
        anyhow::bail!("{} must be at least 1", name);
    }
    Ok(value)
}

impl PipelineConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            row_limit: positive_var("SQL_RESULT_ROW_LIMIT", DEFAULT_ROW_LIMIT)?,
            history_limit: positive_var("MAX_HISTORY_MESSAGES", DEFAULT_HISTORY_LIMIT)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_from_env_defaults_and_overrides() {
        env::remove_var("SQL_RESULT_ROW_LIMIT");
        env::remove_var("MAX_HISTORY_MESSAGES");
        assert_eq!(PipelineConfig::from_env().unwrap(), PipelineConfig::default());

        env::set_var("SQL_RESULT_ROW_LIMIT", "10");
        env::set_var("MAX_HISTORY_MESSAGES", "4");
        let config = PipelineConfig::from_env().unwrap();
        assert_eq!(config.row_limit, 10);
        assert_eq!(config.history_limit, 4);

        env::set_var("SQL_RESULT_ROW_LIMIT", "0");
        assert!(PipelineConfig::from_env().is_err());

        env::remove_var("SQL_RESULT_ROW_LIMIT");
        env::remove_var("MAX_HISTORY_MESSAGES");
    }
}
