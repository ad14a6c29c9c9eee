use std::str::FromStr;

use anyhow::{Context, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("unsupported output format: {other}"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct TrackerConfig {
    pub output: OutputFormat,
    pub prompt: String,
}

impl TrackerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let output = match lookup("MATLEDGER_OUTPUT") {
            Some(raw) => raw.parse().context("MATLEDGER_OUTPUT is invalid")?,
            None => OutputFormat::default(),
        };
        let prompt = lookup("MATLEDGER_PROMPT").unwrap_or_else(|| "> ".to_string());

        Ok(Self { output, prompt })
    }
}
