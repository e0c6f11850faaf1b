use anyhow::{Context, Result};
use chrono::{FixedOffset, Offset, Utc};

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub path: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: "receipts.db".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PredictionSettings {
    /// Zone receipt times are recorded in; target instants are read in it too.
    pub reference_offset: FixedOffset,
    pub default_target: &'static str,
}

impl Default for PredictionSettings {
    fn default() -> Self {
        Self {
            reference_offset: Utc.fix(),
            default_target: "2023-12-24 15:30:00",
        }
    }
}

#[derive(Debug, Clone)]
pub struct OllamaSettings {
    pub base_url: String,
    pub model: String,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
}

impl Default for OllamaSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "deepseek-r1:7b".to_string(),
            user_agent: "WhatAmIBuying/0.1",
            timeout_secs: 300,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssignSettings {
    pub max_attempts: usize,
}

impl Default for AssignSettings {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

#[derive(Debug, Clone)]
pub struct IngestSettings {
    pub receipt_file: String,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            receipt_file: "output.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub prediction: PredictionSettings,
    pub ollama: OllamaSettings,
    pub assign: AssignSettings,
    pub ingest: IngestSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overlaid with `DATABASE_PATH`, `RECEIPTS_UTC_OFFSET`,
    /// `OLLAMA_URL` and `OLLAMA_MODEL` when set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(path) = lookup("DATABASE_PATH") {
            config.database.path = path;
        }
        if let Some(offset) = lookup("RECEIPTS_UTC_OFFSET") {
            config.prediction.reference_offset = parse_offset(&offset)?;
        }
        if let Some(url) = lookup("OLLAMA_URL") {
            config.ollama.base_url = url;
        }
        if let Some(model) = lookup("OLLAMA_MODEL") {
            config.ollama.model = model;
        }

        Ok(config)
    }
}

pub fn parse_offset(value: &str) -> Result<FixedOffset> {
    value
        .trim()
        .parse::<FixedOffset>()
        .with_context(|| format!("Invalid UTC offset '{}', expected e.g. +01:00", value))
}
