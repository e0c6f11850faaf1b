use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use super::response::strip_think_tags;
use super::CompletionClient;
use crate::config::settings::OllamaSettings;
use crate::http::JsonClient;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
    #[serde(default)]
    done_reason: Option<String>,
    #[serde(default)]
    eval_count: Option<u64>,
}

/// Client for a local Ollama `/api/generate` endpoint
pub struct OllamaClient {
    http: JsonClient,
    generate_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(settings: &OllamaSettings) -> Result<Self> {
        let http = JsonClient::new(settings.user_agent, settings.timeout_secs)?;
        Ok(Self::with_model(http, &settings.base_url, &settings.model))
    }

    fn with_model(http: JsonClient, base_url: &str, model: &str) -> Self {
        Self {
            http,
            generate_url: build_generate_url(base_url),
            model: model.to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let body = self
            .http
            .post_json(&self.generate_url, &request)
            .await
            .context("Error calling Ollama API")?
            .text()
            .await
            .context("Error reading Ollama response")?;

        let parsed = parse_generate_body(&body)?;
        debug!(
            "Ollama finished ({}), {} tokens",
            parsed.done_reason.as_deref().unwrap_or("unknown"),
            parsed.eval_count.unwrap_or(0)
        );

        Ok(strip_think_tags(&parsed.response))
    }
}

impl CompletionClient for OllamaClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.generate(prompt).await
    }
}

fn build_generate_url(base_url: &str) -> String {
    format!("{}/api/generate", base_url.trim_end_matches('/'))
}

fn parse_generate_body(body: &str) -> Result<GenerateResponse> {
    serde_json::from_str(body.trim()).with_context(|| {
        format!(
            "Error unmarshaling Ollama response. First 200 chars: {}",
            body.chars().take(200).collect::<String>()
        )
    })
}
