mod ollama;
pub mod prompt;
pub mod response;

use anyhow::Result;
use std::future::Future;

pub use ollama::OllamaClient;
pub use response::{strip_think_tags, CategoryIdExtractor};

/// Something that turns a prompt into free text.
pub trait CompletionClient {
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String>> + Send;
}
