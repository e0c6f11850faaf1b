use anyhow::{Context, Result};
use regex::Regex;
use serde_json::Value;

use crate::database::CategoryId;
use crate::errors::CategoryExtractionError;

const THINK_OPEN: &str = "<think>";
const THINK_CLOSE: &str = "</think>";

// A bare number is only trusted when it could plausibly be a category id.
const MAX_BARE_CATEGORY_ID: CategoryId = 16;

/// Drop reasoning blocks from a model reply.
///
/// An unclosed `<think>` swallows the rest of the reply.
pub fn strip_think_tags(response: &str) -> String {
    let mut text = response.to_string();

    while let Some(start) = text.find(THINK_OPEN) {
        match text[start..].find(THINK_CLOSE) {
            Some(end) => text.replace_range(start..start + end + THINK_CLOSE.len(), ""),
            None => {
                text.truncate(start);
                break;
            }
        }
    }

    text.replace(THINK_OPEN, "")
        .replace(THINK_CLOSE, "")
        .trim()
        .to_string()
}

/// Pulls a category id out of free-form model output.
pub struct CategoryIdExtractor {
    fenced_json: Regex,
    id_object: Regex,
    id_label: Regex,
    bare_number: Regex,
}

impl CategoryIdExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            fenced_json: compile_regex(r"(?s)```json\s*(\{.*?\})\s*```")?,
            id_object: compile_regex(r#"\{\s*['"]?ID['"]?\s*:\s*(-?[0-9]+)\s*\}"#)?,
            id_label: compile_regex(r"ID\s*:?\s*(-?[0-9]+)")?,
            bare_number: compile_regex(r"(?:^|[^-])([0-9]+)")?,
        })
    }

    /// Try progressively looser readings, strictest first: a JSON object, a
    /// fenced JSON block, an `{ID: n}`-like fragment, `ID n`, and finally the
    /// first non-negative bare number up to 16.
    pub fn extract(&self, response: &str) -> Result<CategoryId, CategoryExtractionError> {
        json_id(response)
            .or_else(|| {
                self.first_capture(&self.fenced_json, response)
                    .and_then(json_id)
            })
            .or_else(|| self.captured_id(&self.id_object, response, CategoryId::MAX))
            .or_else(|| self.captured_id(&self.id_label, response, CategoryId::MAX))
            .or_else(|| self.captured_id(&self.bare_number, response, MAX_BARE_CATEGORY_ID))
            .ok_or_else(|| CategoryExtractionError {
                response: response.to_string(),
            })
    }

    fn first_capture<'t>(&self, regex: &Regex, text: &'t str) -> Option<&'t str> {
        regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    fn captured_id(&self, regex: &Regex, text: &str, max: CategoryId) -> Option<CategoryId> {
        self.first_capture(regex, text)
            .and_then(|digits| digits.parse::<CategoryId>().ok())
            .filter(|id| (1..=max).contains(id))
    }
}

fn compile_regex(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).with_context(|| format!("Failed to compile regex: {}", pattern))
}

fn json_id(text: &str) -> Option<CategoryId> {
    let value: Value = serde_json::from_str(text).ok()?;
    let id = value.get("ID")?.as_f64()?;

    let whole = id as CategoryId;
    (whole >= 1 && whole as f64 == id).then_some(whole)
}
