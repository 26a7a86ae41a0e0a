//! Google Gemini implementation of [`PlanGenerator`].
//!
//! Uses the non-streaming `generateContent` endpoint with a JSON response
//! schema, so each reply is a single JSON document.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

use super::{DayDraft, PlanGenerator, PlanRequest};
use crate::{
    error::{LearnError, Result},
    models::{Evaluation, Language, LearningDay, Recap},
};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

const API_KEY_ENV: &str = "GEMINI_API_KEY";
const API_KEY_ENV_FALLBACK: &str = "API_KEY";

const TUTOR_PERSONA: &str = "You are an expert tutor with a friendly, encouraging anime-character voice.";

/// Connection settings for the Gemini API.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    /// Per-request timeout; `None` leaves requests unbounded
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Reads the API key from `GEMINI_API_KEY`, then `API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns `LearnError::Configuration` when neither variable is set.
    pub fn from_env() -> Result<Self> {
        [API_KEY_ENV, API_KEY_ENV_FALLBACK]
            .iter()
            .find_map(|name| std::env::var(name).ok().filter(|v| !v.trim().is_empty()))
            .map(Self::new)
            .ok_or_else(|| LearnError::Configuration {
                message: format!("Set {API_KEY_ENV} to use the plan generator"),
            })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// Plan generator backed by the Gemini API.
pub struct GeminiGenerator {
    client: Client,
    config: GeminiConfig,
}

impl GeminiGenerator {
    /// # Errors
    ///
    /// Returns `LearnError::Configuration` when the HTTP client cannot be
    /// built.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| LearnError::Configuration {
            message: format!("Failed to build HTTP client: {e}"),
        })?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Sends one prompt and returns the reply text.
    async fn call_json(&self, system: &str, prompt: &str, schema: Value) -> Result<String> {
        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": prompt}]
            }],
            "systemInstruction": {
                "parts": [{"text": system}]
            },
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema
            }
        });

        debug!("Calling {} ({} prompt bytes)", self.config.model, prompt.len());
        let response = self
            .client
            .post(self.config.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LearnError::generation(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(LearnError::generation(format!(
                "service returned {status}: {}",
                detail.chars().take(300).collect::<String>()
            )));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| LearnError::generation(format!("unreadable response: {e}")))?;
        extract_text(&json).ok_or_else(|| LearnError::generation("no text in response"))
    }
}

#[async_trait]
impl PlanGenerator for GeminiGenerator {
    async fn generate_plan(&self, request: &PlanRequest) -> Result<Vec<DayDraft>> {
        let language = request.language.instruction();
        let prompt = format!(
            "User goal: learn \"{topic}\".\n\
             Context and constraints: {context}\n\
             Time per day: 2 hours.\n\n\
             Generate a detailed {days}-day learning plan. {language}\n\n\
             For each task provide:\n\
             1. A specific \"verificationQuestion\" the user must answer to prove they learned it, \
             with the expected \"answerKey\".\n\
             2. Useful \"links\" to real, high-quality documentation or tutorials.\n\n\
             Output strictly valid JSON matching the schema.",
            topic = request.topic,
            context = request.context,
            days = request.total_days,
        );
        let system = format!("{TUTOR_PERSONA} {language}");
        let text = self.call_json(&system, &prompt, plan_schema()).await?;
        parse_days(&text)
    }

    async fn generate_recap(&self, day: &LearningDay, language: Language) -> Result<Recap> {
        let prompt = format!(
            "The user just finished studying: {topic}. The summary was: {summary}.\n\
             Give them a short, two-sentence enthusiastic congratulation as \"summary\", \
             and up to three \"extensions\" (title, description, url) for going further. {language}",
            topic = day.topic,
            summary = day.summary,
            language = language.instruction(),
        );
        let text = self.call_json(TUTOR_PERSONA, &prompt, recap_schema()).await?;
        serde_json::from_str(strip_fences(&text))
            .map_err(|e| LearnError::generation(format!("malformed recap: {e}")))
    }

    async fn evaluate_answer(
        &self,
        question: &str,
        answer: &str,
        language: Language,
    ) -> Result<Evaluation> {
        let prompt = format!(
            "Question: {question}\n\
             User answer: {answer}\n\n\
             Act as a strict but encouraging tutor.\n\
             1. Determine whether the answer is basically correct.\n\
             2. Provide short feedback (max 2 sentences). {language}",
            language = language.instruction(),
        );
        let text = self
            .call_json(TUTOR_PERSONA, &prompt, evaluation_schema())
            .await?;
        serde_json::from_str(strip_fences(&text))
            .map_err(|e| LearnError::generation(format!("malformed evaluation: {e}")))
    }
}

/// Concatenates the text parts of the first candidate.
pub fn extract_text(response: &Value) -> Option<String> {
    let text = response
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect::<String>();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Parses the reply to a plan request into day drafts.
///
/// # Errors
///
/// Returns `LearnError::Generation` for anything but a JSON array of days.
pub fn parse_days(text: &str) -> Result<Vec<DayDraft>> {
    serde_json::from_str(strip_fences(text))
        .map_err(|e| LearnError::generation(format!("malformed plan: {e}")))
}

/// Removes a surrounding Markdown code fence, if any.
fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map_or(trimmed, str::trim)
}

fn plan_schema() -> Value {
    let link = json!({
        "type": "OBJECT",
        "properties": {
            "label": {"type": "STRING"},
            "url": {"type": "STRING"}
        }
    });
    let task = json!({
        "type": "OBJECT",
        "properties": {
            "id": {"type": "STRING"},
            "description": {"type": "STRING"},
            "estimatedMinutes": {"type": "INTEGER"},
            "links": {"type": "ARRAY", "items": link},
            "verificationQuestion": {
                "type": "STRING",
                "description": "A specific question that tests the user's understanding of this task."
            },
            "answerKey": {
                "type": "STRING",
                "description": "The reference answer to the verification question."
            }
        },
        "required": ["id", "description", "estimatedMinutes", "verificationQuestion", "answerKey"]
    });
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "dayNumber": {"type": "INTEGER"},
                "topic": {"type": "STRING"},
                "summary": {"type": "STRING"},
                "tasks": {"type": "ARRAY", "items": task}
            },
            "required": ["dayNumber", "topic", "summary", "tasks"]
        }
    })
}

fn recap_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": {"type": "STRING"},
            "extensions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": {"type": "STRING"},
                        "description": {"type": "STRING"},
                        "url": {"type": "STRING"}
                    },
                    "required": ["title", "description", "url"]
                }
            }
        },
        "required": ["summary"]
    })
}

fn evaluation_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "correct": {"type": "BOOLEAN"},
            "feedback": {"type": "STRING"}
        },
        "required": ["correct", "feedback"]
    })
}
