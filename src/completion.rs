//! DeepSeek chat-completion client — one blocking HTTP call per prompt.
//!
//! A single attempt, a fixed 30 s timeout, and no retry: the pipeline
//! substitutes fallback content on any failure, so errors here are values,
//! not events. `CompletionClient` is the seam the orchestrator depends on;
//! `MockCompletionClient` scripts outcomes for tests.

use serde::{Deserialize, Serialize};

/// Chat model used for every request.
const MODEL: &str = "deepseek-chat";

/// Fixed sampling temperature.
const TEMPERATURE: f32 = 1.0;

/// Per-request timeout in seconds.
const TIMEOUT_SECS: u64 = 30;

/// Errors from a single completion attempt.
///
/// Every variant is an expected remote failure the pipeline recovers from
/// with fallback content. Programming errors (bad config, bad catalog) are
/// kept out of this type on purpose.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("Cannot connect to {0}")]
    Connection(String),

    #[error("Request timed out after {TIMEOUT_SECS}s")]
    Timeout,

    #[error("API error {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Malformed response body: {0}")]
    MalformedResponse(String),

    #[error("Reply was empty after cleaning")]
    EmptyReply,
}

/// A text-completion backend: system instruction + one user prompt in,
/// cleaned reply text out.
pub trait CompletionClient {
    fn complete(
        &self,
        system: &str,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<String, CompletionError>;
}

// ── Wire types ──────────────────────────────────────────────

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Request body for `/v1/chat/completions`.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

/// Response body from `/v1/chat/completions`.
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

// ── DeepSeekClient ──────────────────────────────────────────

/// Blocking HTTP client for the DeepSeek completion endpoint.
pub struct DeepSeekClient {
    base_url: String,
    api_key: String,
    client: reqwest::blocking::Client,
}

impl std::fmt::Debug for DeepSeekClient {
    // Keep the credential out of debug output.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeepSeekClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl DeepSeekClient {
    /// Create a client for the given endpoint and bearer credential.
    pub fn new(base_url: &str, api_key: &str) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
        }
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl CompletionClient for DeepSeekClient {
    fn complete(
        &self,
        system: &str,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<String, CompletionError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = ChatRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    CompletionError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    CompletionError::Timeout
                } else {
                    CompletionError::MalformedResponse(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(CompletionError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

        let reply = parsed
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| CompletionError::MalformedResponse("no choices in response".into()))?;

        let cleaned = clean_reply(reply);
        if cleaned.is_empty() {
            return Err(CompletionError::EmptyReply);
        }
        Ok(cleaned)
    }
}

/// Strip quote characters and surrounding whitespace from a raw reply.
///
/// Removes every literal `"` and `'` (models wrap posts in quotes despite
/// the prompt suffix), then trims.
pub fn clean_reply(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != '"' && *c != '\'')
        .collect::<String>()
        .trim()
        .to_string()
}

// ── Mock client ─────────────────────────────────────────────

/// Scripted completion backend for pipeline tests.
///
/// Outcomes are consumed in call order; once the script is exhausted every
/// further call fails with a connection error.
pub struct MockCompletionClient {
    outcomes: std::cell::RefCell<std::collections::VecDeque<Result<String, CompletionError>>>,
}

impl MockCompletionClient {
    pub fn new(outcomes: Vec<Result<String, CompletionError>>) -> Self {
        Self {
            outcomes: std::cell::RefCell::new(outcomes.into()),
        }
    }

    /// A client that answers one full catalog's worth of calls with the
    /// same reply.
    pub fn always(reply: &str) -> Self {
        let outcomes = (0..crate::catalog::CATALOG_SIZE)
            .map(|_| Ok(reply.to_string()))
            .collect();
        Self::new(outcomes)
    }

    /// A client whose every call fails.
    pub fn always_failing() -> Self {
        Self::new(vec![])
    }
}

impl CompletionClient for MockCompletionClient {
    fn complete(
        &self,
        _system: &str,
        _prompt: &str,
        _max_tokens: u32,
    ) -> Result<String, CompletionError> {
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(CompletionError::Connection("mock exhausted".into())))
    }
}
