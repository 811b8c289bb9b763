//! Generation client: input sanitization, the completion backend boundary,
//! and classification of upstream failures into a tagged error type that
//! callers branch on. No error ever travels as post content.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::r#gen::{GenerateRequest, prompt};

/// LinkedIn's hard ceiling on post length.
pub const MAX_POST_CHARS: usize = 3000;

const MAX_TOPIC_CHARS: usize = 200;
const MAX_PURPOSE_CHARS: usize = 300;
const MAX_MESSAGE_CHARS: usize = 1000;
const MAX_CTA_CHARS: usize = 200;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const MAX_RETRIES: u32 = 2;

static STRIP_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"[<>"']"#).unwrap());

#[derive(Debug)]
pub enum CompletionError {
    RateLimited,
    QuotaExceeded,
    BadCredentials,
    Connection(String),
    Api(String),
}

impl CompletionError {
    fn is_transient(&self) -> bool {
        matches!(
            self,
            CompletionError::RateLimited | CompletionError::Connection(_)
        )
    }
}

impl std::fmt::Display for CompletionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompletionError::RateLimited => write!(f, "rate limited"),
            CompletionError::QuotaExceeded => write!(f, "quota exceeded"),
            CompletionError::BadCredentials => write!(f, "bad credentials"),
            CompletionError::Connection(msg) => write!(f, "connection failed: {msg}"),
            CompletionError::Api(msg) => write!(f, "API error: {msg}"),
        }
    }
}

#[derive(Debug)]
pub enum GenerateError {
    InvalidInput(String),
    Completion(CompletionError),
}

impl std::fmt::Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            GenerateError::Completion(err) => write!(f, "completion failed: {err}"),
        }
    }
}

impl From<GenerateError> for AppError {
    fn from(err: GenerateError) -> Self {
        match err {
            GenerateError::InvalidInput(msg) => AppError::BadRequest(msg),
            GenerateError::Completion(CompletionError::RateLimited) => AppError::RateLimited(
                "The AI service is temporarily busy. Wait a moment and try again.".to_string(),
            ),
            GenerateError::Completion(CompletionError::QuotaExceeded) => AppError::Upstream(
                "The AI service quota has been exceeded. Contact your administrator.".to_string(),
            ),
            GenerateError::Completion(CompletionError::BadCredentials) => AppError::Upstream(
                "The AI service credentials are invalid or missing. Contact your administrator."
                    .to_string(),
            ),
            GenerateError::Completion(CompletionError::Connection(_)) => AppError::Upstream(
                "Unable to reach the AI service. Check your connection and try again.".to_string(),
            ),
            GenerateError::Completion(CompletionError::Api(msg)) => {
                AppError::Upstream(format!("The AI service returned an error: {msg}"))
            }
        }
    }
}

/// The external text-completion boundary. Production uses [`OpenAiBackend`];
/// tests substitute a scripted backend.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String, CompletionError>;
}

pub struct Generated {
    pub post: String,
    pub image_prompt: String,
}

/// Validate and sanitize the request, build the prompt, call the backend,
/// and enforce the post-length ceiling. No network call happens if
/// validation fails.
pub async fn generate(
    backend: &dyn CompletionBackend,
    req: &GenerateRequest,
) -> Result<Generated, GenerateError> {
    let mut req = req.clone();
    req.topic = sanitize("Topic", &req.topic, MAX_TOPIC_CHARS)?;
    req.purpose = sanitize("Purpose", &req.purpose, MAX_PURPOSE_CHARS)?;
    req.message = sanitize("Message", &req.message, MAX_MESSAGE_CHARS)?;
    req.cta = if req.cta.trim().is_empty() {
        String::new()
    } else {
        sanitize("Call-to-Action", &req.cta, MAX_CTA_CHARS)?
    };

    let (system, user) = prompt::build_prompt(&req);
    let completion = backend
        .complete(&system, &user)
        .await
        .map_err(GenerateError::Completion)?;

    let mut post = completion.trim().to_string();
    let char_count = post.chars().count();
    if char_count > MAX_POST_CHARS {
        tracing::warn!("Generated post exceeds {MAX_POST_CHARS} characters ({char_count}), truncating");
        post = post.chars().take(MAX_POST_CHARS - 3).collect::<String>() + "...";
    } else if char_count < 50 {
        tracing::warn!("Generated post is very short ({char_count} characters)");
    }

    Ok(Generated {
        image_prompt: prompt::build_image_prompt(&req),
        post,
    })
}

/// Trim, strip the fixed character set, and enforce the per-field length
/// cap. Empty-after-trim input is rejected.
fn sanitize(field: &str, value: &str, max_chars: usize) -> Result<String, GenerateError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GenerateError::InvalidInput(format!(
            "{field} cannot be empty"
        )));
    }
    let cleaned = STRIP_CHARS.replace_all(trimmed, "").into_owned();
    if cleaned.chars().count() > max_chars {
        return Err(GenerateError::InvalidInput(format!(
            "{field} cannot exceed {max_chars} characters"
        )));
    }
    Ok(cleaned)
}

/// OpenAI chat-completions backend with a fixed model and temperature, a
/// 60s request timeout, and up to two retries on transient failures.
pub struct OpenAiBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl OpenAiBackend {
    pub fn new(base_url: String, api_key: String, model: String) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {e}"))?;
        Ok(OpenAiBackend {
            client,
            base_url,
            api_key,
            model,
            temperature: 0.7,
        })
    }

    async fn try_complete(&self, system: &str, user: &str) -> Result<String, CompletionError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = json!({
            "model": self.model,
            "temperature": self.temperature,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                if err.is_connect() || err.is_timeout() {
                    CompletionError::Connection(err.to_string())
                } else {
                    CompletionError::Api(err.to_string())
                }
            })?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(CompletionError::BadCredentials);
        }
        if status.as_u16() == 429 {
            let text = response.text().await.unwrap_or_default().to_lowercase();
            if text.contains("insufficient_quota") || text.contains("billing") {
                return Err(CompletionError::QuotaExceeded);
            }
            return Err(CompletionError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api(format!("HTTP {status}: {text}")));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|err| CompletionError::Api(format!("Malformed response: {err}")))?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| CompletionError::Api("Response contained no choices".to_string()))
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(&self, system: &str, user: &str) -> Result<String, CompletionError> {
        let mut attempt = 0;
        loop {
            match self.try_complete(system, user).await {
                Ok(text) => return Ok(text),
                Err(err) if err.is_transient() && attempt < MAX_RETRIES => {
                    attempt += 1;
                    tracing::warn!("Completion attempt {attempt} failed ({err}), retrying");
                    tokio::time::sleep(Duration::from_millis(500 * u64::from(attempt))).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}
