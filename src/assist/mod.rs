//! AI assist proxy for home-repair questions.
//!
//! The app never talks to the chat-completion API directly; it posts a
//! question here and gets a single reply back. Upstream failures collapse to
//! two cases the app can show: rate limited (429) and everything else (500).
//!
//! Configuration is via environment variables:
//! - `OPENAI_API_KEY` - upstream API key
//! - `UPKEEP_AI_URL` - chat-completion endpoint (default: OpenAI)
//! - `UPKEEP_AI_MODEL` - model name (default: `gpt-4o-mini`)

use axum::{extract::State, http::StatusCode, Json};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Shown when the upstream answers with an empty completion.
const EMPTY_REPLY: &str = "No reply from AI.";

/// Errors talking to the upstream chat-completion API.
#[derive(Debug, Error)]
pub enum AssistError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream rate limit hit")]
    RateLimited,

    #[error("upstream returned {0}")]
    Upstream(reqwest::StatusCode),
}

/// Client for the upstream chat-completion API.
#[derive(Debug, Clone)]
pub struct AssistClient {
    base_url: String,
    model: String,
    api_key: Option<String>,
    client: Client,
}

impl AssistClient {
    /// Create client from environment variables.
    pub fn from_env() -> Self {
        let base_url = std::env::var("UPKEEP_AI_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        let model = std::env::var("UPKEEP_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let api_key = std::env::var("OPENAI_API_KEY").ok();
        Self::new(base_url, model, api_key)
    }

    /// Create with explicit configuration.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key,
            client: Client::new(),
        }
    }

    /// Forward a question upstream and return the first completion.
    pub async fn ask(&self, question: &str) -> Result<String, AssistError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: question,
            }],
        };

        let mut request = self.client.post(&self.base_url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AssistError::RateLimited);
        }
        if !status.is_success() {
            return Err(AssistError::Upstream(status));
        }

        let completion: ChatResponse = response.json().await?;
        let reply = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.is_empty())
            .unwrap_or_else(|| EMPTY_REPLY.to_string());
        Ok(reply)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChatReply>,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Body of `POST /api/ask`.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: String,
}

/// Reply body; the same shape for success and failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct AskReply {
    pub reply: String,
}

/// Handler for `POST /api/ask`.
pub async fn ask(
    State(client): State<AssistClient>,
    Json(input): Json<AskRequest>,
) -> (StatusCode, Json<AskReply>) {
    if input.question.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(AskReply {
                reply: "No question provided.".to_string(),
            }),
        );
    }

    match client.ask(&input.question).await {
        Ok(reply) => (StatusCode::OK, Json(AskReply { reply })),
        Err(AssistError::RateLimited) => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(AskReply {
                reply: "Too many requests. Please try again later.".to_string(),
            }),
        ),
        Err(err) => {
            tracing::error!("Assist upstream error: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AskReply {
                    reply: "Something went wrong with the AI.".to_string(),
                }),
            )
        }
    }
}
