//! Model backends.
//!
//! Uses enum dispatch instead of trait objects because async methods are
//! not dyn-compatible. The live backend speaks the Gemini `generateContent`
//! REST API over `reqwest`; the scripted backend replays canned replies
//! and the offline backend refuses every request.

use std::collections::VecDeque;
use std::sync::Mutex;

use empire_core::chat::Message;

use crate::config::AdvisorConfig;
use crate::error::AdvisorError;

/// One request to a model.
#[derive(Debug, Clone, Default)]
pub struct Completion {
    /// System instruction, if any.
    pub system: Option<String>,
    /// Earlier conversation turns, oldest first.
    pub history: Vec<Message>,
    /// The new user prompt.
    pub prompt: String,
    /// JSON schema the reply must follow. `None` asks for free text.
    pub schema: Option<serde_json::Value>,
}

impl Completion {
    /// A one-shot free-text prompt.
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    /// A one-shot prompt whose reply must be JSON matching `schema`.
    pub fn json(prompt: impl Into<String>, schema: serde_json::Value) -> Self {
        Self {
            prompt: prompt.into(),
            schema: Some(schema),
            ..Self::default()
        }
    }
}

/// A source of model text.
#[derive(Debug)]
pub enum AdvisorBackend {
    /// Gemini `generateContent` API.
    Gemini(GeminiBackend),
    /// Canned replies, consumed in order.
    Scripted(ScriptedBackend),
    /// No backend; every request fails with [`AdvisorError::Offline`].
    Offline,
}

impl AdvisorBackend {
    /// Build the backend a configuration asks for.
    pub fn from_config(config: &AdvisorConfig) -> Result<Self, AdvisorError> {
        match &config.api_key {
            Some(key) => Ok(Self::Gemini(GeminiBackend::new(config, key.clone())?)),
            None => Ok(Self::Offline),
        }
    }

    /// Send a request and return the reply text.
    pub async fn complete(&self, request: &Completion) -> Result<String, AdvisorError> {
        match self {
            Self::Gemini(backend) => backend.complete(request).await,
            Self::Scripted(backend) => backend.next_reply(),
            Self::Offline => Err(AdvisorError::Offline),
        }
    }

    /// Human-readable name for logging.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Gemini(_) => "gemini",
            Self::Scripted(_) => "scripted",
            Self::Offline => "offline",
        }
    }
}

// ---------------------------------------------------------------------------
// Gemini backend
// ---------------------------------------------------------------------------

/// Backend for the Gemini `generateContent` REST API.
///
/// Sends requests to `{api_url}/models/{model}:generateContent` with the key
/// in the `x-goog-api-key` header and reads `candidates[0].content.parts[0].text`.
#[derive(Debug)]
pub struct GeminiBackend {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl GeminiBackend {
    /// Create a Gemini backend.
    pub fn new(config: &AdvisorConfig, api_key: String) -> Result<Self, AdvisorError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AdvisorError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key,
            model: config.model.clone(),
        })
    }

    async fn complete(&self, request: &Completion) -> Result<String, AdvisorError> {
        let url = format!("{}/models/{}:generateContent", self.api_url, self.model);
        let body = gemini_request_body(request);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AdvisorError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            return Err(AdvisorError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AdvisorError::Parse(format!("response body: {e}")))?;

        extract_gemini_text(&json)
    }
}

/// Build a `generateContent` request body.
fn gemini_request_body(request: &Completion) -> serde_json::Value {
    let mut contents: Vec<serde_json::Value> = request
        .history
        .iter()
        .map(|m| {
            serde_json::json!({
                "role": m.role.as_str(),
                "parts": [{ "text": m.text }]
            })
        })
        .collect();
    contents.push(serde_json::json!({
        "role": "user",
        "parts": [{ "text": request.prompt }]
    }));

    let mut body = serde_json::json!({ "contents": contents });
    if let Some(system) = &request.system {
        body["systemInstruction"] = serde_json::json!({ "parts": [{ "text": system }] });
    }
    if let Some(schema) = &request.schema {
        body["generationConfig"] = serde_json::json!({
            "responseMimeType": "application/json",
            "responseSchema": schema
        });
    }
    body
}

/// Extract the reply text from a `generateContent` response.
fn extract_gemini_text(json: &serde_json::Value) -> Result<String, AdvisorError> {
    json.get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or(AdvisorError::MissingContent("candidates[0].content.parts[0].text"))
}

// ---------------------------------------------------------------------------
// Scripted backend
// ---------------------------------------------------------------------------

/// Replays a fixed list of replies, then fails with [`AdvisorError::Offline`].
///
/// Used for demos and tests where no network is available.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<String, String>>>,
}

impl ScriptedBackend {
    /// A backend that answers with `replies` in order.
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(|r| Ok(r.into())).collect()),
        }
    }

    /// Queue a failed request.
    pub fn push_failure(&self, message: impl Into<String>) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(Err(message.into()));
        }
    }

    fn next_reply(&self) -> Result<String, AdvisorError> {
        let next = self
            .replies
            .lock()
            .map_err(|_| AdvisorError::Request("scripted replies poisoned".to_owned()))?
            .pop_front();
        match next {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(AdvisorError::Request(message)),
            None => Err(AdvisorError::Offline),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use empire_core::chat::Message;

    #[test]
    fn extract_gemini_text_valid() {
        let json = serde_json::json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "Hail, sovereign." }] }
            }]
        });
        assert_eq!(extract_gemini_text(&json).unwrap(), "Hail, sovereign.");
    }

    #[test]
    fn extract_gemini_text_missing() {
        let json = serde_json::json!({ "candidates": [] });
        assert!(matches!(
            extract_gemini_text(&json),
            Err(AdvisorError::MissingContent(_))
        ));
    }

    #[test]
    fn request_body_carries_history_system_and_schema() {
        let request = Completion {
            system: Some("Be wise.".to_owned()),
            history: vec![Message::user("Hello"), Message::model("Greetings")],
            prompt: "Advise me".to_owned(),
            schema: Some(serde_json::json!({ "type": "OBJECT" })),
        };
        let body = gemini_request_body(&request);

        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[2]["parts"][0]["text"], "Advise me");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "Be wise.");
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn plain_request_body_has_no_optional_sections() {
        let body = gemini_request_body(&Completion::text("Hi"));
        assert!(body.get("systemInstruction").is_none());
        assert!(body.get("generationConfig").is_none());
    }

    #[tokio::test]
    async fn scripted_backend_replays_in_order() {
        let backend = AdvisorBackend::Scripted(ScriptedBackend::new(["one", "two"]));
        let req = Completion::text("x");
        assert_eq!(backend.complete(&req).await.unwrap(), "one");
        assert_eq!(backend.complete(&req).await.unwrap(), "two");
        assert!(backend.complete(&req).await.unwrap_err().is_offline());
    }

    #[tokio::test]
    async fn offline_backend_refuses() {
        let backend = AdvisorBackend::from_config(&AdvisorConfig::offline()).unwrap();
        assert_eq!(backend.name(), "offline");
        assert!(backend
            .complete(&Completion::text("x"))
            .await
            .unwrap_err()
            .is_offline());
    }
}
