use async_trait::async_trait;
use reqwest::Client;

use crate::error::{Result, SlideInsightError};
use crate::models::{ChatRequest, ChatResponse};

#[async_trait]
pub trait Transport: Send + Sync {
    async fn chat(&self, req: &ChatRequest) -> Result<ChatResponse>;
}

/// HTTP client for an OpenAI-compatible chat-completions endpoint.
///
/// Single-shot: a failed request is surfaced once to the caller; the user
/// re-issues the turn. No client-side retry or timeout.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    api_token: String,
}

impl HttpTransport {
    pub fn new(endpoint: String, api_token: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_token,
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn chat(&self, req: &ChatRequest) -> Result<ChatResponse> {
        let url = format!("{}/chat/completions", self.endpoint.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(req)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SlideInsightError::Internal(format!(
                "chat completion endpoint returned {status}: {body}"
            )));
        }

        response.json().await.map_err(|e| {
            SlideInsightError::Internal(format!("failed to parse chat completion response: {e}"))
        })
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::*;
    use crate::models::{ChatResponse, Choice, ResponseMessage};
    use std::sync::Mutex;

    /// Canned-response transport for tests. Responses are popped from the
    /// end of the vec, so push them in reverse call order. Every request is
    /// recorded for structural assertions.
    pub struct MockTransport {
        responses: Mutex<Vec<ChatResponse>>,
        pub requests: Mutex<Vec<ChatRequest>>,
    }

    impl MockTransport {
        pub fn new(responses: Vec<ChatResponse>) -> Self {
            Self {
                responses: Mutex::new(responses),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn replying(texts: &[&str]) -> Self {
            Self::new(texts.iter().map(|t| canned_response(t)).collect())
        }
    }

    pub fn canned_response(text: &str) -> ChatResponse {
        ChatResponse {
            choices: vec![Choice {
                message: ResponseMessage {
                    role: "assistant".to_string(),
                    content: text.to_string(),
                },
            }],
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn chat(&self, req: &ChatRequest) -> Result<ChatResponse> {
            self.requests
                .lock()
                .expect("mock transport mutex should not be poisoned")
                .push(req.clone());
            let mut responses = self
                .responses
                .lock()
                .expect("mock transport mutex should not be poisoned");
            if let Some(response) = responses.pop() {
                Ok(response)
            } else {
                Err(SlideInsightError::Internal(
                    "No more mock responses".to_string(),
                ))
            }
        }
    }
}
