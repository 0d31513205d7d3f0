use std::sync::Arc;

use crate::error::{Result, SlideInsightError};
use crate::models::{ChatMessage, ChatRequest, Role};
use crate::transport::Transport;

const SYSTEM_PROMPT: &str = "You extract concise topics from user questions.";

/// Reduces an arbitrary user utterance to a short search topic via one
/// completion call with a fixed instruction and a one-shot example.
pub struct TopicExtractor {
    tx: Arc<dyn Transport>,
}

impl TopicExtractor {
    pub fn new(tx: Arc<dyn Transport>) -> Self {
        Self { tx }
    }

    /// Returns the trimmed topic text. Guaranteed non-empty: an empty or
    /// whitespace-only completion is an `Extraction` failure, as is any
    /// backend error.
    pub async fn extract(&self, utterance: &str, model: &str) -> Result<String> {
        tracing::info!("Extracting topic from utterance: {}", utterance);

        let instruction = format!(
            "You are an assistant that extracts the main topic from a user's question. \
             Reply ONLY with the concise topic, without any explanation or extra text. \
             For example query: generate questions for segmentation methods for nuclei \
             - would lead to topic: segmentation methods for nuclei\n\
             Query: {utterance}"
        );

        let request = ChatRequest {
            model: model.to_string(),
            messages: vec![
                ChatMessage::text(Role::System, SYSTEM_PROMPT),
                ChatMessage::text(Role::User, instruction),
            ],
            // Low temperature keeps the topic phrasing stable across calls
            temperature: Some(0.0),
        };

        let response = self
            .tx
            .chat(&request)
            .await
            .map_err(|e| SlideInsightError::Extraction(format!("completion call failed: {e}")))?;

        response.first_text().ok_or_else(|| {
            SlideInsightError::Extraction("backend returned empty topic".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChatResponse, MessageContent};
    use crate::transport::testutil::{MockTransport, canned_response};

    #[tokio::test]
    async fn test_extract_returns_trimmed_topic() {
        let transport = Arc::new(MockTransport::replying(&["  cell segmentation \n"]));
        let extractor = TopicExtractor::new(Arc::clone(&transport) as Arc<dyn Transport>);

        let topic = extractor
            .extract("generate 3 exam questions about cell segmentation", "test-model")
            .await
            .expect("extraction should succeed");
        assert_eq!(topic, "cell segmentation");
    }

    #[tokio::test]
    async fn test_extract_sends_utterance_verbatim() {
        let transport = Arc::new(MockTransport::replying(&["nuclei"]));
        let extractor = TopicExtractor::new(Arc::clone(&transport) as Arc<dyn Transport>);

        extractor
            .extract("quiz me about nuclei", "test-model")
            .await
            .expect("extraction should succeed");

        let requests = transport.requests.lock().expect("requests lock");
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "test-model");
        assert_eq!(requests[0].messages.len(), 2);
        match &requests[0].messages[1].content {
            MessageContent::Text(text) => assert!(text.ends_with("Query: quiz me about nuclei")),
            other => panic!("expected plain text content, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_completion_is_extraction_error() {
        let transport = Arc::new(MockTransport::new(vec![canned_response("   ")]));
        let extractor = TopicExtractor::new(transport as Arc<dyn Transport>);

        let err = extractor.extract("quiz me", "test-model").await.unwrap_err();
        assert!(matches!(err, SlideInsightError::Extraction(_)));
    }

    #[tokio::test]
    async fn test_empty_choices_is_extraction_error() {
        let transport = Arc::new(MockTransport::new(vec![ChatResponse { choices: vec![] }]));
        let extractor = TopicExtractor::new(transport as Arc<dyn Transport>);

        let err = extractor.extract("quiz me", "test-model").await.unwrap_err();
        assert!(matches!(err, SlideInsightError::Extraction(_)));
    }

    #[tokio::test]
    async fn test_backend_failure_is_extraction_error() {
        let transport = Arc::new(MockTransport::new(vec![]));
        let extractor = TopicExtractor::new(transport as Arc<dyn Transport>);

        let err = extractor.extract("quiz me", "test-model").await.unwrap_err();
        assert!(matches!(err, SlideInsightError::Extraction(_)));
    }
}
