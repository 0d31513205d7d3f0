use std::sync::Arc;

use crate::error::{Result, SlideInsightError};
use crate::codec::ImageResult;
use crate::models::{ChatMessage, ChatRequest, ContentPart, MessageContent, Role};
use crate::retrieval::SlideMatch;
use crate::transport::Transport;

const SYSTEM_PROMPT: &str = "You are a skilled AI assistant that analyzes slide presentations \
     and creates a set of Exam Questions from them. Output only the Questions, not possible \
     answers. Don't refer to the slides in your questions.";

/// Builds one multimodal generation request from a topic and a set of
/// retrieved slides, and parses the textual reply.
pub struct QuizGenerator {
    tx: Arc<dyn Transport>,
}

impl QuizGenerator {
    pub fn new(tx: Arc<dyn Transport>) -> Self {
        Self { tx }
    }

    /// Returns the reply text and the decoded slide images in retrieval
    /// rank order, so the caller can cache them for a later "show me the
    /// slides" turn.
    ///
    /// The exact question count is an instruction to the backend, not a
    /// verified postcondition; the reply is returned as-is.
    pub async fn generate(
        &self,
        topic: &str,
        matches: Vec<SlideMatch>,
        num_questions: usize,
        model: &str,
    ) -> Result<(String, Vec<ImageResult>)> {
        tracing::info!(
            "Generating {} questions on '{}' from {} slides",
            num_questions,
            topic,
            matches.len()
        );

        let prompt = format!(
            "Take a look at the Slide and suggest Exam Questions concerning the topic: {topic}. \
             Output exactly {num_questions} questions. Questions should be able to be answered \
             with the help of the slides. Be aware that certain slides show questions themselves \
             (marked by hands with colorful cards) - try not to interpret those questions, but \
             rather just take the questions as they are or skip those slides."
        );

        let mut parts: Vec<ContentPart> = Vec::with_capacity(matches.len() + 1);
        parts.push(ContentPart::Text { text: prompt });
        for m in &matches {
            parts.push(m.image.to_content_part());
        }

        let request = ChatRequest {
            model: model.to_string(),
            messages: vec![
                ChatMessage::text(Role::System, SYSTEM_PROMPT),
                ChatMessage {
                    role: Role::User,
                    content: MessageContent::Parts(parts),
                },
            ],
            temperature: None,
        };

        let response = self
            .tx
            .chat(&request)
            .await
            .map_err(|e| SlideInsightError::Generation(format!("completion call failed: {e}")))?;

        let reply = response.first_text().ok_or_else(|| {
            SlideInsightError::Generation("backend returned empty reply".to_string())
        })?;

        let images = matches.into_iter().map(|m| m.image).collect();
        Ok((reply, images))
    }
}
