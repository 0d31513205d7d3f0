use std::sync::Arc;

use crate::codec::ImageResult;
use crate::config::{Config, MAX_COUNT, MIN_COUNT};
use crate::error::{Result, SlideInsightError};
use crate::extract::TopicExtractor;
use crate::intent;
use crate::models::{ChatMessage, ChatRequest, Intent, Turn, TurnOptions};
use crate::quiz::QuizGenerator;
use crate::retrieval::{DocumentRetriever, HttpSlideIndex, SlideIndex};
use crate::session::SessionState;
use crate::transport::{HttpTransport, Transport};

const APOLOGY_REPLY: &str = "Sorry, I couldn't process query. Do you want me to generate \
     exam-like questions or to show you the slides from your last set of questions?";

const SLIDES_REPLY: &str = "Here are the slides related to your last topic.";

const NO_TOPIC_REPLY: &str = "Sorry, I don't know the topic yet. Please generate questions \
     first so I can fetch the relevant slides.";

const CONFLICT_REPLY: &str = "Please use only trigger words for either questions generation \
     OR presentation of slides.";

/// What one turn produced: the assistant text appended to the transcript,
/// plus any slide images to display out of band.
#[derive(Debug)]
pub struct TurnReply {
    pub text: String,
    pub images: Vec<ImageResult>,
}

impl TurnReply {
    fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            images: Vec::new(),
        }
    }
}

/// Per-turn state machine: classify the utterance, dispatch to the quiz
/// pipeline, the image cache, or a plain completion, and update the
/// session.
pub struct ChatService {
    transport: Arc<dyn Transport>,
    extractor: TopicExtractor,
    retriever: DocumentRetriever,
    generator: QuizGenerator,
}

impl ChatService {
    /// Wire up the real backends. Fails fast if the API token is missing.
    pub fn new(config: &Config) -> Result<Self> {
        let token = config.api_token()?;
        let transport: Arc<dyn Transport> =
            Arc::new(HttpTransport::new(config.chat.endpoint.clone(), token));
        let index: Arc<dyn SlideIndex> = Arc::new(HttpSlideIndex::new(
            config.index.url.clone(),
            config.index.name.clone(),
        ));
        Ok(Self::from_parts(transport, index))
    }

    pub fn from_parts(transport: Arc<dyn Transport>, index: Arc<dyn SlideIndex>) -> Self {
        Self {
            extractor: TopicExtractor::new(Arc::clone(&transport)),
            generator: QuizGenerator::new(Arc::clone(&transport)),
            retriever: DocumentRetriever::new(index),
            transport,
        }
    }

    /// Process one user turn to completion.
    ///
    /// The user turn is appended before classification; every branch
    /// appends exactly one assistant turn. Pipeline failures never escape:
    /// they become the fixed apology reply and leave the image cache
    /// untouched.
    pub async fn handle_turn(
        &self,
        session: &mut SessionState,
        user_text: &str,
        opts: &TurnOptions,
    ) -> TurnReply {
        session.append(Turn::user(user_text));

        let num_slides = opts.num_slides.clamp(MIN_COUNT, MAX_COUNT);
        let num_questions = opts.num_questions.clamp(MIN_COUNT, MAX_COUNT);

        let classified = intent::classify(user_text);
        tracing::info!("Classified turn as {:?}", classified);

        let reply = match classified {
            Intent::QuizGeneration => {
                match self
                    .run_quiz_pipeline(user_text, &opts.model, num_slides, num_questions)
                    .await
                {
                    Ok((text, images)) => {
                        session.set_cache(images.clone());
                        TurnReply { text, images }
                    }
                    Err(e) => {
                        tracing::warn!("Quiz pipeline failed: {}", e);
                        TurnReply::text_only(APOLOGY_REPLY)
                    }
                }
            }
            Intent::ShowSlides => {
                if session.current_cache().is_empty() {
                    TurnReply::text_only(NO_TOPIC_REPLY)
                } else {
                    TurnReply {
                        text: SLIDES_REPLY.to_string(),
                        images: session.current_cache().to_vec(),
                    }
                }
            }
            Intent::Conflicting => TurnReply::text_only(CONFLICT_REPLY),
            Intent::Fallback => match self.fallback_completion(session, &opts.model).await {
                Ok(text) => TurnReply::text_only(text),
                Err(e) => {
                    tracing::warn!("Fallback completion failed: {}", e);
                    TurnReply::text_only(APOLOGY_REPLY)
                }
            },
        };

        session.append(Turn::assistant(reply.text.clone()));
        reply
    }

    pub fn reset_session(&self, session: &mut SessionState) {
        session.reset();
    }

    /// Topic extraction, retrieval, generation, in sequence. Zero matches
    /// for a non-empty topic fails the turn; there is nothing to quiz on.
    async fn run_quiz_pipeline(
        &self,
        user_text: &str,
        model: &str,
        num_slides: usize,
        num_questions: usize,
    ) -> Result<(String, Vec<ImageResult>)> {
        let topic = self.extractor.extract(user_text, model).await?;
        tracing::info!("Detected topic: {}", topic);

        let matches = self.retriever.retrieve(&topic, num_slides).await?;
        if matches.is_empty() {
            return Err(SlideInsightError::Retrieval(format!(
                "no slides matched topic '{topic}'"
            )));
        }

        self.generator
            .generate(&topic, matches, num_questions, model)
            .await
    }

    /// Plain completion over the entire transcript, including the turn
    /// just appended.
    async fn fallback_completion(&self, session: &SessionState, model: &str) -> Result<String> {
        let request = ChatRequest {
            model: model.to_string(),
            messages: session.transcript().iter().map(ChatMessage::from).collect(),
            temperature: None,
        };

        let response = self.transport.chat(&request).await?;
        response
            .first_text()
            .ok_or_else(|| SlideInsightError::Internal("backend returned empty reply".to_string()))
    }
}
