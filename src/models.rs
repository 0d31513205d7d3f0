use serde::{Deserialize, Serialize};

/// Who spoke a turn. Serialized lowercase to match the chat wire format.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One entry in a session transcript. Transcript turns are always plain
/// text; image attachments only exist inside generation requests.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Classified purpose of a single user utterance. Derived solely from the
/// current turn's text, never from prior turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Quiz triggers matched, slide triggers did not.
    QuizGeneration,
    /// Slide triggers matched, quiz triggers did not.
    ShowSlides,
    /// Both vocabularies matched; the user must pick one.
    Conflicting,
    /// No triggers matched; plain chat completion over the transcript.
    Fallback,
}

/// Message content for the chat wire format: either a plain string or a
/// list of text/image parts for multimodal requests.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ImageUrl {
    pub url: String,
}

// Chat completion request format (OpenAI-compatible endpoint)
#[derive(Debug, Serialize, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatMessage {
    pub role: Role,
    pub content: MessageContent,
}

impl ChatMessage {
    pub fn text(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: MessageContent::Text(content.into()),
        }
    }
}

impl From<&Turn> for ChatMessage {
    fn from(turn: &Turn) -> Self {
        ChatMessage::text(turn.role, turn.content.clone())
    }
}

// Chat completion response format
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

/// Assistant replies come back as plain text.
#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub role: String,
    pub content: String,
}

impl ChatResponse {
    /// Trimmed text of the first choice, or None if the backend returned no
    /// choices or only whitespace.
    pub fn first_text(&self) -> Option<String> {
        self.choices.first().and_then(|c| {
            let text = c.message.content.trim();
            if text.is_empty() {
                None
            } else {
                Some(text.to_string())
            }
        })
    }
}

/// One raw hit from the similarity index service, image still base64.
#[derive(Debug, Deserialize, Clone)]
pub struct SearchHit {
    pub doc_id: i64,
    pub page_num: i64,
    pub score: f32,
    pub base64: String,
}

/// Caller-supplied knobs for one turn. The display layer owns these; the
/// core never stores them.
#[derive(Debug, Clone)]
pub struct TurnOptions {
    pub model: String,
    pub num_slides: usize,
    pub num_questions: usize,
}
