use crate::codec::ImageResult;
use crate::models::Turn;

pub const SYSTEM_PROMPT: &str = "You are a helpful AI assistant in a chat interface.";

/// One conversation's state: the ordered transcript plus the slide images
/// from the most recent successful quiz generation.
///
/// Owned exclusively by its conversation and passed into `handle_turn`
/// by mutable reference; multiple conversations need multiple instances.
/// Not internally synchronized.
#[derive(Debug)]
pub struct SessionState {
    transcript: Vec<Turn>,
    cached_images: Vec<ImageResult>,
}

impl SessionState {
    /// A fresh session: transcript seeded with the single system turn,
    /// empty image cache.
    pub fn new() -> Self {
        Self {
            transcript: vec![Turn::system(SYSTEM_PROMPT)],
            cached_images: Vec::new(),
        }
    }

    /// Append-only; existing turns are never removed or reordered.
    pub fn append(&mut self, turn: Turn) {
        self.transcript.push(turn);
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    /// Overwrite the cache wholesale. Never merged, never partially
    /// updated: the cache always reflects exactly one generation's slides.
    pub fn set_cache(&mut self, images: Vec<ImageResult>) {
        self.cached_images = images;
    }

    pub fn current_cache(&self) -> &[ImageResult] {
        &self.cached_images
    }

    /// Back to the fresh-session state.
    pub fn reset(&mut self) {
        self.transcript.clear();
        self.transcript.push(Turn::system(SYSTEM_PROMPT));
        self.cached_images.clear();
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
