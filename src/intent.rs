use crate::models::Intent;

/// Trigger words for question generation. Matching is case-insensitive
/// substring matching, so "question" also covers "questions" inside longer
/// words; the list keeps both to stay exhaustively enumerable.
const QUIZ_TRIGGERS: [&str; 6] = ["quiz", "generate", "exam", "questions", "exam-like", "question"];

/// Trigger words for re-displaying the cached slides.
const SLIDE_TRIGGERS: [&str; 4] = ["images", "image", "slide", "slides"];

fn matches_any(text: &str, triggers: &[&str]) -> bool {
    triggers.iter().any(|t| text.contains(t))
}

/// Classify a raw user utterance against the two trigger vocabularies.
///
/// Pure function of the input text: no state, no backend calls. The exact
/// substring semantics are load-bearing for the Conflicting/Fallback
/// boundary and must not be replaced with fuzzy matching.
pub fn classify(text: &str) -> Intent {
    let lowered = text.to_lowercase();
    let wants_quiz = matches_any(&lowered, &QUIZ_TRIGGERS);
    let wants_slides = matches_any(&lowered, &SLIDE_TRIGGERS);

    match (wants_quiz, wants_slides) {
        (true, false) => Intent::QuizGeneration,
        (false, true) => Intent::ShowSlides,
        (true, true) => Intent::Conflicting,
        (false, false) => Intent::Fallback,
    }
}

/// Human-readable trigger lists for help text in the display layer.
pub fn quiz_triggers() -> &'static [&'static str] {
    &QUIZ_TRIGGERS
}

pub fn slide_triggers() -> &'static [&'static str] {
    &SLIDE_TRIGGERS
}
