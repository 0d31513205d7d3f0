use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

use crate::error::{Result, SlideInsightError};

/// Hard bounds for the per-turn sliders; the display layer clamps to these.
pub const MIN_COUNT: usize = 1;
pub const MAX_COUNT: usize = 20;

/// Main configuration structure for slide-insight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub chat: ChatConfig,
    pub index: IndexConfig,
    pub quiz: QuizConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// OpenAI-compatible chat-completions endpoint.
    pub endpoint: String,
    /// Environment variable holding the bearer token.
    pub token_env: String,
    pub default_model: String,
    pub available_models: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Base URL of the similarity index service.
    pub url: String,
    /// Name of the pre-built index artifact to search.
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    pub default_num_slides: usize,
    pub default_num_questions: usize,
}

impl Config {
    /// Load configuration from file with environment variable overrides.
    /// Always returns a config; per-field problems fall back to defaults.
    /// Credential presence is checked later, at service construction.
    pub fn load() -> Self {
        if dotenvy::dotenv().is_ok() {
            tracing::info!("Loaded .env from current directory");
        }

        let config_path =
            env::var("SLIDE_INSIGHT_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            match fs::read_to_string(&config_path) {
                Ok(contents) => match serde_yaml::from_str::<Config>(&contents) {
                    Ok(config) => {
                        tracing::info!("Loaded configuration from {}", config_path);
                        config
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to parse config file {}: {} - using defaults",
                            config_path,
                            e
                        );
                        Self::default()
                    }
                },
                Err(e) => {
                    tracing::error!(
                        "Failed to read config file {}: {} - using defaults",
                        config_path,
                        e
                    );
                    Self::default()
                }
            }
        } else {
            tracing::warn!("Config file not found at {} - using defaults", config_path);
            Self::default()
        };

        config.apply_env_overrides();

        if let Err(e) = config.validate() {
            tracing::warn!("Config validation warnings: {} - continuing anyway", e);
        }

        config
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = env::var("CHAT_ENDPOINT") {
            self.chat.endpoint = endpoint;
        }
        if let Ok(model) = env::var("CHAT_MODEL") {
            self.chat.default_model = model;
        }
        if let Ok(url) = env::var("SLIDE_INDEX_URL") {
            self.index.url = url;
        }
        if let Ok(name) = env::var("SLIDE_INDEX_NAME") {
            self.index.name = name;
        }
        if let Ok(n) = env::var("QUIZ_NUM_SLIDES") {
            if let Ok(num) = n.parse() {
                self.quiz.default_num_slides = num;
            }
        }
        if let Ok(n) = env::var("QUIZ_NUM_QUESTIONS") {
            if let Ok(num) = n.parse() {
                self.quiz.default_num_questions = num;
            }
        }
    }

    fn validate(&self) -> std::result::Result<(), Box<dyn std::error::Error>> {
        if self.chat.endpoint.is_empty() {
            return Err("chat endpoint cannot be empty".into());
        }
        if self.index.url.is_empty() {
            return Err("index url cannot be empty".into());
        }
        if !self.chat.available_models.contains(&self.chat.default_model) {
            return Err(format!(
                "default model {} is not in available_models",
                self.chat.default_model
            )
            .into());
        }
        for (name, val) in [
            ("default_num_slides", self.quiz.default_num_slides),
            ("default_num_questions", self.quiz.default_num_questions),
        ] {
            if !(MIN_COUNT..=MAX_COUNT).contains(&val) {
                return Err(format!("quiz.{name} must be between {MIN_COUNT} and {MAX_COUNT}").into());
            }
        }
        Ok(())
    }

    /// Read the chat API token from the environment. Absence is a fatal
    /// startup error, never a per-turn failure.
    pub fn api_token(&self) -> Result<String> {
        env::var(&self.chat.token_env).map_err(|_| {
            SlideInsightError::Config(format!(
                "{} environment variable must be set",
                self.chat.token_env
            ))
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chat: ChatConfig {
                endpoint: "https://models.github.ai/inference".to_string(),
                token_env: "GITHUB_TOKEN".to_string(),
                default_model: "openai/gpt-4.1".to_string(),
                available_models: vec![
                    "openai/gpt-4.1".to_string(),
                    "openai/gpt-4o".to_string(),
                    "openai/gpt-4.1-mini".to_string(),
                    "openai/gpt-4o-mini".to_string(),
                ],
            },
            index: IndexConfig {
                url: "http://localhost:8000".to_string(),
                name: "BIDS_index".to_string(),
            },
            quiz: QuizConfig {
                default_num_slides: 4,
                default_num_questions: 2,
            },
        }
    }
}
