pub mod codec;
pub mod config;
pub mod error;
pub mod extract;
pub mod intent;
pub mod models;
pub mod quiz;
pub mod retrieval;
pub mod service;
pub mod session;
pub mod transport;

pub use crate::codec::ImageResult;
pub use crate::config::Config;
pub use crate::error::{Result, SlideInsightError};
pub use crate::models::{Intent, Turn, TurnOptions};
pub use crate::service::{ChatService, TurnReply};
pub use crate::session::SessionState;
