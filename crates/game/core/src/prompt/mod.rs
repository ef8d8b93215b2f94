//! Typing prompts attached to actions.
//!
//! A [`PromptSource`] produces candidate tokens; [`PromptTrainer`] is the
//! standard weighted source. [`PromptService`] hands out one prompt per action,
//! keeping concurrently displayed prompts distinct, and [`TypingBuffer`]
//! matches what the player typed back to an entry.

mod service;
mod trainer;
mod typing;

pub use service::{MAX_ATTEMPTS, PromptService, RECENT_PROMPT_LIMIT};
pub use trainer::{DEFAULT_LETTER_WEIGHTS, PromptTrainer};
pub use typing::TypingBuffer;

use crate::error::{ErrorSeverity, IslandError};

/// Anything that can produce the next candidate prompt.
pub trait PromptSource {
    fn next_prompt(&mut self) -> String;
}

impl<F> PromptSource for F
where
    F: FnMut() -> String,
{
    fn next_prompt(&mut self) -> String {
        self()
    }
}

/// Errors raised while building a prompt source.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PromptError {
    #[error("prompt trainer requires at least one prompt")]
    EmptyPool,
}

impl IslandError for PromptError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            PromptError::EmptyPool => "PROMPT_EMPTY_POOL",
        }
    }
}
