use thiserror::Error;

use crate::command::parser::ParseError;
use crate::fill::image::FetchError;
use crate::node::host::HostError;

/// Failure of a whole operation, as reported at the message boundary.
#[derive(Debug, Error)]
pub enum AssistError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The operation ran but changed nothing.
    #[error("{0}")]
    ZeroEffect(String),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl AssistError {
    pub fn zero(message: impl Into<String>) -> Self {
        AssistError::ZeroEffect(message.into())
    }

    pub fn empty_selection() -> Self {
        AssistError::zero("먼저 레이어를 선택해주세요.")
    }
}

/// Result of a batch operation: how many nodes changed and what to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub changed: usize,
    pub message: String,
}

impl Outcome {
    pub fn new(changed: usize, message: impl Into<String>) -> Self {
        Self {
            changed,
            message: message.into(),
        }
    }
}
