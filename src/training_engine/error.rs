use thiserror::Error;

use crate::training_engine::drill::DrillPhase;

/// Failures detected while building a shoe.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShoeError {
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

impl ShoeError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        ShoeError::InvalidConfiguration { reason: reason.into() }
    }
}

/// Failures raised by a [`SingleHandDrill`](crate::training_engine::drill::SingleHandDrill) session.
#[derive(Error, Debug)]
pub enum DrillError {
    #[error(transparent)]
    Shoe(#[from] ShoeError),
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("Unknown counting system: {0}")]
    UnknownCountingSystem(String),
    #[error("Action needs the drill in {expected:?} but it is in {actual:?}")]
    WrongPhase {
        expected: DrillPhase,
        actual: DrillPhase,
    },
}
