//! Error types for actor configuration and persistence

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActorError {
    #[error("walking speed must be positive and finite, got {0}")]
    InvalidWalkingSpeed(f32),

    #[error("scale must be positive and finite, got {0}")]
    InvalidScale(f32),

    #[error("world scale must be positive and finite, got {0}")]
    InvalidWorldScale(f32),

    #[error("failed to serialize actor: {0}")]
    Serialize(#[from] ron::Error),

    #[error("failed to deserialize actor: {0}")]
    Deserialize(#[from] ron::error::SpannedError),
}

pub type Result<T> = std::result::Result<T, ActorError>;
