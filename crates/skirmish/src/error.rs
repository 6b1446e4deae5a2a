use corps_core::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SkirmishError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("could not write config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    /// Matches are agent against agent; nobody is there to answer for a human seat.
    #[error("player {0} is human; matches need two agents")]
    NeedsHumanInput(String),
}

pub type SkirmishResult<T> = Result<T, SkirmishError>;
