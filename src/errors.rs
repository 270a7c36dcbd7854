/// Domain-specific error types for the pricing and risk calculators.
/// Bad inputs are rejected eagerly at construction and always surfaced
/// to the caller; nothing here is recovered internally.
#[derive(Debug, thiserror::Error)]
pub enum RiskError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("rate series length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("insufficient observations: need at least {needed}, got {got}")]
    InsufficientObservations { needed: usize, got: usize },

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("server error: {0}")]
    Server(String),
}

impl RiskError {
    /// True for errors caused by the caller's inputs rather than the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            RiskError::InvalidInput(_)
                | RiskError::LengthMismatch { .. }
                | RiskError::InsufficientObservations { .. }
        )
    }
}

impl From<std::io::Error> for RiskError {
    fn from(e: std::io::Error) -> Self {
        RiskError::Io(e.to_string())
    }
}

impl From<csv::Error> for RiskError {
    fn from(e: csv::Error) -> Self {
        RiskError::Parse(e.to_string())
    }
}

pub type RiskResult<T> = Result<T, RiskError>;
