//! Error taxonomy shared by the store, the services and the HTTP boundary.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Error, Debug)]
pub enum ServiceError {
    /// Malformed or out-of-range input.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Unknown identifier.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// Durable storage failed. The core never retries.
    #[error("measurement store failure: {0:#}")]
    Store(anyhow::Error),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn measurement_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity: "measurement",
            id: id.to_string(),
        }
    }

    pub fn session_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity: "session",
            id: id.to_string(),
        }
    }

    pub fn store(err: anyhow::Error) -> Self {
        Self::Store(err)
    }

    /// Validation and lookup failures are expected outcomes; storage failures are not.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound { .. })
    }

    /// Text safe to hand to an external caller.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::NotFound { entity: "measurement", .. } => "Measurement not found".to_string(),
            Self::NotFound { entity: "session", .. } => "Session not found".to_string(),
            Self::NotFound { .. } => "Not found".to_string(),
            Self::Store(_) => "Internal storage error".to_string(),
        }
    }
}

impl From<anyhow::Error> for ServiceError {
    fn from(err: anyhow::Error) -> Self {
        Self::Store(err)
    }
}
