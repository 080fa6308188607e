use models::errors::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("duplicate key: {0}")]
    DuplicateKey(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl ServiceError {
    pub fn not_found(roll: &str) -> Self { Self::NotFound(format!("no student with roll number {roll}")) }
    pub fn duplicate(roll: &str) -> Self { Self::DuplicateKey(format!("student with roll number {roll} already exists")) }
    pub fn persistence(msg: impl Into<String>) -> Self { Self::Persistence(msg.into()) }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => Self::Validation(msg),
        }
    }
}
