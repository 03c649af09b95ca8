use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid dosha: {0}")]
    InvalidDosha(String),
}
