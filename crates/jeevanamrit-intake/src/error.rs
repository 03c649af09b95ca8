use jeevanamrit_instruments::error::AssessmentError;
use jeevanamrit_storage::error::StorageError;
use thiserror::Error;

use crate::validation::Rejection;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("validation rejected: {0}")]
    ValidationRejected(#[from] Rejection),

    #[error("assessment error: {0}")]
    Assessment(#[from] AssessmentError),

    #[error("persistence failure: {0}")]
    Persistence(#[from] StorageError),
}

impl IntakeError {
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            IntakeError::ValidationRejected(rejection) => Some(*rejection),
            _ => None,
        }
    }
}
