use jeevanamrit_core::models::profile::Demographics;
use jeevanamrit_instruments::scoring::SelectionSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Why a wizard transition or submission was refused. Every reason is
/// recoverable: the wizard state is left exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[serde(tag = "code", rename_all = "snake_case")]
#[ts(export)]
pub enum Rejection {
    #[error("age must be a positive number")]
    MissingAge,

    #[error("height must be a positive number")]
    MissingHeight,

    #[error("weight must be a positive number")]
    MissingWeight,

    #[error("question {index} has not been answered")]
    UnansweredQuestion { index: usize },

    #[error("answers can only be selected during the assessment step")]
    NotInAssessment,

    #[error("already at the first step")]
    AtFirstStep,

    #[error("already at the final step")]
    AtFinalStep,

    #[error("the questionnaire can only be submitted from the results step")]
    NotAtResults,

    #[error("a submission is already in progress")]
    SubmitInFlight,

    #[error("the questionnaire has already been submitted")]
    AlreadySubmitted,
}

/// Age, height, and weight must each be present and positive.
/// Reports the first field that fails, in form order.
pub fn check_demographics(demographics: &Demographics) -> Result<(), Rejection> {
    if !demographics.age.is_some_and(|age| age > 0) {
        return Err(Rejection::MissingAge);
    }
    if !is_positive(demographics.height_cm) {
        return Err(Rejection::MissingHeight);
    }
    if !is_positive(demographics.weight_kg) {
        return Err(Rejection::MissingWeight);
    }
    Ok(())
}

/// Every question must have a selection. Reports the lowest unanswered index.
pub fn check_assessment(selections: &SelectionSet, question_count: usize) -> Result<(), Rejection> {
    match selections.unanswered(question_count).next() {
        Some(index) => Err(Rejection::UnansweredQuestion { index }),
        None => Ok(()),
    }
}

fn is_positive(value: Option<f64>) -> bool {
    value.is_some_and(|v| v.is_finite() && v > 0.0)
}
