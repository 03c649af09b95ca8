use jeevanamrit_core::models::dosha::Dosha;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::AssessmentError;

/// One selectable answer. Choosing it adds `weight` to `category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerOption {
    pub text: String,
    pub category: Dosha,
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<AnswerOption>,
}

/// The ordered list of questions an instrument asks. Question and option
/// positions are the indices used by a `SelectionSet`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionBank {
    pub questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Check the bank can be scored at all: at least one question, every
    /// question has options, every weight is positive, and the largest
    /// possible score for each dosha fits in a `u32`.
    pub fn validate(&self) -> Result<(), AssessmentError> {
        if self.questions.is_empty() {
            return Err(AssessmentError::Configuration(
                "question bank has no questions".to_string(),
            ));
        }
        for (index, question) in self.questions.iter().enumerate() {
            if question.options.is_empty() {
                return Err(AssessmentError::Configuration(format!(
                    "question {index} ({}) has no options",
                    question.prompt
                )));
            }
            if let Some(option) = question.options.iter().find(|o| o.weight == 0) {
                return Err(AssessmentError::Configuration(format!(
                    "question {index} option '{}' has zero weight",
                    option.text
                )));
            }
        }
        for dosha in Dosha::ALL {
            let ceiling = self
                .questions
                .iter()
                .filter_map(|q| {
                    q.options
                        .iter()
                        .filter(|o| o.category == dosha)
                        .map(|o| o.weight)
                        .max()
                })
                .try_fold(0u32, u32::checked_add);
            if ceiling.is_none() {
                return Err(AssessmentError::Configuration(format!(
                    "maximum {dosha} score exceeds {}",
                    u32::MAX
                )));
            }
        }
        Ok(())
    }
}
