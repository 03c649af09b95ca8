//! jeevanamrit-instruments
//!
//! Constitution assessment instruments. Pure data and scoring, no AWS
//! dependency. Defines the question banks, the scoring engine, and the
//! loader for question banks supplied as configuration files.

pub mod bank;
pub mod error;
pub mod instruments;
pub mod questionnaire;
pub mod scoring;

use jeevanamrit_core::models::dosha::DoshaScores;

use error::AssessmentError;
use questionnaire::QuestionBank;
use scoring::SelectionSet;

/// Trait implemented by each constitution assessment instrument.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "prakriti").
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// The ordered questions this instrument asks.
    fn bank(&self) -> &QuestionBank;

    /// Score a set of selections against this instrument's questions.
    fn score(&self, selections: &SelectionSet) -> Result<DoshaScores, AssessmentError> {
        scoring::score(selections, self.bank())
    }

    /// Format the answered questions as structured text, e.g. for a
    /// practitioner's intake notes.
    fn to_structured_input(&self, selections: &SelectionSet) -> String {
        let mut output = format!("## {}\n\n", self.name());
        for (index, question) in self.bank().questions.iter().enumerate() {
            if let Some(option) = selections
                .get(index)
                .and_then(|option| question.options.get(option))
            {
                output.push_str(&format!(
                    "- {}: {} ({})\n",
                    question.prompt, option.text, option.category
                ));
            }
        }
        output
    }
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![Box::new(instruments::prakriti::Prakriti)]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}
