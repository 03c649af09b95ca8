use std::sync::Arc;

use jeevanamrit_core::models::dosha::{Constitution, DoshaScores, DoshaShares};
use jeevanamrit_core::models::profile::{Demographics, Disclosures, ProfileUpdate};
use jeevanamrit_instruments::scoring::{self, SelectionSet};
use jeevanamrit_instruments::Instrument;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::IntakeError;
use crate::step::{IntakeStep, Progress};
use crate::validation::{self, Rejection};

/// One user's pass through the intake questionnaire.
///
/// Collected data survives back-navigation. Scores are rebuilt from the full
/// selection set after every answer, so the live preview is never stale and a
/// changed answer never counts twice.
pub struct IntakeWizard {
    user_id: Uuid,
    instrument: Arc<dyn Instrument>,
    step: IntakeStep,
    demographics: Demographics,
    disclosures: Disclosures,
    selections: SelectionSet,
    scores: DoshaScores,
    submit_in_flight: bool,
    submitted: bool,
}

impl IntakeWizard {
    /// Start at the demographics step. Fails if the instrument's question
    /// bank cannot be scored.
    pub fn new(user_id: Uuid, instrument: Arc<dyn Instrument>) -> Result<Self, IntakeError> {
        instrument.bank().validate()?;
        Ok(Self {
            user_id,
            instrument,
            step: IntakeStep::Demographics,
            demographics: Demographics::default(),
            disclosures: Disclosures::default(),
            selections: SelectionSet::new(),
            scores: DoshaScores::default(),
            submit_in_flight: false,
            submitted: false,
        })
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn instrument(&self) -> &dyn Instrument {
        self.instrument.as_ref()
    }

    pub fn step(&self) -> IntakeStep {
        self.step
    }

    pub fn progress(&self) -> Progress {
        self.step.progress()
    }

    pub fn demographics(&self) -> &Demographics {
        &self.demographics
    }

    pub fn disclosures(&self) -> &Disclosures {
        &self.disclosures
    }

    pub fn selections(&self) -> &SelectionSet {
        &self.selections
    }

    /// Live scores for the answers given so far.
    pub fn scores(&self) -> DoshaScores {
        self.scores
    }

    /// The final classification, available once the results step is reached.
    pub fn classification(&self) -> Option<Constitution> {
        (self.step == IntakeStep::Results).then(|| scoring::classify(&self.scores))
    }

    pub fn is_submitting(&self) -> bool {
        self.submit_in_flight
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn set_demographics(&mut self, demographics: Demographics) -> Result<(), Rejection> {
        self.ensure_editable()?;
        self.demographics = demographics;
        Ok(())
    }

    pub fn set_disclosures(&mut self, disclosures: Disclosures) -> Result<(), Rejection> {
        self.ensure_editable()?;
        self.disclosures = disclosures;
        Ok(())
    }

    /// Record an answer and return the recomputed scores.
    pub fn select_answer(
        &mut self,
        question: usize,
        option: usize,
    ) -> Result<DoshaScores, IntakeError> {
        self.ensure_editable()?;
        if self.step != IntakeStep::Assessment {
            return Err(Rejection::NotInAssessment.into());
        }

        let mut selections = self.selections.clone();
        let replaced = selections.select(question, option);
        let scores = scoring::score(&selections, self.instrument.bank())?;

        self.selections = selections;
        self.scores = scores;
        tracing::debug!(
            user_id = %self.user_id,
            question,
            option,
            replaced = ?replaced,
            "answer selected"
        );
        Ok(scores)
    }

    /// Move to the next step if the current one is complete.
    pub fn advance(&mut self) -> Result<IntakeStep, Rejection> {
        self.ensure_editable()?;
        match self.step {
            IntakeStep::Demographics => validation::check_demographics(&self.demographics)?,
            IntakeStep::Disclosures => {}
            IntakeStep::Assessment => {
                validation::check_assessment(&self.selections, self.instrument.bank().len())?
            }
            IntakeStep::Results => return Err(Rejection::AtFinalStep),
        }
        let next = self.step.next().ok_or(Rejection::AtFinalStep)?;
        tracing::info!(user_id = %self.user_id, from = ?self.step, to = ?next, "intake advanced");
        self.step = next;
        Ok(next)
    }

    /// Move back one step. Nothing collected so far is cleared.
    pub fn retreat(&mut self) -> Result<IntakeStep, Rejection> {
        self.ensure_editable()?;
        let previous = self.step.previous().ok_or(Rejection::AtFirstStep)?;
        tracing::info!(user_id = %self.user_id, from = ?self.step, to = ?previous, "intake retreated");
        self.step = previous;
        Ok(previous)
    }

    /// Check the questionnaire is complete, mark a submission in flight, and
    /// return the fields to persist.
    ///
    /// Every call that returns `Ok` must be paired with [`finish_submit`].
    ///
    /// [`finish_submit`]: IntakeWizard::finish_submit
    pub fn begin_submit(&mut self) -> Result<ProfileUpdate, IntakeError> {
        self.ensure_editable()?;
        validation::check_demographics(&self.demographics)?;
        validation::check_assessment(&self.selections, self.instrument.bank().len())?;
        if self.step != IntakeStep::Results {
            return Err(Rejection::NotAtResults.into());
        }

        let scores = scoring::score(&self.selections, self.instrument.bank())?;
        let dominant_dosha = scoring::classify(&scores);
        let Demographics {
            age: Some(age),
            height_cm: Some(height_cm),
            weight_kg: Some(weight_kg),
        } = self.demographics
        else {
            return Err(Rejection::MissingAge.into());
        };

        self.submit_in_flight = true;
        tracing::info!(
            user_id = %self.user_id,
            dominant_dosha = %dominant_dosha,
            "intake submission started"
        );

        Ok(ProfileUpdate {
            age,
            height_cm,
            weight_kg,
            allergies: self.disclosures.allergies.clone(),
            medical_conditions: self.disclosures.medical_conditions.clone(),
            food_preferences: self.disclosures.food_preferences.clone(),
            dosha_scores: scores,
            dominant_dosha,
            questionnaire_completed: true,
        })
    }

    /// Clear the in-flight flag. A successful write locks the wizard against
    /// further edits and submissions; a failed one leaves it at the results
    /// step, ready to retry.
    pub fn finish_submit(&mut self, succeeded: bool) {
        self.submit_in_flight = false;
        self.submitted = succeeded;
        if succeeded {
            tracing::info!(user_id = %self.user_id, "intake submitted");
        } else {
            tracing::warn!(user_id = %self.user_id, "intake submission failed; data kept for retry");
        }
    }

    /// Read-only snapshot for rendering.
    pub fn view(&self) -> IntakeView {
        IntakeView {
            user_id: self.user_id,
            instrument_id: self.instrument.id().to_string(),
            step: self.step,
            progress: self.progress(),
            demographics: self.demographics,
            disclosures: self.disclosures.clone(),
            selections: self.selections.clone(),
            scores: self.scores,
            shares: self.scores.percentages(),
            classification: self.classification(),
            submitting: self.submit_in_flight,
            submitted: self.submitted,
        }
    }

    fn ensure_editable(&self) -> Result<(), Rejection> {
        if self.submitted {
            return Err(Rejection::AlreadySubmitted);
        }
        if self.submit_in_flight {
            return Err(Rejection::SubmitInFlight);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IntakeView {
    pub user_id: Uuid,
    pub instrument_id: String,
    pub step: IntakeStep,
    pub progress: Progress,
    pub demographics: Demographics,
    pub disclosures: Disclosures,
    pub selections: SelectionSet,
    pub scores: DoshaScores,
    pub shares: DoshaShares,
    pub classification: Option<Constitution>,
    pub submitting: bool,
    pub submitted: bool,
}
