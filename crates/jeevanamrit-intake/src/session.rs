use std::sync::{Arc, Mutex, MutexGuard};

use jeevanamrit_core::models::dosha::DoshaScores;
use jeevanamrit_core::models::profile::{Demographics, Disclosures, Profile};
use jeevanamrit_storage::profiles::ProfileStore;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::IntakeError;
use crate::step::IntakeStep;
use crate::wizard::{IntakeView, IntakeWizard};

pub const DEFAULT_REDIRECT: &str = "/patient-dashboard";

/// Returned by a successful submission. `redirect_to` is where the
/// navigation shell should send the user next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubmitReceipt {
    pub profile: Profile,
    pub redirect_to: String,
}

/// A cloneable handle to one wizard plus the store it submits to.
///
/// The wizard lock is only held for synchronous transitions, never across
/// the store write, so a second `submit` issued while the first is awaiting
/// the store sees the in-flight flag and is rejected.
#[derive(Clone)]
pub struct IntakeSession {
    wizard: Arc<Mutex<IntakeWizard>>,
    store: Arc<dyn ProfileStore>,
    redirect_to: Arc<str>,
}

impl IntakeSession {
    pub fn new(wizard: IntakeWizard, store: Arc<dyn ProfileStore>) -> Self {
        Self::with_redirect(wizard, store, DEFAULT_REDIRECT)
    }

    pub fn with_redirect(
        wizard: IntakeWizard,
        store: Arc<dyn ProfileStore>,
        redirect_to: &str,
    ) -> Self {
        Self {
            wizard: Arc::new(Mutex::new(wizard)),
            store,
            redirect_to: Arc::from(redirect_to),
        }
    }

    pub fn view(&self) -> IntakeView {
        self.lock().view()
    }

    pub fn set_demographics(&self, demographics: Demographics) -> Result<IntakeView, IntakeError> {
        let mut wizard = self.lock();
        wizard.set_demographics(demographics)?;
        Ok(wizard.view())
    }

    pub fn set_disclosures(&self, disclosures: Disclosures) -> Result<IntakeView, IntakeError> {
        let mut wizard = self.lock();
        wizard.set_disclosures(disclosures)?;
        Ok(wizard.view())
    }

    pub fn select_answer(&self, question: usize, option: usize) -> Result<DoshaScores, IntakeError> {
        self.lock().select_answer(question, option)
    }

    pub fn advance(&self) -> Result<IntakeStep, IntakeError> {
        Ok(self.lock().advance()?)
    }

    pub fn retreat(&self) -> Result<IntakeStep, IntakeError> {
        Ok(self.lock().retreat()?)
    }

    /// Validate, write the completed profile, and report where to go next.
    ///
    /// On a store failure the wizard stays at the results step with every
    /// answer intact, and the call can simply be retried.
    pub async fn submit(&self) -> Result<SubmitReceipt, IntakeError> {
        let (user_id, update) = {
            let mut wizard = self.lock();
            let update = wizard.begin_submit()?;
            (wizard.user_id(), update)
        };

        let mut in_flight = InFlight {
            wizard: &self.wizard,
            succeeded: false,
        };
        let profile = self.store.update_profile(user_id, update).await?;
        in_flight.succeeded = true;
        drop(in_flight);

        Ok(SubmitReceipt {
            profile,
            redirect_to: self.redirect_to.to_string(),
        })
    }

    fn lock(&self) -> MutexGuard<'_, IntakeWizard> {
        // Transitions validate before mutating, so a poisoned wizard is still consistent.
        self.wizard.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Clears the in-flight flag when the store call resolves, fails, or the
/// submit future is dropped before completing.
struct InFlight<'a> {
    wizard: &'a Mutex<IntakeWizard>,
    succeeded: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut wizard = self
            .wizard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        wizard.finish_submit(self.succeeded);
    }
}
