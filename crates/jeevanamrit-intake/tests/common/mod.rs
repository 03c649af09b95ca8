#![allow(dead_code)]

use std::sync::Arc;

use jeevanamrit_core::models::profile::Demographics;
use jeevanamrit_instruments::get_instrument;
use jeevanamrit_intake::wizard::IntakeWizard;
use uuid::Uuid;

pub fn prakriti_wizard(user_id: Uuid) -> IntakeWizard {
    let instrument = get_instrument("prakriti").expect("prakriti registered");
    IntakeWizard::new(user_id, Arc::from(instrument)).expect("valid bank")
}

pub fn demographics(age: u32, height_cm: f64, weight_kg: f64) -> Demographics {
    Demographics {
        age: Some(age),
        height_cm: Some(height_cm),
        weight_kg: Some(weight_kg),
    }
}

/// Walk a fresh wizard to the assessment step with valid demographics.
pub fn wizard_at_assessment(user_id: Uuid) -> IntakeWizard {
    let mut wizard = prakriti_wizard(user_id);
    wizard
        .set_demographics(demographics(32, 165.0, 60.0))
        .expect("editable");
    wizard.advance().expect("demographics complete");
    wizard.advance().expect("disclosures optional");
    wizard
}

/// Answer every question with the given option index and advance to results.
pub fn wizard_at_results(user_id: Uuid, option: usize) -> IntakeWizard {
    let mut wizard = wizard_at_assessment(user_id);
    for question in 0..5 {
        wizard.select_answer(question, option).expect("valid answer");
    }
    wizard.advance().expect("all answered");
    wizard
}
