mod common;

use jeevanamrit_core::models::dosha::{Constitution, DoshaScores};
use jeevanamrit_core::models::profile::{Demographics, Disclosures};
use jeevanamrit_instruments::error::{AssessmentError, InvalidSelection};
use jeevanamrit_instruments::questionnaire::{Question, QuestionBank};
use jeevanamrit_instruments::Instrument;
use jeevanamrit_intake::error::IntakeError;
use jeevanamrit_intake::step::IntakeStep;
use jeevanamrit_intake::validation::Rejection;
use jeevanamrit_intake::wizard::IntakeWizard;
use uuid::Uuid;

use common::{demographics, prakriti_wizard, wizard_at_assessment, wizard_at_results};

#[test]
fn starts_at_demographics() {
    let wizard = prakriti_wizard(Uuid::new_v4());
    assert_eq!(wizard.step(), IntakeStep::Demographics);
    assert_eq!(wizard.progress().step, 1);
    assert_eq!(wizard.progress().percent, 25);
    assert_eq!(wizard.classification(), None);
}

#[test]
fn zero_age_blocks_advance() {
    let mut wizard = prakriti_wizard(Uuid::new_v4());
    wizard.set_demographics(demographics(0, 165.0, 60.0)).unwrap();

    assert_eq!(wizard.advance(), Err(Rejection::MissingAge));
    assert_eq!(wizard.step(), IntakeStep::Demographics);
}

#[test]
fn blank_fields_block_advance_in_form_order() {
    let mut wizard = prakriti_wizard(Uuid::new_v4());
    assert_eq!(wizard.advance(), Err(Rejection::MissingAge));

    wizard
        .set_demographics(Demographics {
            age: Some(32),
            height_cm: None,
            weight_kg: Some(60.0),
        })
        .unwrap();
    assert_eq!(wizard.advance(), Err(Rejection::MissingHeight));

    wizard.set_demographics(demographics(32, 165.0, 0.0)).unwrap();
    assert_eq!(wizard.advance(), Err(Rejection::MissingWeight));

    wizard.set_demographics(demographics(32, -1.0, 60.0)).unwrap();
    assert_eq!(wizard.advance(), Err(Rejection::MissingHeight));

    wizard
        .set_demographics(demographics(32, f64::NAN, 60.0))
        .unwrap();
    assert_eq!(wizard.advance(), Err(Rejection::MissingHeight));
    assert_eq!(wizard.step(), IntakeStep::Demographics);
}

#[test]
fn valid_demographics_advance_to_disclosures() {
    let mut wizard = prakriti_wizard(Uuid::new_v4());
    wizard.set_demographics(demographics(32, 165.0, 60.0)).unwrap();

    assert_eq!(wizard.advance(), Ok(IntakeStep::Disclosures));
    assert_eq!(wizard.step(), IntakeStep::Disclosures);
}

#[test]
fn empty_disclosures_still_advance() {
    let mut wizard = prakriti_wizard(Uuid::new_v4());
    wizard.set_demographics(demographics(32, 165.0, 60.0)).unwrap();
    wizard.advance().unwrap();

    assert_eq!(wizard.advance(), Ok(IntakeStep::Assessment));
}

#[test]
fn retreat_is_refused_at_first_step() {
    let mut wizard = prakriti_wizard(Uuid::new_v4());
    assert_eq!(wizard.retreat(), Err(Rejection::AtFirstStep));
    assert_eq!(wizard.step(), IntakeStep::Demographics);
}

#[test]
fn retreat_keeps_collected_data() {
    let mut wizard = wizard_at_assessment(Uuid::new_v4());
    wizard
        .set_disclosures(Disclosures::parse("Nuts", "", "Vegetarian"))
        .unwrap();
    wizard.select_answer(0, 1).unwrap();

    assert_eq!(wizard.retreat(), Ok(IntakeStep::Disclosures));
    assert_eq!(wizard.retreat(), Ok(IntakeStep::Demographics));
    assert_eq!(wizard.demographics(), &demographics(32, 165.0, 60.0));
    assert_eq!(wizard.disclosures().allergies, vec!["Nuts"]);
    assert_eq!(wizard.selections().get(0), Some(1));

    wizard.advance().unwrap();
    wizard.advance().unwrap();
    assert_eq!(wizard.scores().pitta, 2);
}

#[test]
fn answers_are_only_accepted_during_assessment() {
    let mut wizard = prakriti_wizard(Uuid::new_v4());
    let err = wizard.select_answer(0, 0).unwrap_err();
    assert_eq!(err.rejection(), Some(Rejection::NotInAssessment));
    assert!(wizard.selections().is_empty());
}

#[test]
fn changing_an_answer_does_not_double_count() {
    let mut wizard = wizard_at_assessment(Uuid::new_v4());
    wizard.select_answer(0, 0).unwrap();
    let scores = wizard.select_answer(0, 1).unwrap();

    let expected = DoshaScores {
        vata: 0,
        pitta: 2,
        kapha: 0,
    };
    assert_eq!(scores, expected);
    assert_eq!(wizard.scores(), expected);
}

#[test]
fn invalid_answer_leaves_state_untouched() {
    let mut wizard = wizard_at_assessment(Uuid::new_v4());
    wizard.select_answer(2, 2).unwrap();

    let err = wizard.select_answer(2, 7).unwrap_err();
    assert!(matches!(
        err,
        IntakeError::Assessment(AssessmentError::InvalidSelection(
            InvalidSelection::OptionOutOfRange { question: 2, option: 7, .. }
        ))
    ));
    let err = wizard.select_answer(9, 0).unwrap_err();
    assert!(matches!(
        err,
        IntakeError::Assessment(AssessmentError::InvalidSelection(
            InvalidSelection::QuestionOutOfRange { question: 9, .. }
        ))
    ));

    assert_eq!(wizard.selections().get(2), Some(2));
    assert_eq!(wizard.selections().len(), 1);
    assert_eq!(wizard.scores().kapha, 2);
}

#[test]
fn partial_assessment_blocks_results() {
    let mut wizard = wizard_at_assessment(Uuid::new_v4());
    for question in [0, 1, 2, 4] {
        wizard.select_answer(question, 0).unwrap();
    }

    assert_eq!(
        wizard.advance(),
        Err(Rejection::UnansweredQuestion { index: 3 })
    );
    assert_eq!(wizard.step(), IntakeStep::Assessment);
}

#[test]
fn results_expose_the_classification() {
    let wizard = wizard_at_results(Uuid::new_v4(), 0);
    assert_eq!(wizard.step(), IntakeStep::Results);
    assert_eq!(wizard.progress().percent, 100);
    assert_eq!(
        wizard.scores(),
        DoshaScores {
            vata: 10,
            pitta: 0,
            kapha: 0
        }
    );
    assert_eq!(wizard.classification(), Some(Constitution::Vata));
}

#[test]
fn advance_is_refused_at_results() {
    let mut wizard = wizard_at_results(Uuid::new_v4(), 2);
    assert_eq!(wizard.advance(), Err(Rejection::AtFinalStep));
    assert_eq!(wizard.step(), IntakeStep::Results);
}

#[test]
fn submit_outside_results_is_rejected() {
    let mut wizard = wizard_at_assessment(Uuid::new_v4());
    for question in 0..5 {
        wizard.select_answer(question, 0).unwrap();
    }
    let err = wizard.begin_submit().unwrap_err();
    assert_eq!(err.rejection(), Some(Rejection::NotAtResults));
    assert!(!wizard.is_submitting());
}

#[test]
fn submit_with_missing_answer_names_the_question() {
    let mut wizard = wizard_at_assessment(Uuid::new_v4());
    for question in 0..4 {
        wizard.select_answer(question, 1).unwrap();
    }
    let err = wizard.begin_submit().unwrap_err();
    assert_eq!(
        err.rejection(),
        Some(Rejection::UnansweredQuestion { index: 4 })
    );
}

#[test]
fn begin_submit_builds_the_profile_update() {
    let mut wizard = wizard_at_assessment(Uuid::new_v4());
    wizard
        .set_disclosures(Disclosures::parse("Dairy, dairy", "Asthma", ""))
        .unwrap();
    for (question, option) in [(0, 0), (1, 1), (2, 2), (3, 0), (4, 1)] {
        wizard.select_answer(question, option).unwrap();
    }
    wizard.advance().unwrap();

    let update = wizard.begin_submit().unwrap();
    assert_eq!(update.age, 32);
    assert_eq!(update.height_cm, 165.0);
    assert_eq!(update.weight_kg, 60.0);
    assert_eq!(update.allergies, vec!["Dairy"]);
    assert_eq!(update.medical_conditions, vec!["Asthma"]);
    assert!(update.food_preferences.is_empty());
    assert_eq!(
        update.dosha_scores,
        DoshaScores {
            vata: 4,
            pitta: 4,
            kapha: 2
        }
    );
    assert_eq!(update.dominant_dosha, Constitution::Tridoshic);
    assert!(update.questionnaire_completed);
    assert!(wizard.is_submitting());
}

#[test]
fn in_flight_submission_blocks_everything() {
    let mut wizard = wizard_at_results(Uuid::new_v4(), 1);
    wizard.begin_submit().unwrap();

    let err = wizard.begin_submit().unwrap_err();
    assert_eq!(err.rejection(), Some(Rejection::SubmitInFlight));
    assert_eq!(wizard.retreat(), Err(Rejection::SubmitInFlight));
    assert_eq!(
        wizard.set_disclosures(Disclosures::default()),
        Err(Rejection::SubmitInFlight)
    );
}

#[test]
fn failed_submission_can_be_retried() {
    let mut wizard = wizard_at_results(Uuid::new_v4(), 1);
    let first = wizard.begin_submit().unwrap();
    wizard.finish_submit(false);

    assert_eq!(wizard.step(), IntakeStep::Results);
    assert!(!wizard.is_submitted());
    let second = wizard.begin_submit().unwrap();
    assert_eq!(first, second);
}

#[test]
fn successful_submission_locks_the_wizard() {
    let mut wizard = wizard_at_results(Uuid::new_v4(), 1);
    wizard.begin_submit().unwrap();
    wizard.finish_submit(true);

    assert!(wizard.is_submitted());
    let err = wizard.begin_submit().unwrap_err();
    assert_eq!(err.rejection(), Some(Rejection::AlreadySubmitted));
    assert_eq!(wizard.retreat(), Err(Rejection::AlreadySubmitted));
}

#[test]
fn view_reflects_wizard_state() {
    let user_id = Uuid::new_v4();
    let wizard = wizard_at_results(user_id, 2);
    let view = wizard.view();

    assert_eq!(view.user_id, user_id);
    assert_eq!(view.instrument_id, "prakriti");
    assert_eq!(view.step, IntakeStep::Results);
    assert_eq!(view.selections.len(), 5);
    assert_eq!(view.scores.kapha, 10);
    assert_eq!(view.shares.kapha, 100);
    assert_eq!(view.classification, Some(Constitution::Kapha));
    assert!(!view.submitting);
}

struct EmptyInstrument(QuestionBank);

impl Instrument for EmptyInstrument {
    fn id(&self) -> &str {
        "empty"
    }

    fn name(&self) -> &str {
        "Empty"
    }

    fn bank(&self) -> &QuestionBank {
        &self.0
    }
}

#[test]
fn unscoreable_bank_is_refused_up_front() {
    let empty = EmptyInstrument(QuestionBank::default());
    let err = IntakeWizard::new(Uuid::new_v4(), std::sync::Arc::new(empty)).err();
    assert!(matches!(
        err,
        Some(IntakeError::Assessment(AssessmentError::Configuration(_)))
    ));

    let no_options = EmptyInstrument(QuestionBank::new(vec![Question {
        prompt: "Anything?".to_string(),
        options: Vec::new(),
    }]));
    assert!(IntakeWizard::new(Uuid::new_v4(), std::sync::Arc::new(no_options)).is_err());
}
