use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::dosha::{Constitution, DoshaScores};

/// A patient's persisted profile. Created once per user account; the intake
/// questionnaire fills in the health fields and flips `questionnaire_completed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub age: Option<u32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub medical_conditions: Vec<String>,
    #[serde(default)]
    pub food_preferences: Vec<String>,
    pub dosha_scores: Option<DoshaScores>,
    pub dominant_dosha: Option<Constitution>,
    #[serde(default)]
    pub questionnaire_completed: bool,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl Profile {
    pub fn new(
        user_id: Uuid,
        full_name: Option<String>,
        email: Option<String>,
        now: jiff::Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            full_name,
            email,
            age: None,
            height_cm: None,
            weight_kg: None,
            allergies: Vec::new(),
            medical_conditions: Vec::new(),
            food_preferences: Vec::new(),
            dosha_scores: None,
            dominant_dosha: None,
            questionnaire_completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the questionnaire-owned fields. Identity fields and
    /// `created_at` are left untouched.
    pub fn apply(&mut self, update: &ProfileUpdate, now: jiff::Timestamp) {
        self.age = Some(update.age);
        self.height_cm = Some(update.height_cm);
        self.weight_kg = Some(update.weight_kg);
        self.allergies = update.allergies.clone();
        self.medical_conditions = update.medical_conditions.clone();
        self.food_preferences = update.food_preferences.clone();
        self.dosha_scores = Some(update.dosha_scores);
        self.dominant_dosha = Some(update.dominant_dosha);
        self.questionnaire_completed = update.questionnaire_completed;
        self.updated_at = now;
    }
}

/// The fields written to a profile when the intake questionnaire is submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProfileUpdate {
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub allergies: Vec<String>,
    pub medical_conditions: Vec<String>,
    pub food_preferences: Vec<String>,
    pub dosha_scores: DoshaScores,
    pub dominant_dosha: Constitution,
    pub questionnaire_completed: bool,
}

/// Anthropometric fields collected on the first intake step. Fields stay
/// `None` until the user enters them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Demographics {
    pub age: Option<u32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
}

/// Free-text health disclosures. Every list is trimmed, non-empty, and
/// free of case-insensitive duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Disclosures {
    pub allergies: Vec<String>,
    pub medical_conditions: Vec<String>,
    pub food_preferences: Vec<String>,
}

impl Disclosures {
    /// Build from the raw comma-separated text of the three input boxes.
    pub fn parse(allergies: &str, medical_conditions: &str, food_preferences: &str) -> Self {
        Self {
            allergies: parse_list(allergies),
            medical_conditions: parse_list(medical_conditions),
            food_preferences: parse_list(food_preferences),
        }
    }
}

/// Split comma-separated input into a clean list.
///
/// Entries are trimmed, blanks are dropped, and later entries that match an
/// earlier one ignoring case are discarded. First-seen order and casing win.
pub fn parse_list(input: &str) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::new();
    for entry in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let folded = entry.to_lowercase();
        if seen.contains(&folded) {
            continue;
        }
        seen.push(folded);
        out.push(entry.to_string());
    }
    out
}
