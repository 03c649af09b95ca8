//! Question banks supplied as JSON configuration files.
//!
//! A file looks like:
//!
//! ```json
//! {
//!   "bank_version": 1,
//!   "id": "prakriti_short",
//!   "name": "Short Prakriti",
//!   "questions": [
//!     { "prompt": "...", "options": [{ "text": "...", "category": "vata", "weight": 2 }] }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AssessmentError;
use crate::questionnaire::{Question, QuestionBank};
use crate::Instrument;

/// Current bank file version. Bump this when changing the file shape.
/// Each bump requires a corresponding step in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BankFile {
    #[serde(default)]
    bank_version: u32,
    id: String,
    name: String,
    questions: Vec<Question>,
}

/// An instrument whose questions come from a configuration file rather
/// than being compiled in.
#[derive(Debug, Clone)]
pub struct ConfiguredInstrument {
    id: String,
    name: String,
    bank: QuestionBank,
}

impl Instrument for ConfiguredInstrument {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn bank(&self) -> &QuestionBank {
        &self.bank
    }
}

/// Read, migrate, and validate a bank file.
pub fn load_bank(path: &Path) -> Result<ConfiguredInstrument, AssessmentError> {
    let contents = std::fs::read_to_string(path)?;
    let instrument = parse_bank(&contents)?;
    tracing::info!(
        path = %path.display(),
        instrument = %instrument.id,
        questions = instrument.bank.len(),
        "question bank loaded"
    );
    Ok(instrument)
}

/// Parse bank JSON, running migrations before deserializing.
pub fn parse_bank(contents: &str) -> Result<ConfiguredInstrument, AssessmentError> {
    let json: serde_json::Value = serde_json::from_str(contents)?;
    let raw_version = json
        .get("bank_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0);
    let on_disk_version = u32::try_from(raw_version).map_err(|_| {
        AssessmentError::Configuration(format!(
            "bank_version {raw_version} is newer than this build supports ({CURRENT_VERSION})"
        ))
    })?;

    let migrated = migrate(json, on_disk_version)?;
    let file: BankFile = serde_json::from_value(migrated)?;

    let bank = QuestionBank::new(file.questions);
    bank.validate()?;

    Ok(ConfiguredInstrument {
        id: file.id,
        name: file.name,
        bank,
    })
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> Result<serde_json::Value, AssessmentError> {
    if from_version > CURRENT_VERSION {
        return Err(AssessmentError::Configuration(format!(
            "bank_version {from_version} is newer than this build supports ({CURRENT_VERSION})"
        )));
    }

    // v0 → v1: options were `{ text, dosha, score }`
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| AssessmentError::Configuration("bank is not a JSON object".to_string()))?;
        if let Some(questions) = obj.get_mut("questions").and_then(|q| q.as_array_mut()) {
            for option in questions
                .iter_mut()
                .filter_map(|q| q.get_mut("options"))
                .filter_map(|o| o.as_array_mut())
                .flat_map(|o| o.iter_mut())
                .filter_map(|o| o.as_object_mut())
            {
                if let Some(dosha) = option.remove("dosha") {
                    option.entry("category").or_insert(dosha);
                }
                if let Some(score) = option.remove("score") {
                    option.entry("weight").or_insert(score);
                }
            }
        }
        obj.insert(
            "bank_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated question bank v0 → v1 (renamed dosha/score)");
    }

    Ok(json)
}
