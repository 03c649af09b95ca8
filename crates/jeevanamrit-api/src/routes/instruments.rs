use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use jeevanamrit_core::models::dosha::Dosha;
use jeevanamrit_instruments::error::AssessmentError;
use jeevanamrit_instruments::questionnaire::Question;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct InstrumentSummary {
    id: String,
    name: String,
    questions: usize,
}

#[derive(Serialize)]
pub struct InstrumentDetail {
    id: String,
    name: String,
    questions: Vec<Question>,
    doshas: Vec<DoshaInfo>,
}

#[derive(Serialize)]
pub struct DoshaInfo {
    dosha: Dosha,
    elements: &'static str,
    qualities: &'static str,
}

pub async fn list_instruments(State(state): State<AppState>) -> Json<Vec<InstrumentSummary>> {
    let instruments: Vec<InstrumentSummary> = state
        .instruments
        .iter()
        .map(|i| InstrumentSummary {
            id: i.id().to_string(),
            name: i.name().to_string(),
            questions: i.bank().len(),
        })
        .collect();
    Json(instruments)
}

pub async fn get_instrument_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InstrumentDetail>, ApiError> {
    let instrument = state
        .instrument(&id)
        .ok_or_else(|| AssessmentError::UnknownInstrument(id.clone()))?;

    Ok(Json(InstrumentDetail {
        id: instrument.id().to_string(),
        name: instrument.name().to_string(),
        questions: instrument.bank().questions.clone(),
        doshas: Dosha::ALL
            .iter()
            .map(|d| DoshaInfo {
                dosha: *d,
                elements: d.elements(),
                qualities: d.qualities(),
            })
            .collect(),
    }))
}
