use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use jeevanamrit_core::models::profile::{Demographics, Disclosures};
use jeevanamrit_intake::session::{IntakeSession, SubmitReceipt};
use jeevanamrit_intake::wizard::{IntakeView, IntakeWizard};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Raw text of the three disclosure boxes, comma separated.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DisclosureInput {
    pub allergies: String,
    pub medical_conditions: String,
    pub food_preferences: String,
}

#[derive(Debug, Deserialize)]
pub struct AnswerInput {
    pub option: usize,
}

/// Start an intake for the caller, or resume the one already in progress.
pub async fn start_intake(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<(StatusCode, Json<IntakeView>), ApiError> {
    // The account service creates the profile; intake only fills it in.
    state.store.get_profile(user.user_id).await?;

    let mut sessions = state.sessions.lock().await;
    if let Some(session) = sessions.get(&user.user_id) {
        return Ok((StatusCode::OK, Json(session.view())));
    }

    let wizard = IntakeWizard::new(user.user_id, state.intake_instrument.clone())?;
    let session = IntakeSession::with_redirect(wizard, state.store.clone(), &state.redirect_to);
    let view = session.view();
    sessions.insert(user.user_id, session);
    tracing::info!(user_id = %user.user_id, instrument = %view.instrument_id, "intake started");

    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn get_intake(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<IntakeView>, ApiError> {
    let session = session_for(&state, user.user_id).await?;
    Ok(Json(session.view()))
}

pub async fn set_demographics(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(demographics): Json<Demographics>,
) -> Result<Json<IntakeView>, ApiError> {
    let session = session_for(&state, user.user_id).await?;
    Ok(Json(session.set_demographics(demographics)?))
}

pub async fn set_disclosures(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<DisclosureInput>,
) -> Result<Json<IntakeView>, ApiError> {
    let session = session_for(&state, user.user_id).await?;
    let disclosures = Disclosures::parse(
        &input.allergies,
        &input.medical_conditions,
        &input.food_preferences,
    );
    Ok(Json(session.set_disclosures(disclosures)?))
}

pub async fn select_answer(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(question): Path<usize>,
    Json(answer): Json<AnswerInput>,
) -> Result<Json<IntakeView>, ApiError> {
    let session = session_for(&state, user.user_id).await?;
    session.select_answer(question, answer.option)?;
    Ok(Json(session.view()))
}

pub async fn advance(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<IntakeView>, ApiError> {
    let session = session_for(&state, user.user_id).await?;
    session.advance()?;
    Ok(Json(session.view()))
}

pub async fn retreat(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<IntakeView>, ApiError> {
    let session = session_for(&state, user.user_id).await?;
    session.retreat()?;
    Ok(Json(session.view()))
}

pub async fn submit(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<SubmitReceipt>, ApiError> {
    let session = session_for(&state, user.user_id).await?;
    let receipt = session.submit().await?;
    // A submitted wizard accepts nothing further.
    state.sessions.lock().await.remove(&user.user_id);
    Ok(Json(receipt))
}

/// Clone the caller's session out of the map so the map lock is not held
/// while the session works.
async fn session_for(state: &AppState, user_id: Uuid) -> Result<IntakeSession, ApiError> {
    state
        .sessions
        .lock()
        .await
        .get(&user_id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound("no intake in progress".to_string()))
}
