use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;

use jeevanamrit_core::models::profile::Profile;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateProfile {
    pub full_name: Option<String>,
    pub email: Option<String>,
}

pub async fn create_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<CreateProfile>,
) -> Result<(StatusCode, Json<Profile>), ApiError> {
    let profile = Profile::new(
        user.user_id,
        body.full_name.filter(|n| !n.trim().is_empty()),
        body.email.filter(|e| !e.trim().is_empty()),
        jiff::Timestamp::now(),
    );
    let profile = state.store.create_profile(profile).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Profile>, ApiError> {
    let profile = state.store.get_profile(user.user_id).await?;
    Ok(Json(profile))
}
