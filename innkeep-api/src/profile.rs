use axum::{extract::State, routing::get, Extension, Json, Router};
use innkeep_core::VerifiedIdentity;
use innkeep_shared::{ProfileUpdate, UserProfile};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/profile", get(get_profile).put(update_profile))
}

fn user_not_found() -> AppError {
    AppError::NotFoundError("User not found".to_string())
}

async fn get_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<VerifiedIdentity>,
) -> Result<Json<UserProfile>, AppError> {
    let user = state
        .users
        .find_by_email(&caller.email)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(user_not_found)?;

    Ok(Json(user.profile()))
}

/// Only the supplied fields change; an empty update just echoes the profile.
async fn update_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<VerifiedIdentity>,
    payload: Result<Json<ProfileUpdate>, axum::extract::rejection::JsonRejection>,
) -> Result<Json<UserProfile>, AppError> {
    let Json(update) = payload?;

    let user = if update.is_empty() {
        state.users.find_by_email(&caller.email).await
    } else {
        state.users.update_profile(&caller.email, &update).await
    }
    .map_err(|e| AppError::InternalServerError(e.to_string()))?
    .ok_or_else(user_not_found)?;

    Ok(Json(user.profile()))
}
