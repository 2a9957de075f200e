use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use innkeep_core::{BookingConfirmation, VerifiedIdentity};
use innkeep_shared::Booking;

use crate::error::AppError;
use crate::state::AppState;

/// Routes that need a verified caller; mounted behind `require_identity`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/book", post(book_room))
        .route("/bookings", get(list_bookings))
}

/// The raw body goes straight to the workflow so that an absent or
/// non-object payload is reported as a booking validation failure.
async fn book_room(
    State(state): State<AppState>,
    Extension(caller): Extension<VerifiedIdentity>,
    body: Bytes,
) -> Result<(StatusCode, Json<BookingConfirmation>), AppError> {
    let confirmation = state.booking_workflow.book(&caller.email, &body).await?;
    Ok((StatusCode::CREATED, Json(confirmation)))
}

async fn list_bookings(
    State(state): State<AppState>,
    Extension(caller): Extension<VerifiedIdentity>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let bookings = state
        .bookings
        .list_bookings_for(&caller.email)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(Json(bookings))
}
