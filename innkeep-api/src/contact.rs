use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use innkeep_core::validator::missing_fields;
use innkeep_shared::models::local_timestamp;
use innkeep_shared::pii::Masked;
use innkeep_shared::NewContactInquiry;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

const CONTACT_FAILURE_MESSAGE: &str = "An error occurred while processing your inquiry";

#[derive(Debug, Default, Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub message: &'static str,
    pub contact_id: Uuid,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/contact", post(contact_us))
}

async fn contact_us(
    State(state): State<AppState>,
    payload: Result<Json<Value>, axum::extract::rejection::JsonRejection>,
) -> Result<(StatusCode, Json<ContactResponse>), AppError> {
    let Json(value) = payload?;
    if value.as_object().map_or(true, |fields| fields.is_empty()) {
        return Err(AppError::BadRequest("No data provided".to_string()));
    }
    let req: ContactRequest =
        serde_json::from_value(value).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let missing = missing_fields(&[
        ("name", req.name.as_deref()),
        ("email", req.email.as_deref()),
        ("phone", req.phone.as_deref()),
        ("message", req.message.as_deref()),
    ]);
    if !missing.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let inquiry = NewContactInquiry {
        name: req.name.unwrap_or_default(),
        email: req.email.unwrap_or_default(),
        phone: req.phone.unwrap_or_default(),
        message: req.message.unwrap_or_default(),
        received_at: local_timestamp(),
    };

    let contact_id = state
        .contacts
        .create_inquiry(&inquiry)
        .await
        .map_err(|e| AppError::operation_failed(CONTACT_FAILURE_MESSAGE, e))?;

    tracing::info!(
        "Contact inquiry {} received from {}",
        contact_id,
        Masked(&inquiry.email)
    );

    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            message: "Your inquiry has been received! We'll get back to you soon.",
            contact_id,
        }),
    ))
}
