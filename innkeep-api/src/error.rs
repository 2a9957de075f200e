use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use innkeep_core::BookingError;
use serde_json::json;

pub const BOOKING_FAILURE_MESSAGE: &str = "An error occurred while processing your booking";

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    BadRequest(String),
    ValidationError(String),
    NotFoundError(String),
    /// 500 with a caller-facing message; the detail is only logged.
    OperationFailed { message: &'static str, detail: String },
    InternalServerError(String),
}

impl AppError {
    pub fn operation_failed(message: &'static str, detail: impl ToString) -> Self {
        AppError::OperationFailed { message, detail: detail.to_string() }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::ValidationError(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::OperationFailed { message, detail } => {
                tracing::error!("{}: {}", message, detail);
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Unauthenticated => AppError::AuthenticationError(err.to_string()),
            BookingError::RoomNotFound => AppError::NotFoundError(err.to_string()),
            BookingError::StorageError(detail) | BookingError::InternalError(detail) => {
                AppError::operation_failed(BOOKING_FAILURE_MESSAGE, detail)
            }
            BookingError::MalformedRequest(_)
            | BookingError::ValidationFailed(_)
            | BookingError::InvalidRoomId
            | BookingError::InvalidDateFormat
            | BookingError::InvalidDateRange => AppError::ValidationError(err.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                AppError::BadRequest("No data provided".to_string())
            }
            other => AppError::BadRequest(other.body_text()),
        }
    }
}
