pub mod identity;
pub mod pricing;
pub mod repository;
pub mod validator;
pub mod workflow;
pub mod writer;

pub use identity::{IdentityError, IdentityVerifier, VerifiedIdentity};
pub use validator::{BookingIntent, BookingPayload, Stay};
pub use workflow::{BookingConfirmation, BookingStage, BookingWorkflow};
pub use writer::BookingWriter;

/// Every way a booking request can fail.
///
/// The `Display` text of the client-facing kinds is what callers see; the
/// payload of `StorageError` / `InternalError` is diagnostic only.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Authentication required")]
    Unauthenticated,
    #[error("{0}")]
    MalformedRequest(String),
    #[error("Missing required fields: {}", .0.join(", "))]
    ValidationFailed(Vec<&'static str>),
    #[error("Invalid room ID format")]
    InvalidRoomId,
    #[error("Invalid date format. Use YYYY-MM-DD")]
    InvalidDateFormat,
    #[error("Check-out date must be after check-in date")]
    InvalidDateRange,
    #[error("Room not found")]
    RoomNotFound,
    #[error("Storage failure: {0}")]
    StorageError(String),
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl BookingError {
    /// Client-side mistakes that a corrected resubmission can fix.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            BookingError::MalformedRequest(_)
                | BookingError::ValidationFailed(_)
                | BookingError::InvalidRoomId
                | BookingError::InvalidDateFormat
                | BookingError::InvalidDateRange
        )
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
