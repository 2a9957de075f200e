use std::fmt;
use std::sync::Arc;

use innkeep_shared::BookingStatus;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::pricing;
use crate::repository::{BookingRepository, RoomRepository};
use crate::validator;
use crate::writer::BookingWriter;
use crate::{BookingError, BookingResult};

pub const BOOKING_SUCCESS_MESSAGE: &str = "Booking successful";

/// Progress of a single booking request. A failure is reported together
/// with the last stage that completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStage {
    Received,
    Validated,
    RoomResolved,
    Priced,
    Persisted,
    Responded,
}

impl fmt::Display for BookingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BookingStage::Received => "received",
            BookingStage::Validated => "validated",
            BookingStage::RoomResolved => "room_resolved",
            BookingStage::Priced => "priced",
            BookingStage::Persisted => "persisted",
            BookingStage::Responded => "responded",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingConfirmation {
    pub booking_id: Uuid,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    pub message: String,
    pub status: BookingStatus,
}

/// Runs `POST /book`: validate, resolve the room, price the stay, persist.
///
/// Room lookup and booking insert are separate store calls with no
/// transaction between them; the price is a snapshot taken at lookup time.
pub struct BookingWorkflow {
    rooms: Arc<dyn RoomRepository>,
    writer: BookingWriter,
}

impl BookingWorkflow {
    pub fn new(rooms: Arc<dyn RoomRepository>, bookings: Arc<dyn BookingRepository>) -> Self {
        Self {
            rooms,
            writer: BookingWriter::new(bookings),
        }
    }

    pub async fn book(&self, caller: &str, body: &[u8]) -> BookingResult<BookingConfirmation> {
        let mut stage = BookingStage::Received;
        let result = self.run(caller, body, &mut stage).await;

        match &result {
            Ok(confirmation) => info!(
                "Booking successful: {} (total {})",
                confirmation.booking_id, confirmation.total_price
            ),
            Err(e) if e.is_validation() || matches!(e, BookingError::RoomNotFound) => {
                warn!(stage = %stage, "Booking rejected: {}", e)
            }
            Err(BookingError::Unauthenticated) => warn!(stage = %stage, "Booking without identity"),
            Err(e) => error!(stage = %stage, "Booking error: {}", e),
        }

        result
    }

    async fn run(
        &self,
        caller: &str,
        body: &[u8],
        stage: &mut BookingStage,
    ) -> BookingResult<BookingConfirmation> {
        let intent = validator::validate(caller, body)?;
        *stage = BookingStage::Validated;

        let room = self
            .rooms
            .get_room(intent.room_id)
            .await
            .map_err(|e| BookingError::StorageError(format!("room lookup failed: {}", e)))?
            .ok_or(BookingError::RoomNotFound)?;
        *stage = BookingStage::RoomResolved;

        let total_price = pricing::total_price(intent.stay.start, intent.stay.end, room.price)?;
        *stage = BookingStage::Priced;

        let booking_id = self.writer.write(intent, total_price).await?;
        *stage = BookingStage::Persisted;

        let confirmation = BookingConfirmation {
            booking_id,
            total_price,
            message: BOOKING_SUCCESS_MESSAGE.to_string(),
            status: BookingStatus::Booked,
        };
        *stage = BookingStage::Responded;

        Ok(confirmation)
    }
}
