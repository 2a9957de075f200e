use std::sync::Arc;

use innkeep_shared::models::local_timestamp;
use innkeep_shared::{BookingStatus, NewBooking};
use rust_decimal::Decimal;
use tracing::{error, info};
use uuid::Uuid;

use crate::repository::BookingRepository;
use crate::validator::BookingIntent;
use crate::{BookingError, BookingResult};

/// Turns a validated, priced intent into one stored booking.
///
/// Every call inserts a new record; retries create duplicates.
#[derive(Clone)]
pub struct BookingWriter {
    bookings: Arc<dyn BookingRepository>,
}

impl BookingWriter {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }

    pub fn build_record(intent: BookingIntent, total_price: Decimal, created_at: String) -> NewBooking {
        NewBooking {
            room_id: intent.room_id,
            user_email: intent.user_email,
            guest_name: intent.guest_name,
            guest_phone: intent.guest_phone,
            num_guests: intent.num_guests,
            start_date: intent.stay.start_raw,
            end_date: intent.stay.end_raw,
            special_requests: intent.special_requests,
            total_price,
            payment_method: intent.payment_method,
            status: BookingStatus::Booked,
            created_at,
        }
    }

    pub async fn write(&self, intent: BookingIntent, total_price: Decimal) -> BookingResult<Uuid> {
        let record = Self::build_record(intent, total_price, local_timestamp());

        let booking_id = self.bookings.create_booking(&record).await.map_err(|e| {
            error!("Failed to insert booking for room {}: {}", record.room_id, e);
            BookingError::StorageError(e.to_string())
        })?;

        info!("Booking {} stored for room {}", booking_id, record.room_id);
        Ok(booking_id)
    }
}
