use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reservation linking a caller identity to a room and a date range.
///
/// `start_date` / `end_date` hold the strings exactly as submitted; they are
/// only parsed while pricing the stay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub room_id: Uuid,
    pub user_email: String,
    pub guest_name: String,
    pub guest_phone: String,
    pub num_guests: u32,
    pub start_date: String,
    pub end_date: String,
    pub special_requests: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    pub payment_method: String,
    pub status: BookingStatus,
    pub created_at: String,
}

/// Booking record before the store has assigned an identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub room_id: Uuid,
    pub user_email: String,
    pub guest_name: String,
    pub guest_phone: String,
    pub num_guests: u32,
    pub start_date: String,
    pub end_date: String,
    pub special_requests: String,
    pub total_price: Decimal,
    pub payment_method: String,
    pub status: BookingStatus,
    pub created_at: String,
}

impl NewBooking {
    pub fn into_booking(self, id: Uuid) -> Booking {
        Booking {
            id,
            room_id: self.room_id,
            user_email: self.user_email,
            guest_name: self.guest_name,
            guest_phone: self.guest_phone,
            num_guests: self.num_guests,
            start_date: self.start_date,
            end_date: self.end_date,
            special_requests: self.special_requests,
            total_price: self.total_price,
            payment_method: self.payment_method,
            status: self.status,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Booked,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Booked => "Booked",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Booked" => Ok(BookingStatus::Booked),
            other => Err(format!("unknown booking status: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text_round_trip() {
        assert_eq!(BookingStatus::Booked.to_string(), "Booked");
        assert_eq!("Booked".parse::<BookingStatus>(), Ok(BookingStatus::Booked));
        assert!("Cancelled".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn test_booking_serializes_price_as_number() {
        let booking = NewBooking {
            room_id: Uuid::nil(),
            user_email: "guest@example.com".to_string(),
            guest_name: "Ada".to_string(),
            guest_phone: "123".to_string(),
            num_guests: 1,
            start_date: "2024-06-01".to_string(),
            end_date: "2024-06-04".to_string(),
            special_requests: String::new(),
            total_price: Decimal::new(300, 0),
            payment_method: "Credit Card".to_string(),
            status: BookingStatus::Booked,
            created_at: "2024-05-20 10:00:00".to_string(),
        }
        .into_booking(Uuid::nil());

        let value = serde_json::to_value(&booking).unwrap();
        assert_eq!(value["total_price"], 300.0);
        assert_eq!(value["status"], "Booked");
        assert_eq!(value["start_date"], "2024-06-01");
    }
}
