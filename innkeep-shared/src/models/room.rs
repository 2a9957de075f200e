use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bookable unit with a nightly price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Per-night rate, currency implicit.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub is_available: bool,
    #[serde(rename = "type")]
    pub room_type: String,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRoom {
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub room_type: String,
    pub images: Vec<String>,
}

impl NewRoom {
    /// Rooms always start out available.
    pub fn into_room(self, id: Uuid) -> Room {
        Room {
            id,
            title: self.title,
            description: self.description,
            price: self.price,
            is_available: true,
            room_type: self.room_type,
            images: self.images,
        }
    }
}
