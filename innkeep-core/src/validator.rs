use chrono::NaiveDate;
use innkeep_shared::pii::Masked;
use serde::de::{self, Deserializer, Unexpected};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::{BookingError, BookingResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_PAYMENT_METHOD: &str = "Credit Card";
pub const DEFAULT_NUM_GUESTS: u32 = 1;

/// Raw `/book` body. Every field is optional here so presence can be
/// reported for all of them at once.
#[derive(Debug, Default, Deserialize)]
pub struct BookingPayload {
    #[serde(default, deserialize_with = "text_field")]
    pub room_id: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub guest_name: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub guest_phone: Option<String>,
    #[serde(default, deserialize_with = "count_field")]
    pub num_guests: Option<u32>,
    #[serde(default, deserialize_with = "text_field")]
    pub special_requests: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub payment_method: Option<String>,
}

/// Check-in / check-out pair. The submitted strings are kept verbatim for
/// persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stay {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub start_raw: String,
    pub end_raw: String,
}

impl Stay {
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// A booking request that passed every validation check.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingIntent {
    pub user_email: String,
    pub room_id: Uuid,
    pub stay: Stay,
    pub guest_name: String,
    pub guest_phone: String,
    pub num_guests: u32,
    pub special_requests: String,
    pub payment_method: String,
}

/// Names of the fields whose value is absent or blank, in the order given.
pub fn missing_fields<'a>(fields: &[(&'a str, Option<&str>)]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|(_, value)| value.map_or(true, |v| v.trim().is_empty()))
        .map(|(name, _)| *name)
        .collect()
}

/// Validates a raw booking body on behalf of `caller`.
///
/// The first failing check wins; only the required-field check aggregates.
pub fn validate(caller: &str, body: &[u8]) -> BookingResult<BookingIntent> {
    if caller.trim().is_empty() {
        return Err(BookingError::Unauthenticated);
    }

    let payload = parse_payload(body)?;
    debug!(
        room_id = ?payload.room_id,
        start_date = ?payload.start_date,
        end_date = ?payload.end_date,
        guest_name = ?Masked::<&str>::field(payload.guest_name.as_ref()),
        guest_phone = ?Masked::<&str>::field(payload.guest_phone.as_ref()),
        num_guests = ?payload.num_guests,
        "Received booking payload"
    );

    let missing = missing_fields(&[
        ("room_id", payload.room_id.as_deref()),
        ("start_date", payload.start_date.as_deref()),
        ("end_date", payload.end_date.as_deref()),
        ("guest_name", payload.guest_name.as_deref()),
        ("guest_phone", payload.guest_phone.as_deref()),
    ]);
    if !missing.is_empty() {
        return Err(BookingError::ValidationFailed(missing));
    }

    let BookingPayload {
        room_id: Some(room_id),
        start_date: Some(start_raw),
        end_date: Some(end_raw),
        guest_name: Some(guest_name),
        guest_phone: Some(guest_phone),
        num_guests,
        special_requests,
        payment_method,
    } = payload
    else {
        return Err(BookingError::InternalError(
            "required fields vanished after presence check".to_string(),
        ));
    };

    let room_id = Uuid::parse_str(room_id.trim()).map_err(|_| BookingError::InvalidRoomId)?;
    let stay = parse_stay(start_raw, end_raw)?;

    Ok(BookingIntent {
        user_email: caller.to_string(),
        room_id,
        stay,
        guest_name: guest_name.trim().to_string(),
        guest_phone: guest_phone.trim().to_string(),
        num_guests: num_guests.unwrap_or(DEFAULT_NUM_GUESTS),
        special_requests: special_requests
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        payment_method: payment_method.unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
    })
}

fn parse_payload(body: &[u8]) -> BookingResult<BookingPayload> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(BookingError::MalformedRequest("No data provided".to_string()));
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| BookingError::MalformedRequest(format!("Invalid JSON payload: {}", e)))?;

    match &value {
        Value::Object(map) if !map.is_empty() => {}
        Value::Object(_) | Value::Null => {
            return Err(BookingError::MalformedRequest("No data provided".to_string()))
        }
        _ => {
            return Err(BookingError::MalformedRequest(
                "Booking payload must be a JSON object".to_string(),
            ))
        }
    }

    serde_json::from_value(value)
        .map_err(|e| BookingError::MalformedRequest(format!("Invalid booking payload: {}", e)))
}

fn parse_stay(start_raw: String, end_raw: String) -> BookingResult<Stay> {
    let start = NaiveDate::parse_from_str(&start_raw, DATE_FORMAT)
        .map_err(|_| BookingError::InvalidDateFormat)?;
    let end = NaiveDate::parse_from_str(&end_raw, DATE_FORMAT)
        .map_err(|_| BookingError::InvalidDateFormat)?;

    if end <= start {
        return Err(BookingError::InvalidDateRange);
    }

    Ok(Stay {
        start,
        end,
        start_raw,
        end_raw,
    })
}

/// JSON values that count as "not provided": `null`, `false`, zero, and
/// empty strings, arrays or objects.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(true) => false,
    }
}

/// Accepts a JSON string or number as text; falsy values read as absent.
fn text_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None => Ok(None),
        Some(value) if is_falsy(&value) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Err(de::Error::invalid_type(
            Unexpected::Bool(b),
            &"a string or a number",
        )),
        Some(_) => Err(de::Error::custom("expected a string or a number")),
    }
}

/// Accepts a non-negative integer or a string holding one.
fn count_field<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("num_guests out of range: {}", n))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| de::Error::invalid_value(Unexpected::Str(&s), &"a whole number")),
        Some(_) => Err(de::Error::custom("num_guests must be a whole number")),
    }
}
