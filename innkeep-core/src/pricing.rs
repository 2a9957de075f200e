use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{BookingError, BookingResult};

/// Whole calendar days between check-in and check-out.
pub fn nights_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Total for a stay: `nights * nightly_rate`, in exact decimal arithmetic.
///
/// The stored room rate is trusted as-is; only the night count is checked.
pub fn total_price(start: NaiveDate, end: NaiveDate, nightly_rate: Decimal) -> BookingResult<Decimal> {
    let nights = nights_between(start, end);
    if nights < 1 {
        return Err(BookingError::InvalidDateRange);
    }

    Decimal::from(nights).checked_mul(nightly_rate).ok_or_else(|| {
        BookingError::InternalError(format!(
            "price overflow: {} nights at {}",
            nights, nightly_rate
        ))
    })
}
