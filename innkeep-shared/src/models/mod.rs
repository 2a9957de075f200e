pub mod booking;
pub mod contact;
pub mod room;
pub mod user;

pub use booking::{Booking, BookingStatus, NewBooking};
pub use contact::{ContactInquiry, NewContactInquiry};
pub use room::{NewRoom, Room};
pub use user::{ProfileUpdate, User, UserProfile};

/// Wall-clock format used for every `created_at` / `received_at` string.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time rendered with [`TIMESTAMP_FORMAT`].
pub fn local_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}
