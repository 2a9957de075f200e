pub mod models;
pub mod pii;

pub use models::{
    Booking, BookingStatus, ContactInquiry, NewBooking, NewContactInquiry, NewRoom,
    ProfileUpdate, Room, User, UserProfile,
};
