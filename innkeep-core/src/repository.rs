use async_trait::async_trait;
use innkeep_shared::{
    Booking, NewBooking, NewContactInquiry, NewRoom, ProfileUpdate, Room, User,
};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Repository trait for room inventory
#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn list_rooms(&self) -> RepoResult<Vec<Room>>;

    async fn get_room(&self, id: Uuid) -> RepoResult<Option<Room>>;

    async fn create_room(&self, room: &NewRoom) -> RepoResult<Room>;

    /// Returns whether a room was actually removed.
    async fn delete_room(&self, id: Uuid) -> RepoResult<bool>;
}

/// Repository trait for bookings. Inserts are never deduplicated.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create_booking(&self, booking: &NewBooking) -> RepoResult<Uuid>;

    async fn list_bookings_for(&self, user_email: &str) -> RepoResult<Vec<Booking>>;
}

/// Repository trait for user accounts, keyed by email
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Inserts the user unless the email is taken; returns whether it was inserted.
    async fn create_user(&self, user: &User) -> RepoResult<bool>;

    /// Applies the update and returns the stored user, or `None` if absent.
    async fn update_profile(&self, email: &str, update: &ProfileUpdate) -> RepoResult<Option<User>>;
}

/// Repository trait for contact-form inquiries
#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create_inquiry(&self, inquiry: &NewContactInquiry) -> RepoResult<Uuid>;
}
