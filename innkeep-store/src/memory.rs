use std::collections::HashMap;

use async_trait::async_trait;
use innkeep_core::repository::{
    BookingRepository, ContactRepository, RepoResult, RoomRepository, UserRepository,
};
use innkeep_shared::{
    Booking, ContactInquiry, NewBooking, NewContactInquiry, NewRoom, ProfileUpdate, Room, User,
};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local store implementing every repository trait.
///
/// Used by tests and by `INNKEEP__DATABASE__URL=memory` local runs. Rooms
/// and bookings keep insertion order.
#[derive(Default)]
pub struct MemoryStore {
    rooms: RwLock<Vec<Room>>,
    bookings: RwLock<Vec<Booking>>,
    users: RwLock<HashMap<String, User>>,
    contacts: RwLock<Vec<ContactInquiry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn booking_count(&self) -> usize {
        self.bookings.read().await.len()
    }

    pub async fn contacts(&self) -> Vec<ContactInquiry> {
        self.contacts.read().await.clone()
    }
}

#[async_trait]
impl RoomRepository for MemoryStore {
    async fn list_rooms(&self) -> RepoResult<Vec<Room>> {
        Ok(self.rooms.read().await.clone())
    }

    async fn get_room(&self, id: Uuid) -> RepoResult<Option<Room>> {
        Ok(self.rooms.read().await.iter().find(|r| r.id == id).cloned())
    }

    async fn create_room(&self, room: &NewRoom) -> RepoResult<Room> {
        let room = room.clone().into_room(Uuid::new_v4());
        self.rooms.write().await.push(room.clone());
        Ok(room)
    }

    async fn delete_room(&self, id: Uuid) -> RepoResult<bool> {
        let mut rooms = self.rooms.write().await;
        let before = rooms.len();
        rooms.retain(|r| r.id != id);
        Ok(rooms.len() != before)
    }
}

#[async_trait]
impl BookingRepository for MemoryStore {
    async fn create_booking(&self, booking: &NewBooking) -> RepoResult<Uuid> {
        let id = Uuid::new_v4();
        self.bookings.write().await.push(booking.clone().into_booking(id));
        Ok(id)
    }

    async fn list_bookings_for(&self, user_email: &str) -> RepoResult<Vec<Booking>> {
        Ok(self
            .bookings
            .read()
            .await
            .iter()
            .filter(|b| b.user_email == user_email)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn create_user(&self, user: &User) -> RepoResult<bool> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Ok(false);
        }
        users.insert(user.email.clone(), user.clone());
        Ok(true)
    }

    async fn update_profile(&self, email: &str, update: &ProfileUpdate) -> RepoResult<Option<User>> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(email).map(|user| {
            update.apply(user);
            user.clone()
        }))
    }
}

#[async_trait]
impl ContactRepository for MemoryStore {
    async fn create_inquiry(&self, inquiry: &NewContactInquiry) -> RepoResult<Uuid> {
        let id = Uuid::new_v4();
        self.contacts.write().await.push(inquiry.clone().into_inquiry(id));
        Ok(id)
    }
}
