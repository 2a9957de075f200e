use std::sync::Arc;

use innkeep_core::repository::{
    BookingRepository, ContactRepository, RoomRepository, UserRepository,
};
use innkeep_core::BookingWorkflow;

use crate::middleware::auth::JwtVerifier;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub rooms: Arc<dyn RoomRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub users: Arc<dyn UserRepository>,
    pub contacts: Arc<dyn ContactRepository>,
    pub booking_workflow: Arc<BookingWorkflow>,
    pub tokens: Arc<JwtVerifier>,
}

impl AppState {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        bookings: Arc<dyn BookingRepository>,
        users: Arc<dyn UserRepository>,
        contacts: Arc<dyn ContactRepository>,
        auth: AuthConfig,
    ) -> Self {
        let booking_workflow = Arc::new(BookingWorkflow::new(rooms.clone(), bookings.clone()));
        Self {
            rooms,
            bookings,
            users,
            contacts,
            booking_workflow,
            tokens: Arc::new(JwtVerifier::new(auth)),
        }
    }

    /// State backed by one store that serves every collection.
    pub fn with_store<S>(store: Arc<S>, auth: AuthConfig) -> Self
    where
        S: RoomRepository + BookingRepository + UserRepository + ContactRepository + 'static,
    {
        Self::new(store.clone(), store.clone(), store.clone(), store, auth)
    }
}
