pub mod app_config;
pub mod booking_repo;
pub mod contact_repo;
pub mod database;
pub mod memory;
pub mod room_repo;
pub mod user_repo;

pub use booking_repo::StoreBookingRepository;
pub use contact_repo::StoreContactRepository;
pub use database::DbClient;
pub use memory::MemoryStore;
pub use room_repo::StoreRoomRepository;
pub use user_repo::StoreUserRepository;
