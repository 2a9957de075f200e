use async_trait::async_trait;
use innkeep_core::repository::{RepoResult, RoomRepository};
use innkeep_shared::{NewRoom, Room};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

pub struct StoreRoomRepository {
    pool: PgPool,
}

impl StoreRoomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RoomRow {
    id: Uuid,
    title: String,
    description: String,
    price: Decimal,
    is_available: bool,
    room_type: String,
    images: Vec<String>,
}

impl From<RoomRow> for Room {
    fn from(row: RoomRow) -> Self {
        Room {
            id: row.id,
            title: row.title,
            description: row.description,
            price: row.price,
            is_available: row.is_available,
            room_type: row.room_type,
            images: row.images,
        }
    }
}

const ROOM_COLUMNS: &str = "id, title, description, price, is_available, room_type, images";

#[async_trait]
impl RoomRepository for StoreRoomRepository {
    async fn list_rooms(&self) -> RepoResult<Vec<Room>> {
        let rows = sqlx::query_as::<_, RoomRow>(&format!("SELECT {} FROM rooms", ROOM_COLUMNS))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Room::from).collect())
    }

    async fn get_room(&self, id: Uuid) -> RepoResult<Option<Room>> {
        let row = sqlx::query_as::<_, RoomRow>(&format!(
            "SELECT {} FROM rooms WHERE id = $1",
            ROOM_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Room::from))
    }

    async fn create_room(&self, room: &NewRoom) -> RepoResult<Room> {
        let row = sqlx::query_as::<_, RoomRow>(&format!(
            r#"
            INSERT INTO rooms (title, description, price, is_available, room_type, images)
            VALUES ($1, $2, $3, TRUE, $4, $5)
            RETURNING {}
            "#,
            ROOM_COLUMNS
        ))
        .bind(&room.title)
        .bind(&room.description)
        .bind(room.price)
        .bind(&room.room_type)
        .bind(&room.images)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn delete_room(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
