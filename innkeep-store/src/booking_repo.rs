use async_trait::async_trait;
use innkeep_core::repository::{BookingRepository, RepoResult};
use innkeep_shared::{Booking, BookingStatus, NewBooking};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

pub struct StoreBookingRepository {
    pool: PgPool,
}

impl StoreBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    room_id: Uuid,
    user_email: String,
    guest_name: String,
    guest_phone: String,
    num_guests: i64,
    start_date: String,
    end_date: String,
    special_requests: String,
    total_price: Decimal,
    payment_method: String,
    status: String,
    created_at: String,
}

impl TryFrom<BookingRow> for Booking {
    type Error = Box<dyn std::error::Error + Send + Sync>;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(Booking {
            id: row.id,
            room_id: row.room_id,
            user_email: row.user_email,
            guest_name: row.guest_name,
            guest_phone: row.guest_phone,
            num_guests: u32::try_from(row.num_guests)?,
            start_date: row.start_date,
            end_date: row.end_date,
            special_requests: row.special_requests,
            total_price: row.total_price,
            payment_method: row.payment_method,
            status: row.status.parse::<BookingStatus>()?,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl BookingRepository for StoreBookingRepository {
    async fn create_booking(&self, booking: &NewBooking) -> RepoResult<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO bookings (room_id, user_email, guest_name, guest_phone, num_guests, start_date, end_date, special_requests, total_price, payment_method, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id
            "#,
        )
        .bind(booking.room_id)
        .bind(&booking.user_email)
        .bind(&booking.guest_name)
        .bind(&booking.guest_phone)
        .bind(i64::from(booking.num_guests))
        .bind(&booking.start_date)
        .bind(&booking.end_date)
        .bind(&booking.special_requests)
        .bind(booking.total_price)
        .bind(&booking.payment_method)
        .bind(booking.status.as_str())
        .bind(&booking.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn list_bookings_for(&self, user_email: &str) -> RepoResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, room_id, user_email, guest_name, guest_phone, num_guests, start_date, end_date,
                   special_requests, total_price, payment_method, status, created_at
            FROM bookings
            WHERE user_email = $1
            ORDER BY created_at
            "#,
        )
        .bind(user_email)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Booking::try_from).collect()
    }
}
