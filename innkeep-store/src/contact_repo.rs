use async_trait::async_trait;
use innkeep_core::repository::{ContactRepository, RepoResult};
use innkeep_shared::NewContactInquiry;
use sqlx::PgPool;
use uuid::Uuid;

pub struct StoreContactRepository {
    pool: PgPool,
}

impl StoreContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactRepository for StoreContactRepository {
    async fn create_inquiry(&self, inquiry: &NewContactInquiry) -> RepoResult<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO contacts (name, email, phone, message, received_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&inquiry.name)
        .bind(&inquiry.email)
        .bind(&inquiry.phone)
        .bind(&inquiry.message)
        .bind(&inquiry.received_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }
}
