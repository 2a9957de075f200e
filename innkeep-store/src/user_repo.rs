use async_trait::async_trait;
use innkeep_core::repository::{RepoResult, UserRepository};
use innkeep_shared::{ProfileUpdate, User};
use sqlx::PgPool;

pub struct StoreUserRepository {
    pool: PgPool,
}

impl StoreUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    email: String,
    password_hash: String,
    name: String,
    phone: String,
    address: String,
    is_admin: bool,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            email: row.email,
            password_hash: row.password_hash,
            name: row.name,
            phone: row.phone,
            address: row.address,
            is_admin: row.is_admin,
        }
    }
}

#[async_trait]
impl UserRepository for StoreUserRepository {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT email, password_hash, name, phone, address, is_admin FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn create_user(&self, user: &User) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, name, phone, address, is_admin)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(&user.phone)
        .bind(&user.address)
        .bind(user.is_admin)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn update_profile(&self, email: &str, update: &ProfileUpdate) -> RepoResult<Option<User>> {
        // COALESCE keeps columns whose field was not supplied.
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                address = COALESCE($4, address)
            WHERE email = $1
            RETURNING email, password_hash, name, phone, address, is_admin
            "#,
        )
        .bind(email)
        .bind(update.name.as_deref())
        .bind(update.phone.as_deref())
        .bind(update.address.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }
}
