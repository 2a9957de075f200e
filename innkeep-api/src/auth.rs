use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use innkeep_core::validator::missing_fields;
use innkeep_shared::{User, UserProfile};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_admin: Option<bool>,
}

#[derive(Debug, Serialize)]
struct RegisterResponse {
    message: &'static str,
    user: UserProfile,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    access_token: String,
    is_admin: bool,
    user: UserProfile,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    use argon2::password_hash::rand_core::OsRng;
    use argon2::password_hash::SaltString;
    use argon2::{Argon2, PasswordHasher};
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::{Argon2, PasswordHash, PasswordVerifier};
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let Json(req) = payload?;

    let missing = missing_fields(&[
        ("email", req.email.as_deref()),
        ("password", req.password.as_deref()),
        ("name", req.name.as_deref()),
        ("phone", req.phone.as_deref()),
    ]);
    if !missing.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let email = req.email.unwrap_or_default();
    let existing = state
        .users
        .find_by_email(&email)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    if existing.is_some() {
        return Err(AppError::BadRequest("User already exists".to_string()));
    }

    let password_hash = hash_password(&req.password.unwrap_or_default())
        .map_err(|e| AppError::InternalServerError(format!("Password hashing failed: {}", e)))?;

    let user = User {
        email,
        password_hash,
        name: req.name.unwrap_or_default(),
        phone: req.phone.unwrap_or_default(),
        address: req.address.unwrap_or_default(),
        is_admin: req.is_admin.unwrap_or(false),
    };

    // The earlier lookup is only a fast path; the insert itself decides races.
    let created = state
        .users
        .create_user(&user)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    if !created {
        return Err(AppError::BadRequest("User already exists".to_string()));
    }

    tracing::info!("User registered (admin: {})", user.is_admin);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully",
            user: user.profile(),
        }),
    ))
}

async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(req) = payload?;

    let user = state
        .users
        .find_by_email(&req.email)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .filter(|user| verify_password(&req.password, &user.password_hash))
        .ok_or_else(|| AppError::AuthenticationError("Invalid credentials".to_string()))?;

    let access_token = state
        .tokens
        .issue(&user.email, user.is_admin)
        .map_err(|e| AppError::InternalServerError(format!("Token encoding failed: {}", e)))?;

    Ok(Json(LoginResponse {
        access_token,
        is_admin: user.is_admin,
        user: user.profile(),
    }))
}
