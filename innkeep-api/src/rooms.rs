use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use innkeep_shared::{NewRoom, Room};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateRoomRequest {
    pub title: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(rename = "type")]
    pub room_type: String,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateRoomResponse {
    pub message: &'static str,
    pub room: Room,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rooms", get(list_rooms).post(create_room))
        .route("/rooms/{room_id}", get(get_room).delete(delete_room))
}

fn parse_room_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::ValidationError("Invalid room ID format".to_string()))
}

async fn list_rooms(State(state): State<AppState>) -> Result<Json<Vec<Room>>, AppError> {
    let rooms = state
        .rooms
        .list_rooms()
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(Json(rooms))
}

async fn get_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<Room>, AppError> {
    let id = parse_room_id(&room_id)?;

    state
        .rooms
        .get_room(id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError("Room not found".to_string()))
}

async fn create_room(
    State(state): State<AppState>,
    payload: Result<Json<CreateRoomRequest>, axum::extract::rejection::JsonRejection>,
) -> Result<(StatusCode, Json<CreateRoomResponse>), AppError> {
    let Json(req) = payload?;

    if req.price <= Decimal::ZERO {
        return Err(AppError::BadRequest("price must be positive".to_string()));
    }

    let room = state
        .rooms
        .create_room(&NewRoom {
            title: req.title,
            description: req.description,
            price: req.price,
            room_type: req.room_type,
            images: req.images,
        })
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    tracing::info!("Room created: {}", room.id);

    Ok((
        StatusCode::CREATED,
        Json(CreateRoomResponse {
            message: "Room created successfully",
            room,
        }),
    ))
}

/// Always 204, whether or not the room existed.
async fn delete_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_room_id(&room_id)?;

    let removed = state
        .rooms
        .delete_room(id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    if removed {
        tracing::info!("Room deleted: {}", id);
    }

    Ok(StatusCode::NO_CONTENT)
}
