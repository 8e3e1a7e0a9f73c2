use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde_json::{Map, Value};
use tracing::info;
use uuid::Uuid;

use crate::domain::service::UsersService;

use super::dto::{DataResponse, MessageResponse, RegisterUserReq, UserDto};
use super::error::ApiError;

/// POST /signup
pub async fn register_user(
    Extension(svc): Extension<Arc<UsersService>>,
    body: Bytes,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let payload = parse_object(&body)?;
    if payload.is_empty() {
        return Err(ApiError::bad_request("No data provided to register"));
    }

    let req: RegisterUserReq = serde_json::from_value(Value::Object(payload))
        .map_err(|err| ApiError::bad_request(err.to_string()))?;

    let user = svc.register(req.into()).await?;
    info!(user_id = %user.id, "signup complete");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::ok("User created successfully")),
    ))
}

/// GET /
pub async fn list_users(
    Extension(svc): Extension<Arc<UsersService>>,
) -> Result<Json<DataResponse<Vec<UserDto>>>, ApiError> {
    let users = svc.list().await?;
    let data: Vec<UserDto> = users.into_iter().map(UserDto::from).collect();
    Ok(Json(DataResponse::new(data)))
}

/// GET /{id}
pub async fn get_user(
    Extension(svc): Extension<Arc<UsersService>>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<UserDto>>, ApiError> {
    let id = parse_id(&id)?;
    let user = svc.get(id).await?;
    Ok(Json(DataResponse::new(UserDto::from(user))))
}

/// PATCH /{id}
pub async fn update_user(
    Extension(svc): Extension<Arc<UsersService>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<DataResponse<UserDto>>, ApiError> {
    let id = parse_id(&id)?;
    let payload = parse_object(&body)?;
    let user = svc.update(id, payload).await?;
    Ok(Json(DataResponse::new(UserDto::from(user))))
}

/// DELETE /{id}
pub async fn delete_user(
    Extension(svc): Extension<Arc<UsersService>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id)?;
    svc.delete(id).await?;
    Ok(Json(MessageResponse::ok("User deleted successfully")))
}

// Identifier format is checked before any persistence call.
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::invalid_id())
}

// An absent body and `{}` are both "no data"; a body that is not a
// JSON object has no usable fields either.
fn parse_object(body: &Bytes) -> Result<Map<String, Value>, ApiError> {
    if body.is_empty() {
        return Ok(Map::new());
    }
    let value: Value = serde_json::from_slice(body)
        .map_err(|_| ApiError::bad_request("Invalid JSON body"))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}
