// ============================================================================
// Messages Routes
// ============================================================================
//
// Endpoints:
// - GET /messages/ - List all messages ordered by their order key
// - POST /messages/ - Create a message with the next order key
// - PUT /messages/:id - Overwrite a message's content
// - DELETE /messages/:id - Remove a message permanently
// - POST /messages/reorder - Bulk-update order keys in one transaction
//
// ============================================================================

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::context::AppContext;
use crate::db;
use crate::error::AppError;

/// Request body for creating or updating a message
#[derive(Debug, Deserialize)]
pub struct MessageCreate {
    pub content: String,
}

/// A single entry of a bulk reorder request
#[derive(Debug, Deserialize)]
pub struct MessageOrderUpdate {
    pub id: i64,
    pub order: i64,
}

/// GET /messages/
/// Returns all messages sorted by order key ascending, ties by id
pub async fn list_messages(
    State(app_context): State<Arc<AppContext>>,
) -> Result<impl IntoResponse, AppError> {
    let messages = db::list_messages(&app_context.db_pool).await?;

    Ok(Json(messages))
}

/// POST /messages/
/// Creates a message; the order key is assigned by the storage layer
pub async fn create_message(
    State(app_context): State<Arc<AppContext>>,
    Json(payload): Json<MessageCreate>,
) -> Result<impl IntoResponse, AppError> {
    if payload.content.is_empty() {
        return Err(AppError::validation("content must not be empty"));
    }

    let message = db::create_message(&app_context.db_pool, &payload.content).await?;

    tracing::info!(
        message_id = message.id,
        order = message.order,
        "Message created"
    );

    Ok(Json(message))
}

/// PUT /messages/:id
/// Overwrites the content of an existing message
pub async fn update_message(
    State(app_context): State<Arc<AppContext>>,
    Path(message_id): Path<i64>,
    Json(payload): Json<MessageCreate>,
) -> Result<impl IntoResponse, AppError> {
    if payload.content.is_empty() {
        return Err(AppError::validation("content must not be empty"));
    }

    let message = db::update_message_content(&app_context.db_pool, message_id, &payload.content)
        .await?
        .ok_or_else(|| AppError::not_found("Message not found"))?;

    Ok(Json(message))
}

/// DELETE /messages/:id
/// Removes a message permanently; remaining order keys keep their gaps
pub async fn delete_message(
    State(app_context): State<Arc<AppContext>>,
    Path(message_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = db::delete_message(&app_context.db_pool, message_id).await?;

    if !deleted {
        return Err(AppError::not_found("Message not found"));
    }

    tracing::info!(message_id = message_id, "Message deleted");

    Ok(Json(json!({ "detail": "Message deleted" })))
}

/// POST /messages/reorder
/// Applies a batch of (id, order) updates in a single transaction.
/// Ids without a matching message are skipped without error.
pub async fn reorder_messages(
    State(app_context): State<Arc<AppContext>>,
    Json(updates): Json<Vec<MessageOrderUpdate>>,
) -> Result<impl IntoResponse, AppError> {
    let pairs: Vec<(i64, i64)> = updates.iter().map(|u| (u.id, u.order)).collect();

    db::reorder_messages(&app_context.db_pool, &pairs).await?;

    Ok(Json(json!({ "detail": "Order updated successfully" })))
}
