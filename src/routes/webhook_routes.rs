use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::webhook_controller::WebhookController;
use crate::dto::motorcycle_dto::ApiResponse;
use crate::dto::webhook_dto::{
    CreateWebhookRequest, UpdateWebhookRequest, WebhookFilters, WebhookResponse, WebhookStats,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_webhook_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_webhook).get(list_webhooks))
        .route("/:id", get(get_webhook).put(update_webhook).delete(delete_webhook))
        .route("/:id/stats", get(get_stats))
        .route("/:id/test", post(test_webhook))
}

fn controller(state: &AppState) -> WebhookController {
    WebhookController::new(
        state.pool.clone(),
        state.http_client.clone(),
        state.config.webhook_timeout,
    )
}

async fn create_webhook(
    State(state): State<AppState>,
    Json(request): Json<CreateWebhookRequest>,
) -> Result<Json<ApiResponse<WebhookResponse>>, AppError> {
    let response = controller(&state).create(request).await?;
    Ok(Json(response))
}

async fn list_webhooks(
    State(state): State<AppState>,
    Query(filters): Query<WebhookFilters>,
) -> Result<Json<Vec<WebhookResponse>>, AppError> {
    let response = controller(&state).list(filters).await?;
    Ok(Json(response))
}

async fn get_webhook(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WebhookResponse>, AppError> {
    let response = controller(&state).get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_webhook(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateWebhookRequest>,
) -> Result<Json<ApiResponse<WebhookResponse>>, AppError> {
    let response = controller(&state).update(id, request).await?;
    Ok(Json(response))
}

async fn delete_webhook(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    controller(&state).delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Webhook eliminado exitosamente"
    })))
}

async fn get_stats(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WebhookStats>, AppError> {
    let response = controller(&state).stats(id).await?;
    Ok(Json(response))
}

async fn test_webhook(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let response = controller(&state).test(id).await?;
    Ok(Json(response))
}
