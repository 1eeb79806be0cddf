use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::controllers::part_controller::PartController;
use crate::dto::motorcycle_dto::ApiResponse;
use crate::dto::part_dto::{
    CreatePartRequest, ExpensesQuery, LowStockQuery, PartCategorySummary, PartFilters,
    PartResponse, PartsExpenseSummary, ReplacementDueItem, ReplacementQuery, RestockPartRequest,
    UpdatePartRequest, UsePartRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_part_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_part).get(list_parts))
        .route("/expenses", get(get_expenses))
        .route("/replacement-needed", get(get_replacement_needed))
        .route("/low-stock", get(get_low_stock))
        .route("/categories/:motorcycle_id", get(get_by_category))
        .route("/:id", get(get_part).put(update_part).delete(delete_part))
        .route("/:id/use", post(use_part))
        .route("/:id/restock", post(restock_part))
}

async fn create_part(
    State(state): State<AppState>,
    Json(request): Json<CreatePartRequest>,
) -> Result<Json<ApiResponse<PartResponse>>, AppError> {
    let controller = PartController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_parts(
    State(state): State<AppState>,
    Query(filters): Query<PartFilters>,
) -> Result<Json<Vec<PartResponse>>, AppError> {
    let controller = PartController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_part(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PartResponse>, AppError> {
    let controller = PartController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_part(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePartRequest>,
) -> Result<Json<ApiResponse<PartResponse>>, AppError> {
    let controller = PartController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_part(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = PartController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Repuesto eliminado exitosamente"
    })))
}

async fn use_part(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UsePartRequest>,
) -> Result<Json<PartResponse>, AppError> {
    let controller = PartController::new(state.pool.clone());
    let response = controller.use_part(id, request).await?;
    Ok(Json(response))
}

async fn restock_part(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RestockPartRequest>,
) -> Result<Json<PartResponse>, AppError> {
    let controller = PartController::new(state.pool.clone());
    let response = controller.restock(id, request).await?;
    Ok(Json(response))
}

async fn get_expenses(
    State(state): State<AppState>,
    Query(query): Query<ExpensesQuery>,
) -> Result<Json<PartsExpenseSummary>, AppError> {
    let controller = PartController::new(state.pool.clone());
    let response = controller
        .expenses(query.motorcycle_id, query.start_date, query.end_date)
        .await?;
    Ok(Json(response))
}

async fn get_replacement_needed(
    State(state): State<AppState>,
    Query(query): Query<ReplacementQuery>,
) -> Result<Json<Vec<ReplacementDueItem>>, AppError> {
    let controller = PartController::new(state.pool.clone());
    let response = controller.replacement_needed(query.motorcycle_id).await?;
    Ok(Json(response))
}

async fn get_low_stock(
    State(state): State<AppState>,
    Query(query): Query<LowStockQuery>,
) -> Result<Json<Vec<PartResponse>>, AppError> {
    let controller = PartController::new(state.pool.clone());
    let response = controller
        .low_stock(query.motorcycle_id, query.threshold)
        .await?;
    Ok(Json(response))
}

async fn get_by_category(
    State(state): State<AppState>,
    Path(motorcycle_id): Path<Uuid>,
) -> Result<Json<BTreeMap<String, Vec<PartCategorySummary>>>, AppError> {
    let controller = PartController::new(state.pool.clone());
    let response = controller.by_category(motorcycle_id).await?;
    Ok(Json(response))
}
