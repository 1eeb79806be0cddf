use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::motorcycle_controller::MotorcycleController;
use crate::dto::motorcycle_dto::{
    ApiResponse, CreateMotorcycleRequest, MotorcycleFilters, MotorcycleResponse,
    MotorcycleStatistics, UpdateMileageRequest, UpdateMotorcycleRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_motorcycle_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_motorcycle).get(list_motorcycles))
        .route(
            "/:id",
            get(get_motorcycle).put(update_motorcycle).delete(archive_motorcycle),
        )
        .route("/:id/restore", post(restore_motorcycle))
        .route("/:id/mileage", post(update_mileage))
        .route("/:id/statistics", get(get_statistics))
}

async fn create_motorcycle(
    State(state): State<AppState>,
    Json(request): Json<CreateMotorcycleRequest>,
) -> Result<Json<ApiResponse<MotorcycleResponse>>, AppError> {
    let controller = MotorcycleController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_motorcycles(
    State(state): State<AppState>,
    Query(filters): Query<MotorcycleFilters>,
) -> Result<Json<Vec<MotorcycleResponse>>, AppError> {
    let controller = MotorcycleController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_motorcycle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MotorcycleResponse>, AppError> {
    let controller = MotorcycleController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_motorcycle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMotorcycleRequest>,
) -> Result<Json<ApiResponse<MotorcycleResponse>>, AppError> {
    let controller = MotorcycleController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

/// El delete archiva la moto en lugar de borrarla
async fn archive_motorcycle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = MotorcycleController::new(state.pool.clone());
    controller.archive(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Moto archivada exitosamente"
    })))
}

async fn restore_motorcycle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = MotorcycleController::new(state.pool.clone());
    controller.restore(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Moto restaurada exitosamente"
    })))
}

async fn update_mileage(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMileageRequest>,
) -> Result<Json<MotorcycleResponse>, AppError> {
    let controller = MotorcycleController::new(state.pool.clone());
    let response = controller.update_mileage(id, request).await?;
    Ok(Json(response))
}

async fn get_statistics(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MotorcycleStatistics>, AppError> {
    let controller = MotorcycleController::new(state.pool.clone());
    let response = controller.statistics(id).await?;
    Ok(Json(response))
}
