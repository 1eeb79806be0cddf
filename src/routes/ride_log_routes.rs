use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::ride_log_controller::RideLogController;
use crate::dto::motorcycle_dto::ApiResponse;
use crate::dto::ride_log_dto::{
    CreateRideLogRequest, FuelStatistics, FuelStatsQuery, RideLogFilters, RideLogResponse,
    RideSummary, SummaryQuery, UpdateRideLogRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_ride_log_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_log).get(list_logs))
        .route("/summary/:motorcycle_id", get(get_summary))
        .route("/fuel/statistics", get(get_fuel_statistics))
        .route("/:id", get(get_log).put(update_log).delete(delete_log))
}

async fn create_log(
    State(state): State<AppState>,
    Json(request): Json<CreateRideLogRequest>,
) -> Result<Json<ApiResponse<RideLogResponse>>, AppError> {
    let controller = RideLogController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_logs(
    State(state): State<AppState>,
    Query(filters): Query<RideLogFilters>,
) -> Result<Json<Vec<RideLogResponse>>, AppError> {
    let controller = RideLogController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_log(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RideLogResponse>, AppError> {
    let controller = RideLogController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_log(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRideLogRequest>,
) -> Result<Json<ApiResponse<RideLogResponse>>, AppError> {
    let controller = RideLogController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_log(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = RideLogController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Viaje eliminado exitosamente"
    })))
}

async fn get_summary(
    State(state): State<AppState>,
    Path(motorcycle_id): Path<Uuid>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<RideSummary>, AppError> {
    let controller = RideLogController::new(state.pool.clone());
    let response = controller
        .summary(motorcycle_id, query.start_date, query.end_date)
        .await?;
    Ok(Json(response))
}

async fn get_fuel_statistics(
    State(state): State<AppState>,
    Query(query): Query<FuelStatsQuery>,
) -> Result<Json<FuelStatistics>, AppError> {
    let controller = RideLogController::new(state.pool.clone());
    let response = controller.fuel_statistics(query.motorcycle_id).await?;
    Ok(Json(response))
}
