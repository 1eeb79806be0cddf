use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::maintenance_controller::MaintenanceController;
use crate::dto::maintenance_dto::{
    BulkCompleteRequest, CostsQuery, CreateMaintenanceRequest, HistoryQuery,
    MaintenanceCostSummary, MaintenanceFilters, MaintenanceResponse, OverdueQuery, UpcomingQuery,
    UpdateMaintenanceRequest, UpcomingMaintenanceItem,
};
use crate::dto::motorcycle_dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_maintenance_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_record).get(list_records))
        .route("/upcoming", get(get_upcoming))
        .route("/overdue", get(get_overdue))
        .route("/costs", get(get_costs))
        .route("/history/:motorcycle_id", get(get_history))
        .route("/bulk-complete", post(bulk_complete))
        .route("/:id", get(get_record).put(update_record).delete(delete_record))
}

fn controller(state: &AppState) -> MaintenanceController {
    MaintenanceController::new(
        state.pool.clone(),
        state.http_client.clone(),
        state.config.webhook_timeout,
    )
}

async fn create_record(
    State(state): State<AppState>,
    Json(request): Json<CreateMaintenanceRequest>,
) -> Result<Json<ApiResponse<MaintenanceResponse>>, AppError> {
    let response = controller(&state).create(request).await?;
    Ok(Json(response))
}

async fn list_records(
    State(state): State<AppState>,
    Query(filters): Query<MaintenanceFilters>,
) -> Result<Json<Vec<MaintenanceResponse>>, AppError> {
    let response = controller(&state).list(filters).await?;
    Ok(Json(response))
}

async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MaintenanceResponse>, AppError> {
    let response = controller(&state).get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_record(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMaintenanceRequest>,
) -> Result<Json<ApiResponse<MaintenanceResponse>>, AppError> {
    let response = controller(&state).update(id, request).await?;
    Ok(Json(response))
}

async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    controller(&state).delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Servicio eliminado exitosamente"
    })))
}

async fn get_upcoming(
    State(state): State<AppState>,
    Query(query): Query<UpcomingQuery>,
) -> Result<Json<Vec<UpcomingMaintenanceItem>>, AppError> {
    let response = controller(&state)
        .upcoming(query.motorcycle_id, query.days_ahead)
        .await?;
    Ok(Json(response))
}

async fn get_overdue(
    State(state): State<AppState>,
    Query(query): Query<OverdueQuery>,
) -> Result<Json<Vec<UpcomingMaintenanceItem>>, AppError> {
    let response = controller(&state).overdue(query.motorcycle_id).await?;
    Ok(Json(response))
}

async fn get_history(
    State(state): State<AppState>,
    Path(motorcycle_id): Path<Uuid>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<MaintenanceResponse>>, AppError> {
    let response = controller(&state)
        .history(motorcycle_id, query.service_type)
        .await?;
    Ok(Json(response))
}

async fn get_costs(
    State(state): State<AppState>,
    Query(query): Query<CostsQuery>,
) -> Result<Json<MaintenanceCostSummary>, AppError> {
    let response = controller(&state)
        .costs(query.motorcycle_id, query.start_date, query.end_date)
        .await?;
    Ok(Json(response))
}

async fn bulk_complete(
    State(state): State<AppState>,
    Json(request): Json<BulkCompleteRequest>,
) -> Result<Json<Vec<MaintenanceResponse>>, AppError> {
    let response = controller(&state).bulk_complete(request).await?;
    Ok(Json(response))
}
