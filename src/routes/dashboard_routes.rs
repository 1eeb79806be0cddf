use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::dashboard_controller::DashboardController;
use crate::dto::dashboard_dto::{DashboardStats, DueQuery, FleetSummary, MotorcycleOverview};
use crate::dto::maintenance_dto::UpcomingMaintenanceItem;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(get_stats))
        .route("/maintenance-due", get(get_maintenance_due))
        .route("/motorcycle/:id", get(get_motorcycle_overview))
        .route("/fleet-summary", get(get_fleet_summary))
}

async fn get_stats(
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, AppError> {
    let controller = DashboardController::new(state.pool.clone());
    let response = controller.stats().await?;
    Ok(Json(response))
}

async fn get_maintenance_due(
    State(state): State<AppState>,
    Query(query): Query<DueQuery>,
) -> Result<Json<Vec<UpcomingMaintenanceItem>>, AppError> {
    let controller = DashboardController::new(state.pool.clone());
    let response = controller
        .maintenance_due(query.motorcycle_id, query.days_ahead)
        .await?;
    Ok(Json(response))
}

async fn get_motorcycle_overview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MotorcycleOverview>, AppError> {
    let controller = DashboardController::new(state.pool.clone());
    let response = controller.motorcycle_overview(id).await?;
    Ok(Json(response))
}

async fn get_fleet_summary(
    State(state): State<AppState>,
) -> Result<Json<FleetSummary>, AppError> {
    let controller = DashboardController::new(state.pool.clone());
    let response = controller.fleet_summary().await?;
    Ok(Json(response))
}
