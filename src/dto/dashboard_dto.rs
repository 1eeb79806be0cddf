use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dto::maintenance_dto::UpcomingMaintenanceItem;

#[derive(Debug, Deserialize)]
pub struct DueQuery {
    pub motorcycle_id: Option<Uuid>,
    pub days_ahead: Option<i64>,
}

/// Actividad reciente de mantenimiento
#[derive(Debug, Serialize)]
pub struct ActivityItem {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub description: String,
    pub motorcycle_name: String,
    pub motorcycle_id: Uuid,
    pub date: DateTime<Utc>,
    pub mileage: f64,
    pub cost: f64,
    pub service_type: String,
}

/// Estadísticas principales del dashboard
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_motorcycles: i64,
    pub active_motorcycles: i64,
    pub total_mileage: f64,
    pub upcoming_services: i64,
    pub overdue_services: i64,
    pub monthly_expenses: f64,
    pub recent_activities: Vec<ActivityItem>,
}

/// Resumen de repuestos de una moto
#[derive(Debug, PartialEq, Serialize)]
pub struct PartsSummary {
    pub total_parts: i64,
    pub total_stock_value: f64,
    pub low_stock_parts: i64,
    pub categories: i64,
}

/// Cabecera de moto para el overview
#[derive(Debug, Serialize)]
pub struct MotorcycleHeader {
    pub id: Uuid,
    pub name: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub current_mileage: f64,
    pub license_plate: Option<String>,
}

/// Servicio reciente dentro del overview
#[derive(Debug, Serialize)]
pub struct RecentMaintenanceItem {
    pub id: Uuid,
    pub service_name: String,
    pub performed_at: DateTime<Utc>,
    pub mileage: f64,
    pub cost: f64,
    pub service_type: String,
}

/// Overview completo de una moto
#[derive(Debug, Serialize)]
pub struct MotorcycleOverview {
    pub motorcycle: MotorcycleHeader,
    pub upcoming_maintenance: Vec<UpcomingMaintenanceItem>,
    pub recent_maintenance: Vec<RecentMaintenanceItem>,
    pub parts_summary: PartsSummary,
    pub annual_maintenance_cost: f64,
    pub maintenance_frequency: i64,
}

/// Referencia a la moto más nueva de la flota
#[derive(Debug, PartialEq, Serialize)]
pub struct FleetBikeRef {
    pub name: String,
    pub year: i32,
    pub make: String,
    pub model: String,
}

/// Referencia a la moto con más kilometraje
#[derive(Debug, PartialEq, Serialize)]
pub struct FleetMileageRef {
    pub name: String,
    pub mileage: f64,
    pub make: String,
    pub model: String,
}

/// Resumen de flota
#[derive(Debug, PartialEq, Serialize)]
pub struct FleetSummary {
    pub total_motorcycles: i64,
    pub total_mileage: f64,
    pub average_mileage: f64,
    pub newest_motorcycle: Option<FleetBikeRef>,
    pub highest_mileage: Option<FleetMileageRef>,
    pub fleet_value: f64,
}
