use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::maintenance::{MaintenanceRecord, ServiceType};
use crate::utils::validation::{decimal_to_f64, opt_decimal_to_f64};

// Request para registrar un servicio
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMaintenanceRequest {
    pub motorcycle_id: Uuid,
    pub service_type: ServiceType,

    #[validate(length(min = 1, max = 200))]
    pub service_name: String,

    pub description: Option<String>,
    pub performed_at: DateTime<Utc>,
    pub mileage_at_service: f64,
    pub service_interval_km: Option<f64>,

    #[validate(range(min = 1, max = 120))]
    pub service_interval_months: Option<i32>,

    pub labor_cost: Option<f64>,
    pub parts_cost: Option<f64>,
    pub currency: Option<String>,
    pub service_provider: Option<String>,
    pub technician: Option<String>,
    pub is_completed: Option<bool>,
    pub is_scheduled: Option<bool>,
}

// Request para actualizar un servicio existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMaintenanceRequest {
    pub service_type: Option<ServiceType>,

    #[validate(length(min = 1, max = 200))]
    pub service_name: Option<String>,

    pub description: Option<String>,
    pub performed_at: Option<DateTime<Utc>>,
    pub mileage_at_service: Option<f64>,
    pub service_interval_km: Option<f64>,

    #[validate(range(min = 1, max = 120))]
    pub service_interval_months: Option<i32>,

    pub labor_cost: Option<f64>,
    pub parts_cost: Option<f64>,
    pub currency: Option<String>,
    pub service_provider: Option<String>,
    pub technician: Option<String>,
    pub is_completed: Option<bool>,
    pub is_scheduled: Option<bool>,
}

/// Filtros para el listado de servicios
#[derive(Debug, Deserialize)]
pub struct MaintenanceFilters {
    pub motorcycle_id: Option<Uuid>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpcomingQuery {
    pub motorcycle_id: Option<Uuid>,
    pub days_ahead: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct OverdueQuery {
    pub motorcycle_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub service_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CostsQuery {
    pub motorcycle_id: Option<Uuid>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BulkCompleteRequest {
    pub maintenance_ids: Vec<Uuid>,
}

// Response de servicio
#[derive(Debug, Serialize)]
pub struct MaintenanceResponse {
    pub id: Uuid,
    pub motorcycle_id: Uuid,
    pub service_type: String,
    pub service_name: String,
    pub description: Option<String>,
    pub performed_at: DateTime<Utc>,
    pub mileage_at_service: f64,
    pub next_service_mileage: Option<f64>,
    pub next_service_date: Option<DateTime<Utc>>,
    pub service_interval_km: Option<f64>,
    pub service_interval_months: Option<i32>,
    pub labor_cost: f64,
    pub parts_cost: f64,
    pub total_cost: f64,
    pub currency: String,
    pub service_provider: Option<String>,
    pub technician: Option<String>,
    pub is_completed: bool,
    pub is_scheduled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MaintenanceRecord> for MaintenanceResponse {
    fn from(record: MaintenanceRecord) -> Self {
        Self {
            id: record.id,
            motorcycle_id: record.motorcycle_id,
            service_type: record.service_type,
            service_name: record.service_name,
            description: record.description,
            performed_at: record.performed_at,
            mileage_at_service: decimal_to_f64(record.mileage_at_service),
            next_service_mileage: opt_decimal_to_f64(record.next_service_mileage),
            next_service_date: record.next_service_date,
            service_interval_km: opt_decimal_to_f64(record.service_interval_km),
            service_interval_months: record.service_interval_months,
            labor_cost: decimal_to_f64(record.labor_cost),
            parts_cost: decimal_to_f64(record.parts_cost),
            total_cost: decimal_to_f64(record.total_cost),
            currency: record.currency,
            service_provider: record.service_provider,
            technician: record.technician,
            is_completed: record.is_completed,
            is_scheduled: record.is_scheduled,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Item de mantenimiento próximo/vencido, ya clasificado
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpcomingMaintenanceItem {
    pub id: Uuid,
    pub motorcycle_id: Uuid,
    pub motorcycle_name: String,
    pub service_name: String,
    pub service_type: String,
    pub due_date: Option<DateTime<Utc>>,
    pub due_mileage: Option<f64>,
    pub current_mileage: f64,
    pub is_overdue: bool,
    pub days_overdue: Option<i64>,
    pub mileage_overdue: Option<f64>,
    pub priority: String,
}

/// Resumen de costos de mantenimiento
#[derive(Debug, PartialEq, Serialize)]
pub struct MaintenanceCostSummary {
    pub total_cost: f64,
    pub labor_cost: f64,
    pub parts_cost: f64,
    pub record_count: i64,
    pub average_cost: f64,
}
