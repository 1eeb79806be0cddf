use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;
use validator::Validate;

use crate::models::part::Part;
use crate::utils::validation::{decimal_to_f64, opt_decimal_to_f64};

// Request para registrar un repuesto
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePartRequest {
    pub motorcycle_id: Uuid,

    #[validate(length(min = 1, max = 200))]
    pub name: String,

    pub part_number: Option<String>,
    pub manufacturer: Option<String>,
    pub category: Option<String>,

    #[validate(range(min = 0))]
    pub quantity_in_stock: Option<i32>,

    #[validate(range(min = 0))]
    pub quantity_used: Option<i32>,

    pub unit_price: Option<f64>,
    pub total_cost: Option<f64>,
    pub currency: Option<String>,
    pub purchase_date: Option<DateTime<Utc>>,
    pub vendor: Option<String>,
    pub installed_date: Option<DateTime<Utc>>,
    pub installed_mileage: Option<f64>,
    pub replacement_interval_km: Option<f64>,

    #[validate(range(min = 1, max = 120))]
    pub replacement_interval_months: Option<i32>,

    pub installation_notes: Option<String>,
    pub is_installed: Option<bool>,
    pub is_consumable: Option<bool>,
}

// Request para actualizar un repuesto existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePartRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    pub part_number: Option<String>,
    pub manufacturer: Option<String>,
    pub category: Option<String>,

    #[validate(range(min = 0))]
    pub quantity_in_stock: Option<i32>,

    pub unit_price: Option<f64>,
    pub total_cost: Option<f64>,
    pub purchase_date: Option<DateTime<Utc>>,
    pub vendor: Option<String>,
    pub installed_date: Option<DateTime<Utc>>,
    pub installed_mileage: Option<f64>,
    pub replacement_interval_km: Option<f64>,

    #[validate(range(min = 1, max = 120))]
    pub replacement_interval_months: Option<i32>,

    pub installation_notes: Option<String>,
    pub is_installed: Option<bool>,
    pub is_consumable: Option<bool>,
}

// Request para consumir stock
#[derive(Debug, Deserialize, Validate)]
pub struct UsePartRequest {
    #[validate(range(min = 1))]
    pub quantity: i32,
}

// Request para reponer stock
#[derive(Debug, Deserialize, Validate)]
pub struct RestockPartRequest {
    #[validate(range(min = 1))]
    pub quantity: i32,
    pub unit_price: Option<f64>,
}

/// Filtros para el listado de repuestos
#[derive(Debug, Deserialize)]
pub struct PartFilters {
    pub motorcycle_id: Option<Uuid>,
    pub category: Option<String>,
    pub in_stock_only: Option<bool>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ExpensesQuery {
    pub motorcycle_id: Option<Uuid>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReplacementQuery {
    pub motorcycle_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct LowStockQuery {
    pub motorcycle_id: Option<Uuid>,
    pub threshold: Option<i32>,
}

// Response de repuesto
#[derive(Debug, Serialize)]
pub struct PartResponse {
    pub id: Uuid,
    pub motorcycle_id: Uuid,
    pub name: String,
    pub part_number: Option<String>,
    pub manufacturer: Option<String>,
    pub category: Option<String>,
    pub quantity_in_stock: i32,
    pub quantity_used: i32,
    pub unit_price: Option<f64>,
    pub total_cost: Option<f64>,
    pub currency: String,
    pub purchase_date: Option<DateTime<Utc>>,
    pub vendor: Option<String>,
    pub installed_date: Option<DateTime<Utc>>,
    pub installed_mileage: Option<f64>,
    pub replacement_interval_km: Option<f64>,
    pub replacement_interval_months: Option<i32>,
    pub installation_notes: Option<String>,
    pub is_installed: bool,
    pub is_consumable: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Part> for PartResponse {
    fn from(part: Part) -> Self {
        Self {
            id: part.id,
            motorcycle_id: part.motorcycle_id,
            name: part.name,
            part_number: part.part_number,
            manufacturer: part.manufacturer,
            category: part.category,
            quantity_in_stock: part.quantity_in_stock,
            quantity_used: part.quantity_used,
            unit_price: opt_decimal_to_f64(part.unit_price),
            total_cost: opt_decimal_to_f64(part.total_cost),
            currency: part.currency,
            purchase_date: part.purchase_date,
            vendor: part.vendor,
            installed_date: part.installed_date,
            installed_mileage: opt_decimal_to_f64(part.installed_mileage),
            replacement_interval_km: opt_decimal_to_f64(part.replacement_interval_km),
            replacement_interval_months: part.replacement_interval_months,
            installation_notes: part.installation_notes,
            is_installed: part.is_installed,
            is_consumable: part.is_consumable,
            created_at: part.created_at,
            updated_at: part.updated_at,
        }
    }
}

/// Resumen de gastos en repuestos
#[derive(Debug, PartialEq, Serialize)]
pub struct PartsExpenseSummary {
    pub total_cost: f64,
    pub total_parts: i64,
    pub total_stock_value: f64,
    pub average_part_cost: f64,
    pub category_breakdown: BTreeMap<String, f64>,
}

/// Repuesto instalado que requiere reemplazo
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplacementDueItem {
    pub part_id: Uuid,
    pub name: String,
    pub part_number: Option<String>,
    pub category: Option<String>,
    pub motorcycle_id: Uuid,
    pub motorcycle_name: String,
    pub current_mileage: f64,
    pub due_mileage: Option<f64>,
    pub reason: String,
    pub priority: String,
}

/// Entrada resumida para la agrupación por categoría
#[derive(Debug, Serialize)]
pub struct PartCategorySummary {
    pub id: Uuid,
    pub name: String,
    pub part_number: Option<String>,
    pub quantity_in_stock: i32,
    pub unit_price: Option<f64>,
}
