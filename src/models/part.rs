//! Modelo de Part
//!
//! Este módulo contiene el struct Part que mapea exactamente
//! a la tabla parts del schema PostgreSQL.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Part - mapea exactamente a la tabla parts
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Part {
    pub id: Uuid,
    pub motorcycle_id: Uuid,
    pub name: String,
    pub part_number: Option<String>,
    pub manufacturer: Option<String>,
    pub category: Option<String>,
    pub quantity_in_stock: i32,
    pub quantity_used: i32,
    pub unit_price: Option<Decimal>,
    pub total_cost: Option<Decimal>,
    pub currency: String,
    pub purchase_date: Option<DateTime<Utc>>,
    pub vendor: Option<String>,
    pub installed_date: Option<DateTime<Utc>>,
    pub installed_mileage: Option<Decimal>,
    pub replacement_interval_km: Option<Decimal>,
    pub replacement_interval_months: Option<i32>,
    pub installation_notes: Option<String>,
    pub is_installed: bool,
    pub is_consumable: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
