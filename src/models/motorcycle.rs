//! Modelo de Motorcycle
//!
//! Este módulo contiene el struct Motorcycle que mapea exactamente
//! a la tabla motorcycles del schema PostgreSQL.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Motorcycle principal - mapea exactamente a la tabla motorcycles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Motorcycle {
    pub id: Uuid,
    pub name: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub engine_size: Option<i32>,
    pub license_plate: Option<String>,
    pub vin: Option<String>,
    pub current_mileage: Decimal,
    pub purchase_date: Option<DateTime<Utc>>,
    pub purchase_price: Option<Decimal>,
    pub is_active: bool,
    pub is_archived: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
