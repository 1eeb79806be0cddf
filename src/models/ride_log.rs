//! Modelo de RideLog
//!
//! Este módulo contiene el struct RideLog que mapea exactamente
//! a la tabla ride_logs del schema PostgreSQL. Los campos distance y
//! fuel_efficiency son derivados al escribir, nunca se reciben del cliente.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// RideLog - mapea exactamente a la tabla ride_logs
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RideLog {
    pub id: Uuid,
    pub motorcycle_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub start_mileage: Decimal,
    pub end_mileage: Option<Decimal>,
    pub distance: Option<Decimal>,
    pub fuel_consumed: Option<Decimal>,
    pub fuel_cost: Option<Decimal>,
    pub fuel_efficiency: Option<Decimal>,
    pub start_location: Option<String>,
    pub end_location: Option<String>,
    pub route_description: Option<String>,
    pub weather_conditions: Option<String>,
    pub road_conditions: Option<String>,
    pub trip_type: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
