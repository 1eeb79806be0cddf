use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::ride_log::RideLog;
use crate::utils::validation::{decimal_to_f64, opt_decimal_to_f64};

// Request para registrar un viaje
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRideLogRequest {
    pub motorcycle_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub start_mileage: f64,
    pub end_mileage: Option<f64>,
    pub fuel_consumed: Option<f64>,
    pub fuel_cost: Option<f64>,

    #[validate(length(max = 200))]
    pub start_location: Option<String>,

    #[validate(length(max = 200))]
    pub end_location: Option<String>,

    pub route_description: Option<String>,
    pub weather_conditions: Option<String>,
    pub road_conditions: Option<String>,
    pub trip_type: Option<String>,
    pub notes: Option<String>,
}

// Request para actualizar un viaje existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRideLogRequest {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub start_mileage: Option<f64>,
    pub end_mileage: Option<f64>,
    pub fuel_consumed: Option<f64>,
    pub fuel_cost: Option<f64>,

    #[validate(length(max = 200))]
    pub start_location: Option<String>,

    #[validate(length(max = 200))]
    pub end_location: Option<String>,

    pub route_description: Option<String>,
    pub weather_conditions: Option<String>,
    pub road_conditions: Option<String>,
    pub trip_type: Option<String>,
    pub notes: Option<String>,
}

/// Filtros para el listado de viajes
#[derive(Debug, Deserialize)]
pub struct RideLogFilters {
    pub motorcycle_id: Option<Uuid>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FuelStatsQuery {
    pub motorcycle_id: Option<Uuid>,
}

// Response de viaje
#[derive(Debug, Serialize)]
pub struct RideLogResponse {
    pub id: Uuid,
    pub motorcycle_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub start_mileage: f64,
    pub end_mileage: Option<f64>,
    pub distance: Option<f64>,
    pub fuel_consumed: Option<f64>,
    pub fuel_cost: Option<f64>,
    pub fuel_efficiency: Option<f64>,
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

impl From<RideLog> for RideLogResponse {
    fn from(log: RideLog) -> Self {
        Self {
            id: log.id,
            motorcycle_id: log.motorcycle_id,
            start_date: log.start_date,
            end_date: log.end_date,
            start_mileage: decimal_to_f64(log.start_mileage),
            end_mileage: opt_decimal_to_f64(log.end_mileage),
            distance: opt_decimal_to_f64(log.distance),
            fuel_consumed: opt_decimal_to_f64(log.fuel_consumed),
            fuel_cost: opt_decimal_to_f64(log.fuel_cost),
            fuel_efficiency: opt_decimal_to_f64(log.fuel_efficiency),
            start_location: log.start_location,
            end_location: log.end_location,
            route_description: log.route_description,
            weather_conditions: log.weather_conditions,
            road_conditions: log.road_conditions,
            trip_type: log.trip_type,
            notes: log.notes,
            created_at: log.created_at,
            updated_at: log.updated_at,
        }
    }
}

/// Resumen de viajes de una moto
#[derive(Debug, PartialEq, Serialize)]
pub struct RideSummary {
    pub total_rides: i64,
    pub total_distance: f64,
    pub total_fuel: f64,
    pub total_fuel_cost: f64,
    pub average_efficiency: f64,
    pub most_common_trip_type: Option<String>,
}

/// Mejor/peor eficiencia registrada
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EfficiencyEntry {
    pub value: f64,
    pub date: DateTime<Utc>,
    pub trip_type: Option<String>,
}

/// Estadísticas de combustible
#[derive(Debug, PartialEq, Serialize)]
pub struct FuelStatistics {
    pub total_fuel_consumed: f64,
    pub total_fuel_cost: f64,
    pub average_price_per_liter: f64,
    pub best_efficiency: Option<EfficiencyEntry>,
    pub worst_efficiency: Option<EfficiencyEntry>,
    pub average_efficiency: f64,
}
