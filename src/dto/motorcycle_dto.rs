use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::motorcycle::Motorcycle;
use crate::utils::validation::{decimal_to_f64, opt_decimal_to_f64};

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

// Request para registrar una moto
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMotorcycleRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1, max = 100))]
    pub make: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(range(min = 1900, max = 2030))]
    pub year: i32,

    #[validate(range(min = 1, max = 3000))]
    pub engine_size: Option<i32>,

    #[validate(length(min = 2, max = 20))]
    pub license_plate: Option<String>,

    #[validate(length(min = 5, max = 20))]
    pub vin: Option<String>,

    pub current_mileage: Option<f64>,
    pub purchase_date: Option<DateTime<Utc>>,
    pub purchase_price: Option<f64>,
    pub notes: Option<String>,
}

// Request para actualizar una moto existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMotorcycleRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 2, max = 20))]
    pub license_plate: Option<String>,

    #[validate(length(min = 5, max = 20))]
    pub vin: Option<String>,

    pub current_mileage: Option<f64>,
    pub is_active: Option<bool>,
    pub is_archived: Option<bool>,
    pub notes: Option<String>,
}

// Request para actualizar kilometraje
#[derive(Debug, Deserialize)]
pub struct UpdateMileageRequest {
    pub new_mileage: f64,
}

/// Filtros para el listado de motos
#[derive(Debug, Deserialize)]
pub struct MotorcycleFilters {
    pub include_archived: Option<bool>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

// Response de moto
#[derive(Debug, Serialize)]
pub struct MotorcycleResponse {
    pub id: Uuid,
    pub name: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub engine_size: Option<i32>,
    pub license_plate: Option<String>,
    pub vin: Option<String>,
    pub current_mileage: f64,
    pub purchase_date: Option<DateTime<Utc>>,
    pub purchase_price: Option<f64>,
    pub is_active: bool,
    pub is_archived: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Motorcycle> for MotorcycleResponse {
    fn from(motorcycle: Motorcycle) -> Self {
        Self {
            id: motorcycle.id,
            name: motorcycle.name,
            make: motorcycle.make,
            model: motorcycle.model,
            year: motorcycle.year,
            engine_size: motorcycle.engine_size,
            license_plate: motorcycle.license_plate,
            vin: motorcycle.vin,
            current_mileage: decimal_to_f64(motorcycle.current_mileage),
            purchase_date: motorcycle.purchase_date,
            purchase_price: opt_decimal_to_f64(motorcycle.purchase_price),
            is_active: motorcycle.is_active,
            is_archived: motorcycle.is_archived,
            notes: motorcycle.notes,
            created_at: motorcycle.created_at,
            updated_at: motorcycle.updated_at,
        }
    }
}

/// Estadísticas derivadas de una moto
#[derive(Debug, Serialize)]
pub struct MotorcycleStatistics {
    pub age_years: i32,
    pub ownership_days: i64,
    pub total_maintenance_records: i64,
    pub total_parts: i64,
    pub total_rides: i64,
    pub average_km_per_year: f64,
    pub average_km_per_day: f64,
}
