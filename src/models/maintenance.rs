//! Modelo de MaintenanceRecord
//!
//! Este módulo contiene el struct MaintenanceRecord y el enum ServiceType.
//! El tipo de servicio se persiste como texto; el enum define el set cerrado.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Tipo de servicio - set cerrado de categorías de mantenimiento
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    OilChange,
    TireReplacement,
    BrakeService,
    ChainMaintenance,
    ValveAdjustment,
    SparkPlug,
    AirFilter,
    CoolantChange,
    GeneralInspection,
    Custom,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::OilChange => "oil_change",
            ServiceType::TireReplacement => "tire_replacement",
            ServiceType::BrakeService => "brake_service",
            ServiceType::ChainMaintenance => "chain_maintenance",
            ServiceType::ValveAdjustment => "valve_adjustment",
            ServiceType::SparkPlug => "spark_plug",
            ServiceType::AirFilter => "air_filter",
            ServiceType::CoolantChange => "coolant_change",
            ServiceType::GeneralInspection => "general_inspection",
            ServiceType::Custom => "custom",
        }
    }

    pub fn parse(value: &str) -> Option<ServiceType> {
        match value {
            "oil_change" => Some(ServiceType::OilChange),
            "tire_replacement" => Some(ServiceType::TireReplacement),
            "brake_service" => Some(ServiceType::BrakeService),
            "chain_maintenance" => Some(ServiceType::ChainMaintenance),
            "valve_adjustment" => Some(ServiceType::ValveAdjustment),
            "spark_plug" => Some(ServiceType::SparkPlug),
            "air_filter" => Some(ServiceType::AirFilter),
            "coolant_change" => Some(ServiceType::CoolantChange),
            "general_inspection" => Some(ServiceType::GeneralInspection),
            "custom" => Some(ServiceType::Custom),
            _ => None,
        }
    }
}

/// MaintenanceRecord - mapea exactamente a la tabla maintenance_records
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MaintenanceRecord {
    pub id: Uuid,
    pub motorcycle_id: Uuid,
    pub service_type: String,
    pub service_name: String,
    pub description: Option<String>,
    pub performed_at: DateTime<Utc>,
    pub mileage_at_service: Decimal,
    pub next_service_mileage: Option<Decimal>,
    pub next_service_date: Option<DateTime<Utc>>,
    pub service_interval_km: Option<Decimal>,
    pub service_interval_months: Option<i32>,
    pub labor_cost: Decimal,
    pub parts_cost: Decimal,
    pub total_cost: Decimal,
    pub currency: String,
    pub service_provider: Option<String>,
    pub technician: Option<String>,
    pub is_completed: bool,
    pub is_scheduled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_type_roundtrip() {
        for st in [
            ServiceType::OilChange,
            ServiceType::TireReplacement,
            ServiceType::BrakeService,
            ServiceType::ChainMaintenance,
            ServiceType::ValveAdjustment,
            ServiceType::SparkPlug,
            ServiceType::AirFilter,
            ServiceType::CoolantChange,
            ServiceType::GeneralInspection,
            ServiceType::Custom,
        ] {
            assert_eq!(ServiceType::parse(st.as_str()), Some(st));
        }
    }

    #[test]
    fn service_type_rejects_unknown() {
        assert_eq!(ServiceType::parse("carburetor_sync"), None);
        assert_eq!(ServiceType::parse(""), None);
    }

    #[test]
    fn service_type_serde_uses_snake_case() {
        let json = serde_json::to_string(&ServiceType::OilChange).unwrap();
        assert_eq!(json, "\"oil_change\"");
        let parsed: ServiceType = serde_json::from_str("\"brake_service\"").unwrap();
        assert_eq!(parsed, ServiceType::BrakeService);
    }
}
