//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos en el borde de la API.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::utils::errors::AppError;

/// Parsear un filtro de fecha recibido como query param.
/// Acepta RFC3339 o fecha simple YYYY-MM-DD (interpretada a medianoche UTC).
pub fn parse_datetime_filter(
    value: Option<&str>,
    field: &str,
) -> Result<Option<DateTime<Utc>>, AppError> {
    let Some(raw) = value else {
        return Ok(None);
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let midnight = date.and_time(NaiveTime::MIN);
        return Ok(Some(Utc.from_utc_datetime(&midnight)));
    }

    Err(AppError::BadRequest(format!(
        "Invalid {} '{}': expected RFC3339 or YYYY-MM-DD",
        field, raw
    )))
}

/// Convertir un f64 de un request a Decimal
pub fn decimal_from_f64(value: f64, field: &str) -> Result<Decimal, AppError> {
    Decimal::from_f64_retain(value)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid {} value", field)))
}

/// Variante para campos opcionales
pub fn opt_decimal_from_f64(
    value: Option<f64>,
    field: &str,
) -> Result<Option<Decimal>, AppError> {
    value.map(|v| decimal_from_f64(v, field)).transpose()
}

/// Convertir un Decimal de la base de datos a f64 para los DTOs
pub fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_string().parse().unwrap_or(0.0)
}

/// Variante para columnas opcionales
pub fn opt_decimal_to_f64(value: Option<Decimal>) -> Option<f64> {
    value.map(decimal_to_f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rfc3339_filter() {
        let parsed = parse_datetime_filter(Some("2025-03-01T10:30:00Z"), "start_date")
            .unwrap()
            .unwrap();
        assert_eq!(parsed.to_rfc3339(), "2025-03-01T10:30:00+00:00");
    }

    #[test]
    fn parse_plain_date_filter() {
        let parsed = parse_datetime_filter(Some("2025-03-01"), "start_date")
            .unwrap()
            .unwrap();
        assert_eq!(parsed.to_rfc3339(), "2025-03-01T00:00:00+00:00");
    }

    #[test]
    fn parse_missing_filter_is_none() {
        assert!(parse_datetime_filter(None, "start_date").unwrap().is_none());
    }

    #[test]
    fn parse_garbage_filter_fails() {
        assert!(parse_datetime_filter(Some("next tuesday"), "start_date").is_err());
    }

    #[test]
    fn decimal_conversion_roundtrip() {
        let d = decimal_from_f64(1234.5, "mileage").unwrap();
        assert_eq!(decimal_to_f64(d), 1234.5);
    }
}
