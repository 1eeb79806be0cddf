//! Modelo de WebhookConfig
//!
//! Este módulo contiene el struct WebhookConfig y los helpers para la lista
//! de event types, que se persiste serializada como JSON en una columna TEXT.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// WebhookConfig - mapea exactamente a la tabla webhook_configs
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WebhookConfig {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub secret: Option<String>,
    pub is_active: bool,
    pub event_types: Option<String>,
    pub service_type: String,
    pub max_retries: i32,
    pub retry_delay: i32,
    pub last_triggered: Option<DateTime<Utc>>,
    pub total_calls: i32,
    pub successful_calls: i32,
    pub failed_calls: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Deserializar la lista de event types almacenada.
/// None o cadena vacía significa "suscrito a todos los eventos".
pub fn parse_event_types(raw: Option<&str>) -> Option<Vec<String>> {
    let raw = raw?;
    if raw.trim().is_empty() {
        return None;
    }
    serde_json::from_str::<Vec<String>>(raw).ok()
}

/// Serializar la lista de event types para la columna TEXT
pub fn serialize_event_types(types: &[String]) -> Option<String> {
    serde_json::to_string(types).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_none_means_all_events() {
        assert_eq!(parse_event_types(None), None);
        assert_eq!(parse_event_types(Some("")), None);
        assert_eq!(parse_event_types(Some("   ")), None);
    }

    #[test]
    fn parse_stored_list() {
        let parsed = parse_event_types(Some(r#"["service_completed","maintenance_due"]"#));
        assert_eq!(
            parsed,
            Some(vec![
                "service_completed".to_string(),
                "maintenance_due".to_string()
            ])
        );
    }

    #[test]
    fn parse_empty_list_stays_empty() {
        // Una lista vacía explícita no es lo mismo que "todos"
        assert_eq!(parse_event_types(Some("[]")), Some(vec![]));
    }

    #[test]
    fn serialize_roundtrip() {
        let types = vec!["service_completed".to_string()];
        let raw = serialize_event_types(&types).unwrap();
        assert_eq!(parse_event_types(Some(&raw)), Some(types));
    }
}
