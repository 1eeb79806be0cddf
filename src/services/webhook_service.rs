//! Despacho de webhooks salientes
//!
//! Para cada evento se cargan las configuraciones activas suscritas, se hace
//! un POST JSON con timeout fijo y se actualizan los contadores según el
//! resultado. Los reintentos respetan max_retries/retry_delay de cada config;
//! los contadores registran una sola llamada por evento.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::{json, Value};
use sqlx::PgPool;
use std::time::Duration;
use tracing::{info, warn};

use crate::models::webhook::{parse_event_types, WebhookConfig};
use crate::repositories::webhook_repository::WebhookRepository;

#[derive(Clone)]
pub struct WebhookService {
    repository: WebhookRepository,
    client: Client,
    timeout: Duration,
}

impl WebhookService {
    pub fn new(pool: PgPool, client: Client, timeout_secs: u64) -> Self {
        Self {
            repository: WebhookRepository::new(pool),
            client,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Enviar un evento a todas las configuraciones activas suscritas.
    /// Best-effort: los fallos se registran en los contadores y en el log.
    pub async fn send_event(&self, event_type: &str, data: Value) {
        let webhooks = match self.repository.list_active().await {
            Ok(webhooks) => webhooks,
            Err(e) => {
                warn!("❌ No se pudieron cargar los webhooks activos: {}", e);
                return;
            }
        };

        for webhook in webhooks {
            if should_trigger(webhook.event_types.as_deref(), event_type) {
                self.deliver(&webhook, event_type, &data).await;
            }
        }
    }

    /// Enviar un evento a una configuración concreta (endpoint de prueba)
    pub async fn send_to_config(
        &self,
        webhook: &WebhookConfig,
        event_type: &str,
        data: Value,
    ) -> bool {
        self.deliver(webhook, event_type, &data).await
    }

    async fn deliver(&self, webhook: &WebhookConfig, event_type: &str, data: &Value) -> bool {
        let payload = build_payload(event_type, data, Utc::now());
        let attempts = webhook.max_retries.max(0) + 1;
        let mut delivered = false;

        for attempt in 1..=attempts {
            match self
                .client
                .post(&webhook.url)
                .timeout(self.timeout)
                .json(&payload)
                .send()
                .await
            {
                Ok(response) if response.status().is_success() => {
                    delivered = true;
                    break;
                }
                Ok(response) => {
                    warn!(
                        "📡 Webhook '{}' respondió {} (intento {}/{})",
                        webhook.name,
                        response.status(),
                        attempt,
                        attempts
                    );
                }
                Err(e) => {
                    warn!(
                        "❌ Webhook '{}' falló: {} (intento {}/{})",
                        webhook.name, e, attempt, attempts
                    );
                }
            }

            if attempt < attempts && webhook.retry_delay > 0 {
                tokio::time::sleep(Duration::from_secs(webhook.retry_delay as u64)).await;
            }
        }

        if delivered {
            info!(
                "✅ Webhook '{}' entregado para el evento {}",
                webhook.name, event_type
            );
        }

        if let Err(e) = self.repository.record_result(webhook.id, delivered).await {
            warn!(
                "No se pudieron actualizar las estadísticas del webhook {}: {}",
                webhook.id, e
            );
        }

        delivered
    }
}

/// Una config sin lista de eventos está suscrita a todos;
/// con lista, solo a los eventos que contiene.
pub fn should_trigger(stored_event_types: Option<&str>, event_type: &str) -> bool {
    match parse_event_types(stored_event_types) {
        None => true,
        Some(list) => list.iter().any(|e| e == event_type),
    }
}

pub fn build_payload(event_type: &str, data: &Value, timestamp: DateTime<Utc>) -> Value {
    json!({
        "event_type": event_type,
        "timestamp": timestamp.to_rfc3339(),
        "data": data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn missing_list_subscribes_to_everything() {
        assert!(should_trigger(None, "service_completed"));
        assert!(should_trigger(Some(""), "maintenance_due"));
    }

    #[test]
    fn stored_list_filters_events() {
        let stored = r#"["service_completed","maintenance_due"]"#;
        assert!(should_trigger(Some(stored), "service_completed"));
        assert!(!should_trigger(Some(stored), "part_low_stock"));
    }

    #[test]
    fn explicit_empty_list_matches_nothing() {
        assert!(!should_trigger(Some("[]"), "service_completed"));
    }

    #[test]
    fn payload_carries_event_and_timestamp() {
        let timestamp = Utc.with_ymd_and_hms(2025, 6, 15, 9, 0, 0).unwrap();
        let payload = build_payload("test_webhook", &json!({"test": true}), timestamp);

        assert_eq!(payload["event_type"], "test_webhook");
        assert_eq!(payload["timestamp"], "2025-06-15T09:00:00+00:00");
        assert_eq!(payload["data"]["test"], true);
    }
}
