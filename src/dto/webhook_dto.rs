use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::webhook::{parse_event_types, WebhookConfig};

// Request para registrar un webhook
#[derive(Debug, Deserialize, Validate)]
pub struct CreateWebhookRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(url)]
    pub url: String,

    pub secret: Option<String>,
    pub is_active: Option<bool>,
    pub event_types: Option<Vec<String>>,
    pub service_type: Option<String>,

    #[validate(range(min = 0, max = 10))]
    pub max_retries: Option<i32>,

    #[validate(range(min = 0, max = 3600))]
    pub retry_delay: Option<i32>,
}

// Request para actualizar un webhook existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateWebhookRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(url)]
    pub url: Option<String>,

    pub secret: Option<String>,
    pub is_active: Option<bool>,
    pub event_types: Option<Vec<String>>,
    pub service_type: Option<String>,

    #[validate(range(min = 0, max = 10))]
    pub max_retries: Option<i32>,

    #[validate(range(min = 0, max = 3600))]
    pub retry_delay: Option<i32>,
}

/// Filtros para el listado de webhooks
#[derive(Debug, Deserialize)]
pub struct WebhookFilters {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

// Response de webhook
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub secret: Option<String>,
    pub is_active: bool,
    pub event_types: Option<Vec<String>>,
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

impl From<WebhookConfig> for WebhookResponse {
    fn from(webhook: WebhookConfig) -> Self {
        let event_types = parse_event_types(webhook.event_types.as_deref());
        Self {
            id: webhook.id,
            name: webhook.name,
            url: webhook.url,
            secret: webhook.secret,
            is_active: webhook.is_active,
            event_types,
            service_type: webhook.service_type,
            max_retries: webhook.max_retries,
            retry_delay: webhook.retry_delay,
            last_triggered: webhook.last_triggered,
            total_calls: webhook.total_calls,
            successful_calls: webhook.successful_calls,
            failed_calls: webhook.failed_calls,
            created_at: webhook.created_at,
            updated_at: webhook.updated_at,
        }
    }
}

/// Estadísticas de entrega de un webhook
#[derive(Debug, Serialize)]
pub struct WebhookStats {
    pub total_calls: i32,
    pub successful_calls: i32,
    pub failed_calls: i32,
    pub success_rate: f64,
    pub last_triggered: Option<DateTime<Utc>>,
}
