use reqwest::Client;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::motorcycle_dto::ApiResponse;
use crate::dto::webhook_dto::{
    CreateWebhookRequest, UpdateWebhookRequest, WebhookFilters, WebhookResponse, WebhookStats,
};
use crate::models::webhook::serialize_event_types;
use crate::repositories::webhook_repository::{
    NewWebhookConfig, WebhookChanges, WebhookRepository,
};
use crate::services::webhook_service::WebhookService;
use crate::utils::errors::AppError;

pub struct WebhookController {
    repository: WebhookRepository,
    service: WebhookService,
}

impl WebhookController {
    pub fn new(pool: PgPool, http_client: Client, webhook_timeout: u64) -> Self {
        Self {
            repository: WebhookRepository::new(pool.clone()),
            service: WebhookService::new(pool, http_client, webhook_timeout),
        }
    }

    pub async fn list(&self, filters: WebhookFilters) -> Result<Vec<WebhookResponse>, AppError> {
        let limit = filters.limit.unwrap_or(100).clamp(1, 100);
        let skip = filters.skip.unwrap_or(0).max(0);

        let webhooks = self.repository.list(skip, limit).await?;
        Ok(webhooks.into_iter().map(WebhookResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<WebhookResponse, AppError> {
        let webhook = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Webhook not found".to_string()))?;

        Ok(webhook.into())
    }

    pub async fn create(
        &self,
        request: CreateWebhookRequest,
    ) -> Result<ApiResponse<WebhookResponse>, AppError> {
        request.validate()?;

        let data = NewWebhookConfig {
            name: request.name,
            url: request.url,
            secret: request.secret,
            is_active: request.is_active.unwrap_or(true),
            event_types: request
                .event_types
                .as_ref()
                .and_then(|types| serialize_event_types(types)),
            service_type: request.service_type.unwrap_or_else(|| "generic".to_string()),
            max_retries: request.max_retries.unwrap_or(3),
            retry_delay: request.retry_delay.unwrap_or(60),
        };

        let webhook = self.repository.create(data).await?;

        Ok(ApiResponse::success_with_message(
            webhook.into(),
            "Webhook registrado exitosamente".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateWebhookRequest,
    ) -> Result<ApiResponse<WebhookResponse>, AppError> {
        request.validate()?;

        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Webhook not found".to_string()))?;

        let changes = WebhookChanges {
            name: request.name,
            url: request.url,
            secret: request.secret,
            is_active: request.is_active,
            event_types: request
                .event_types
                .as_ref()
                .and_then(|types| serialize_event_types(types)),
            service_type: request.service_type,
            max_retries: request.max_retries,
            retry_delay: request.retry_delay,
        };

        let webhook = self.repository.update(id, changes).await?;

        Ok(ApiResponse::success_with_message(
            webhook.into(),
            "Webhook actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound("Webhook not found".to_string()));
        }
        Ok(())
    }

    pub async fn stats(&self, id: Uuid) -> Result<WebhookStats, AppError> {
        let webhook = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Webhook not found".to_string()))?;

        let success_rate = if webhook.total_calls > 0 {
            webhook.successful_calls as f64 / webhook.total_calls as f64 * 100.0
        } else {
            0.0
        };

        Ok(WebhookStats {
            total_calls: webhook.total_calls,
            successful_calls: webhook.successful_calls,
            failed_calls: webhook.failed_calls,
            success_rate,
            last_triggered: webhook.last_triggered,
        })
    }

    /// Enviar un payload de prueba a esta configuración concreta
    pub async fn test(&self, id: Uuid) -> Result<serde_json::Value, AppError> {
        let webhook = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Webhook not found".to_string()))?;

        let data = json!({
            "test": true,
            "message": "This is a test webhook from Moto Garage",
            "webhook_name": webhook.name,
        });

        let delivered = self.service.send_to_config(&webhook, "test_webhook", data).await;

        if !delivered {
            return Err(AppError::ExternalApi(format!(
                "Webhook '{}' delivery failed",
                webhook.name
            )));
        }

        Ok(json!({
            "success": true,
            "message": "Test webhook sent successfully"
        }))
    }
}
