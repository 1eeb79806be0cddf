use sqlx::PgPool;
use uuid::Uuid;

use crate::models::webhook::WebhookConfig;
use crate::utils::errors::AppError;

// Campos para el INSERT de webhook_configs
#[derive(Debug)]
pub struct NewWebhookConfig {
    pub name: String,
    pub url: String,
    pub secret: Option<String>,
    pub is_active: bool,
    pub event_types: Option<String>,
    pub service_type: String,
    pub max_retries: i32,
    pub retry_delay: i32,
}

// Campos opcionales para el UPDATE parcial
#[derive(Debug, Default)]
pub struct WebhookChanges {
    pub name: Option<String>,
    pub url: Option<String>,
    pub secret: Option<String>,
    pub is_active: Option<bool>,
    pub event_types: Option<String>,
    pub service_type: Option<String>,
    pub max_retries: Option<i32>,
    pub retry_delay: Option<i32>,
}

#[derive(Clone)]
pub struct WebhookRepository {
    pool: PgPool,
}

impl WebhookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, data: NewWebhookConfig) -> Result<WebhookConfig, AppError> {
        let webhook = sqlx::query_as::<_, WebhookConfig>(
            r#"
            INSERT INTO webhook_configs (id, name, url, secret, is_active, event_types,
                                         service_type, max_retries, retry_delay)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.name)
        .bind(data.url)
        .bind(data.secret)
        .bind(data.is_active)
        .bind(data.event_types)
        .bind(data.service_type)
        .bind(data.max_retries)
        .bind(data.retry_delay)
        .fetch_one(&self.pool)
        .await?;

        Ok(webhook)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<WebhookConfig>, AppError> {
        let webhook =
            sqlx::query_as::<_, WebhookConfig>("SELECT * FROM webhook_configs WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(webhook)
    }

    pub async fn list(&self, skip: i64, limit: i64) -> Result<Vec<WebhookConfig>, AppError> {
        let webhooks = sqlx::query_as::<_, WebhookConfig>(
            "SELECT * FROM webhook_configs ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        Ok(webhooks)
    }

    pub async fn list_active(&self) -> Result<Vec<WebhookConfig>, AppError> {
        let webhooks = sqlx::query_as::<_, WebhookConfig>(
            "SELECT * FROM webhook_configs WHERE is_active = TRUE",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(webhooks)
    }

    pub async fn update(
        &self,
        id: Uuid,
        changes: WebhookChanges,
    ) -> Result<WebhookConfig, AppError> {
        let webhook = sqlx::query_as::<_, WebhookConfig>(
            r#"
            UPDATE webhook_configs SET
                name = COALESCE($2, name),
                url = COALESCE($3, url),
                secret = COALESCE($4, secret),
                is_active = COALESCE($5, is_active),
                event_types = COALESCE($6, event_types),
                service_type = COALESCE($7, service_type),
                max_retries = COALESCE($8, max_retries),
                retry_delay = COALESCE($9, retry_delay),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.url)
        .bind(changes.secret)
        .bind(changes.is_active)
        .bind(changes.event_types)
        .bind(changes.service_type)
        .bind(changes.max_retries)
        .bind(changes.retry_delay)
        .fetch_one(&self.pool)
        .await?;

        Ok(webhook)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM webhook_configs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Actualizar contadores tras un intento de entrega.
    /// last_triggered solo se toca cuando la entrega fue exitosa.
    pub async fn record_result(&self, id: Uuid, success: bool) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE webhook_configs SET
                total_calls = total_calls + 1,
                successful_calls = successful_calls + CASE WHEN $2 THEN 1 ELSE 0 END,
                failed_calls = failed_calls + CASE WHEN $2 THEN 0 ELSE 1 END,
                last_triggered = CASE WHEN $2 THEN NOW() ELSE last_triggered END,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(success)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
