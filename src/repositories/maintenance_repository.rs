use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::maintenance::MaintenanceRecord;
use crate::utils::errors::AppError;

// Campos para el INSERT de maintenance_records
#[derive(Debug)]
pub struct NewMaintenanceRecord {
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
}

// Valores finales (ya combinados por el controller) para el UPDATE
#[derive(Debug)]
pub struct MaintenanceChanges {
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
}

/// Fila del join maintenance_records + motorcycles para la clasificación
/// de próximos servicios
#[derive(Debug, Clone, FromRow)]
pub struct MaintenanceDueRow {
    pub id: Uuid,
    pub motorcycle_id: Uuid,
    pub motorcycle_name: String,
    pub service_name: String,
    pub service_type: String,
    pub next_service_date: Option<DateTime<Utc>>,
    pub next_service_mileage: Option<Decimal>,
    pub current_mileage: Decimal,
}

/// Fila del join para actividades recientes del dashboard
#[derive(Debug, FromRow)]
pub struct ActivityRow {
    pub id: Uuid,
    pub motorcycle_id: Uuid,
    pub motorcycle_name: String,
    pub service_name: String,
    pub service_type: String,
    pub performed_at: DateTime<Utc>,
    pub mileage_at_service: Decimal,
    pub total_cost: Decimal,
}

#[derive(Clone)]
pub struct MaintenanceRepository {
    pool: PgPool,
}

impl MaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, data: NewMaintenanceRecord) -> Result<MaintenanceRecord, AppError> {
        let record = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            INSERT INTO maintenance_records (
                id, motorcycle_id, service_type, service_name, description, performed_at,
                mileage_at_service, next_service_mileage, next_service_date, service_interval_km,
                service_interval_months, labor_cost, parts_cost, total_cost, currency,
                service_provider, technician, is_completed, is_scheduled
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.motorcycle_id)
        .bind(data.service_type)
        .bind(data.service_name)
        .bind(data.description)
        .bind(data.performed_at)
        .bind(data.mileage_at_service)
        .bind(data.next_service_mileage)
        .bind(data.next_service_date)
        .bind(data.service_interval_km)
        .bind(data.service_interval_months)
        .bind(data.labor_cost)
        .bind(data.parts_cost)
        .bind(data.total_cost)
        .bind(data.currency)
        .bind(data.service_provider)
        .bind(data.technician)
        .bind(data.is_completed)
        .bind(data.is_scheduled)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<MaintenanceRecord>, AppError> {
        let record =
            sqlx::query_as::<_, MaintenanceRecord>("SELECT * FROM maintenance_records WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(record)
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<MaintenanceRecord>, AppError> {
        let records = sqlx::query_as::<_, MaintenanceRecord>(
            "SELECT * FROM maintenance_records WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    pub async fn list(
        &self,
        motorcycle_id: Option<Uuid>,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<MaintenanceRecord>, AppError> {
        let records = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            SELECT * FROM maintenance_records
            WHERE ($1::uuid IS NULL OR motorcycle_id = $1)
            ORDER BY performed_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(motorcycle_id)
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    pub async fn update(
        &self,
        id: Uuid,
        changes: MaintenanceChanges,
    ) -> Result<MaintenanceRecord, AppError> {
        let record = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            UPDATE maintenance_records SET
                service_type = $2,
                service_name = $3,
                description = $4,
                performed_at = $5,
                mileage_at_service = $6,
                next_service_mileage = $7,
                next_service_date = $8,
                service_interval_km = $9,
                service_interval_months = $10,
                labor_cost = $11,
                parts_cost = $12,
                total_cost = $13,
                currency = $14,
                service_provider = $15,
                technician = $16,
                is_completed = $17,
                is_scheduled = $18,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.service_type)
        .bind(changes.service_name)
        .bind(changes.description)
        .bind(changes.performed_at)
        .bind(changes.mileage_at_service)
        .bind(changes.next_service_mileage)
        .bind(changes.next_service_date)
        .bind(changes.service_interval_km)
        .bind(changes.service_interval_months)
        .bind(changes.labor_cost)
        .bind(changes.parts_cost)
        .bind(changes.total_cost)
        .bind(changes.currency)
        .bind(changes.service_provider)
        .bind(changes.technician)
        .bind(changes.is_completed)
        .bind(changes.is_scheduled)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM maintenance_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Registros con próxima fecha o kilometraje de servicio, junto con la moto
    pub async fn list_due_rows(
        &self,
        motorcycle_id: Option<Uuid>,
    ) -> Result<Vec<MaintenanceDueRow>, AppError> {
        let rows = sqlx::query_as::<_, MaintenanceDueRow>(
            r#"
            SELECT mr.id, mr.motorcycle_id, m.name AS motorcycle_name, mr.service_name,
                   mr.service_type, mr.next_service_date, mr.next_service_mileage,
                   m.current_mileage
            FROM maintenance_records mr
            JOIN motorcycles m ON m.id = mr.motorcycle_id
            WHERE ($1::uuid IS NULL OR mr.motorcycle_id = $1)
              AND (mr.next_service_date IS NOT NULL OR mr.next_service_mileage IS NOT NULL)
            "#,
        )
        .bind(motorcycle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn list_history(
        &self,
        motorcycle_id: Uuid,
        service_type: Option<String>,
        limit: Option<i64>,
    ) -> Result<Vec<MaintenanceRecord>, AppError> {
        let records = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            SELECT * FROM maintenance_records
            WHERE motorcycle_id = $1
              AND is_completed = TRUE
              AND ($2::text IS NULL OR service_type = $2)
            ORDER BY performed_at DESC
            LIMIT $3
            "#,
        )
        .bind(motorcycle_id)
        .bind(service_type)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    pub async fn list_completed(
        &self,
        motorcycle_id: Option<Uuid>,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> Result<Vec<MaintenanceRecord>, AppError> {
        let records = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            SELECT * FROM maintenance_records
            WHERE is_completed = TRUE
              AND ($1::uuid IS NULL OR motorcycle_id = $1)
              AND ($2::timestamptz IS NULL OR performed_at >= $2)
              AND ($3::timestamptz IS NULL OR performed_at <= $3)
            "#,
        )
        .bind(motorcycle_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    pub async fn list_recent_activities(&self, limit: i64) -> Result<Vec<ActivityRow>, AppError> {
        let rows = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT mr.id, mr.motorcycle_id, m.name AS motorcycle_name, mr.service_name,
                   mr.service_type, mr.performed_at, mr.mileage_at_service, mr.total_cost
            FROM maintenance_records mr
            JOIN motorcycles m ON m.id = mr.motorcycle_id
            WHERE mr.is_completed = TRUE
            ORDER BY mr.performed_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Marcar como completado y refrescar la próxima programación
    pub async fn complete(
        &self,
        id: Uuid,
        performed_at: DateTime<Utc>,
        mileage_at_service: Decimal,
        next_service_date: Option<DateTime<Utc>>,
        next_service_mileage: Option<Decimal>,
    ) -> Result<MaintenanceRecord, AppError> {
        let record = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            UPDATE maintenance_records SET
                is_completed = TRUE,
                is_scheduled = FALSE,
                performed_at = $2,
                mileage_at_service = $3,
                next_service_date = $4,
                next_service_mileage = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(performed_at)
        .bind(mileage_at_service)
        .bind(next_service_date)
        .bind(next_service_mileage)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }
}
