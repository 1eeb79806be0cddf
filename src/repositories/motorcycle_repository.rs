use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::motorcycle::Motorcycle;
use crate::utils::errors::AppError;

// Campos para el INSERT de motorcycles
#[derive(Debug)]
pub struct NewMotorcycle {
    pub name: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub engine_size: Option<i32>,
    pub license_plate: Option<String>,
    pub vin: Option<String>,
    pub current_mileage: Decimal,
    pub purchase_date: Option<DateTime<Utc>>,
    pub purchase_price: Option<Decimal>,
    pub notes: Option<String>,
}

// Campos opcionales para el UPDATE parcial
#[derive(Debug, Default)]
pub struct MotorcycleChanges {
    pub name: Option<String>,
    pub license_plate: Option<String>,
    pub vin: Option<String>,
    pub current_mileage: Option<Decimal>,
    pub is_active: Option<bool>,
    pub is_archived: Option<bool>,
    pub notes: Option<String>,
}

#[derive(Clone)]
pub struct MotorcycleRepository {
    pool: PgPool,
}

impl MotorcycleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, data: NewMotorcycle) -> Result<Motorcycle, AppError> {
        let motorcycle = sqlx::query_as::<_, Motorcycle>(
            r#"
            INSERT INTO motorcycles (id, name, make, model, year, engine_size, license_plate,
                                     vin, current_mileage, purchase_date, purchase_price, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.name)
        .bind(data.make)
        .bind(data.model)
        .bind(data.year)
        .bind(data.engine_size)
        .bind(data.license_plate)
        .bind(data.vin)
        .bind(data.current_mileage)
        .bind(data.purchase_date)
        .bind(data.purchase_price)
        .bind(data.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(motorcycle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Motorcycle>, AppError> {
        let motorcycle = sqlx::query_as::<_, Motorcycle>("SELECT * FROM motorcycles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(motorcycle)
    }

    pub async fn list(
        &self,
        include_archived: bool,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Motorcycle>, AppError> {
        let motorcycles = sqlx::query_as::<_, Motorcycle>(
            r#"
            SELECT * FROM motorcycles
            WHERE ($1 OR is_archived = FALSE)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(include_archived)
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        Ok(motorcycles)
    }

    pub async fn list_active(&self) -> Result<Vec<Motorcycle>, AppError> {
        let motorcycles = sqlx::query_as::<_, Motorcycle>(
            "SELECT * FROM motorcycles WHERE is_active = TRUE AND is_archived = FALSE",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(motorcycles)
    }

    pub async fn vin_exists(&self, vin: &str, exclude_id: Option<Uuid>) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM motorcycles WHERE vin = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(vin)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn license_plate_exists(
        &self,
        license_plate: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM motorcycles WHERE license_plate = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(license_plate)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn update(
        &self,
        id: Uuid,
        changes: MotorcycleChanges,
    ) -> Result<Motorcycle, AppError> {
        let motorcycle = sqlx::query_as::<_, Motorcycle>(
            r#"
            UPDATE motorcycles SET
                name = COALESCE($2, name),
                license_plate = COALESCE($3, license_plate),
                vin = COALESCE($4, vin),
                current_mileage = COALESCE($5, current_mileage),
                is_active = COALESCE($6, is_active),
                is_archived = COALESCE($7, is_archived),
                notes = COALESCE($8, notes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.license_plate)
        .bind(changes.vin)
        .bind(changes.current_mileage)
        .bind(changes.is_active)
        .bind(changes.is_archived)
        .bind(changes.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(motorcycle)
    }

    pub async fn archive(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE motorcycles SET is_archived = TRUE, is_active = FALSE, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn restore(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE motorcycles SET is_archived = FALSE, is_active = TRUE, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn set_mileage(&self, id: Uuid, mileage: Decimal) -> Result<Motorcycle, AppError> {
        let motorcycle = sqlx::query_as::<_, Motorcycle>(
            "UPDATE motorcycles SET current_mileage = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(mileage)
        .fetch_one(&self.pool)
        .await?;

        Ok(motorcycle)
    }

    /// Subir el kilometraje solo si el nuevo valor es mayor al actual.
    /// Las escrituras indirectas nunca lo bajan.
    pub async fn raise_mileage(&self, id: Uuid, mileage: Decimal) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE motorcycles SET current_mileage = $2, updated_at = NOW() WHERE id = $1 AND current_mileage < $2",
        )
        .bind(id)
        .bind(mileage)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn count_all(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM motorcycles")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn count_active(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM motorcycles WHERE is_active = TRUE AND is_archived = FALSE",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    pub async fn count_maintenance_records(&self, motorcycle_id: Uuid) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM maintenance_records WHERE motorcycle_id = $1")
                .bind(motorcycle_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    pub async fn count_parts(&self, motorcycle_id: Uuid) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM parts WHERE motorcycle_id = $1")
            .bind(motorcycle_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn count_ride_logs(&self, motorcycle_id: Uuid) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM ride_logs WHERE motorcycle_id = $1")
                .bind(motorcycle_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}
