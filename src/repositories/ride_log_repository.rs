use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::ride_log::RideLog;
use crate::utils::errors::AppError;

// Campos para el INSERT de ride_logs
#[derive(Debug)]
pub struct NewRideLog {
    pub motorcycle_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub start_mileage: Decimal,
    pub end_mileage: Option<Decimal>,
    pub distance: Option<Decimal>,
    pub fuel_consumed: Option<Decimal>,
    pub fuel_cost: Option<Decimal>,
    pub fuel_efficiency: Option<Decimal>,
    pub start_location: Option<String>,
    pub end_location: Option<String>,
    pub route_description: Option<String>,
    pub weather_conditions: Option<String>,
    pub road_conditions: Option<String>,
    pub trip_type: Option<String>,
    pub notes: Option<String>,
}

// Valores finales (ya combinados y re-derivados por el controller) para el UPDATE
#[derive(Debug)]
pub struct RideLogChanges {
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub start_mileage: Decimal,
    pub end_mileage: Option<Decimal>,
    pub distance: Option<Decimal>,
    pub fuel_consumed: Option<Decimal>,
    pub fuel_cost: Option<Decimal>,
    pub fuel_efficiency: Option<Decimal>,
    pub start_location: Option<String>,
    pub end_location: Option<String>,
    pub route_description: Option<String>,
    pub weather_conditions: Option<String>,
    pub road_conditions: Option<String>,
    pub trip_type: Option<String>,
    pub notes: Option<String>,
}

#[derive(Clone)]
pub struct RideLogRepository {
    pool: PgPool,
}

impl RideLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, data: NewRideLog) -> Result<RideLog, AppError> {
        let log = sqlx::query_as::<_, RideLog>(
            r#"
            INSERT INTO ride_logs (
                id, motorcycle_id, start_date, end_date, start_mileage, end_mileage,
                distance, fuel_consumed, fuel_cost, fuel_efficiency, start_location,
                end_location, route_description, weather_conditions, road_conditions,
                trip_type, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.motorcycle_id)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.start_mileage)
        .bind(data.end_mileage)
        .bind(data.distance)
        .bind(data.fuel_consumed)
        .bind(data.fuel_cost)
        .bind(data.fuel_efficiency)
        .bind(data.start_location)
        .bind(data.end_location)
        .bind(data.route_description)
        .bind(data.weather_conditions)
        .bind(data.road_conditions)
        .bind(data.trip_type)
        .bind(data.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(log)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<RideLog>, AppError> {
        let log = sqlx::query_as::<_, RideLog>("SELECT * FROM ride_logs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(log)
    }

    pub async fn list(
        &self,
        motorcycle_id: Option<Uuid>,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<RideLog>, AppError> {
        let logs = sqlx::query_as::<_, RideLog>(
            r#"
            SELECT * FROM ride_logs
            WHERE ($1::uuid IS NULL OR motorcycle_id = $1)
            ORDER BY start_date DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(motorcycle_id)
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    pub async fn update(&self, id: Uuid, changes: RideLogChanges) -> Result<RideLog, AppError> {
        let log = sqlx::query_as::<_, RideLog>(
            r#"
            UPDATE ride_logs SET
                start_date = $2,
                end_date = $3,
                start_mileage = $4,
                end_mileage = $5,
                distance = $6,
                fuel_consumed = $7,
                fuel_cost = $8,
                fuel_efficiency = $9,
                start_location = $10,
                end_location = $11,
                route_description = $12,
                weather_conditions = $13,
                road_conditions = $14,
                trip_type = $15,
                notes = $16,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.start_date)
        .bind(changes.end_date)
        .bind(changes.start_mileage)
        .bind(changes.end_mileage)
        .bind(changes.distance)
        .bind(changes.fuel_consumed)
        .bind(changes.fuel_cost)
        .bind(changes.fuel_efficiency)
        .bind(changes.start_location)
        .bind(changes.end_location)
        .bind(changes.route_description)
        .bind(changes.weather_conditions)
        .bind(changes.road_conditions)
        .bind(changes.trip_type)
        .bind(changes.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(log)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM ride_logs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn list_between(
        &self,
        motorcycle_id: Uuid,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> Result<Vec<RideLog>, AppError> {
        let logs = sqlx::query_as::<_, RideLog>(
            r#"
            SELECT * FROM ride_logs
            WHERE motorcycle_id = $1
              AND ($2::timestamptz IS NULL OR start_date >= $2)
              AND ($3::timestamptz IS NULL OR start_date <= $3)
            "#,
        )
        .bind(motorcycle_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    pub async fn list_with_fuel(
        &self,
        motorcycle_id: Option<Uuid>,
    ) -> Result<Vec<RideLog>, AppError> {
        let logs = sqlx::query_as::<_, RideLog>(
            r#"
            SELECT * FROM ride_logs
            WHERE fuel_consumed IS NOT NULL
              AND fuel_consumed > 0
              AND ($1::uuid IS NULL OR motorcycle_id = $1)
            "#,
        )
        .bind(motorcycle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }
}
