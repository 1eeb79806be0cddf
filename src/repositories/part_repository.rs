use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::part::Part;
use crate::utils::errors::AppError;

// Campos para el INSERT de parts
#[derive(Debug)]
pub struct NewPart {
    pub motorcycle_id: Uuid,
    pub name: String,
    pub part_number: Option<String>,
    pub manufacturer: Option<String>,
    pub category: Option<String>,
    pub quantity_in_stock: i32,
    pub quantity_used: i32,
    pub unit_price: Option<Decimal>,
    pub total_cost: Option<Decimal>,
    pub currency: String,
    pub purchase_date: Option<DateTime<Utc>>,
    pub vendor: Option<String>,
    pub installed_date: Option<DateTime<Utc>>,
    pub installed_mileage: Option<Decimal>,
    pub replacement_interval_km: Option<Decimal>,
    pub replacement_interval_months: Option<i32>,
    pub installation_notes: Option<String>,
    pub is_installed: bool,
    pub is_consumable: bool,
}

// Campos opcionales para el UPDATE parcial
#[derive(Debug, Default)]
pub struct PartChanges {
    pub name: Option<String>,
    pub part_number: Option<String>,
    pub manufacturer: Option<String>,
    pub category: Option<String>,
    pub quantity_in_stock: Option<i32>,
    pub unit_price: Option<Decimal>,
    pub total_cost: Option<Decimal>,
    pub purchase_date: Option<DateTime<Utc>>,
    pub vendor: Option<String>,
    pub installed_date: Option<DateTime<Utc>>,
    pub installed_mileage: Option<Decimal>,
    pub replacement_interval_km: Option<Decimal>,
    pub replacement_interval_months: Option<i32>,
    pub installation_notes: Option<String>,
    pub is_installed: Option<bool>,
    pub is_consumable: Option<bool>,
}

/// Fila del join parts + motorcycles para el cálculo de reemplazos
#[derive(Debug, Clone, FromRow)]
pub struct ReplacementRow {
    pub id: Uuid,
    pub motorcycle_id: Uuid,
    pub name: String,
    pub part_number: Option<String>,
    pub category: Option<String>,
    pub installed_date: Option<DateTime<Utc>>,
    pub installed_mileage: Option<Decimal>,
    pub replacement_interval_km: Option<Decimal>,
    pub replacement_interval_months: Option<i32>,
    pub motorcycle_name: String,
    pub current_mileage: Decimal,
}

#[derive(Clone)]
pub struct PartRepository {
    pool: PgPool,
}

impl PartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, data: NewPart) -> Result<Part, AppError> {
        let part = sqlx::query_as::<_, Part>(
            r#"
            INSERT INTO parts (
                id, motorcycle_id, name, part_number, manufacturer, category,
                quantity_in_stock, quantity_used, unit_price, total_cost, currency,
                purchase_date, vendor, installed_date, installed_mileage,
                replacement_interval_km, replacement_interval_months, installation_notes,
                is_installed, is_consumable
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.motorcycle_id)
        .bind(data.name)
        .bind(data.part_number)
        .bind(data.manufacturer)
        .bind(data.category)
        .bind(data.quantity_in_stock)
        .bind(data.quantity_used)
        .bind(data.unit_price)
        .bind(data.total_cost)
        .bind(data.currency)
        .bind(data.purchase_date)
        .bind(data.vendor)
        .bind(data.installed_date)
        .bind(data.installed_mileage)
        .bind(data.replacement_interval_km)
        .bind(data.replacement_interval_months)
        .bind(data.installation_notes)
        .bind(data.is_installed)
        .bind(data.is_consumable)
        .fetch_one(&self.pool)
        .await?;

        Ok(part)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Part>, AppError> {
        let part = sqlx::query_as::<_, Part>("SELECT * FROM parts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(part)
    }

    pub async fn list(
        &self,
        motorcycle_id: Option<Uuid>,
        category: Option<String>,
        in_stock_only: bool,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Part>, AppError> {
        let parts = sqlx::query_as::<_, Part>(
            r#"
            SELECT * FROM parts
            WHERE ($1::uuid IS NULL OR motorcycle_id = $1)
              AND ($2::text IS NULL OR category = $2)
              AND (NOT $3 OR quantity_in_stock > 0)
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(motorcycle_id)
        .bind(category)
        .bind(in_stock_only)
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        Ok(parts)
    }

    pub async fn list_by_motorcycle(&self, motorcycle_id: Uuid) -> Result<Vec<Part>, AppError> {
        let parts = sqlx::query_as::<_, Part>("SELECT * FROM parts WHERE motorcycle_id = $1")
            .bind(motorcycle_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(parts)
    }

    pub async fn update(&self, id: Uuid, changes: PartChanges) -> Result<Part, AppError> {
        let part = sqlx::query_as::<_, Part>(
            r#"
            UPDATE parts SET
                name = COALESCE($2, name),
                part_number = COALESCE($3, part_number),
                manufacturer = COALESCE($4, manufacturer),
                category = COALESCE($5, category),
                quantity_in_stock = COALESCE($6, quantity_in_stock),
                unit_price = COALESCE($7, unit_price),
                total_cost = COALESCE($8, total_cost),
                purchase_date = COALESCE($9, purchase_date),
                vendor = COALESCE($10, vendor),
                installed_date = COALESCE($11, installed_date),
                installed_mileage = COALESCE($12, installed_mileage),
                replacement_interval_km = COALESCE($13, replacement_interval_km),
                replacement_interval_months = COALESCE($14, replacement_interval_months),
                installation_notes = COALESCE($15, installation_notes),
                is_installed = COALESCE($16, is_installed),
                is_consumable = COALESCE($17, is_consumable),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.part_number)
        .bind(changes.manufacturer)
        .bind(changes.category)
        .bind(changes.quantity_in_stock)
        .bind(changes.unit_price)
        .bind(changes.total_cost)
        .bind(changes.purchase_date)
        .bind(changes.vendor)
        .bind(changes.installed_date)
        .bind(changes.installed_mileage)
        .bind(changes.replacement_interval_km)
        .bind(changes.replacement_interval_months)
        .bind(changes.installation_notes)
        .bind(changes.is_installed)
        .bind(changes.is_consumable)
        .fetch_one(&self.pool)
        .await?;

        Ok(part)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM parts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Consumir stock: baja quantity_in_stock y sube quantity_used.
    /// El controller valida antes que haya stock suficiente.
    pub async fn apply_usage(&self, id: Uuid, quantity: i32) -> Result<Part, AppError> {
        let part = sqlx::query_as::<_, Part>(
            r#"
            UPDATE parts SET
                quantity_in_stock = quantity_in_stock - $2,
                quantity_used = quantity_used + $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(quantity)
        .fetch_one(&self.pool)
        .await?;

        Ok(part)
    }

    pub async fn apply_restock(
        &self,
        id: Uuid,
        quantity: i32,
        unit_price: Option<Decimal>,
        added_cost: Option<Decimal>,
    ) -> Result<Part, AppError> {
        let part = sqlx::query_as::<_, Part>(
            r#"
            UPDATE parts SET
                quantity_in_stock = quantity_in_stock + $2,
                unit_price = COALESCE($3, unit_price),
                total_cost = CASE WHEN $4::numeric IS NULL THEN total_cost
                                  ELSE COALESCE(total_cost, 0) + $4 END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(quantity)
        .bind(unit_price)
        .bind(added_cost)
        .fetch_one(&self.pool)
        .await?;

        Ok(part)
    }

    pub async fn list_low_stock(
        &self,
        motorcycle_id: Option<Uuid>,
        threshold: i32,
    ) -> Result<Vec<Part>, AppError> {
        let parts = sqlx::query_as::<_, Part>(
            r#"
            SELECT * FROM parts
            WHERE quantity_in_stock <= $2
              AND quantity_in_stock > 0
              AND ($1::uuid IS NULL OR motorcycle_id = $1)
            ORDER BY quantity_in_stock ASC
            "#,
        )
        .bind(motorcycle_id)
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;

        Ok(parts)
    }

    pub async fn list_for_expenses(
        &self,
        motorcycle_id: Option<Uuid>,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> Result<Vec<Part>, AppError> {
        let parts = sqlx::query_as::<_, Part>(
            r#"
            SELECT * FROM parts
            WHERE ($1::uuid IS NULL OR motorcycle_id = $1)
              AND ($2::timestamptz IS NULL OR purchase_date >= $2)
              AND ($3::timestamptz IS NULL OR purchase_date <= $3)
            "#,
        )
        .bind(motorcycle_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(parts)
    }

    pub async fn list_purchased_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<Part>, AppError> {
        let parts = sqlx::query_as::<_, Part>("SELECT * FROM parts WHERE purchase_date >= $1")
            .bind(since)
            .fetch_all(&self.pool)
            .await?;

        Ok(parts)
    }

    /// Repuestos instalados con algún intervalo de reemplazo, junto con la moto
    pub async fn list_replacement_candidates(
        &self,
        motorcycle_id: Option<Uuid>,
    ) -> Result<Vec<ReplacementRow>, AppError> {
        let rows = sqlx::query_as::<_, ReplacementRow>(
            r#"
            SELECT p.id, p.motorcycle_id, p.name, p.part_number, p.category,
                   p.installed_date, p.installed_mileage, p.replacement_interval_km,
                   p.replacement_interval_months, m.name AS motorcycle_name, m.current_mileage
            FROM parts p
            JOIN motorcycles m ON m.id = p.motorcycle_id
            WHERE p.is_installed = TRUE
              AND (p.replacement_interval_km IS NOT NULL OR p.replacement_interval_months IS NOT NULL)
              AND ($1::uuid IS NULL OR p.motorcycle_id = $1)
            "#,
        )
        .bind(motorcycle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
