use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::collections::BTreeMap;
use uuid::Uuid;
use validator::Validate;

use crate::dto::motorcycle_dto::ApiResponse;
use crate::dto::part_dto::{
    CreatePartRequest, PartCategorySummary, PartFilters, PartResponse, PartsExpenseSummary,
    ReplacementDueItem, RestockPartRequest, UpdatePartRequest, UsePartRequest,
};
use crate::models::part::Part;
use crate::repositories::motorcycle_repository::MotorcycleRepository;
use crate::repositories::part_repository::{NewPart, PartChanges, PartRepository, ReplacementRow};
use crate::utils::errors::AppError;
use crate::utils::validation::{decimal_to_f64, opt_decimal_from_f64, parse_datetime_filter};

/// Banda de proximidad por kilometraje antes del reemplazo
const REPLACEMENT_WARNING_BAND_KM: i64 = 1000;

/// Promedio de días por mes para los intervalos de reemplazo por tiempo
const AVERAGE_DAYS_PER_MONTH: f64 = 30.44;

pub struct PartController {
    repository: PartRepository,
    motorcycles: MotorcycleRepository,
}

impl PartController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PartRepository::new(pool.clone()),
            motorcycles: MotorcycleRepository::new(pool),
        }
    }

    pub async fn list(&self, filters: PartFilters) -> Result<Vec<PartResponse>, AppError> {
        let limit = filters.limit.unwrap_or(100).clamp(1, 100);
        let skip = filters.skip.unwrap_or(0).max(0);

        let parts = self
            .repository
            .list(
                filters.motorcycle_id,
                filters.category,
                filters.in_stock_only.unwrap_or(false),
                skip,
                limit,
            )
            .await?;

        Ok(parts.into_iter().map(PartResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<PartResponse, AppError> {
        let part = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Part not found".to_string()))?;

        Ok(part.into())
    }

    pub async fn create(
        &self,
        request: CreatePartRequest,
    ) -> Result<ApiResponse<PartResponse>, AppError> {
        request.validate()?;

        self.motorcycles
            .find_by_id(request.motorcycle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Motorcycle not found".to_string()))?;

        let data = NewPart {
            motorcycle_id: request.motorcycle_id,
            name: request.name,
            part_number: request.part_number,
            manufacturer: request.manufacturer,
            category: request.category,
            quantity_in_stock: request.quantity_in_stock.unwrap_or(0),
            quantity_used: request.quantity_used.unwrap_or(0),
            unit_price: opt_decimal_from_f64(request.unit_price, "unit_price")?,
            total_cost: opt_decimal_from_f64(request.total_cost, "total_cost")?,
            currency: request.currency.unwrap_or_else(|| "EUR".to_string()),
            purchase_date: request.purchase_date,
            vendor: request.vendor,
            installed_date: request.installed_date,
            installed_mileage: opt_decimal_from_f64(request.installed_mileage, "installed_mileage")?,
            replacement_interval_km: opt_decimal_from_f64(
                request.replacement_interval_km,
                "replacement_interval_km",
            )?,
            replacement_interval_months: request.replacement_interval_months,
            installation_notes: request.installation_notes,
            is_installed: request.is_installed.unwrap_or(false),
            is_consumable: request.is_consumable.unwrap_or(false),
        };

        let part = self.repository.create(data).await?;

        Ok(ApiResponse::success_with_message(
            part.into(),
            "Repuesto registrado exitosamente".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdatePartRequest,
    ) -> Result<ApiResponse<PartResponse>, AppError> {
        request.validate()?;

        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Part not found".to_string()))?;

        let changes = PartChanges {
            name: request.name,
            part_number: request.part_number,
            manufacturer: request.manufacturer,
            category: request.category,
            quantity_in_stock: request.quantity_in_stock,
            unit_price: opt_decimal_from_f64(request.unit_price, "unit_price")?,
            total_cost: opt_decimal_from_f64(request.total_cost, "total_cost")?,
            purchase_date: request.purchase_date,
            vendor: request.vendor,
            installed_date: request.installed_date,
            installed_mileage: opt_decimal_from_f64(request.installed_mileage, "installed_mileage")?,
            replacement_interval_km: opt_decimal_from_f64(
                request.replacement_interval_km,
                "replacement_interval_km",
            )?,
            replacement_interval_months: request.replacement_interval_months,
            installation_notes: request.installation_notes,
            is_installed: request.is_installed,
            is_consumable: request.is_consumable,
        };

        let part = self.repository.update(id, changes).await?;

        Ok(ApiResponse::success_with_message(
            part.into(),
            "Repuesto actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound("Part not found".to_string()));
        }
        Ok(())
    }

    /// Consumir stock: falla si no hay unidades suficientes
    pub async fn use_part(
        &self,
        id: Uuid,
        request: UsePartRequest,
    ) -> Result<PartResponse, AppError> {
        request.validate()?;

        let part = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Part not found".to_string()))?;

        if part.quantity_in_stock < request.quantity {
            return Err(AppError::BadRequest(format!(
                "Not enough parts in stock. Available: {}",
                part.quantity_in_stock
            )));
        }

        let updated = self.repository.apply_usage(id, request.quantity).await?;
        Ok(updated.into())
    }

    pub async fn restock(
        &self,
        id: Uuid,
        request: RestockPartRequest,
    ) -> Result<PartResponse, AppError> {
        request.validate()?;

        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Part not found".to_string()))?;

        let unit_price = opt_decimal_from_f64(request.unit_price, "unit_price")?;
        let added_cost = unit_price.map(|price| price * Decimal::from(request.quantity));

        let updated = self
            .repository
            .apply_restock(id, request.quantity, unit_price, added_cost)
            .await?;

        Ok(updated.into())
    }

    pub async fn expenses(
        &self,
        motorcycle_id: Option<Uuid>,
        start_date: Option<String>,
        end_date: Option<String>,
    ) -> Result<PartsExpenseSummary, AppError> {
        let start = parse_datetime_filter(start_date.as_deref(), "start_date")?;
        let end = parse_datetime_filter(end_date.as_deref(), "end_date")?;

        let parts = self
            .repository
            .list_for_expenses(motorcycle_id, start, end)
            .await?;

        Ok(summarize_expenses(&parts))
    }

    pub async fn replacement_needed(
        &self,
        motorcycle_id: Option<Uuid>,
    ) -> Result<Vec<ReplacementDueItem>, AppError> {
        let rows = self
            .repository
            .list_replacement_candidates(motorcycle_id)
            .await?;
        let now = Utc::now();

        Ok(rows
            .iter()
            .filter_map(|row| classify_replacement(row, now))
            .collect())
    }

    pub async fn low_stock(
        &self,
        motorcycle_id: Option<Uuid>,
        threshold: Option<i32>,
    ) -> Result<Vec<PartResponse>, AppError> {
        let parts = self
            .repository
            .list_low_stock(motorcycle_id, threshold.unwrap_or(5).max(1))
            .await?;

        Ok(parts.into_iter().map(PartResponse::from).collect())
    }

    pub async fn by_category(
        &self,
        motorcycle_id: Uuid,
    ) -> Result<BTreeMap<String, Vec<PartCategorySummary>>, AppError> {
        self.motorcycles
            .find_by_id(motorcycle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Motorcycle not found".to_string()))?;

        let parts = self.repository.list_by_motorcycle(motorcycle_id).await?;

        let mut categories: BTreeMap<String, Vec<PartCategorySummary>> = BTreeMap::new();
        for part in parts {
            let category = part
                .category
                .clone()
                .unwrap_or_else(|| "Uncategorized".to_string());
            categories.entry(category).or_default().push(PartCategorySummary {
                id: part.id,
                name: part.name,
                part_number: part.part_number,
                quantity_in_stock: part.quantity_in_stock,
                unit_price: part.unit_price.map(decimal_to_f64),
            });
        }

        Ok(categories)
    }
}

/// Resumen de gastos sobre un conjunto ya filtrado de repuestos
fn summarize_expenses(parts: &[Part]) -> PartsExpenseSummary {
    let total_cost: Decimal = parts.iter().filter_map(|p| p.total_cost).sum();
    let total_parts = parts.len() as i64;
    let total_stock_value: Decimal = parts
        .iter()
        .filter_map(|p| p.unit_price.map(|price| price * Decimal::from(p.quantity_in_stock)))
        .sum();

    let mut category_breakdown: BTreeMap<String, f64> = BTreeMap::new();
    for part in parts {
        let category = part
            .category
            .clone()
            .unwrap_or_else(|| "Uncategorized".to_string());
        *category_breakdown.entry(category).or_insert(0.0) +=
            decimal_to_f64(part.total_cost.unwrap_or(Decimal::ZERO));
    }

    let average_part_cost = if total_parts > 0 {
        decimal_to_f64(total_cost) / total_parts as f64
    } else {
        0.0
    };

    PartsExpenseSummary {
        total_cost: decimal_to_f64(total_cost),
        total_parts,
        total_stock_value: decimal_to_f64(total_stock_value),
        average_part_cost,
        category_breakdown,
    }
}

/// Clasificar un repuesto instalado contra su intervalo de reemplazo.
/// Compara contra el kilometraje actual de la moto dueña.
fn classify_replacement(row: &ReplacementRow, now: DateTime<Utc>) -> Option<ReplacementDueItem> {
    let mut needs_replacement = false;
    let mut reason = String::new();
    let mut priority = "medium";
    let mut due_mileage = None;

    if let (Some(interval), Some(installed)) = (row.replacement_interval_km, row.installed_mileage)
    {
        let due_at = installed + interval;
        due_mileage = Some(due_at);

        if row.current_mileage >= due_at {
            needs_replacement = true;
            priority = "high";
            reason = format!(
                "Mileage replacement overdue ({} km past due)",
                row.current_mileage - due_at
            );
        } else if row.current_mileage >= due_at - Decimal::from(REPLACEMENT_WARNING_BAND_KM) {
            needs_replacement = true;
            reason = format!("Approaching mileage replacement at {} km", due_at);
        }
    }

    if let (Some(months), Some(installed_date)) =
        (row.replacement_interval_months, row.installed_date)
    {
        let months_since_install = (now - installed_date).num_days() as f64 / AVERAGE_DAYS_PER_MONTH;
        if months_since_install >= months as f64 {
            needs_replacement = true;
            priority = "high";
            reason = format!("Time-based replacement due ({} months)", months);
        }
    }

    if !needs_replacement {
        return None;
    }

    Some(ReplacementDueItem {
        part_id: row.id,
        name: row.name.clone(),
        part_number: row.part_number.clone(),
        category: row.category.clone(),
        motorcycle_id: row.motorcycle_id,
        motorcycle_name: row.motorcycle_name.clone(),
        current_mileage: decimal_to_f64(row.current_mileage),
        due_mileage: due_mileage.map(decimal_to_f64),
        reason,
        priority: priority.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn replacement_row(
        interval_km: Option<i64>,
        installed_mileage: Option<i64>,
        interval_months: Option<i32>,
        installed_date: Option<DateTime<Utc>>,
        current_mileage: i64,
    ) -> ReplacementRow {
        ReplacementRow {
            id: Uuid::new_v4(),
            motorcycle_id: Uuid::new_v4(),
            name: "Kit de cadena".to_string(),
            part_number: Some("DID-520".to_string()),
            category: Some("Transmission".to_string()),
            installed_date,
            installed_mileage: installed_mileage.map(Decimal::from),
            replacement_interval_km: interval_km.map(Decimal::from),
            replacement_interval_months: interval_months,
            motorcycle_name: "CB500X".to_string(),
            current_mileage: Decimal::from(current_mileage),
        }
    }

    #[test]
    fn overdue_by_mileage_is_high() {
        let row = replacement_row(Some(20_000), Some(5_000), None, None, 26_000);
        let item = classify_replacement(&row, now()).unwrap();
        assert_eq!(item.priority, "high");
        assert_eq!(item.due_mileage, Some(25_000.0));
        assert!(item.reason.contains("overdue"));
    }

    #[test]
    fn approaching_mileage_is_medium() {
        let row = replacement_row(Some(20_000), Some(5_000), None, None, 24_500);
        let item = classify_replacement(&row, now()).unwrap();
        assert_eq!(item.priority, "medium");
    }

    #[test]
    fn fresh_part_is_not_flagged() {
        let row = replacement_row(Some(20_000), Some(5_000), None, None, 10_000);
        assert!(classify_replacement(&row, now()).is_none());
    }

    #[test]
    fn time_based_replacement_is_high() {
        let installed = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let row = replacement_row(None, None, Some(12), Some(installed), 10_000);
        let item = classify_replacement(&row, now()).unwrap();
        assert_eq!(item.priority, "high");
        assert!(item.reason.contains("12 months"));
    }

    #[test]
    fn recent_install_time_interval_is_not_flagged() {
        let installed = Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap();
        let row = replacement_row(None, None, Some(12), Some(installed), 10_000);
        assert!(classify_replacement(&row, now()).is_none());
    }

    fn part(category: Option<&str>, total_cost: Option<i64>, unit_price: Option<i64>, stock: i32) -> Part {
        Part {
            id: Uuid::new_v4(),
            motorcycle_id: Uuid::new_v4(),
            name: "Filtro de aceite".to_string(),
            part_number: None,
            manufacturer: None,
            category: category.map(|c| c.to_string()),
            quantity_in_stock: stock,
            quantity_used: 0,
            unit_price: unit_price.map(Decimal::from),
            total_cost: total_cost.map(Decimal::from),
            currency: "EUR".to_string(),
            purchase_date: None,
            vendor: None,
            installed_date: None,
            installed_mileage: None,
            replacement_interval_km: None,
            replacement_interval_months: None,
            installation_notes: None,
            is_installed: false,
            is_consumable: true,
            created_at: now(),
            updated_at: now(),
        }
    }

    #[test]
    fn expense_summary_groups_by_category() {
        let parts = vec![
            part(Some("Engine"), Some(30), Some(10), 2),
            part(Some("Engine"), Some(20), None, 0),
            part(None, Some(50), Some(5), 4),
        ];
        let summary = summarize_expenses(&parts);

        assert_eq!(summary.total_cost, 100.0);
        assert_eq!(summary.total_parts, 3);
        assert_eq!(summary.total_stock_value, 40.0);
        assert_eq!(summary.average_part_cost, 100.0 / 3.0);
        assert_eq!(summary.category_breakdown["Engine"], 50.0);
        assert_eq!(summary.category_breakdown["Uncategorized"], 50.0);
    }

    #[test]
    fn expense_summary_of_empty_set_is_zeroed() {
        let summary = summarize_expenses(&[]);
        assert_eq!(summary.total_cost, 0.0);
        assert_eq!(summary.total_parts, 0);
        assert_eq!(summary.average_part_cost, 0.0);
        assert!(summary.category_breakdown.is_empty());
    }
}
