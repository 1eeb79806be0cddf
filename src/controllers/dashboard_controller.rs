use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::collections::HashSet;
use uuid::Uuid;

use crate::dto::dashboard_dto::{
    ActivityItem, DashboardStats, FleetBikeRef, FleetMileageRef, FleetSummary, MotorcycleHeader,
    MotorcycleOverview, PartsSummary, RecentMaintenanceItem,
};
use crate::dto::maintenance_dto::UpcomingMaintenanceItem;
use crate::models::motorcycle::Motorcycle;
use crate::models::part::Part;
use crate::repositories::maintenance_repository::MaintenanceRepository;
use crate::repositories::motorcycle_repository::MotorcycleRepository;
use crate::repositories::part_repository::PartRepository;
use crate::services::maintenance_service::upcoming_overview;
use crate::utils::errors::AppError;
use crate::utils::validation::decimal_to_f64;

/// Umbral de stock bajo para el resumen de repuestos
const LOW_STOCK_THRESHOLD: i32 = 5;

pub struct DashboardController {
    motorcycles: MotorcycleRepository,
    maintenance: MaintenanceRepository,
    parts: PartRepository,
}

impl DashboardController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            motorcycles: MotorcycleRepository::new(pool.clone()),
            maintenance: MaintenanceRepository::new(pool.clone()),
            parts: PartRepository::new(pool),
        }
    }

    pub async fn stats(&self) -> Result<DashboardStats, AppError> {
        let total_motorcycles = self.motorcycles.count_all().await?;
        let active_motorcycles = self.motorcycles.count_active().await?;

        let active_bikes = self.motorcycles.list_active().await?;
        let total_mileage: Decimal = active_bikes.iter().map(|b| b.current_mileage).sum();

        let due_rows = self.maintenance.list_due_rows(None).await?;
        let upcoming = upcoming_overview(&due_rows, Utc::now().date_naive(), 30);
        let upcoming_services = upcoming.len() as i64;
        let overdue_services = upcoming.iter().filter(|item| item.is_overdue).count() as i64;

        // Gastos de los últimos 30 días: mantenimiento completado + repuestos comprados
        let thirty_days_ago = Utc::now() - Duration::days(30);
        let maintenance_records = self
            .maintenance
            .list_completed(None, Some(thirty_days_ago), None)
            .await?;
        let maintenance_total: Decimal =
            maintenance_records.iter().map(|r| r.total_cost).sum();

        let recent_parts = self.parts.list_purchased_since(thirty_days_ago).await?;
        let parts_total: Decimal = recent_parts.iter().filter_map(|p| p.total_cost).sum();

        let activities = self.maintenance.list_recent_activities(10).await?;
        let recent_activities = activities
            .into_iter()
            .map(|row| ActivityItem {
                id: row.id,
                activity_type: "maintenance".to_string(),
                description: row.service_name,
                motorcycle_name: row.motorcycle_name,
                motorcycle_id: row.motorcycle_id,
                date: row.performed_at,
                mileage: decimal_to_f64(row.mileage_at_service),
                cost: decimal_to_f64(row.total_cost),
                service_type: row.service_type,
            })
            .collect();

        Ok(DashboardStats {
            total_motorcycles,
            active_motorcycles,
            total_mileage: decimal_to_f64(total_mileage),
            upcoming_services,
            overdue_services,
            monthly_expenses: decimal_to_f64(maintenance_total + parts_total),
            recent_activities,
        })
    }

    pub async fn maintenance_due(
        &self,
        motorcycle_id: Option<Uuid>,
        days_ahead: Option<i64>,
    ) -> Result<Vec<UpcomingMaintenanceItem>, AppError> {
        let rows = self.maintenance.list_due_rows(motorcycle_id).await?;
        let today = Utc::now().date_naive();

        Ok(upcoming_overview(&rows, today, days_ahead.unwrap_or(60).max(0)))
    }

    pub async fn motorcycle_overview(&self, id: Uuid) -> Result<MotorcycleOverview, AppError> {
        let motorcycle = self
            .motorcycles
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Motorcycle not found".to_string()))?;

        let due_rows = self.maintenance.list_due_rows(Some(id)).await?;
        let upcoming_maintenance = upcoming_overview(&due_rows, Utc::now().date_naive(), 60);

        let recent = self.maintenance.list_history(id, None, Some(5)).await?;
        let recent_maintenance = recent
            .into_iter()
            .map(|record| RecentMaintenanceItem {
                id: record.id,
                service_name: record.service_name,
                performed_at: record.performed_at,
                mileage: decimal_to_f64(record.mileage_at_service),
                cost: decimal_to_f64(record.total_cost),
                service_type: record.service_type,
            })
            .collect();

        let parts = self.parts.list_by_motorcycle(id).await?;
        let parts_summary = build_parts_summary(&parts);

        let twelve_months_ago = Utc::now() - Duration::days(365);
        let annual_records = self
            .maintenance
            .list_completed(Some(id), Some(twelve_months_ago), None)
            .await?;
        let annual_cost: Decimal = annual_records.iter().map(|r| r.total_cost).sum();

        Ok(MotorcycleOverview {
            motorcycle: MotorcycleHeader {
                id: motorcycle.id,
                name: motorcycle.name,
                make: motorcycle.make,
                model: motorcycle.model,
                year: motorcycle.year,
                current_mileage: decimal_to_f64(motorcycle.current_mileage),
                license_plate: motorcycle.license_plate,
            },
            upcoming_maintenance,
            recent_maintenance,
            parts_summary,
            annual_maintenance_cost: decimal_to_f64(annual_cost),
            maintenance_frequency: annual_records.len() as i64,
        })
    }

    pub async fn fleet_summary(&self) -> Result<FleetSummary, AppError> {
        let motorcycles = self.motorcycles.list_active().await?;
        Ok(build_fleet_summary(&motorcycles))
    }
}

fn build_parts_summary(parts: &[Part]) -> PartsSummary {
    let total_stock_value: Decimal = parts
        .iter()
        .filter_map(|p| p.unit_price.map(|price| price * Decimal::from(p.quantity_in_stock)))
        .sum();

    let low_stock_parts = parts
        .iter()
        .filter(|p| p.quantity_in_stock > 0 && p.quantity_in_stock <= LOW_STOCK_THRESHOLD)
        .count() as i64;

    let categories: HashSet<&str> = parts
        .iter()
        .filter_map(|p| p.category.as_deref())
        .collect();

    PartsSummary {
        total_parts: parts.len() as i64,
        total_stock_value: decimal_to_f64(total_stock_value),
        low_stock_parts,
        categories: categories.len() as i64,
    }
}

/// Resumen de flota sobre las motos activas.
/// Con flota vacía devuelve la forma todo-en-cero en lugar de fallar.
fn build_fleet_summary(motorcycles: &[Motorcycle]) -> FleetSummary {
    if motorcycles.is_empty() {
        return FleetSummary {
            total_motorcycles: 0,
            total_mileage: 0.0,
            average_mileage: 0.0,
            newest_motorcycle: None,
            highest_mileage: None,
            fleet_value: 0.0,
        };
    }

    let total_mileage: Decimal = motorcycles.iter().map(|m| m.current_mileage).sum();
    let average_mileage = decimal_to_f64(total_mileage) / motorcycles.len() as f64;
    let fleet_value: Decimal = motorcycles.iter().filter_map(|m| m.purchase_price).sum();

    let newest_motorcycle = motorcycles.iter().max_by_key(|m| m.year).map(|bike| FleetBikeRef {
        name: bike.name.clone(),
        year: bike.year,
        make: bike.make.clone(),
        model: bike.model.clone(),
    });

    let highest_mileage = motorcycles
        .iter()
        .max_by_key(|m| m.current_mileage)
        .map(|bike| FleetMileageRef {
            name: bike.name.clone(),
            mileage: decimal_to_f64(bike.current_mileage),
            make: bike.make.clone(),
            model: bike.model.clone(),
        });

    FleetSummary {
        total_motorcycles: motorcycles.len() as i64,
        total_mileage: decimal_to_f64(total_mileage),
        average_mileage,
        newest_motorcycle,
        highest_mileage,
        fleet_value: decimal_to_f64(fleet_value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bike(name: &str, year: i32, mileage: i64, price: Option<i64>) -> Motorcycle {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Motorcycle {
            id: Uuid::new_v4(),
            name: name.to_string(),
            make: "Honda".to_string(),
            model: "CB500X".to_string(),
            year,
            engine_size: Some(471),
            license_plate: None,
            vin: None,
            current_mileage: Decimal::from(mileage),
            purchase_date: None,
            purchase_price: price.map(Decimal::from),
            is_active: true,
            is_archived: false,
            notes: None,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn fleet_summary_of_empty_fleet_is_zeroed() {
        let summary = build_fleet_summary(&[]);
        assert_eq!(summary.total_motorcycles, 0);
        assert_eq!(summary.total_mileage, 0.0);
        assert_eq!(summary.average_mileage, 0.0);
        assert_eq!(summary.newest_motorcycle, None);
        assert_eq!(summary.highest_mileage, None);
        assert_eq!(summary.fleet_value, 0.0);
    }

    #[test]
    fn fleet_summary_picks_newest_and_highest_mileage() {
        let bikes = vec![
            bike("Vieja", 2010, 80_000, Some(2_000)),
            bike("Nueva", 2024, 3_000, Some(7_500)),
            bike("Media", 2018, 40_000, None),
        ];
        let summary = build_fleet_summary(&bikes);

        assert_eq!(summary.total_motorcycles, 3);
        assert_eq!(summary.total_mileage, 123_000.0);
        assert_eq!(summary.average_mileage, 41_000.0);
        assert_eq!(summary.newest_motorcycle.as_ref().unwrap().name, "Nueva");
        assert_eq!(summary.highest_mileage.as_ref().unwrap().name, "Vieja");
        assert_eq!(summary.fleet_value, 9_500.0);
    }

    fn part(category: Option<&str>, stock: i32, unit_price: Option<i64>) -> Part {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Part {
            id: Uuid::new_v4(),
            motorcycle_id: Uuid::new_v4(),
            name: "Pastillas de freno".to_string(),
            part_number: None,
            manufacturer: None,
            category: category.map(|c| c.to_string()),
            quantity_in_stock: stock,
            quantity_used: 0,
            unit_price: unit_price.map(Decimal::from),
            total_cost: None,
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
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn parts_summary_counts_low_stock_and_categories() {
        let parts = vec![
            part(Some("Brakes"), 2, Some(30)),
            part(Some("Brakes"), 0, Some(15)),
            part(Some("Engine"), 12, None),
        ];
        let summary = build_parts_summary(&parts);

        assert_eq!(summary.total_parts, 3);
        assert_eq!(summary.total_stock_value, 60.0);
        // Stock en cero no cuenta como stock bajo
        assert_eq!(summary.low_stock_parts, 1);
        assert_eq!(summary.categories, 2);
    }
}
