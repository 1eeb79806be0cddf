//! Clasificación de mantenimiento próximo/vencido
//!
//! Transformaciones puras sobre el join de registros de mantenimiento y motos:
//! clasificación por prioridad, ordenamiento y resúmenes de costos. Todo el
//! trabajo ocurre en memoria sobre el result set ya consultado.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::dto::maintenance_dto::{MaintenanceCostSummary, UpcomingMaintenanceItem};
use crate::models::maintenance::MaintenanceRecord;
use crate::repositories::maintenance_repository::MaintenanceDueRow;
use crate::utils::validation::{decimal_to_f64, opt_decimal_to_f64};

pub const PRIORITY_HIGH: &str = "high";
pub const PRIORITY_MEDIUM: &str = "medium";
pub const PRIORITY_LOW: &str = "low";

/// Banda de proximidad por kilometraje antes del vencimiento
const MILEAGE_WARNING_BAND_KM: i64 = 1000;

/// Calcular la próxima programación de servicio a partir de los intervalos.
/// Los meses se aproximan a 30 días fijos.
pub fn next_service_schedule(
    performed_at: DateTime<Utc>,
    mileage_at_service: Decimal,
    interval_km: Option<Decimal>,
    interval_months: Option<i32>,
) -> (Option<DateTime<Utc>>, Option<Decimal>) {
    let next_date = interval_months.map(|months| performed_at + Duration::days(months as i64 * 30));
    let next_mileage = interval_km.map(|km| mileage_at_service + km);
    (next_date, next_mileage)
}

/// Clasificar un registro contra la fecha actual y la ventana de días.
/// Devuelve None cuando el registro no está vencido ni cae dentro de la ventana.
pub fn classify_due(
    row: &MaintenanceDueRow,
    today: NaiveDate,
    days_ahead: i64,
) -> Option<UpcomingMaintenanceItem> {
    let cutoff = today + Duration::days(days_ahead);

    let mut is_overdue = false;
    let mut days_overdue = None;
    let mut mileage_overdue = None;
    let mut priority = PRIORITY_LOW;

    if let Some(due_date) = row.next_service_date {
        let due_day = due_date.date_naive();
        if due_day < today {
            is_overdue = true;
            days_overdue = Some((today - due_day).num_days());
            priority = PRIORITY_HIGH;
        } else if due_day <= cutoff {
            let days_until = (due_day - today).num_days();
            if days_until <= 7 {
                priority = PRIORITY_HIGH;
            } else if days_until <= 30 {
                priority = PRIORITY_MEDIUM;
            }
        }
    }

    if let Some(due_mileage) = row.next_service_mileage {
        if row.current_mileage >= due_mileage {
            is_overdue = true;
            mileage_overdue = Some(row.current_mileage - due_mileage);
            priority = PRIORITY_HIGH;
        } else if row.current_mileage >= due_mileage - Decimal::from(MILEAGE_WARNING_BAND_KM)
            && priority != PRIORITY_HIGH
        {
            priority = PRIORITY_MEDIUM;
        }
    }

    let due_within_window = row
        .next_service_date
        .map(|d| d.date_naive() <= cutoff)
        .unwrap_or(false);

    if !is_overdue && !due_within_window {
        return None;
    }

    Some(UpcomingMaintenanceItem {
        id: row.id,
        motorcycle_id: row.motorcycle_id,
        motorcycle_name: row.motorcycle_name.clone(),
        service_name: row.service_name.clone(),
        service_type: row.service_type.clone(),
        due_date: row.next_service_date,
        due_mileage: opt_decimal_to_f64(row.next_service_mileage),
        current_mileage: decimal_to_f64(row.current_mileage),
        is_overdue,
        days_overdue,
        mileage_overdue: opt_decimal_to_f64(mileage_overdue),
        priority: priority.to_string(),
    })
}

fn priority_rank(priority: &str) -> u8 {
    match priority {
        PRIORITY_HIGH => 0,
        PRIORITY_MEDIUM => 1,
        _ => 2,
    }
}

/// Ordenar por (prioridad, fecha de vencimiento ascendente, sin fecha al final)
pub fn sort_upcoming(items: &mut [UpcomingMaintenanceItem]) {
    items.sort_by_key(|item| {
        (
            priority_rank(&item.priority),
            item.due_date.unwrap_or(DateTime::<Utc>::MAX_UTC),
        )
    });
}

/// Clasificar y ordenar el result set completo
pub fn upcoming_overview(
    rows: &[MaintenanceDueRow],
    today: NaiveDate,
    days_ahead: i64,
) -> Vec<UpcomingMaintenanceItem> {
    let mut items: Vec<UpcomingMaintenanceItem> = rows
        .iter()
        .filter_map(|row| classify_due(row, today, days_ahead))
        .collect();
    sort_upcoming(&mut items);
    items
}

/// Resumen de costos sobre un conjunto ya filtrado de registros completados
pub fn summarize_costs(records: &[MaintenanceRecord]) -> MaintenanceCostSummary {
    let total: Decimal = records.iter().map(|r| r.total_cost).sum();
    let labor: Decimal = records.iter().map(|r| r.labor_cost).sum();
    let parts: Decimal = records.iter().map(|r| r.parts_cost).sum();
    let count = records.len() as i64;

    let average = if count > 0 {
        decimal_to_f64(total) / count as f64
    } else {
        0.0
    };

    MaintenanceCostSummary {
        total_cost: decimal_to_f64(total),
        labor_cost: decimal_to_f64(labor),
        parts_cost: decimal_to_f64(parts),
        record_count: count,
        average_cost: average,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn row(
        next_date: Option<DateTime<Utc>>,
        next_mileage: Option<i64>,
        current_mileage: i64,
    ) -> MaintenanceDueRow {
        MaintenanceDueRow {
            id: Uuid::new_v4(),
            motorcycle_id: Uuid::new_v4(),
            motorcycle_name: "CB500X".to_string(),
            service_name: "Cambio de aceite".to_string(),
            service_type: "oil_change".to_string(),
            next_service_date: next_date,
            next_service_mileage: next_mileage.map(Decimal::from),
            current_mileage: Decimal::from(current_mileage),
        }
    }

    #[test]
    fn overdue_by_date_is_high_priority() {
        let item = classify_due(&row(Some(date(2025, 6, 5)), None, 10_000), today(), 60).unwrap();
        assert!(item.is_overdue);
        assert_eq!(item.days_overdue, Some(10));
        assert_eq!(item.priority, PRIORITY_HIGH);
    }

    #[test]
    fn due_within_a_week_is_high_priority() {
        let item = classify_due(&row(Some(date(2025, 6, 20)), None, 10_000), today(), 60).unwrap();
        assert!(!item.is_overdue);
        assert_eq!(item.days_overdue, None);
        assert_eq!(item.priority, PRIORITY_HIGH);
    }

    #[test]
    fn due_within_a_month_is_medium_priority() {
        let item = classify_due(&row(Some(date(2025, 7, 10)), None, 10_000), today(), 60).unwrap();
        assert_eq!(item.priority, PRIORITY_MEDIUM);
    }

    #[test]
    fn due_late_in_window_is_low_priority() {
        let item = classify_due(&row(Some(date(2025, 8, 10)), None, 10_000), today(), 60).unwrap();
        assert_eq!(item.priority, PRIORITY_LOW);
    }

    #[test]
    fn due_beyond_window_is_excluded() {
        assert!(classify_due(&row(Some(date(2025, 9, 1)), None, 10_000), today(), 60).is_none());
    }

    #[test]
    fn overdue_by_mileage_is_high_priority() {
        let item = classify_due(&row(None, Some(12_000), 12_500), today(), 60).unwrap();
        assert!(item.is_overdue);
        assert_eq!(item.mileage_overdue, Some(500.0));
        assert_eq!(item.priority, PRIORITY_HIGH);
    }

    #[test]
    fn approaching_mileage_without_date_is_excluded() {
        // Sin fecha de vencimiento solo se incluye cuando ya está vencido
        assert!(classify_due(&row(None, Some(12_000), 11_500), today(), 60).is_none());
    }

    #[test]
    fn approaching_mileage_with_far_date_is_medium() {
        let item =
            classify_due(&row(Some(date(2025, 8, 10)), Some(12_000), 11_500), today(), 60).unwrap();
        assert!(!item.is_overdue);
        assert_eq!(item.priority, PRIORITY_MEDIUM);
    }

    #[test]
    fn mileage_band_never_downgrades_high() {
        let item =
            classify_due(&row(Some(date(2025, 6, 17)), Some(12_000), 11_500), today(), 60).unwrap();
        assert_eq!(item.priority, PRIORITY_HIGH);
    }

    #[test]
    fn sort_puts_high_first_and_missing_dates_last() {
        let rows = vec![
            row(Some(date(2025, 7, 10)), None, 10_000),   // medium
            row(None, Some(9_000), 9_500),                // high, sin fecha
            row(Some(date(2025, 6, 5)), None, 10_000),    // high, con fecha
        ];
        let items = upcoming_overview(&rows, today(), 60);

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].priority, PRIORITY_HIGH);
        assert!(items[0].due_date.is_some());
        assert_eq!(items[1].priority, PRIORITY_HIGH);
        assert!(items[1].due_date.is_none());
        assert_eq!(items[2].priority, PRIORITY_MEDIUM);
    }

    #[test]
    fn next_schedule_uses_thirty_day_months() {
        let performed = date(2025, 1, 1);
        let (next_date, next_mileage) =
            next_service_schedule(performed, Decimal::from(8_000), Some(Decimal::from(3_000)), Some(6));

        assert_eq!(next_date, Some(performed + Duration::days(180)));
        assert_eq!(next_mileage, Some(Decimal::from(11_000)));
    }

    #[test]
    fn next_schedule_without_intervals_is_empty() {
        let (next_date, next_mileage) =
            next_service_schedule(date(2025, 1, 1), Decimal::from(8_000), None, None);
        assert_eq!(next_date, None);
        assert_eq!(next_mileage, None);
    }

    fn record(labor: i64, parts: i64) -> MaintenanceRecord {
        MaintenanceRecord {
            id: Uuid::new_v4(),
            motorcycle_id: Uuid::new_v4(),
            service_type: "oil_change".to_string(),
            service_name: "Cambio de aceite".to_string(),
            description: None,
            performed_at: date(2025, 3, 1),
            mileage_at_service: Decimal::from(9_000),
            next_service_mileage: None,
            next_service_date: None,
            service_interval_km: None,
            service_interval_months: None,
            labor_cost: Decimal::from(labor),
            parts_cost: Decimal::from(parts),
            total_cost: Decimal::from(labor + parts),
            currency: "EUR".to_string(),
            service_provider: None,
            technician: None,
            is_completed: true,
            is_scheduled: false,
            created_at: date(2025, 3, 1),
            updated_at: date(2025, 3, 1),
        }
    }

    #[test]
    fn cost_summary_totals_and_average() {
        let summary = summarize_costs(&[record(40, 60), record(10, 90)]);
        assert_eq!(summary.total_cost, 200.0);
        assert_eq!(summary.labor_cost, 50.0);
        assert_eq!(summary.parts_cost, 150.0);
        assert_eq!(summary.record_count, 2);
        assert_eq!(summary.average_cost, 100.0);
    }

    #[test]
    fn cost_summary_of_empty_set_is_zeroed() {
        let summary = summarize_costs(&[]);
        assert_eq!(summary.total_cost, 0.0);
        assert_eq!(summary.record_count, 0);
        assert_eq!(summary.average_cost, 0.0);
    }
}
