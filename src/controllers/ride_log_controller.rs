use rust_decimal::Decimal;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

use crate::dto::motorcycle_dto::ApiResponse;
use crate::dto::ride_log_dto::{
    CreateRideLogRequest, EfficiencyEntry, FuelStatistics, RideLogFilters, RideLogResponse,
    RideSummary, UpdateRideLogRequest,
};
use crate::models::ride_log::RideLog;
use crate::repositories::motorcycle_repository::MotorcycleRepository;
use crate::repositories::ride_log_repository::{NewRideLog, RideLogChanges, RideLogRepository};
use crate::utils::errors::AppError;
use crate::utils::validation::{
    decimal_from_f64, decimal_to_f64, opt_decimal_from_f64, parse_datetime_filter,
};

pub struct RideLogController {
    repository: RideLogRepository,
    motorcycles: MotorcycleRepository,
}

impl RideLogController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: RideLogRepository::new(pool.clone()),
            motorcycles: MotorcycleRepository::new(pool),
        }
    }

    pub async fn list(&self, filters: RideLogFilters) -> Result<Vec<RideLogResponse>, AppError> {
        let limit = filters.limit.unwrap_or(100).clamp(1, 100);
        let skip = filters.skip.unwrap_or(0).max(0);

        let logs = self
            .repository
            .list(filters.motorcycle_id, skip, limit)
            .await?;

        Ok(logs.into_iter().map(RideLogResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<RideLogResponse, AppError> {
        let log = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ride log not found".to_string()))?;

        Ok(log.into())
    }

    pub async fn create(
        &self,
        request: CreateRideLogRequest,
    ) -> Result<ApiResponse<RideLogResponse>, AppError> {
        request.validate()?;

        self.motorcycles
            .find_by_id(request.motorcycle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Motorcycle not found".to_string()))?;

        let start_mileage = decimal_from_f64(request.start_mileage, "start_mileage")?;
        let end_mileage = opt_decimal_from_f64(request.end_mileage, "end_mileage")?;
        let fuel_consumed = opt_decimal_from_f64(request.fuel_consumed, "fuel_consumed")?;

        let (distance, fuel_efficiency) = derive_metrics(start_mileage, end_mileage, fuel_consumed);

        let data = NewRideLog {
            motorcycle_id: request.motorcycle_id,
            start_date: request.start_date,
            end_date: request.end_date,
            start_mileage,
            end_mileage,
            distance,
            fuel_consumed,
            fuel_cost: opt_decimal_from_f64(request.fuel_cost, "fuel_cost")?,
            fuel_efficiency,
            start_location: request.start_location,
            end_location: request.end_location,
            route_description: request.route_description,
            weather_conditions: request.weather_conditions,
            road_conditions: request.road_conditions,
            trip_type: request.trip_type,
            notes: request.notes,
        };

        let log = self.repository.create(data).await?;

        // El kilometraje final del viaje solo sube la kilometría de la moto
        if let Some(end_mileage) = log.end_mileage {
            self.motorcycles
                .raise_mileage(log.motorcycle_id, end_mileage)
                .await?;
        }

        Ok(ApiResponse::success_with_message(
            log.into(),
            "Viaje registrado exitosamente".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateRideLogRequest,
    ) -> Result<ApiResponse<RideLogResponse>, AppError> {
        request.validate()?;

        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ride log not found".to_string()))?;

        let start_mileage = opt_decimal_from_f64(request.start_mileage, "start_mileage")?
            .unwrap_or(current.start_mileage);
        let end_mileage =
            opt_decimal_from_f64(request.end_mileage, "end_mileage")?.or(current.end_mileage);
        let fuel_consumed = opt_decimal_from_f64(request.fuel_consumed, "fuel_consumed")?
            .or(current.fuel_consumed);

        let (distance, fuel_efficiency) = derive_metrics(start_mileage, end_mileage, fuel_consumed);

        let changes = RideLogChanges {
            start_date: request.start_date.unwrap_or(current.start_date),
            end_date: request.end_date.or(current.end_date),
            start_mileage,
            end_mileage,
            distance,
            fuel_consumed,
            fuel_cost: opt_decimal_from_f64(request.fuel_cost, "fuel_cost")?.or(current.fuel_cost),
            fuel_efficiency,
            start_location: request.start_location.or(current.start_location),
            end_location: request.end_location.or(current.end_location),
            route_description: request.route_description.or(current.route_description),
            weather_conditions: request.weather_conditions.or(current.weather_conditions),
            road_conditions: request.road_conditions.or(current.road_conditions),
            trip_type: request.trip_type.or(current.trip_type),
            notes: request.notes.or(current.notes),
        };

        let log = self.repository.update(id, changes).await?;

        if let Some(end_mileage) = log.end_mileage {
            self.motorcycles
                .raise_mileage(log.motorcycle_id, end_mileage)
                .await?;
        }

        Ok(ApiResponse::success_with_message(
            log.into(),
            "Viaje actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound("Ride log not found".to_string()));
        }
        Ok(())
    }

    pub async fn summary(
        &self,
        motorcycle_id: Uuid,
        start_date: Option<String>,
        end_date: Option<String>,
    ) -> Result<RideSummary, AppError> {
        self.motorcycles
            .find_by_id(motorcycle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Motorcycle not found".to_string()))?;

        let start = parse_datetime_filter(start_date.as_deref(), "start_date")?;
        let end = parse_datetime_filter(end_date.as_deref(), "end_date")?;

        let logs = self
            .repository
            .list_between(motorcycle_id, start, end)
            .await?;

        Ok(summarize_rides(&logs))
    }

    pub async fn fuel_statistics(
        &self,
        motorcycle_id: Option<Uuid>,
    ) -> Result<FuelStatistics, AppError> {
        let logs = self.repository.list_with_fuel(motorcycle_id).await?;
        Ok(fuel_statistics(&logs))
    }
}

/// Derivar distancia y eficiencia de combustible de un viaje.
/// La eficiencia solo se calcula con combustible estrictamente positivo.
fn derive_metrics(
    start_mileage: Decimal,
    end_mileage: Option<Decimal>,
    fuel_consumed: Option<Decimal>,
) -> (Option<Decimal>, Option<Decimal>) {
    let distance = end_mileage.map(|end| end - start_mileage);
    let fuel_efficiency = match (distance, fuel_consumed) {
        (Some(distance), Some(fuel)) if fuel > Decimal::ZERO => Some(distance / fuel),
        _ => None,
    };
    (distance, fuel_efficiency)
}

fn summarize_rides(logs: &[RideLog]) -> RideSummary {
    if logs.is_empty() {
        return RideSummary {
            total_rides: 0,
            total_distance: 0.0,
            total_fuel: 0.0,
            total_fuel_cost: 0.0,
            average_efficiency: 0.0,
            most_common_trip_type: None,
        };
    }

    let total_distance: Decimal = logs.iter().filter_map(|l| l.distance).sum();
    let total_fuel: Decimal = logs.iter().filter_map(|l| l.fuel_consumed).sum();
    let total_fuel_cost: Decimal = logs.iter().filter_map(|l| l.fuel_cost).sum();

    let efficiencies: Vec<Decimal> = logs.iter().filter_map(|l| l.fuel_efficiency).collect();
    let average_efficiency = if efficiencies.is_empty() {
        0.0
    } else {
        decimal_to_f64(efficiencies.iter().copied().sum::<Decimal>()) / efficiencies.len() as f64
    };

    let mut trip_types: HashMap<&str, usize> = HashMap::new();
    for log in logs {
        if let Some(trip_type) = &log.trip_type {
            *trip_types.entry(trip_type.as_str()).or_insert(0) += 1;
        }
    }
    let most_common_trip_type = trip_types
        .into_iter()
        .max_by_key(|(_, count)| *count)
        .map(|(trip_type, _)| trip_type.to_string());

    RideSummary {
        total_rides: logs.len() as i64,
        total_distance: decimal_to_f64(total_distance),
        total_fuel: decimal_to_f64(total_fuel),
        total_fuel_cost: decimal_to_f64(total_fuel_cost),
        average_efficiency,
        most_common_trip_type,
    }
}

fn fuel_statistics(logs: &[RideLog]) -> FuelStatistics {
    if logs.is_empty() {
        return FuelStatistics {
            total_fuel_consumed: 0.0,
            total_fuel_cost: 0.0,
            average_price_per_liter: 0.0,
            best_efficiency: None,
            worst_efficiency: None,
            average_efficiency: 0.0,
        };
    }

    let total_fuel: Decimal = logs.iter().filter_map(|l| l.fuel_consumed).sum();
    let total_cost: Decimal = logs.iter().filter_map(|l| l.fuel_cost).sum();

    // Precio promedio por litro: media de costo/litro de los viajes con costo
    let prices: Vec<Decimal> = logs
        .iter()
        .filter_map(|l| match (l.fuel_consumed, l.fuel_cost) {
            (Some(fuel), Some(cost)) if fuel > Decimal::ZERO => Some(cost / fuel),
            _ => None,
        })
        .collect();
    let average_price_per_liter = if prices.is_empty() {
        0.0
    } else {
        decimal_to_f64(prices.iter().copied().sum::<Decimal>()) / prices.len() as f64
    };

    let with_efficiency: Vec<&RideLog> =
        logs.iter().filter(|l| l.fuel_efficiency.is_some()).collect();

    let entry = |log: &RideLog| EfficiencyEntry {
        value: decimal_to_f64(log.fuel_efficiency.unwrap_or(Decimal::ZERO)),
        date: log.start_date,
        trip_type: log.trip_type.clone(),
    };

    let best_efficiency = with_efficiency
        .iter()
        .max_by_key(|l| l.fuel_efficiency.unwrap_or(Decimal::ZERO))
        .map(|l| entry(l));
    let worst_efficiency = with_efficiency
        .iter()
        .min_by_key(|l| l.fuel_efficiency.unwrap_or(Decimal::ZERO))
        .map(|l| entry(l));

    let average_efficiency = if with_efficiency.is_empty() {
        0.0
    } else {
        let sum: Decimal = with_efficiency
            .iter()
            .filter_map(|l| l.fuel_efficiency)
            .sum();
        decimal_to_f64(sum) / with_efficiency.len() as f64
    };

    FuelStatistics {
        total_fuel_consumed: decimal_to_f64(total_fuel),
        total_fuel_cost: decimal_to_f64(total_cost),
        average_price_per_liter,
        best_efficiency,
        worst_efficiency,
        average_efficiency,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn date(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, d, 8, 0, 0).unwrap()
    }

    fn ride(
        distance: Option<i64>,
        fuel: Option<&str>,
        cost: Option<i64>,
        efficiency: Option<&str>,
        trip_type: Option<&str>,
    ) -> RideLog {
        RideLog {
            id: Uuid::new_v4(),
            motorcycle_id: Uuid::new_v4(),
            start_date: date(1),
            end_date: None,
            start_mileage: Decimal::from(1_000),
            end_mileage: distance.map(|d| Decimal::from(1_000 + d)),
            distance: distance.map(Decimal::from),
            fuel_consumed: fuel.map(|f| f.parse().unwrap()),
            fuel_cost: cost.map(Decimal::from),
            fuel_efficiency: efficiency.map(|e| e.parse().unwrap()),
            start_location: None,
            end_location: None,
            route_description: None,
            weather_conditions: None,
            road_conditions: None,
            trip_type: trip_type.map(|t| t.to_string()),
            notes: None,
            created_at: date(1),
            updated_at: date(1),
        }
    }

    #[test]
    fn metrics_derive_distance_and_efficiency() {
        let (distance, efficiency) = derive_metrics(
            Decimal::from(1_000),
            Some(Decimal::from(1_250)),
            Some(Decimal::from(10)),
        );
        assert_eq!(distance, Some(Decimal::from(250)));
        assert_eq!(efficiency, Some(Decimal::from(25)));
    }

    #[test]
    fn metrics_without_end_mileage_are_empty() {
        let (distance, efficiency) =
            derive_metrics(Decimal::from(1_000), None, Some(Decimal::from(10)));
        assert_eq!(distance, None);
        assert_eq!(efficiency, None);
    }

    #[test]
    fn metrics_guard_against_zero_fuel() {
        let (distance, efficiency) = derive_metrics(
            Decimal::from(1_000),
            Some(Decimal::from(1_100)),
            Some(Decimal::ZERO),
        );
        assert_eq!(distance, Some(Decimal::from(100)));
        assert_eq!(efficiency, None);
    }

    #[test]
    fn summary_of_empty_set_is_zeroed() {
        let summary = summarize_rides(&[]);
        assert_eq!(summary.total_rides, 0);
        assert_eq!(summary.total_distance, 0.0);
        assert_eq!(summary.most_common_trip_type, None);
    }

    #[test]
    fn summary_totals_and_most_common_trip() {
        let logs = vec![
            ride(Some(100), Some("5"), Some(8), Some("20"), Some("commute")),
            ride(Some(200), Some("10"), Some(16), Some("20"), Some("commute")),
            ride(Some(50), None, None, None, Some("touring")),
        ];
        let summary = summarize_rides(&logs);

        assert_eq!(summary.total_rides, 3);
        assert_eq!(summary.total_distance, 350.0);
        assert_eq!(summary.total_fuel, 15.0);
        assert_eq!(summary.total_fuel_cost, 24.0);
        assert_eq!(summary.average_efficiency, 20.0);
        assert_eq!(summary.most_common_trip_type, Some("commute".to_string()));
    }

    #[test]
    fn fuel_statistics_find_best_and_worst() {
        let logs = vec![
            ride(Some(100), Some("5"), Some(10), Some("20"), Some("commute")),
            ride(Some(300), Some("10"), Some(15), Some("30"), Some("touring")),
        ];
        let stats = fuel_statistics(&logs);

        assert_eq!(stats.total_fuel_consumed, 15.0);
        assert_eq!(stats.total_fuel_cost, 25.0);
        // (10/5 + 15/10) / 2
        assert_eq!(stats.average_price_per_liter, 1.75);
        assert_eq!(stats.best_efficiency.as_ref().unwrap().value, 30.0);
        assert_eq!(stats.worst_efficiency.as_ref().unwrap().value, 20.0);
        assert_eq!(stats.average_efficiency, 25.0);
    }

    #[test]
    fn fuel_statistics_of_empty_set_is_zeroed() {
        let stats = fuel_statistics(&[]);
        assert_eq!(stats.total_fuel_consumed, 0.0);
        assert_eq!(stats.best_efficiency, None);
        assert_eq!(stats.worst_efficiency, None);
    }
}
