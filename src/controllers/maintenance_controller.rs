use chrono::{Duration, Utc};
use reqwest::Client;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::maintenance_dto::{
    BulkCompleteRequest, CreateMaintenanceRequest, MaintenanceCostSummary, MaintenanceFilters,
    MaintenanceResponse, UpcomingMaintenanceItem, UpdateMaintenanceRequest,
};
use crate::dto::motorcycle_dto::ApiResponse;
use crate::models::maintenance::{MaintenanceRecord, ServiceType};
use crate::models::motorcycle::Motorcycle;
use crate::repositories::maintenance_repository::{
    MaintenanceChanges, MaintenanceRepository, NewMaintenanceRecord,
};
use crate::repositories::motorcycle_repository::MotorcycleRepository;
use crate::services::maintenance_service::{
    next_service_schedule, summarize_costs, upcoming_overview,
};
use crate::services::webhook_service::WebhookService;
use crate::utils::errors::AppError;
use crate::utils::validation::{
    decimal_from_f64, decimal_to_f64, opt_decimal_from_f64, parse_datetime_filter,
};

pub struct MaintenanceController {
    repository: MaintenanceRepository,
    motorcycles: MotorcycleRepository,
    webhooks: WebhookService,
}

impl MaintenanceController {
    pub fn new(pool: PgPool, http_client: Client, webhook_timeout: u64) -> Self {
        Self {
            repository: MaintenanceRepository::new(pool.clone()),
            motorcycles: MotorcycleRepository::new(pool.clone()),
            webhooks: WebhookService::new(pool, http_client, webhook_timeout),
        }
    }

    pub async fn list(
        &self,
        filters: MaintenanceFilters,
    ) -> Result<Vec<MaintenanceResponse>, AppError> {
        let limit = filters.limit.unwrap_or(100).clamp(1, 100);
        let skip = filters.skip.unwrap_or(0).max(0);

        let records = self
            .repository
            .list(filters.motorcycle_id, skip, limit)
            .await?;

        Ok(records.into_iter().map(MaintenanceResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<MaintenanceResponse, AppError> {
        let record = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Maintenance record not found".to_string()))?;

        Ok(record.into())
    }

    pub async fn create(
        &self,
        request: CreateMaintenanceRequest,
    ) -> Result<ApiResponse<MaintenanceResponse>, AppError> {
        request.validate()?;

        let motorcycle = self
            .motorcycles
            .find_by_id(request.motorcycle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Motorcycle not found".to_string()))?;

        let mileage_at_service = decimal_from_f64(request.mileage_at_service, "mileage_at_service")?;
        let interval_km = opt_decimal_from_f64(request.service_interval_km, "service_interval_km")?;
        let labor_cost = decimal_from_f64(request.labor_cost.unwrap_or(0.0), "labor_cost")?;
        let parts_cost = decimal_from_f64(request.parts_cost.unwrap_or(0.0), "parts_cost")?;

        let (next_service_date, next_service_mileage) = next_service_schedule(
            request.performed_at,
            mileage_at_service,
            interval_km,
            request.service_interval_months,
        );

        let data = NewMaintenanceRecord {
            motorcycle_id: request.motorcycle_id,
            service_type: request.service_type.as_str().to_string(),
            service_name: request.service_name,
            description: request.description,
            performed_at: request.performed_at,
            mileage_at_service,
            next_service_mileage,
            next_service_date,
            service_interval_km: interval_km,
            service_interval_months: request.service_interval_months,
            labor_cost,
            parts_cost,
            total_cost: labor_cost + parts_cost,
            currency: request.currency.unwrap_or_else(|| "EUR".to_string()),
            service_provider: request.service_provider,
            technician: request.technician,
            is_completed: request.is_completed.unwrap_or(true),
            is_scheduled: request.is_scheduled.unwrap_or(false),
        };

        let record = self.repository.create(data).await?;

        // La kilometría de la moto solo sube por esta vía, nunca baja
        self.motorcycles
            .raise_mileage(record.motorcycle_id, record.mileage_at_service)
            .await?;

        if record.is_completed {
            self.notify_service_completed(&motorcycle, &record);
        }

        Ok(ApiResponse::success_with_message(
            record.into(),
            "Servicio registrado exitosamente".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateMaintenanceRequest,
    ) -> Result<ApiResponse<MaintenanceResponse>, AppError> {
        request.validate()?;

        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Maintenance record not found".to_string()))?;

        let intervals_changed =
            request.service_interval_km.is_some() || request.service_interval_months.is_some();

        let performed_at = request.performed_at.unwrap_or(current.performed_at);
        let mileage_at_service =
            opt_decimal_from_f64(request.mileage_at_service, "mileage_at_service")?
                .unwrap_or(current.mileage_at_service);
        let interval_km = opt_decimal_from_f64(request.service_interval_km, "service_interval_km")?
            .or(current.service_interval_km);
        let interval_months = request
            .service_interval_months
            .or(current.service_interval_months);

        let labor_cost = opt_decimal_from_f64(request.labor_cost, "labor_cost")?
            .unwrap_or(current.labor_cost);
        let parts_cost = opt_decimal_from_f64(request.parts_cost, "parts_cost")?
            .unwrap_or(current.parts_cost);

        let (next_service_date, next_service_mileage) = if intervals_changed {
            next_service_schedule(performed_at, mileage_at_service, interval_km, interval_months)
        } else {
            (current.next_service_date, current.next_service_mileage)
        };

        let changes = MaintenanceChanges {
            service_type: request
                .service_type
                .map(|s| s.as_str().to_string())
                .unwrap_or(current.service_type),
            service_name: request.service_name.unwrap_or(current.service_name),
            description: request.description.or(current.description),
            performed_at,
            mileage_at_service,
            next_service_mileage,
            next_service_date,
            service_interval_km: interval_km,
            service_interval_months: interval_months,
            labor_cost,
            parts_cost,
            total_cost: labor_cost + parts_cost,
            currency: request.currency.unwrap_or(current.currency),
            service_provider: request.service_provider.or(current.service_provider),
            technician: request.technician.or(current.technician),
            is_completed: request.is_completed.unwrap_or(current.is_completed),
            is_scheduled: request.is_scheduled.unwrap_or(current.is_scheduled),
        };

        let record = self.repository.update(id, changes).await?;

        Ok(ApiResponse::success_with_message(
            record.into(),
            "Servicio actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound("Maintenance record not found".to_string()));
        }
        Ok(())
    }

    pub async fn upcoming(
        &self,
        motorcycle_id: Option<Uuid>,
        days_ahead: Option<i64>,
    ) -> Result<Vec<UpcomingMaintenanceItem>, AppError> {
        let rows = self.repository.list_due_rows(motorcycle_id).await?;
        let today = Utc::now().date_naive();

        Ok(upcoming_overview(&rows, today, days_ahead.unwrap_or(60).max(0)))
    }

    pub async fn overdue(
        &self,
        motorcycle_id: Option<Uuid>,
    ) -> Result<Vec<UpcomingMaintenanceItem>, AppError> {
        let upcoming = self.upcoming(motorcycle_id, Some(0)).await?;
        Ok(upcoming.into_iter().filter(|item| item.is_overdue).collect())
    }

    pub async fn history(
        &self,
        motorcycle_id: Uuid,
        service_type: Option<String>,
    ) -> Result<Vec<MaintenanceResponse>, AppError> {
        if let Some(service_type) = &service_type {
            if ServiceType::parse(service_type).is_none() {
                return Err(AppError::BadRequest(format!(
                    "Unknown service type '{}'",
                    service_type
                )));
            }
        }

        self.motorcycles
            .find_by_id(motorcycle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Motorcycle not found".to_string()))?;

        let records = self
            .repository
            .list_history(motorcycle_id, service_type, None)
            .await?;

        Ok(records.into_iter().map(MaintenanceResponse::from).collect())
    }

    pub async fn costs(
        &self,
        motorcycle_id: Option<Uuid>,
        start_date: Option<String>,
        end_date: Option<String>,
    ) -> Result<MaintenanceCostSummary, AppError> {
        let start = parse_datetime_filter(start_date.as_deref(), "start_date")?;
        let end = parse_datetime_filter(end_date.as_deref(), "end_date")?;

        let records = self
            .repository
            .list_completed(motorcycle_id, start, end)
            .await?;

        Ok(summarize_costs(&records))
    }

    /// Marcar varios registros como completados y reprogramar desde los intervalos
    pub async fn bulk_complete(
        &self,
        request: BulkCompleteRequest,
    ) -> Result<Vec<MaintenanceResponse>, AppError> {
        if request.maintenance_ids.is_empty() {
            return Err(AppError::BadRequest("maintenance_ids must not be empty".to_string()));
        }

        let records = self.repository.find_by_ids(&request.maintenance_ids).await?;
        let now = Utc::now();
        let mut completed = Vec::with_capacity(records.len());

        for record in records {
            let motorcycle = self.motorcycles.find_by_id(record.motorcycle_id).await?;

            let mut mileage_at_service = record.mileage_at_service;
            let mut next_service_mileage = record.next_service_mileage;

            if let (Some(interval), Some(motorcycle)) =
                (record.service_interval_km, motorcycle.as_ref())
            {
                mileage_at_service = motorcycle.current_mileage;
                next_service_mileage = Some(motorcycle.current_mileage + interval);
            }

            let next_service_date = record
                .service_interval_months
                .map(|months| now + Duration::days(months as i64 * 30));

            let updated = self
                .repository
                .complete(record.id, now, mileage_at_service, next_service_date, next_service_mileage)
                .await?;

            if let Some(motorcycle) = motorcycle.as_ref() {
                self.notify_service_completed(motorcycle, &updated);
            }

            completed.push(updated.into());
        }

        Ok(completed)
    }

    /// Disparo best-effort del evento service_completed, sin bloquear la respuesta
    fn notify_service_completed(&self, motorcycle: &Motorcycle, record: &MaintenanceRecord) {
        let webhooks = self.webhooks.clone();
        let payload = json!({
            "motorcycle": {
                "id": motorcycle.id,
                "name": motorcycle.name,
            },
            "service": {
                "id": record.id,
                "service_name": record.service_name,
                "service_type": record.service_type,
                "performed_at": record.performed_at.to_rfc3339(),
                "mileage_at_service": decimal_to_f64(record.mileage_at_service),
                "total_cost": decimal_to_f64(record.total_cost),
            },
        });

        tokio::spawn(async move {
            webhooks.send_event("service_completed", payload).await;
        });
    }
}
