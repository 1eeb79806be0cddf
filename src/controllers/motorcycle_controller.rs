use chrono::{Datelike, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::motorcycle_dto::{
    ApiResponse, CreateMotorcycleRequest, MotorcycleFilters, MotorcycleResponse,
    MotorcycleStatistics, UpdateMileageRequest, UpdateMotorcycleRequest,
};
use crate::repositories::motorcycle_repository::{
    MotorcycleChanges, MotorcycleRepository, NewMotorcycle,
};
use crate::utils::errors::{conflict_error, AppError};
use crate::utils::validation::{decimal_from_f64, decimal_to_f64, opt_decimal_from_f64};

pub struct MotorcycleController {
    repository: MotorcycleRepository,
}

impl MotorcycleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: MotorcycleRepository::new(pool),
        }
    }

    pub async fn list(
        &self,
        filters: MotorcycleFilters,
    ) -> Result<Vec<MotorcycleResponse>, AppError> {
        let limit = filters.limit.unwrap_or(100).clamp(1, 100);
        let skip = filters.skip.unwrap_or(0).max(0);

        let motorcycles = self
            .repository
            .list(filters.include_archived.unwrap_or(false), skip, limit)
            .await?;

        Ok(motorcycles.into_iter().map(MotorcycleResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<MotorcycleResponse, AppError> {
        let motorcycle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Motorcycle not found".to_string()))?;

        Ok(motorcycle.into())
    }

    pub async fn create(
        &self,
        request: CreateMotorcycleRequest,
    ) -> Result<ApiResponse<MotorcycleResponse>, AppError> {
        request.validate()?;

        if let Some(vin) = &request.vin {
            if self.repository.vin_exists(vin, None).await? {
                return Err(conflict_error("Motorcycle", "vin", vin));
            }
        }

        if let Some(plate) = &request.license_plate {
            if self.repository.license_plate_exists(plate, None).await? {
                return Err(conflict_error("Motorcycle", "license_plate", plate));
            }
        }

        let data = NewMotorcycle {
            name: request.name,
            make: request.make,
            model: request.model,
            year: request.year,
            engine_size: request.engine_size,
            license_plate: request.license_plate,
            vin: request.vin,
            current_mileage: decimal_from_f64(
                request.current_mileage.unwrap_or(0.0),
                "current_mileage",
            )?,
            purchase_date: request.purchase_date,
            purchase_price: opt_decimal_from_f64(request.purchase_price, "purchase_price")?,
            notes: request.notes,
        };

        let motorcycle = self.repository.create(data).await?;

        Ok(ApiResponse::success_with_message(
            motorcycle.into(),
            "Moto registrada exitosamente".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateMotorcycleRequest,
    ) -> Result<ApiResponse<MotorcycleResponse>, AppError> {
        request.validate()?;

        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Motorcycle not found".to_string()))?;

        // Las verificaciones de duplicados excluyen la propia moto
        if let Some(vin) = &request.vin {
            if self.repository.vin_exists(vin, Some(id)).await? {
                return Err(conflict_error("Motorcycle", "vin", vin));
            }
        }

        if let Some(plate) = &request.license_plate {
            if self.repository.license_plate_exists(plate, Some(id)).await? {
                return Err(conflict_error("Motorcycle", "license_plate", plate));
            }
        }

        let changes = MotorcycleChanges {
            name: request.name,
            license_plate: request.license_plate,
            vin: request.vin,
            current_mileage: opt_decimal_from_f64(request.current_mileage, "current_mileage")?,
            is_active: request.is_active,
            is_archived: request.is_archived,
            notes: request.notes,
        };

        let motorcycle = self.repository.update(id, changes).await?;

        Ok(ApiResponse::success_with_message(
            motorcycle.into(),
            "Moto actualizada exitosamente".to_string(),
        ))
    }

    pub async fn archive(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repository.archive(id).await? {
            return Err(AppError::NotFound("Motorcycle not found".to_string()));
        }
        Ok(())
    }

    pub async fn restore(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repository.restore(id).await? {
            return Err(AppError::NotFound("Motorcycle not found".to_string()));
        }
        Ok(())
    }

    /// El endpoint explícito de kilometraje rechaza cualquier retroceso
    pub async fn update_mileage(
        &self,
        id: Uuid,
        request: UpdateMileageRequest,
    ) -> Result<MotorcycleResponse, AppError> {
        let motorcycle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Motorcycle not found".to_string()))?;

        let new_mileage = decimal_from_f64(request.new_mileage, "new_mileage")?;

        if new_mileage < motorcycle.current_mileage {
            return Err(AppError::BadRequest(format!(
                "New mileage ({}) cannot be less than current mileage ({})",
                new_mileage, motorcycle.current_mileage
            )));
        }

        let updated = self.repository.set_mileage(id, new_mileage).await?;
        Ok(updated.into())
    }

    pub async fn statistics(&self, id: Uuid) -> Result<MotorcycleStatistics, AppError> {
        let motorcycle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Motorcycle not found".to_string()))?;

        let now = Utc::now();
        let age_years = (now.year() - motorcycle.year).max(0);
        let ownership_days = motorcycle
            .purchase_date
            .map(|d| (now - d).num_days().max(0))
            .unwrap_or(0);

        let total_maintenance_records = self.repository.count_maintenance_records(id).await?;
        let total_parts = self.repository.count_parts(id).await?;
        let total_rides = self.repository.count_ride_logs(id).await?;

        let mileage = decimal_to_f64(motorcycle.current_mileage);
        let average_km_per_year = if age_years > 0 {
            mileage / age_years as f64
        } else {
            0.0
        };
        let average_km_per_day = if ownership_days > 0 {
            mileage / ownership_days as f64
        } else {
            0.0
        };

        Ok(MotorcycleStatistics {
            age_years,
            ownership_days,
            total_maintenance_records,
            total_parts,
            total_rides,
            average_km_per_year,
            average_km_per_day,
        })
    }
}
