//! DTOs de la API
//!
//! Requests, responses y filtros por recurso. Los montos y kilometrajes se
//! exponen como f64 y se convierten a Decimal en el borde.

pub mod dashboard_dto;
pub mod maintenance_dto;
pub mod motorcycle_dto;
pub mod part_dto;
pub mod ride_log_dto;
pub mod webhook_dto;
