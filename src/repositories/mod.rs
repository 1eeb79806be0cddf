pub mod maintenance_repository;
pub mod motorcycle_repository;
pub mod part_repository;
pub mod ride_log_repository;
pub mod webhook_repository;
