pub mod dashboard_routes;
pub mod maintenance_routes;
pub mod motorcycle_routes;
pub mod part_routes;
pub mod ride_log_routes;
pub mod webhook_routes;
