pub mod dashboard_controller;
pub mod maintenance_controller;
pub mod motorcycle_controller;
pub mod part_controller;
pub mod ride_log_controller;
pub mod webhook_controller;
