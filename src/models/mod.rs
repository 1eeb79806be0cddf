//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod maintenance;
pub mod motorcycle;
pub mod part;
pub mod ride_log;
pub mod webhook;
