//! Módulo de base de datos
//!
//! Maneja la conexión y el bootstrap del schema en PostgreSQL.

pub mod connection;

pub use connection::*;
