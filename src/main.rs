mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use middleware::cors::cors_middleware;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("🏍️ Moto Garage - API de mantenimiento de motos");
    info!("================================================");

    // Inicializar base de datos
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    if let Err(e) = database::create_tables(&pool).await {
        error!("❌ Error creando el schema: {}", e);
        return Err(anyhow::anyhow!("Error de schema: {}", e));
    }
    info!("✅ Schema de base de datos verificado");

    let config = EnvironmentConfig::default();
    let port = config.port;
    let app_state = AppState::new(pool, config);

    let app = Router::new()
        .route("/", get(root_endpoint))
        .route("/health", get(health_endpoint))
        .route("/api/v1/health", get(health_endpoint))
        .nest("/api/v1/motorcycles", routes::motorcycle_routes::create_motorcycle_router())
        .nest("/api/v1/maintenance", routes::maintenance_routes::create_maintenance_router())
        .nest("/api/v1/parts", routes::part_routes::create_part_router())
        .nest("/api/v1/logs", routes::ride_log_routes::create_ride_log_router())
        .nest("/api/v1/webhooks", routes::webhook_routes::create_webhook_router())
        .nest("/api/v1/dashboard", routes::dashboard_routes::create_dashboard_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware())
        .with_state(app_state);

    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🏍️ Motorcycles:");
    info!("   POST /api/v1/motorcycles - Registrar moto");
    info!("   GET  /api/v1/motorcycles - Listar motos");
    info!("   GET  /api/v1/motorcycles/:id - Obtener moto");
    info!("   PUT  /api/v1/motorcycles/:id - Actualizar moto");
    info!("   DELETE /api/v1/motorcycles/:id - Archivar moto");
    info!("   POST /api/v1/motorcycles/:id/restore - Restaurar moto");
    info!("   POST /api/v1/motorcycles/:id/mileage - Actualizar kilometraje");
    info!("   GET  /api/v1/motorcycles/:id/statistics - Estadísticas");
    info!("🔧 Maintenance:");
    info!("   POST /api/v1/maintenance - Registrar servicio");
    info!("   GET  /api/v1/maintenance - Listar servicios");
    info!("   GET  /api/v1/maintenance/upcoming - Próximos servicios");
    info!("   GET  /api/v1/maintenance/overdue - Servicios vencidos");
    info!("   GET  /api/v1/maintenance/costs - Resumen de costos");
    info!("   GET  /api/v1/maintenance/history/:motorcycle_id - Historial");
    info!("   POST /api/v1/maintenance/bulk-complete - Completar en lote");
    info!("🔩 Parts:");
    info!("   POST /api/v1/parts - Registrar repuesto");
    info!("   GET  /api/v1/parts - Listar repuestos");
    info!("   GET  /api/v1/parts/expenses - Gastos en repuestos");
    info!("   GET  /api/v1/parts/replacement-needed - Reemplazos pendientes");
    info!("   GET  /api/v1/parts/low-stock - Stock bajo");
    info!("   GET  /api/v1/parts/categories/:motorcycle_id - Por categoría");
    info!("   POST /api/v1/parts/:id/use - Consumir stock");
    info!("   POST /api/v1/parts/:id/restock - Reponer stock");
    info!("🛣️ Ride logs:");
    info!("   POST /api/v1/logs - Registrar viaje");
    info!("   GET  /api/v1/logs - Listar viajes");
    info!("   GET  /api/v1/logs/summary/:motorcycle_id - Resumen de viajes");
    info!("   GET  /api/v1/logs/fuel/statistics - Estadísticas de combustible");
    info!("🔔 Webhooks:");
    info!("   POST /api/v1/webhooks - Registrar webhook");
    info!("   GET  /api/v1/webhooks - Listar webhooks");
    info!("   GET  /api/v1/webhooks/:id/stats - Estadísticas de entrega");
    info!("   POST /api/v1/webhooks/:id/test - Enviar payload de prueba");
    info!("📊 Dashboard:");
    info!("   GET  /api/v1/dashboard/stats - Estadísticas generales");
    info!("   GET  /api/v1/dashboard/maintenance-due - Mantenimiento por vencer");
    info!("   GET  /api/v1/dashboard/motorcycle/:id - Overview de una moto");
    info!("   GET  /api/v1/dashboard/fleet-summary - Resumen de flota");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Endpoint raíz
async fn root_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Moto Garage API",
        "version": "1.0.0",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Health check
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "message": "API is running",
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
