use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use revisoes_quadriciclos::config::database::DatabaseConfig;
use revisoes_quadriciclos::config::environment::EnvironmentConfig;
use revisoes_quadriciclos::database::DatabaseConnection;
use revisoes_quadriciclos::routes::create_app_router;
use revisoes_quadriciclos::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::default();

    // Configurar logging: LOG_LEVEL o, si falta, el nivel del entorno
    let level = config.default_log_level();
    let env_filter = EnvFilter::try_from_env("LOG_LEVEL")
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    info!("🏍️ Revisões de Quadriciclos - API local");
    info!("========================================");

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::connect(&DatabaseConfig::from_url(&config.database_url)).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();
    let addr: SocketAddr = config.server_url().parse()?;

    let app = create_app_router(AppState::new(pool, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🏍️ Endpoints - Quadricycles:");
    info!("   HEAD /api/quadricycles - Sonda de disponibilidad");
    info!("   GET  /api/quadricycles - Listar quadriciclos con revisiones");
    info!("   POST /api/quadricycles - Registrar quadriciclo");
    info!("   PUT  /api/quadricycles/:id - Cambiar estado");
    info!("   DELETE /api/quadricycles/:id - Eliminar quadriciclo");
    info!("   PUT  /api/quadricycles/:quad_id/reviews/:review_number - Actualizar revisión");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el manejador de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el manejador de señales: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
