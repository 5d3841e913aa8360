//! Configuración de conexión a SQLite
//!
//! Este módulo abre el pool de la base embebida y aplica el esquema.

use sqlx::SqlitePool;

use crate::config::database::DatabaseConfig;
use crate::database::schema::{REVIEW_COLUMN_UPGRADES, SCHEMA};

/// Conexión a la base de datos de la API local
#[derive(Clone)]
pub struct DatabaseConnection {
    pool: SqlitePool,
}

impl DatabaseConnection {
    /// Abrir el pool y dejar el esquema listo
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        log::info!("🗄️ Conectando a la base de datos: {}", config.url);
        let pool = config.create_pool().await?;
        run_migrations(&pool).await?;
        log::info!("✅ Base de datos lista");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Crear tablas si no existen y completar columnas de versiones anteriores
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }

    let columns: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info('reviews')")
        .fetch_all(pool)
        .await?;

    for (column, statement) in REVIEW_COLUMN_UPGRADES {
        if !columns.iter().any(|c| c == column) {
            log::info!("🔧 Agregando columna reviews.{}", column);
            sqlx::query(statement).execute(pool).await?;
        }
    }

    Ok(())
}
