//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del servidor de la API local.

use std::env;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub database_url: String,
    pub cors_origins: Vec<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://database.sqlite".to_string()),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| parse_origins(&origins))
                .unwrap_or_default(),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl EnvironmentConfig {
    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Nivel de log cuando no hay `LOG_LEVEL`
    pub fn default_log_level(&self) -> &'static str {
        if self.is_development() {
            "debug"
        } else {
            "info"
        }
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("http://localhost:5173, https://revisoes.example.com,"),
            vec!["http://localhost:5173", "https://revisoes.example.com"]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_server_url() {
        let config = EnvironmentConfig {
            environment: "production".to_string(),
            port: 8080,
            host: "127.0.0.1".to_string(),
            database_url: "sqlite::memory:".to_string(),
            cors_origins: vec![],
        };
        assert_eq!(config.server_url(), "127.0.0.1:8080");
        assert!(!config.is_development());
        assert_eq!(config.default_log_level(), "info");

        let config = EnvironmentConfig {
            environment: "development".to_string(),
            ..config
        };
        assert_eq!(config.default_log_level(), "debug");
    }
}
