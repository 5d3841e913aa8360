//! Configuración del lado cliente (panel)
//!
//! Decide qué backend primario usa la fachada de persistencia y dónde vive
//! el espejo local.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Backend primario de la fachada
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// API HTTP local (`/api/quadricycles`)
    Api,
    /// Tablas remotas accedidas directamente por su gateway REST
    Remote,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "api" => Ok(BackendKind::Api),
            "remote" | "supabase" => Ok(BackendKind::Remote),
            other => Err(format!("Unknown backend: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub backend: BackendKind,
    pub api_base_url: String,
    pub remote_url: Option<String>,
    pub remote_api_key: Option<String>,
    pub fallback_dir: PathBuf,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let remote_url = env::var("SUPABASE_URL").ok().filter(|v| !v.trim().is_empty());
        let remote_api_key = env::var("SUPABASE_ANON_KEY").ok().filter(|v| !v.trim().is_empty());

        // Sin BACKEND explícito se usa el remoto solo si está configurado
        let backend = env::var("BACKEND")
            .ok()
            .and_then(|b| b.parse().ok())
            .unwrap_or(if remote_url.is_some() && remote_api_key.is_some() {
                BackendKind::Remote
            } else {
                BackendKind::Api
            });

        Self {
            backend,
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000/api".to_string()),
            remote_url,
            remote_api_key,
            fallback_dir: env::var("FALLBACK_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            request_timeout: Duration::from_secs(
                env::var("REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
        }
    }
}
