// Configuration de l'application (.env + variables d'environnement)

use serde::Deserialize;
use tracing::warn;

use crate::utils::jwt::AuthSettings;

const INSECURE_JWT_SECRET: &str = "default-insecure-key-change-this";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub password_iterations: u32,
    pub seed_demo_data: bool,
    pub log_level: String,
}

impl AppConfig {
    /// Charge le .env puis les variables d'environnement (DATABASE_URL, JWT_SECRET, ...)
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();

        let config = config::Config::builder()
            .set_default("server_host", "127.0.0.1")?
            .set_default("server_port", 8080)?
            .set_default("jwt_secret", INSECURE_JWT_SECRET)?
            .set_default("jwt_expiration_hours", 24)?
            .set_default("password_iterations", 260_000)?
            .set_default("seed_demo_data", false)?
            .set_default("log_level", "info")?
            .add_source(config::Environment::default().try_parsing(true))
            .build()?;

        config.try_deserialize()
    }

    /// À appeler une fois le subscriber tracing installé
    pub fn warn_if_insecure(&self) {
        if self.uses_insecure_jwt_secret() {
            warn!("⚠️  JWT_SECRET not set, using default (INSECURE)");
        }
    }

    pub fn uses_insecure_jwt_secret(&self) -> bool {
        self.jwt_secret == INSECURE_JWT_SECRET
    }

    pub fn auth_settings(&self) -> AuthSettings {
        AuthSettings {
            jwt_secret: self.jwt_secret.clone(),
            token_ttl_hours: self.jwt_expiration_hours,
            password_iterations: self.password_iterations,
        }
    }
}
