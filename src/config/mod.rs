use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration, built once at startup and injected into the
/// router state. Tests construct their own instance instead of reading a
/// process-wide singleton.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_days: i64,
    pub bcrypt_cost: u32,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::local_defaults().with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("CONNECTION_URI") {
            self.database.uri = v;
        }
        if let Ok(v) = env::var("DATABASE_NAME") {
            self.database.database = v;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRY_DAYS") {
            self.security.jwt_expiry_days = v.parse().unwrap_or(self.security.jwt_expiry_days);
        }
        if let Ok(v) = env::var("BCRYPT_COST") {
            self.security.bcrypt_cost = v.parse().unwrap_or(self.security.bcrypt_cost);
        }
        if let Ok(v) = env::var("CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        self
    }

    fn local_defaults() -> Self {
        Self {
            server: ServerConfig { port: 8080 },
            database: DatabaseConfig {
                uri: "mongodb://localhost:27017".to_string(),
                database: "cineflix".to_string(),
            },
            security: SecurityConfig {
                jwt_secret: "dev-secret-change-me".to_string(),
                jwt_expiry_days: 7,
                bcrypt_cost: bcrypt::DEFAULT_COST,
                cors_origins: vec![
                    "http://localhost:8080".to_string(),
                    "http://localhost:1234".to_string(),
                    "http://localhost:4200".to_string(),
                ],
            },
        }
    }
}
