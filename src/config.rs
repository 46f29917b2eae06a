use std::env;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub webhook_url: String,
    pub jwt_secret: String,
    pub session_idle_minutes: i64,
    pub dashboard_timezone: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let webhook_url =
            env::var("ORDER_WEBHOOK_URL").context("ORDER_WEBHOOK_URL is not set")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET is not set")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let session_idle_minutes = env::var("SESSION_IDLE_MINUTES")
            .ok()
            .and_then(|m| m.parse::<i64>().ok())
            .filter(|m| *m > 0)
            .unwrap_or(120);
        let dashboard_timezone =
            env::var("DASHBOARD_TIMEZONE").unwrap_or_else(|_| "America/Sao_Paulo".to_string());
        Ok(Self {
            port,
            database_url,
            host,
            webhook_url,
            jwt_secret,
            session_idle_minutes,
            dashboard_timezone,
        })
    }
}
