// src/config.rs
use crate::error::{AppError, AppResult};
use std::{env, net::SocketAddr, str::FromStr};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_JWT_EXPIRATION_MINUTES: i64 = 60;

/// Configuração do processo, lida uma única vez no arranque.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub secret_key: String,
    pub jwt_expiration_minutes: i64,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub bcrypt_cost: u32,
}

impl Config {
    /// Lê a configuração das variáveis de ambiente (depois de carregar o `.env`).
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;
        let secret_key = env::var("SECRET_KEY")?;
        if secret_key.trim().is_empty() {
            return Err(AppError::ConfigError("SECRET_KEY não pode ser vazia".into()));
        }
        if secret_key.len() < 32 {
            tracing::warn!("⚠️ SECRET_KEY é curta, considere usar uma chave mais longa e aleatória!");
        }

        Ok(Config {
            database_url,
            secret_key,
            jwt_expiration_minutes: parse_or_default(
                "JWT_EXPIRATION_MINUTES",
                DEFAULT_JWT_EXPIRATION_MINUTES,
            )?,
            bind_addr: parse_or_default(
                "BIND_ADDR",
                SocketAddr::from_str(DEFAULT_BIND_ADDR)
                    .map_err(|e| AppError::ConfigError(e.to_string()))?,
            )?,
            max_connections: parse_or_default("DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            bcrypt_cost: parse_or_default("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
        })
    }
}

fn parse_or_default<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| AppError::ConfigError(format!("{key} inválida ({raw}): {e}"))),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(e) => Err(e.into()),
    }
}
