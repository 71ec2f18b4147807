// src/state.rs
use crate::config::Config;
use jsonwebtoken::{DecodingKey, EncodingKey};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Chaves HMAC derivadas do SECRET_KEY, partilhadas entre requisições.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub expiration_minutes: i64,
}

impl JwtKeys {
    pub fn new(secret: &str, expiration_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiration_minutes,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub jwt: Arc<JwtKeys>,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, config: &Config) -> Self {
        Self {
            db_pool,
            jwt: Arc::new(JwtKeys::new(&config.secret_key, config.jwt_expiration_minutes)),
            bcrypt_cost: config.bcrypt_cost,
        }
    }
}

// Permite extrair o pool da DB diretamente
impl axum::extract::FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> SqlitePool {
        state.db_pool.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<JwtKeys> {
    fn from_ref(state: &AppState) -> Arc<JwtKeys> {
        state.jwt.clone()
    }
}
