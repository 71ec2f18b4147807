// src/db.rs
use crate::{config::Config, error::AppResult};
use sqlx::sqlite::{Sqlite, SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Transaction;
use std::str::FromStr;
use std::time::Duration;

/// Cria o pool de conexões e aplica as migrações pendentes.
pub async fn create_db_pool(config: &Config) -> AppResult<SqlitePool> {
    tracing::info!("Ligando à base de dados: {}", config.database_url);

    // Opções de conexão (criar se não existir, timeout, chaves estrangeiras ativas)
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await?;

    tracing::info!("Executando migrações da base de dados...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Migrações concluídas.");

    Ok(pool)
}

/// Abre uma transação de escrita já com o lock de escrita reservado.
///
/// Com `BEGIN IMMEDIATE` as verificações feitas dentro da transação e a escrita
/// que as segue ficam serializadas entre requisições. Quem chega depois espera
/// pelo `busy_timeout` e então enxerga a linha já gravada.
pub async fn begin_escrita(pool: &SqlitePool) -> AppResult<Transaction<'static, Sqlite>> {
    Ok(pool.begin_with("BEGIN IMMEDIATE").await?)
}

/// Quantidade de conexões emprestadas e ainda não devolvidas ao pool.
pub fn leased_connections(pool: &SqlitePool) -> usize {
    (pool.size() as usize).saturating_sub(pool.num_idle())
}
