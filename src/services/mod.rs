// src/services/mod.rs
pub mod aluno_service;
pub mod auth_service;
pub mod aula_service;
pub mod curso_service;
pub mod disciplina_service;
pub mod presenca_service;
pub mod professor_service;
pub mod sala_service;
pub mod usuario_service;

use crate::error::AppResult;
use sqlx::SqliteConnection;

/// Executa um `SELECT 1 ... WHERE <coluna> = ?` e diz se encontrou alguma linha.
pub(crate) async fn existe(conn: &mut SqliteConnection, sql: &str, id: i64) -> AppResult<bool> {
    let found = sqlx::query_scalar::<_, i64>(sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(found.is_some())
}
