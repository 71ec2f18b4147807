// src/error.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro na base de dados: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Erro de migração da base de dados: {0}")]
    SqlxMigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Erro de variável de ambiente: {0}")]
    EnvVarError(#[from] std::env::VarError),

    #[error("Configuração inválida: {0}")]
    ConfigError(String),

    #[error("Erro ao processar senha")]
    PasswordHashingError,

    #[error("Erro ao emitir token: {0}")]
    TokenError(#[from] jsonwebtoken::errors::Error),

    // --- Erros de domínio (mensagem vai direto para o cliente) ---
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Usuário ou senha inválidos")]
    InvalidCredentials,

    #[error("Erro interno inesperado")]
    InternalServerError,
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        AppError::Forbidden(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Unauthorized(msg.into())
    }

    /// Status HTTP e mensagem pública de cada variante.
    /// Erros internos nunca expõem detalhes ao cliente.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Usuário ou senha inválidos".to_string())
            }
            // Violações de constraint que escaparam às verificações prévias.
            AppError::SqlxError(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => (
                StatusCode::CONFLICT,
                "O registro informado já existe no sistema".to_string(),
            ),
            AppError::SqlxError(sqlx::Error::Database(db_err))
                if db_err.is_foreign_key_violation() =>
            {
                (
                    StatusCode::CONFLICT,
                    "O registro está vinculado a outros dados".to_string(),
                )
            }
            AppError::SqlxError(sqlx::Error::PoolTimedOut) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Serviço temporariamente indisponível".to_string(),
            ),
            AppError::ConfigError(_) | AppError::EnvVarError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro de configuração".to_string(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro interno no servidor".to_string(),
            ),
        }
    }
}

// Como converter AppError numa resposta HTTP
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, user_message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!("Erro processado: {:?}", self);
        } else {
            tracing::warn!("Requisição rejeitada ({}): {}", status.as_u16(), user_message);
        }

        (status, Json(json!({ "error": user_message }))).into_response()
    }
}

// Tipo Result padrão para a aplicação
pub type AppResult<T = ()> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_keep_their_message_and_status() {
        let cases = [
            (AppError::validation("Dados inválidos"), StatusCode::BAD_REQUEST),
            (AppError::not_found("Aluno não encontrado"), StatusCode::NOT_FOUND),
            (AppError::conflict("Sala já existe"), StatusCode::CONFLICT),
            (AppError::forbidden("Fora da disciplina"), StatusCode::FORBIDDEN),
            (AppError::unauthorized("Token não fornecido"), StatusCode::UNAUTHORIZED),
        ];

        for (err, expected) in cases {
            let msg = err.to_string();
            let (status, body) = err.status_and_message();
            assert_eq!(status, expected);
            assert_eq!(body, msg);
        }
    }

    #[test]
    fn internal_errors_hide_details() {
        let (status, msg) = AppError::SqlxError(sqlx::Error::RowNotFound).status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(msg, "Erro interno no servidor");

        let (status, msg) = AppError::ConfigError("SECRET_KEY vazia".into()).status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!msg.contains("SECRET_KEY"));
    }

    #[tokio::test]
    async fn constraint_violations_from_the_driver_are_conflicts() {
        use sqlx::{Connection, SqliteConnection};

        let mut conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();
        sqlx::query("CREATE TABLE curso (id_curso INTEGER PRIMARY KEY, nome TEXT NOT NULL UNIQUE)")
            .execute(&mut conn)
            .await
            .unwrap();
        sqlx::query(
            "CREATE TABLE aluno (id_aluno INTEGER PRIMARY KEY, \
             id_curso INTEGER NOT NULL REFERENCES curso (id_curso))",
        )
        .execute(&mut conn)
        .await
        .unwrap();
        sqlx::query("INSERT INTO curso (nome) VALUES ('Física')")
            .execute(&mut conn)
            .await
            .unwrap();

        let duplicado = sqlx::query("INSERT INTO curso (nome) VALUES ('Física')")
            .execute(&mut conn)
            .await
            .unwrap_err();
        let (status, msg) = AppError::from(duplicado).status_and_message();
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(msg, "O registro informado já existe no sistema");

        let orfao = sqlx::query("INSERT INTO aluno (id_curso) VALUES (999)")
            .execute(&mut conn)
            .await
            .unwrap_err();
        let (status, msg) = AppError::from(orfao).status_and_message();
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(msg, "O registro está vinculado a outros dados");
    }

    #[test]
    fn invalid_credentials_is_unauthorized() {
        let (status, _) = AppError::InvalidCredentials.status_and_message();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
