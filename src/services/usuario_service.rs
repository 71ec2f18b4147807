// src/services/usuario_service.rs
use crate::{
    db,
    error::{AppError, AppResult},
    models::usuario::{DadosUsuario, Usuario},
    services::{auth_service, existe},
};
use sqlx::{SqliteConnection, SqlitePool};

const SELECT_USUARIO: &str = "SELECT id_usuario, email, hash_senha, tipo FROM usuario";

pub async fn find_all_usuarios(db_pool: &SqlitePool) -> AppResult<Vec<Usuario>> {
    tracing::debug!("Buscando todos os usuários...");
    let mut conn = db_pool.acquire().await?;
    let usuarios = sqlx::query_as::<_, Usuario>(&format!("{SELECT_USUARIO} ORDER BY id_usuario"))
        .fetch_all(&mut *conn)
        .await?;
    tracing::debug!("Encontrados {} usuários.", usuarios.len());
    Ok(usuarios)
}

pub async fn find_usuario_by_id(db_pool: &SqlitePool, id: i64) -> AppResult<Usuario> {
    let mut conn = db_pool.acquire().await?;
    fetch_usuario(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("Usuário não encontrado"))
}

pub(crate) async fn fetch_usuario(conn: &mut SqliteConnection, id: i64) -> AppResult<Option<Usuario>> {
    let usuario = sqlx::query_as::<_, Usuario>(&format!("{SELECT_USUARIO} WHERE id_usuario = ?"))
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(usuario)
}

pub async fn find_usuario_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> AppResult<Option<Usuario>> {
    let usuario = sqlx::query_as::<_, Usuario>(&format!("{SELECT_USUARIO} WHERE email = ?"))
        .bind(email)
        .fetch_optional(conn)
        .await?;
    Ok(usuario)
}

pub async fn create_usuario(
    db_pool: &SqlitePool,
    dados: &DadosUsuario,
    bcrypt_cost: u32,
) -> AppResult<i64> {
    tracing::info!("Tentando criar usuário: {}", dados.email);
    // O hash é gerado antes de abrir a transação para não segurar a conexão durante o bcrypt.
    let hash_senha = auth_service::hash_password(&dados.senha, bcrypt_cost).await?;

    let mut tx = db::begin_escrita(db_pool).await?;

    if find_usuario_by_email(&mut tx, &dados.email).await?.is_some() {
        return Err(AppError::conflict("Email já foi cadastrado"));
    }

    let id = sqlx::query("INSERT INTO usuario (email, hash_senha, tipo) VALUES (?, ?, ?)")
        .bind(&dados.email)
        .bind(&hash_senha)
        .bind(dados.tipo.as_str())
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

    tx.commit().await?;
    tracing::info!("✅ Usuário '{}' criado com id {}.", dados.email, id);
    Ok(id)
}

pub async fn update_usuario(
    db_pool: &SqlitePool,
    id: i64,
    dados: &DadosUsuario,
    bcrypt_cost: u32,
) -> AppResult<()> {
    tracing::info!("Tentando atualizar usuário: {}", id);
    let hash_senha = auth_service::hash_password(&dados.senha, bcrypt_cost).await?;

    let mut tx = db::begin_escrita(db_pool).await?;

    let atual = fetch_usuario(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::not_found("Usuário não encontrado"))?;

    if atual.email != dados.email && find_usuario_by_email(&mut tx, &dados.email).await?.is_some() {
        return Err(AppError::conflict("Email já foi cadastrado"));
    }

    sqlx::query("UPDATE usuario SET email = ?, hash_senha = ?, tipo = ? WHERE id_usuario = ?")
        .bind(&dados.email)
        .bind(&hash_senha)
        .bind(dados.tipo.as_str())
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::info!("✅ Usuário {} atualizado.", id);
    Ok(())
}

pub async fn delete_usuario(db_pool: &SqlitePool, id: i64) -> AppResult<()> {
    let mut tx = db::begin_escrita(db_pool).await?;

    if !existe(&mut tx, "SELECT 1 FROM usuario WHERE id_usuario = ?", id).await? {
        return Err(AppError::not_found("Usuário não encontrado"));
    }

    sqlx::query("DELETE FROM usuario WHERE id_usuario = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::info!("🗑️ Usuário {} removido.", id);
    Ok(())
}

/// Uma conta só pode ser dona de um perfil, seja de aluno ou de professor.
pub(crate) async fn verificar_conta_livre(conn: &mut SqliteConnection, id_usuario: i64) -> AppResult<()> {
    if !existe(conn, "SELECT 1 FROM usuario WHERE id_usuario = ?", id_usuario).await? {
        return Err(AppError::not_found("O usuário não existe"));
    }
    if existe(conn, "SELECT 1 FROM aluno WHERE id_usuario = ?", id_usuario).await? {
        return Err(AppError::conflict("O usuário já foi registrado como aluno"));
    }
    if existe(conn, "SELECT 1 FROM professor WHERE id_usuario = ?", id_usuario).await? {
        return Err(AppError::conflict("O usuário já foi registrado como professor"));
    }
    Ok(())
}
