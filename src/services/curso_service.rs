// src/services/curso_service.rs
use crate::{
    db,
    error::{AppError, AppResult},
    models::{aluno::Aluno, curso::Curso, disciplina::Disciplina},
    services::existe,
};
use sqlx::{SqliteConnection, SqlitePool};

pub async fn find_all_cursos(db_pool: &SqlitePool) -> AppResult<Vec<Curso>> {
    let mut conn = db_pool.acquire().await?;
    let cursos = sqlx::query_as::<_, Curso>("SELECT id_curso, nome FROM curso ORDER BY id_curso")
        .fetch_all(&mut *conn)
        .await?;
    Ok(cursos)
}

pub async fn find_curso_by_id(db_pool: &SqlitePool, id: i64) -> AppResult<Curso> {
    let mut conn = db_pool.acquire().await?;
    fetch_curso(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("Curso não encontrado"))
}

async fn fetch_curso(conn: &mut SqliteConnection, id: i64) -> AppResult<Option<Curso>> {
    let curso = sqlx::query_as::<_, Curso>("SELECT id_curso, nome FROM curso WHERE id_curso = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(curso)
}

async fn verificar_nome_livre(conn: &mut SqliteConnection, nome: &str) -> AppResult<()> {
    let encontrado = sqlx::query_scalar::<_, i64>("SELECT 1 FROM curso WHERE nome = ?")
        .bind(nome)
        .fetch_optional(conn)
        .await?;
    if encontrado.is_some() {
        return Err(AppError::conflict("O curso informado já existe"));
    }
    Ok(())
}

pub async fn create_curso(db_pool: &SqlitePool, nome: &str) -> AppResult<i64> {
    tracing::info!("Tentando criar curso: {}", nome);
    let mut tx = db::begin_escrita(db_pool).await?;

    verificar_nome_livre(&mut tx, nome).await?;

    let id = sqlx::query("INSERT INTO curso (nome) VALUES (?)")
        .bind(nome)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

    tx.commit().await?;
    tracing::info!("✅ Curso '{}' criado com id {}.", nome, id);
    Ok(id)
}

pub async fn update_curso(db_pool: &SqlitePool, id: i64, nome: &str) -> AppResult<()> {
    let mut tx = db::begin_escrita(db_pool).await?;

    let atual = fetch_curso(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::not_found("Curso não encontrado"))?;

    if atual.nome != nome {
        verificar_nome_livre(&mut tx, nome).await?;
    }

    sqlx::query("UPDATE curso SET nome = ? WHERE id_curso = ?")
        .bind(nome)
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::info!("✅ Curso {} atualizado.", id);
    Ok(())
}

/// Remove um curso. Alunos e disciplinas ainda ligados bloqueiam a remoção (409 via FK).
pub async fn delete_curso(db_pool: &SqlitePool, id: i64) -> AppResult<()> {
    let mut tx = db::begin_escrita(db_pool).await?;

    if !existe(&mut tx, "SELECT 1 FROM curso WHERE id_curso = ?", id).await? {
        return Err(AppError::not_found("Curso não encontrado"));
    }

    sqlx::query("DELETE FROM curso WHERE id_curso = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::info!("🗑️ Curso {} removido.", id);
    Ok(())
}

pub async fn find_alunos_of_curso(db_pool: &SqlitePool, id: i64) -> AppResult<Vec<Aluno>> {
    let mut conn = db_pool.acquire().await?;

    if !existe(&mut conn, "SELECT 1 FROM curso WHERE id_curso = ?", id).await? {
        return Err(AppError::not_found("Curso não encontrado"));
    }

    let alunos = sqlx::query_as::<_, Aluno>(
        "SELECT id_aluno, id_usuario, id_curso, nome, ra, rfid_tag, ano_letivo
         FROM aluno WHERE id_curso = ? ORDER BY nome",
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(alunos)
}

pub async fn find_disciplinas_of_curso(db_pool: &SqlitePool, id: i64) -> AppResult<Vec<Disciplina>> {
    let mut conn = db_pool.acquire().await?;

    if !existe(&mut conn, "SELECT 1 FROM curso WHERE id_curso = ?", id).await? {
        return Err(AppError::not_found("Curso não encontrado"));
    }

    let disciplinas = sqlx::query_as::<_, Disciplina>(
        "SELECT id_disciplina, id_curso, nome, descricao, url_imagem
         FROM disciplina WHERE id_curso = ? ORDER BY nome",
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(disciplinas)
}
