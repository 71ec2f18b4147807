// src/services/sala_service.rs
use crate::{
    db,
    error::{AppError, AppResult},
    models::{
        aula::AulaComSala,
        sala::{DadosSala, LocalSala, Sala},
    },
    services::{aula_service, existe},
};
use sqlx::{SqliteConnection, SqlitePool};

const SELECT_SALA: &str = "SELECT id_sala, nome, bloco, espaco, numero_sala FROM sala";

pub async fn find_all_salas(db_pool: &SqlitePool) -> AppResult<Vec<Sala>> {
    let mut conn = db_pool.acquire().await?;
    let salas = sqlx::query_as::<_, Sala>(&format!(
        "{SELECT_SALA} ORDER BY bloco, espaco, numero_sala"
    ))
    .fetch_all(&mut *conn)
    .await?;
    Ok(salas)
}

pub async fn find_sala_by_id(db_pool: &SqlitePool, id: i64) -> AppResult<Sala> {
    let mut conn = db_pool.acquire().await?;
    fetch_sala(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("Sala não encontrada"))
}

async fn fetch_sala(conn: &mut SqliteConnection, id: i64) -> AppResult<Option<Sala>> {
    let sala = sqlx::query_as::<_, Sala>(&format!("{SELECT_SALA} WHERE id_sala = ?"))
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(sala)
}

/// Resolve o endereço (bloco, espaço, número) para o id da sala.
pub(crate) async fn find_id_by_local(
    conn: &mut SqliteConnection,
    local: LocalSala,
) -> AppResult<Option<i64>> {
    let id = sqlx::query_scalar::<_, i64>(
        "SELECT id_sala FROM sala WHERE bloco = ? AND espaco = ? AND numero_sala = ?",
    )
    .bind(local.bloco)
    .bind(local.espaco)
    .bind(local.numero_sala)
    .fetch_optional(conn)
    .await?;
    Ok(id)
}

async fn verificar_local_livre(conn: &mut SqliteConnection, local: LocalSala) -> AppResult<()> {
    if find_id_by_local(conn, local).await?.is_some() {
        return Err(AppError::conflict("Já existe uma sala neste bloco, espaço e número"));
    }
    Ok(())
}

pub async fn create_sala(db_pool: &SqlitePool, dados: &DadosSala) -> AppResult<i64> {
    tracing::info!("Tentando criar sala {:?}", dados.local);
    let mut tx = db::begin_escrita(db_pool).await?;

    verificar_local_livre(&mut tx, dados.local).await?;

    let id = sqlx::query("INSERT INTO sala (nome, bloco, espaco, numero_sala) VALUES (?, ?, ?, ?)")
        .bind(&dados.nome)
        .bind(dados.local.bloco)
        .bind(dados.local.espaco)
        .bind(dados.local.numero_sala)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

    tx.commit().await?;
    tracing::info!("✅ Sala {} criada.", id);
    Ok(id)
}

pub async fn update_sala(db_pool: &SqlitePool, id: i64, dados: &DadosSala) -> AppResult<()> {
    let mut tx = db::begin_escrita(db_pool).await?;

    let atual = fetch_sala(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::not_found("Sala não encontrada"))?;

    if atual.local() != dados.local {
        verificar_local_livre(&mut tx, dados.local).await?;
    }

    sqlx::query("UPDATE sala SET nome = ?, bloco = ?, espaco = ?, numero_sala = ? WHERE id_sala = ?")
        .bind(&dados.nome)
        .bind(dados.local.bloco)
        .bind(dados.local.espaco)
        .bind(dados.local.numero_sala)
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::info!("✅ Sala {} atualizada.", id);
    Ok(())
}

/// Remove a sala. Aulas agendadas nela bloqueiam a remoção (409 via FK).
pub async fn delete_sala(db_pool: &SqlitePool, id: i64) -> AppResult<()> {
    let mut tx = db::begin_escrita(db_pool).await?;

    if !existe(&mut tx, "SELECT 1 FROM sala WHERE id_sala = ?", id).await? {
        return Err(AppError::not_found("Sala não encontrada"));
    }

    sqlx::query("DELETE FROM sala WHERE id_sala = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::info!("🗑️ Sala {} removida.", id);
    Ok(())
}

pub async fn find_aulas_of_sala(db_pool: &SqlitePool, id: i64) -> AppResult<Vec<AulaComSala>> {
    let mut conn = db_pool.acquire().await?;

    if !existe(&mut conn, "SELECT 1 FROM sala WHERE id_sala = ?", id).await? {
        return Err(AppError::not_found("Sala não encontrada"));
    }

    aula_service::fetch_aulas_com_sala(&mut conn, aula_service::FiltroAula::Sala(id)).await
}
