// src/services/presenca_service.rs
use crate::{
    db,
    error::{AppError, AppResult},
    models::{
        aula,
        presenca::{CheckIn, DadosPresenca, ItemChamada, Presenca},
    },
    services::{aluno_service, aula_service, disciplina_service, disciplina_service::Vinculo, existe},
};
use sqlx::{SqliteConnection, SqlitePool};

const SELECT_PRESENCA: &str = "SELECT id_presenca, id_aluno, id_aula, presente, horario FROM presenca";

async fn presenca_existe(conn: &mut SqliteConnection, id_aluno: i64, id_aula: i64) -> AppResult<Option<i64>> {
    let id = sqlx::query_scalar::<_, i64>(
        "SELECT id_presenca FROM presenca WHERE id_aluno = ? AND id_aula = ?",
    )
    .bind(id_aluno)
    .bind(id_aula)
    .fetch_optional(conn)
    .await?;
    Ok(id)
}

/// Registo de presença a partir da leitura de um cartão RFID numa sala.
///
/// Cadeia de guardas: tag conhecida (404), aula em andamento na sala (404),
/// aluno matriculado na disciplina da aula (403), presença ainda não registada (409).
pub async fn registrar_check_in(db_pool: &SqlitePool, check_in: &CheckIn) -> AppResult<i64> {
    tracing::info!("Leitura RFID na sala {}", check_in.id_sala);
    let agora = aula::agora();

    let mut tx = db::begin_escrita(db_pool).await?;

    let aluno = aluno_service::find_aluno_by_rfid(&mut tx, &check_in.rfid_tag)
        .await?
        .ok_or_else(|| AppError::not_found("RFID não encontrado"))?;

    let aula = aula_service::find_ativa_na_sala(&mut tx, check_in.id_sala, agora)
        .await?
        .ok_or_else(|| AppError::not_found("Nenhuma aula está ocorrendo nesta sala"))?;

    if !disciplina_service::vinculo_existe(&mut tx, Vinculo::Aluno, aula.id_disciplina, aluno.id_aluno).await? {
        return Err(AppError::forbidden("O aluno não pertence a disciplina"));
    }

    if presenca_existe(&mut tx, aluno.id_aluno, aula.id_aula).await?.is_some() {
        return Err(AppError::conflict("A presença já foi registrada"));
    }

    let id = sqlx::query("INSERT INTO presenca (id_aluno, id_aula, presente, horario) VALUES (?, ?, ?, ?)")
        .bind(aluno.id_aluno)
        .bind(aula.id_aula)
        .bind(true)
        .bind(agora)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

    tx.commit().await?;
    tracing::info!("✅ Presença {} registada: aluno {} na aula {}.", id, aluno.id_aluno, aula.id_aula);
    Ok(id)
}

pub async fn find_presenca_by_id(db_pool: &SqlitePool, id: i64) -> AppResult<Presenca> {
    let mut conn = db_pool.acquire().await?;
    let presenca = sqlx::query_as::<_, Presenca>(&format!("{SELECT_PRESENCA} WHERE id_presenca = ?"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    presenca.ok_or_else(|| AppError::not_found("Presença não encontrada"))
}

/// Chamada de uma aula: todos os alunos matriculados na disciplina, com ou sem presença.
pub async fn find_chamada(db_pool: &SqlitePool, id_aula: i64) -> AppResult<Vec<ItemChamada>> {
    let mut conn = db_pool.acquire().await?;

    let aula = aula_service::fetch_aula(&mut conn, id_aula)
        .await?
        .ok_or_else(|| AppError::not_found("Aula não encontrada"))?;

    let chamada = sqlx::query_as::<_, ItemChamada>(
        r#"
        SELECT aluno.id_aluno, aluno.nome, presenca.horario,
               COALESCE(presenca.presente, 0) AS presente
        FROM disciplina_aluno
        JOIN aluno ON aluno.id_aluno = disciplina_aluno.id_aluno
        LEFT JOIN presenca ON presenca.id_aluno = aluno.id_aluno AND presenca.id_aula = ?1
        WHERE disciplina_aluno.id_disciplina = ?2
        ORDER BY aluno.nome
        "#,
    )
    .bind(aula.id_aula)
    .bind(aula.id_disciplina)
    .fetch_all(&mut *conn)
    .await?;

    Ok(chamada)
}

/// Correção manual de uma presença já existente.
pub async fn update_presenca(db_pool: &SqlitePool, id: i64, dados: &DadosPresenca) -> AppResult<()> {
    let mut tx = db::begin_escrita(db_pool).await?;

    if !existe(&mut tx, "SELECT 1 FROM presenca WHERE id_presenca = ?", id).await? {
        return Err(AppError::not_found("Presença não encontrada"));
    }
    if !existe(&mut tx, "SELECT 1 FROM aluno WHERE id_aluno = ?", dados.id_aluno).await? {
        return Err(AppError::not_found("Aluno não encontrado"));
    }
    if !existe(&mut tx, "SELECT 1 FROM aula WHERE id_aula = ?", dados.id_aula).await? {
        return Err(AppError::not_found("Aula não encontrada"));
    }
    if let Some(outra) = presenca_existe(&mut tx, dados.id_aluno, dados.id_aula).await? {
        if outra != id {
            return Err(AppError::conflict("A presença já foi registrada"));
        }
    }

    sqlx::query("UPDATE presenca SET id_aluno = ?, id_aula = ?, presente = ? WHERE id_presenca = ?")
        .bind(dados.id_aluno)
        .bind(dados.id_aula)
        .bind(dados.presente)
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::info!("✅ Presença {} atualizada.", id);
    Ok(())
}

pub async fn delete_presenca(db_pool: &SqlitePool, id: i64) -> AppResult<()> {
    let mut tx = db::begin_escrita(db_pool).await?;

    if !existe(&mut tx, "SELECT 1 FROM presenca WHERE id_presenca = ?", id).await? {
        return Err(AppError::not_found("Presença não encontrada"));
    }

    sqlx::query("DELETE FROM presenca WHERE id_presenca = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::info!("🗑️ Presença {} removida.", id);
    Ok(())
}
