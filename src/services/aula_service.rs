// src/services/aula_service.rs
use crate::{
    db,
    error::{AppError, AppResult},
    models::aula::{self, Aula, AulaComSala, DadosAula, Intervalo},
    services::{existe, sala_service},
};
use chrono::NaiveDateTime;
use sqlx::{SqliteConnection, SqlitePool};

const SELECT_AULA: &str = "SELECT id_aula, id_disciplina, id_sala, inicio, fim, nome_aula FROM aula";

/// Recorte aplicado às listagens de aulas.
#[derive(Debug, Clone, Copy)]
pub enum FiltroAula {
    Todas,
    Disciplina(i64),
    Sala(i64),
}

pub(crate) async fn fetch_aulas_com_sala(
    conn: &mut SqliteConnection,
    filtro: FiltroAula,
) -> AppResult<Vec<AulaComSala>> {
    let (id_disciplina, id_sala) = match filtro {
        FiltroAula::Todas => (None, None),
        FiltroAula::Disciplina(id) => (Some(id), None),
        FiltroAula::Sala(id) => (None, Some(id)),
    };

    let aulas = sqlx::query_as::<_, AulaComSala>(
        r#"
        SELECT aula.id_aula, aula.id_disciplina, aula.nome_aula, aula.id_sala,
               sala.bloco, sala.espaco, sala.numero_sala, aula.inicio, aula.fim
        FROM aula
        JOIN sala ON aula.id_sala = sala.id_sala
        WHERE (?1 IS NULL OR aula.id_disciplina = ?1)
          AND (?2 IS NULL OR aula.id_sala = ?2)
        ORDER BY aula.inicio
        "#,
    )
    .bind(id_disciplina)
    .bind(id_sala)
    .fetch_all(conn)
    .await?;

    Ok(aulas)
}

pub async fn find_all_aulas(db_pool: &SqlitePool, id_disciplina: Option<i64>) -> AppResult<Vec<AulaComSala>> {
    tracing::debug!("Buscando aulas (id_disciplina = {:?})", id_disciplina);
    let mut conn = db_pool.acquire().await?;
    let filtro = id_disciplina.map_or(FiltroAula::Todas, FiltroAula::Disciplina);
    fetch_aulas_com_sala(&mut conn, filtro).await
}

pub async fn find_aula_by_id(db_pool: &SqlitePool, id: i64) -> AppResult<Aula> {
    let mut conn = db_pool.acquire().await?;
    fetch_aula(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("Aula não encontrada"))
}

pub(crate) async fn fetch_aula(conn: &mut SqliteConnection, id: i64) -> AppResult<Option<Aula>> {
    let aula = sqlx::query_as::<_, Aula>(&format!("{SELECT_AULA} WHERE id_aula = ?"))
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(aula)
}

/// Aula em andamento na sala no instante dado (limites incluídos).
pub(crate) async fn find_ativa_na_sala(
    conn: &mut SqliteConnection,
    id_sala: i64,
    instante: NaiveDateTime,
) -> AppResult<Option<Aula>> {
    let aula = sqlx::query_as::<_, Aula>(&format!(
        "{SELECT_AULA} WHERE id_sala = ?1 AND inicio <= ?2 AND fim >= ?2 ORDER BY inicio LIMIT 1"
    ))
    .bind(id_sala)
    .bind(instante)
    .fetch_optional(conn)
    .await?;

    Ok(aula.filter(|a| a.periodo().contem(instante)))
}

/// Procura uma aula da mesma sala cujo período se sobreponha ao informado.
async fn find_conflito(
    conn: &mut SqliteConnection,
    id_sala: i64,
    periodo: &Intervalo,
    ignorar: Option<i64>,
) -> AppResult<Option<Aula>> {
    // O filtro por período usa o índice (id_sala, inicio, fim); sobrepoe confirma.
    let aulas = sqlx::query_as::<_, Aula>(&format!(
        "{SELECT_AULA} WHERE id_sala = ?1 AND (?2 IS NULL OR id_aula <> ?2) \
         AND inicio < ?3 AND fim > ?4 ORDER BY inicio"
    ))
    .bind(id_sala)
    .bind(ignorar)
    .bind(periodo.fim)
    .bind(periodo.inicio)
    .fetch_all(conn)
    .await?;

    Ok(aulas.into_iter().find(|a| periodo.sobrepoe(&a.periodo())))
}

/// Guardas comuns a criar e atualizar. Devolve o id da sala resolvida.
async fn validar_agendamento(
    conn: &mut SqliteConnection,
    dados: &DadosAula,
    ignorar: Option<i64>,
) -> AppResult<i64> {
    dados.periodo.validar_agendamento(aula::agora())?;

    let id_sala = sala_service::find_id_by_local(conn, dados.local)
        .await?
        .ok_or_else(|| AppError::not_found("Sala não encontrada"))?;

    if !existe(conn, "SELECT 1 FROM disciplina WHERE id_disciplina = ?", dados.id_disciplina).await? {
        return Err(AppError::not_found("Disciplina não encontrada"));
    }

    if let Some(outra) = find_conflito(conn, id_sala, &dados.periodo, ignorar).await? {
        tracing::debug!("Conflito de horário com a aula {}", outra.id_aula);
        return Err(AppError::conflict("Já existe uma aula agendada nesta sala neste horário"));
    }

    Ok(id_sala)
}

pub async fn create_aula(db_pool: &SqlitePool, dados: &DadosAula) -> AppResult<i64> {
    tracing::info!(
        "Tentando agendar aula '{}' de {} a {}",
        dados.nome_aula,
        dados.periodo.inicio,
        dados.periodo.fim
    );
    let mut tx = db::begin_escrita(db_pool).await?;

    let id_sala = validar_agendamento(&mut tx, dados, None).await?;

    let id = sqlx::query(
        "INSERT INTO aula (id_disciplina, id_sala, inicio, fim, nome_aula) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(dados.id_disciplina)
    .bind(id_sala)
    .bind(dados.periodo.inicio)
    .bind(dados.periodo.fim)
    .bind(&dados.nome_aula)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    tx.commit().await?;
    tracing::info!("✅ Aula {} agendada na sala {}.", id, id_sala);
    Ok(id)
}

pub async fn update_aula(db_pool: &SqlitePool, id: i64, dados: &DadosAula) -> AppResult<()> {
    let mut tx = db::begin_escrita(db_pool).await?;

    if !existe(&mut tx, "SELECT 1 FROM aula WHERE id_aula = ?", id).await? {
        return Err(AppError::not_found("Aula não encontrada"));
    }

    let id_sala = validar_agendamento(&mut tx, dados, Some(id)).await?;

    sqlx::query(
        "UPDATE aula SET id_disciplina = ?, id_sala = ?, inicio = ?, fim = ?, nome_aula = ? WHERE id_aula = ?",
    )
    .bind(dados.id_disciplina)
    .bind(id_sala)
    .bind(dados.periodo.inicio)
    .bind(dados.periodo.fim)
    .bind(&dados.nome_aula)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    tracing::info!("✅ Aula {} atualizada.", id);
    Ok(())
}

/// Remove a aula; as presenças dela caem em cascata.
pub async fn delete_aula(db_pool: &SqlitePool, id: i64) -> AppResult<()> {
    let mut tx = db::begin_escrita(db_pool).await?;

    if !existe(&mut tx, "SELECT 1 FROM aula WHERE id_aula = ?", id).await? {
        return Err(AppError::not_found("Aula não encontrada"));
    }

    sqlx::query("DELETE FROM aula WHERE id_aula = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::info!("🗑️ Aula {} removida.", id);
    Ok(())
}
