// src/services/professor_service.rs
use crate::{
    db,
    error::{AppError, AppResult},
    models::{
        disciplina::Disciplina,
        professor::{DadosProfessor, NovoProfessor, Professor},
    },
    services::{existe, usuario_service},
};
use sqlx::{SqliteConnection, SqlitePool};

const SELECT_PROFESSOR: &str = "SELECT id_professor, id_usuario, nome, ra, rfid_tag FROM professor";

pub async fn find_all_professores(db_pool: &SqlitePool) -> AppResult<Vec<Professor>> {
    tracing::debug!("Buscando todos os professores...");
    let mut conn = db_pool.acquire().await?;
    let professores =
        sqlx::query_as::<_, Professor>(&format!("{SELECT_PROFESSOR} ORDER BY id_professor"))
            .fetch_all(&mut *conn)
            .await?;
    Ok(professores)
}

pub async fn find_professor_by_id(db_pool: &SqlitePool, id: i64) -> AppResult<Professor> {
    let mut conn = db_pool.acquire().await?;
    fetch_professor(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("Professor não encontrado"))
}

pub(crate) async fn fetch_professor(
    conn: &mut SqliteConnection,
    id: i64,
) -> AppResult<Option<Professor>> {
    let professor =
        sqlx::query_as::<_, Professor>(&format!("{SELECT_PROFESSOR} WHERE id_professor = ?"))
            .bind(id)
            .fetch_optional(conn)
            .await?;
    Ok(professor)
}

pub async fn find_professor_by_usuario(
    conn: &mut SqliteConnection,
    id_usuario: i64,
) -> AppResult<Option<Professor>> {
    let professor =
        sqlx::query_as::<_, Professor>(&format!("{SELECT_PROFESSOR} WHERE id_usuario = ?"))
            .bind(id_usuario)
            .fetch_optional(conn)
            .await?;
    Ok(professor)
}

pub async fn find_professor_of_usuario(db_pool: &SqlitePool, id_usuario: i64) -> AppResult<Professor> {
    let mut conn = db_pool.acquire().await?;
    if usuario_service::fetch_usuario(&mut conn, id_usuario).await?.is_none() {
        return Err(AppError::not_found("Usuário não encontrado"));
    }
    find_professor_by_usuario(&mut conn, id_usuario)
        .await?
        .ok_or_else(|| AppError::not_found("O usuário não possui cadastro de professor"))
}

async fn verificar_ra_livre(conn: &mut SqliteConnection, ra: i64) -> AppResult<()> {
    if existe(conn, "SELECT 1 FROM professor WHERE ra = ?", ra).await? {
        return Err(AppError::conflict("O RA informado já está registrado no sistema"));
    }
    Ok(())
}

async fn verificar_rfid_livre(conn: &mut SqliteConnection, rfid_tag: &str) -> AppResult<()> {
    let encontrado = sqlx::query_scalar::<_, i64>("SELECT 1 FROM professor WHERE rfid_tag = ?")
        .bind(rfid_tag)
        .fetch_optional(conn)
        .await?;
    if encontrado.is_some() {
        return Err(AppError::conflict("A tag RFID informada já está registrada no sistema"));
    }
    Ok(())
}

pub async fn create_professor(db_pool: &SqlitePool, novo: &NovoProfessor) -> AppResult<i64> {
    tracing::info!("Tentando cadastrar professor RA {}", novo.dados.ra);

    let mut tx = db::begin_escrita(db_pool).await?;

    usuario_service::verificar_conta_livre(&mut tx, novo.id_usuario).await?;
    verificar_ra_livre(&mut tx, novo.dados.ra).await?;
    verificar_rfid_livre(&mut tx, &novo.dados.rfid_tag).await?;

    let id = sqlx::query("INSERT INTO professor (id_usuario, nome, ra, rfid_tag) VALUES (?, ?, ?, ?)")
        .bind(novo.id_usuario)
        .bind(&novo.dados.nome)
        .bind(novo.dados.ra)
        .bind(&novo.dados.rfid_tag)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

    tx.commit().await?;
    tracing::info!("✅ Professor {} cadastrado.", id);
    Ok(id)
}

pub async fn update_professor(db_pool: &SqlitePool, id: i64, dados: &DadosProfessor) -> AppResult<()> {
    let mut tx = db::begin_escrita(db_pool).await?;

    let atual = fetch_professor(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::not_found("Professor não encontrado"))?;

    if dados.ra != atual.ra {
        verificar_ra_livre(&mut tx, dados.ra).await?;
    }
    if dados.rfid_tag != atual.rfid_tag {
        verificar_rfid_livre(&mut tx, &dados.rfid_tag).await?;
    }

    sqlx::query("UPDATE professor SET nome = ?, ra = ?, rfid_tag = ? WHERE id_professor = ?")
        .bind(&dados.nome)
        .bind(dados.ra)
        .bind(&dados.rfid_tag)
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::info!("✅ Professor {} atualizado.", id);
    Ok(())
}

pub async fn delete_professor(db_pool: &SqlitePool, id: i64) -> AppResult<()> {
    let mut tx = db::begin_escrita(db_pool).await?;

    if !existe(&mut tx, "SELECT 1 FROM professor WHERE id_professor = ?", id).await? {
        return Err(AppError::not_found("Professor não encontrado"));
    }

    sqlx::query("DELETE FROM professor WHERE id_professor = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::info!("🗑️ Professor {} removido.", id);
    Ok(())
}

pub async fn find_disciplinas_of_professor(
    db_pool: &SqlitePool,
    id: i64,
) -> AppResult<Vec<Disciplina>> {
    let mut conn = db_pool.acquire().await?;

    if !existe(&mut conn, "SELECT 1 FROM professor WHERE id_professor = ?", id).await? {
        return Err(AppError::not_found("Professor não encontrado"));
    }

    let disciplinas = sqlx::query_as::<_, Disciplina>(
        r#"
        SELECT disciplina.id_disciplina, disciplina.id_curso, disciplina.nome,
               disciplina.descricao, disciplina.url_imagem
        FROM disciplina
        JOIN disciplina_professor ON disciplina.id_disciplina = disciplina_professor.id_disciplina
        WHERE disciplina_professor.id_professor = ?
        ORDER BY disciplina.nome
        "#,
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(disciplinas)
}
