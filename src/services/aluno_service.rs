// src/services/aluno_service.rs
use crate::{
    db,
    error::{AppError, AppResult},
    models::{
        aluno::{Aluno, DadosAluno, NovoAluno},
        curso::Curso,
        disciplina::Disciplina,
        presenca::PresencaDetalhada,
    },
    services::{existe, usuario_service},
};
use sqlx::{SqliteConnection, SqlitePool};

const SELECT_ALUNO: &str =
    "SELECT id_aluno, id_usuario, id_curso, nome, ra, rfid_tag, ano_letivo FROM aluno";

/// Lista alunos, opcionalmente só os de um ano letivo.
pub async fn find_all_alunos(db_pool: &SqlitePool, ano_letivo: Option<i64>) -> AppResult<Vec<Aluno>> {
    tracing::debug!("Buscando alunos (ano_letivo = {:?})", ano_letivo);
    let mut conn = db_pool.acquire().await?;

    let alunos = match ano_letivo {
        Some(ano) => {
            sqlx::query_as::<_, Aluno>(&format!("{SELECT_ALUNO} WHERE ano_letivo = ? ORDER BY id_aluno"))
                .bind(ano)
                .fetch_all(&mut *conn)
                .await?
        }
        None => {
            sqlx::query_as::<_, Aluno>(&format!("{SELECT_ALUNO} ORDER BY id_aluno"))
                .fetch_all(&mut *conn)
                .await?
        }
    };
    Ok(alunos)
}

pub async fn find_aluno_by_id(db_pool: &SqlitePool, id: i64) -> AppResult<Aluno> {
    let mut conn = db_pool.acquire().await?;
    fetch_aluno(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("Aluno não encontrado"))
}

pub(crate) async fn fetch_aluno(conn: &mut SqliteConnection, id: i64) -> AppResult<Option<Aluno>> {
    let aluno = sqlx::query_as::<_, Aluno>(&format!("{SELECT_ALUNO} WHERE id_aluno = ?"))
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(aluno)
}

pub async fn find_aluno_by_usuario(
    conn: &mut SqliteConnection,
    id_usuario: i64,
) -> AppResult<Option<Aluno>> {
    let aluno = sqlx::query_as::<_, Aluno>(&format!("{SELECT_ALUNO} WHERE id_usuario = ?"))
        .bind(id_usuario)
        .fetch_optional(conn)
        .await?;
    Ok(aluno)
}

pub(crate) async fn find_aluno_by_rfid(
    conn: &mut SqliteConnection,
    rfid_tag: &str,
) -> AppResult<Option<Aluno>> {
    let aluno = sqlx::query_as::<_, Aluno>(&format!("{SELECT_ALUNO} WHERE rfid_tag = ?"))
        .bind(rfid_tag)
        .fetch_optional(conn)
        .await?;
    Ok(aluno)
}

/// Perfil de aluno ligado a uma conta; 404 se a conta ou o perfil não existirem.
pub async fn find_aluno_of_usuario(db_pool: &SqlitePool, id_usuario: i64) -> AppResult<Aluno> {
    let mut conn = db_pool.acquire().await?;
    if usuario_service::fetch_usuario(&mut conn, id_usuario).await?.is_none() {
        return Err(AppError::not_found("Usuário não encontrado"));
    }
    find_aluno_by_usuario(&mut conn, id_usuario)
        .await?
        .ok_or_else(|| AppError::not_found("O usuário não possui cadastro de aluno"))
}

async fn verificar_ra_livre(conn: &mut SqliteConnection, ra: i64) -> AppResult<()> {
    if existe(conn, "SELECT 1 FROM aluno WHERE ra = ?", ra).await? {
        return Err(AppError::conflict("O RA informado já está registrado no sistema"));
    }
    Ok(())
}

async fn verificar_rfid_livre(conn: &mut SqliteConnection, rfid_tag: &str) -> AppResult<()> {
    if find_aluno_by_rfid(conn, rfid_tag).await?.is_some() {
        return Err(AppError::conflict("A tag RFID informada já está registrada no sistema"));
    }
    Ok(())
}

async fn verificar_curso(conn: &mut SqliteConnection, id_curso: i64) -> AppResult<()> {
    if !existe(conn, "SELECT 1 FROM curso WHERE id_curso = ?", id_curso).await? {
        return Err(AppError::not_found("O curso informado não existe"));
    }
    Ok(())
}

pub async fn create_aluno(db_pool: &SqlitePool, novo: &NovoAluno) -> AppResult<i64> {
    novo.dados.validar()?;
    tracing::info!("Tentando cadastrar aluno RA {}", novo.dados.ra);

    let mut tx = db::begin_escrita(db_pool).await?;

    usuario_service::verificar_conta_livre(&mut tx, novo.id_usuario).await?;
    verificar_curso(&mut tx, novo.dados.id_curso).await?;
    verificar_ra_livre(&mut tx, novo.dados.ra).await?;
    verificar_rfid_livre(&mut tx, &novo.dados.rfid_tag).await?;

    let id = sqlx::query(
        "INSERT INTO aluno (id_usuario, id_curso, nome, ra, rfid_tag, ano_letivo) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(novo.id_usuario)
    .bind(novo.dados.id_curso)
    .bind(&novo.dados.nome)
    .bind(novo.dados.ra)
    .bind(&novo.dados.rfid_tag)
    .bind(novo.dados.ano_letivo)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    tx.commit().await?;
    tracing::info!("✅ Aluno {} cadastrado.", id);
    Ok(id)
}

pub async fn update_aluno(db_pool: &SqlitePool, id: i64, dados: &DadosAluno) -> AppResult<()> {
    dados.validar()?;

    let mut tx = db::begin_escrita(db_pool).await?;

    let atual = fetch_aluno(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::not_found("Aluno não encontrado"))?;

    verificar_curso(&mut tx, dados.id_curso).await?;
    // Unicidade só é reavaliada quando o valor mudou; manter o próprio valor não é conflito.
    if dados.ra != atual.ra {
        verificar_ra_livre(&mut tx, dados.ra).await?;
    }
    if dados.rfid_tag != atual.rfid_tag {
        verificar_rfid_livre(&mut tx, &dados.rfid_tag).await?;
    }

    sqlx::query(
        "UPDATE aluno SET nome = ?, ra = ?, id_curso = ?, ano_letivo = ?, rfid_tag = ? WHERE id_aluno = ?",
    )
    .bind(&dados.nome)
    .bind(dados.ra)
    .bind(dados.id_curso)
    .bind(dados.ano_letivo)
    .bind(&dados.rfid_tag)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    tracing::info!("✅ Aluno {} atualizado.", id);
    Ok(())
}

pub async fn delete_aluno(db_pool: &SqlitePool, id: i64) -> AppResult<()> {
    let mut tx = db::begin_escrita(db_pool).await?;

    if !existe(&mut tx, "SELECT 1 FROM aluno WHERE id_aluno = ?", id).await? {
        return Err(AppError::not_found("Aluno não encontrado"));
    }

    sqlx::query("DELETE FROM aluno WHERE id_aluno = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::info!("🗑️ Aluno {} removido.", id);
    Ok(())
}

/// Histórico de presenças do aluno, opcionalmente filtrado por disciplina.
pub async fn find_presencas_of_aluno(
    db_pool: &SqlitePool,
    id: i64,
    id_disciplina: Option<i64>,
) -> AppResult<Vec<PresencaDetalhada>> {
    let mut conn = db_pool.acquire().await?;

    if !existe(&mut conn, "SELECT 1 FROM aluno WHERE id_aluno = ?", id).await? {
        return Err(AppError::not_found("Aluno não encontrado"));
    }

    let presencas = sqlx::query_as::<_, PresencaDetalhada>(
        r#"
        SELECT presenca.id_presenca, presenca.id_aluno, presenca.id_aula, presenca.presente,
               presenca.horario, aula.id_disciplina, disciplina.nome AS nome_disciplina
        FROM presenca
        JOIN aula ON presenca.id_aula = aula.id_aula
        JOIN disciplina ON aula.id_disciplina = disciplina.id_disciplina
        WHERE presenca.id_aluno = ?1
          AND (?2 IS NULL OR aula.id_disciplina = ?2)
        ORDER BY presenca.horario
        "#,
    )
    .bind(id)
    .bind(id_disciplina)
    .fetch_all(&mut *conn)
    .await?;

    Ok(presencas)
}

pub async fn find_disciplinas_of_aluno(db_pool: &SqlitePool, id: i64) -> AppResult<Vec<Disciplina>> {
    let mut conn = db_pool.acquire().await?;

    if !existe(&mut conn, "SELECT 1 FROM aluno WHERE id_aluno = ?", id).await? {
        return Err(AppError::not_found("Aluno não encontrado"));
    }

    let disciplinas = sqlx::query_as::<_, Disciplina>(
        r#"
        SELECT disciplina.id_disciplina, disciplina.id_curso, disciplina.nome,
               disciplina.descricao, disciplina.url_imagem
        FROM disciplina
        JOIN disciplina_aluno ON disciplina.id_disciplina = disciplina_aluno.id_disciplina
        WHERE disciplina_aluno.id_aluno = ?
        ORDER BY disciplina.nome
        "#,
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(disciplinas)
}

pub async fn find_curso_of_aluno(db_pool: &SqlitePool, id: i64) -> AppResult<Curso> {
    let mut conn = db_pool.acquire().await?;

    let aluno = fetch_aluno(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("Aluno não encontrado"))?;

    let curso = sqlx::query_as::<_, Curso>("SELECT id_curso, nome FROM curso WHERE id_curso = ?")
        .bind(aluno.id_curso)
        .fetch_one(&mut *conn)
        .await?;

    Ok(curso)
}
