// src/services/disciplina_service.rs
use crate::{
    db,
    error::{AppError, AppResult},
    models::{
        aluno::Aluno,
        disciplina::{DadosDisciplina, Disciplina},
        professor::Professor,
    },
    services::existe,
};
use sqlx::{SqliteConnection, SqlitePool};

const SELECT_DISCIPLINA: &str =
    "SELECT id_disciplina, id_curso, nome, descricao, url_imagem FROM disciplina";

/// Um dos dois lados N-M de uma disciplina.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vinculo {
    Professor,
    Aluno,
}

impl Vinculo {
    fn tabela(self) -> &'static str {
        match self {
            Vinculo::Professor => "disciplina_professor",
            Vinculo::Aluno => "disciplina_aluno",
        }
    }

    fn coluna(self) -> &'static str {
        match self {
            Vinculo::Professor => "id_professor",
            Vinculo::Aluno => "id_aluno",
        }
    }

    fn tabela_membro(self) -> &'static str {
        match self {
            Vinculo::Professor => "professor",
            Vinculo::Aluno => "aluno",
        }
    }

    fn nao_encontrado(self) -> &'static str {
        match self {
            Vinculo::Professor => "Professor não encontrado",
            Vinculo::Aluno => "Aluno não encontrado",
        }
    }

    fn ja_vinculado(self) -> &'static str {
        match self {
            Vinculo::Professor => "O professor já está vinculado a esta disciplina",
            Vinculo::Aluno => "O aluno já está matriculado nesta disciplina",
        }
    }

    fn sem_vinculo(self) -> &'static str {
        match self {
            Vinculo::Professor => "O professor não está vinculado a esta disciplina",
            Vinculo::Aluno => "O aluno não está matriculado nesta disciplina",
        }
    }
}

pub async fn find_all_disciplinas(db_pool: &SqlitePool) -> AppResult<Vec<Disciplina>> {
    let mut conn = db_pool.acquire().await?;
    let disciplinas =
        sqlx::query_as::<_, Disciplina>(&format!("{SELECT_DISCIPLINA} ORDER BY id_disciplina"))
            .fetch_all(&mut *conn)
            .await?;
    Ok(disciplinas)
}

pub async fn find_disciplina_by_id(db_pool: &SqlitePool, id: i64) -> AppResult<Disciplina> {
    let mut conn = db_pool.acquire().await?;
    fetch_disciplina(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("Disciplina não encontrada"))
}

async fn fetch_disciplina(conn: &mut SqliteConnection, id: i64) -> AppResult<Option<Disciplina>> {
    let disciplina =
        sqlx::query_as::<_, Disciplina>(&format!("{SELECT_DISCIPLINA} WHERE id_disciplina = ?"))
            .bind(id)
            .fetch_optional(conn)
            .await?;
    Ok(disciplina)
}

async fn verificar_nome_livre(conn: &mut SqliteConnection, id_curso: i64, nome: &str) -> AppResult<()> {
    let encontrado =
        sqlx::query_scalar::<_, i64>("SELECT 1 FROM disciplina WHERE id_curso = ? AND nome = ?")
            .bind(id_curso)
            .bind(nome)
            .fetch_optional(conn)
            .await?;
    if encontrado.is_some() {
        return Err(AppError::conflict("A disciplina informada já existe neste curso"));
    }
    Ok(())
}

async fn verificar_curso(conn: &mut SqliteConnection, id_curso: i64) -> AppResult<()> {
    if !existe(conn, "SELECT 1 FROM curso WHERE id_curso = ?", id_curso).await? {
        return Err(AppError::not_found("O curso informado não existe"));
    }
    Ok(())
}

pub async fn create_disciplina(db_pool: &SqlitePool, dados: &DadosDisciplina) -> AppResult<i64> {
    tracing::info!("Tentando criar disciplina '{}' no curso {}", dados.nome, dados.id_curso);
    let mut tx = db::begin_escrita(db_pool).await?;

    verificar_curso(&mut tx, dados.id_curso).await?;
    verificar_nome_livre(&mut tx, dados.id_curso, &dados.nome).await?;

    let id = sqlx::query(
        "INSERT INTO disciplina (id_curso, nome, descricao, url_imagem) VALUES (?, ?, ?, ?)",
    )
    .bind(dados.id_curso)
    .bind(&dados.nome)
    .bind(&dados.descricao)
    .bind(&dados.url_imagem)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    tx.commit().await?;
    tracing::info!("✅ Disciplina {} criada.", id);
    Ok(id)
}

pub async fn update_disciplina(db_pool: &SqlitePool, id: i64, dados: &DadosDisciplina) -> AppResult<()> {
    let mut tx = db::begin_escrita(db_pool).await?;

    let atual = fetch_disciplina(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::not_found("Disciplina não encontrada"))?;

    verificar_curso(&mut tx, dados.id_curso).await?;
    if atual.id_curso != dados.id_curso || atual.nome != dados.nome {
        verificar_nome_livre(&mut tx, dados.id_curso, &dados.nome).await?;
    }

    sqlx::query(
        "UPDATE disciplina SET id_curso = ?, nome = ?, descricao = ?, url_imagem = ? WHERE id_disciplina = ?",
    )
    .bind(dados.id_curso)
    .bind(&dados.nome)
    .bind(&dados.descricao)
    .bind(&dados.url_imagem)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    tracing::info!("✅ Disciplina {} atualizada.", id);
    Ok(())
}

/// Remove a disciplina; vínculos e aulas dela caem em cascata.
pub async fn delete_disciplina(db_pool: &SqlitePool, id: i64) -> AppResult<()> {
    let mut tx = db::begin_escrita(db_pool).await?;

    if !existe(&mut tx, "SELECT 1 FROM disciplina WHERE id_disciplina = ?", id).await? {
        return Err(AppError::not_found("Disciplina não encontrada"));
    }

    sqlx::query("DELETE FROM disciplina WHERE id_disciplina = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::info!("🗑️ Disciplina {} removida.", id);
    Ok(())
}

pub async fn find_professores_of_disciplina(
    db_pool: &SqlitePool,
    id: i64,
) -> AppResult<Vec<Professor>> {
    let mut conn = db_pool.acquire().await?;

    if !existe(&mut conn, "SELECT 1 FROM disciplina WHERE id_disciplina = ?", id).await? {
        return Err(AppError::not_found("Disciplina não encontrada"));
    }

    let professores = sqlx::query_as::<_, Professor>(
        r#"
        SELECT professor.id_professor, professor.id_usuario, professor.nome,
               professor.ra, professor.rfid_tag
        FROM professor
        JOIN disciplina_professor ON professor.id_professor = disciplina_professor.id_professor
        WHERE disciplina_professor.id_disciplina = ?
        ORDER BY professor.nome
        "#,
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(professores)
}

pub async fn find_alunos_of_disciplina(db_pool: &SqlitePool, id: i64) -> AppResult<Vec<Aluno>> {
    let mut conn = db_pool.acquire().await?;

    if !existe(&mut conn, "SELECT 1 FROM disciplina WHERE id_disciplina = ?", id).await? {
        return Err(AppError::not_found("Disciplina não encontrada"));
    }

    let alunos = sqlx::query_as::<_, Aluno>(
        r#"
        SELECT aluno.id_aluno, aluno.id_usuario, aluno.id_curso, aluno.nome,
               aluno.ra, aluno.rfid_tag, aluno.ano_letivo
        FROM aluno
        JOIN disciplina_aluno ON aluno.id_aluno = disciplina_aluno.id_aluno
        WHERE disciplina_aluno.id_disciplina = ?
        ORDER BY aluno.nome
        "#,
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(alunos)
}

pub(crate) async fn vinculo_existe(
    conn: &mut SqliteConnection,
    vinculo: Vinculo,
    id_disciplina: i64,
    id_membro: i64,
) -> AppResult<bool> {
    let sql = format!(
        "SELECT 1 FROM {} WHERE id_disciplina = ? AND {} = ?",
        vinculo.tabela(),
        vinculo.coluna()
    );
    let encontrado = sqlx::query_scalar::<_, i64>(&sql)
        .bind(id_disciplina)
        .bind(id_membro)
        .fetch_optional(conn)
        .await?;
    Ok(encontrado.is_some())
}

/// Liga um professor ou aluno à disciplina.
pub async fn vincular(
    db_pool: &SqlitePool,
    vinculo: Vinculo,
    id_disciplina: i64,
    id_membro: i64,
) -> AppResult<i64> {
    tracing::info!("Vinculando {:?} {} à disciplina {}", vinculo, id_membro, id_disciplina);
    let mut tx = db::begin_escrita(db_pool).await?;

    if !existe(&mut tx, "SELECT 1 FROM disciplina WHERE id_disciplina = ?", id_disciplina).await? {
        return Err(AppError::not_found("Disciplina não encontrada"));
    }

    let sql_membro = format!(
        "SELECT 1 FROM {} WHERE {} = ?",
        vinculo.tabela_membro(),
        vinculo.coluna()
    );
    if !existe(&mut tx, &sql_membro, id_membro).await? {
        return Err(AppError::not_found(vinculo.nao_encontrado()));
    }

    if vinculo_existe(&mut tx, vinculo, id_disciplina, id_membro).await? {
        return Err(AppError::conflict(vinculo.ja_vinculado()));
    }

    let sql = format!(
        "INSERT INTO {} (id_disciplina, {}) VALUES (?, ?)",
        vinculo.tabela(),
        vinculo.coluna()
    );
    let id = sqlx::query(&sql)
        .bind(id_disciplina)
        .bind(id_membro)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

    tx.commit().await?;
    tracing::info!("✅ Vínculo {} criado.", id);
    Ok(id)
}

pub async fn desvincular(
    db_pool: &SqlitePool,
    vinculo: Vinculo,
    id_disciplina: i64,
    id_membro: i64,
) -> AppResult<()> {
    let mut tx = db::begin_escrita(db_pool).await?;

    if !vinculo_existe(&mut tx, vinculo, id_disciplina, id_membro).await? {
        return Err(AppError::not_found(vinculo.sem_vinculo()));
    }

    let sql = format!(
        "DELETE FROM {} WHERE id_disciplina = ? AND {} = ?",
        vinculo.tabela(),
        vinculo.coluna()
    );
    sqlx::query(&sql)
        .bind(id_disciplina)
        .bind(id_membro)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::info!("🗑️ {:?} {} desvinculado da disciplina {}.", vinculo, id_membro, id_disciplina);
    Ok(())
}
