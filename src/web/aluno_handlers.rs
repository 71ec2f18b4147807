// src/web/aluno_handlers.rs
use crate::{
    error::AppResult,
    models::aluno::{DadosAluno, NovoAluno},
    services::aluno_service,
    state::AppState,
    web::payload::{criado, mensagem, parse_filtro, parse_id, Campos, JsonBody},
};
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct FiltroAlunos {
    ano_letivo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FiltroPresencas {
    id_disciplina: Option<String>,
}

const CAMPOS_ALUNO: [&str; 5] = ["id_curso", "nome", "ra", "rfid_tag", "ano_letivo"];

fn ler_dados(campos: &Campos<'_>) -> AppResult<DadosAluno> {
    campos.exigir(&CAMPOS_ALUNO)?;
    Ok(DadosAluno {
        id_curso: campos.inteiro("id_curso")?,
        nome: campos.texto("nome")?,
        ra: campos.inteiro("ra")?,
        rfid_tag: campos.texto("rfid_tag")?,
        ano_letivo: campos.inteiro("ano_letivo")?,
    })
}

// GET /alunos?ano_letivo=N
pub async fn handle_listar(
    State(state): State<AppState>,
    Query(filtro): Query<FiltroAlunos>,
) -> AppResult<impl IntoResponse> {
    let ano = parse_filtro(filtro.ano_letivo.as_deref(), "Ano letivo inválido")?;
    Ok(Json(aluno_service::find_all_alunos(&state.db_pool, ano).await?))
}

// GET /alunos/{id}
pub async fn handle_buscar(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    Ok(Json(aluno_service::find_aluno_by_id(&state.db_pool, id).await?))
}

// POST /alunos
pub async fn handle_criar(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
) -> AppResult<Response> {
    let campos = Campos::new(&body)?;
    campos.exigir(&["id_usuario"])?;
    let novo = NovoAluno {
        id_usuario: campos.inteiro("id_usuario")?,
        dados: ler_dados(&campos)?,
    };
    let id = aluno_service::create_aluno(&state.db_pool, &novo).await?;
    Ok(criado("Aluno cadastrado com sucesso", id))
}

// PUT /alunos/{id}
pub async fn handle_atualizar(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<Value>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    let dados = ler_dados(&Campos::new(&body)?)?;
    aluno_service::update_aluno(&state.db_pool, id, &dados).await?;
    Ok(mensagem("Aluno atualizado com sucesso"))
}

// DELETE /alunos/{id}
pub async fn handle_remover(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    aluno_service::delete_aluno(&state.db_pool, id).await?;
    Ok(mensagem("Aluno removido com sucesso"))
}

// GET /alunos/{id}/presencas?id_disciplina=N
pub async fn handle_presencas(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(filtro): Query<FiltroPresencas>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let id_disciplina = parse_filtro(filtro.id_disciplina.as_deref(), "Disciplina inválida")?;
    let presencas = aluno_service::find_presencas_of_aluno(&state.db_pool, id, id_disciplina).await?;
    Ok(Json(json!({ "aluno_id": id, "presencas": presencas })))
}

// GET /alunos/{id}/disciplinas
pub async fn handle_disciplinas(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let disciplinas = aluno_service::find_disciplinas_of_aluno(&state.db_pool, id).await?;
    Ok(Json(json!({ "aluno_id": id, "disciplinas": disciplinas })))
}

// GET /alunos/{id}/curso
pub async fn handle_curso(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let curso = aluno_service::find_curso_of_aluno(&state.db_pool, id).await?;
    Ok(Json(json!({ "aluno_id": id, "curso": curso })))
}
