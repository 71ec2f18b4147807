// src/web/curso_handlers.rs
use crate::{
    error::AppResult,
    services::curso_service,
    state::AppState,
    web::payload::{criado, mensagem, parse_id, Campos, JsonBody},
};
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;

fn ler_nome(body: &Value) -> AppResult<String> {
    let campos = Campos::new(body)?;
    campos.exigir(&["nome"])?;
    campos.texto("nome")
}

// GET /cursos
pub async fn handle_listar(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    Ok(Json(curso_service::find_all_cursos(&state.db_pool).await?))
}

// GET /cursos/{id}
pub async fn handle_buscar(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    Ok(Json(curso_service::find_curso_by_id(&state.db_pool, id).await?))
}

// POST /cursos
pub async fn handle_criar(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
) -> AppResult<Response> {
    let nome = ler_nome(&body)?;
    let id = curso_service::create_curso(&state.db_pool, &nome).await?;
    Ok(criado("Curso cadastrado com sucesso", id))
}

// PUT /cursos/{id}
pub async fn handle_atualizar(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<Value>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    let nome = ler_nome(&body)?;
    curso_service::update_curso(&state.db_pool, id, &nome).await?;
    Ok(mensagem("Curso atualizado com sucesso"))
}

// DELETE /cursos/{id}
pub async fn handle_remover(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    curso_service::delete_curso(&state.db_pool, id).await?;
    Ok(mensagem("Curso removido com sucesso"))
}

// GET /cursos/{id}/alunos
pub async fn handle_alunos(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    Ok(Json(curso_service::find_alunos_of_curso(&state.db_pool, id).await?))
}

// GET /cursos/{id}/disciplinas
pub async fn handle_disciplinas(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    Ok(Json(curso_service::find_disciplinas_of_curso(&state.db_pool, id).await?))
}
