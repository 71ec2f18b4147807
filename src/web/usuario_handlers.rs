// src/web/usuario_handlers.rs
use crate::{
    error::AppResult,
    models::usuario::{DadosUsuario, TipoUsuario},
    services::{aluno_service, professor_service, usuario_service},
    state::AppState,
    web::payload::{criado, mensagem, parse_id, Campos, JsonBody},
};
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;

fn ler_dados(body: &Value) -> AppResult<DadosUsuario> {
    let campos = Campos::new(body)?;
    campos.exigir(&["email", "senha", "tipo"])?;
    Ok(DadosUsuario {
        email: campos.texto("email")?,
        senha: campos.texto_literal("senha")?,
        tipo: campos.texto("tipo")?.parse::<TipoUsuario>()?,
    })
}

// GET /usuarios
pub async fn handle_listar(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    Ok(Json(usuario_service::find_all_usuarios(&state.db_pool).await?))
}

// GET /usuarios/{id}
pub async fn handle_buscar(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    Ok(Json(usuario_service::find_usuario_by_id(&state.db_pool, id).await?))
}

// POST /usuarios
pub async fn handle_criar(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
) -> AppResult<Response> {
    let dados = ler_dados(&body)?;
    let id = usuario_service::create_usuario(&state.db_pool, &dados, state.bcrypt_cost).await?;
    Ok(criado("Usuário cadastrado com sucesso", id))
}

// PUT /usuarios/{id}
pub async fn handle_atualizar(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<Value>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    let dados = ler_dados(&body)?;
    usuario_service::update_usuario(&state.db_pool, id, &dados, state.bcrypt_cost).await?;
    Ok(mensagem("Usuário atualizado com sucesso"))
}

// DELETE /usuarios/{id}
pub async fn handle_remover(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    usuario_service::delete_usuario(&state.db_pool, id).await?;
    Ok(mensagem("Usuário removido com sucesso"))
}

// GET /usuarios/{id}/aluno
pub async fn handle_perfil_aluno(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    Ok(Json(aluno_service::find_aluno_of_usuario(&state.db_pool, id).await?))
}

// GET /usuarios/{id}/professor
pub async fn handle_perfil_professor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    Ok(Json(professor_service::find_professor_of_usuario(&state.db_pool, id).await?))
}
