// src/web/sala_handlers.rs
use crate::{
    error::AppResult,
    models::sala::{DadosSala, LocalSala},
    services::sala_service,
    state::AppState,
    web::payload::{criado, mensagem, parse_id, Campos, JsonBody},
};
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;

fn ler_dados(body: &Value) -> AppResult<DadosSala> {
    let campos = Campos::new(body)?;
    campos.exigir(&["nome", "bloco", "espaco", "numero_sala"])?;
    Ok(DadosSala {
        nome: campos.texto("nome")?,
        local: LocalSala {
            bloco: campos.inteiro("bloco")?,
            espaco: campos.inteiro("espaco")?,
            numero_sala: campos.inteiro("numero_sala")?,
        },
    })
}

// GET /salas
pub async fn handle_listar(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    Ok(Json(sala_service::find_all_salas(&state.db_pool).await?))
}

// GET /salas/{id}
pub async fn handle_buscar(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    Ok(Json(sala_service::find_sala_by_id(&state.db_pool, id).await?))
}

// POST /salas
pub async fn handle_criar(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
) -> AppResult<Response> {
    let dados = ler_dados(&body)?;
    let id = sala_service::create_sala(&state.db_pool, &dados).await?;
    Ok(criado("Sala cadastrada com sucesso", id))
}

// PUT /salas/{id}
pub async fn handle_atualizar(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<Value>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    let dados = ler_dados(&body)?;
    sala_service::update_sala(&state.db_pool, id, &dados).await?;
    Ok(mensagem("Sala atualizada com sucesso"))
}

// DELETE /salas/{id}
pub async fn handle_remover(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    sala_service::delete_sala(&state.db_pool, id).await?;
    Ok(mensagem("Sala removida com sucesso"))
}

// GET /salas/{id}/aulas
pub async fn handle_aulas(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    Ok(Json(sala_service::find_aulas_of_sala(&state.db_pool, id).await?))
}
