// src/web/presenca_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::presenca::{CheckIn, DadosPresenca},
    services::presenca_service,
    state::AppState,
    web::payload::{criado, mensagem, parse_filtro, parse_id, Campos, JsonBody},
};
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct FiltroChamada {
    id_aula: Option<String>,
}

// POST /presencas (leitor RFID)
pub async fn handle_check_in(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
) -> AppResult<Response> {
    let campos = Campos::new(&body)?;
    campos.exigir(&["rfid_tag", "id_sala"])?;
    let check_in = CheckIn {
        rfid_tag: campos.texto("rfid_tag")?,
        id_sala: campos.inteiro("id_sala")?,
    };

    let id = presenca_service::registrar_check_in(&state.db_pool, &check_in).await?;
    Ok(criado("Presença registrada com sucesso", id))
}

// GET /presencas?id_aula=N
pub async fn handle_chamada(
    State(state): State<AppState>,
    Query(filtro): Query<FiltroChamada>,
) -> AppResult<impl IntoResponse> {
    let id_aula = parse_filtro(filtro.id_aula.as_deref(), "Aula inválida")?
        .ok_or_else(|| AppError::validation("Informe a aula (id_aula)"))?;
    Ok(Json(presenca_service::find_chamada(&state.db_pool, id_aula).await?))
}

// GET /presencas/{id}
pub async fn handle_buscar(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    Ok(Json(presenca_service::find_presenca_by_id(&state.db_pool, id).await?))
}

// PUT /presencas/{id}
pub async fn handle_atualizar(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<Value>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    let campos = Campos::new(&body)?;
    campos.exigir(&["id_aluno", "id_aula", "presente"])?;
    let dados = DadosPresenca {
        id_aluno: campos.inteiro("id_aluno")?,
        id_aula: campos.inteiro("id_aula")?,
        presente: campos.booleano("presente")?,
    };

    presenca_service::update_presenca(&state.db_pool, id, &dados).await?;
    Ok(mensagem("Presença atualizada com sucesso"))
}

// DELETE /presencas/{id}
pub async fn handle_remover(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    presenca_service::delete_presenca(&state.db_pool, id).await?;
    Ok(mensagem("Presença removida com sucesso"))
}
