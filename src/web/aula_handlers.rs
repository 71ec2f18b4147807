// src/web/aula_handlers.rs
use crate::{
    error::AppResult,
    models::{
        aula::{DadosAula, Intervalo},
        sala::LocalSala,
    },
    services::aula_service,
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
pub struct FiltroAulas {
    id_disciplina: Option<String>,
}

fn ler_dados(body: &Value) -> AppResult<DadosAula> {
    let campos = Campos::new(body)?;
    campos.exigir(&[
        "id_disciplina",
        "bloco",
        "espaco",
        "sala",
        "data",
        "horario_inicio",
        "horario_fim",
        "nome_aula",
    ])?;

    let periodo = Intervalo::from_data_horarios(
        &campos.texto("data")?,
        &campos.texto("horario_inicio")?,
        &campos.texto("horario_fim")?,
    )?;

    Ok(DadosAula {
        id_disciplina: campos.inteiro("id_disciplina")?,
        local: LocalSala {
            bloco: campos.inteiro("bloco")?,
            espaco: campos.inteiro("espaco")?,
            numero_sala: campos.inteiro("sala")?,
        },
        periodo,
        nome_aula: campos.texto("nome_aula")?,
    })
}

// GET /aulas?id_disciplina=N
pub async fn handle_listar(
    State(state): State<AppState>,
    Query(filtro): Query<FiltroAulas>,
) -> AppResult<impl IntoResponse> {
    let id_disciplina = parse_filtro(filtro.id_disciplina.as_deref(), "Disciplina inválida")?;
    Ok(Json(aula_service::find_all_aulas(&state.db_pool, id_disciplina).await?))
}

// GET /aulas/{id}
pub async fn handle_buscar(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    Ok(Json(aula_service::find_aula_by_id(&state.db_pool, id).await?))
}

// POST /aulas
pub async fn handle_criar(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
) -> AppResult<Response> {
    let dados = ler_dados(&body)?;
    let id = aula_service::create_aula(&state.db_pool, &dados).await?;
    Ok(criado("Aula cadastrada com sucesso", id))
}

// PUT /aulas/{id}
pub async fn handle_atualizar(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<Value>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    let dados = ler_dados(&body)?;
    aula_service::update_aula(&state.db_pool, id, &dados).await?;
    Ok(mensagem("Aula atualizada com sucesso"))
}

// DELETE /aulas/{id}
pub async fn handle_remover(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    aula_service::delete_aula(&state.db_pool, id).await?;
    Ok(mensagem("Aula removida com sucesso"))
}
