// src/web/professor_handlers.rs
use crate::{
    error::AppResult,
    models::professor::{DadosProfessor, NovoProfessor},
    services::professor_service,
    state::AppState,
    web::payload::{criado, mensagem, parse_id, Campos, JsonBody},
};
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;

fn ler_dados(campos: &Campos<'_>) -> AppResult<DadosProfessor> {
    campos.exigir(&["nome", "ra", "rfid_tag"])?;
    Ok(DadosProfessor {
        nome: campos.texto("nome")?,
        ra: campos.inteiro("ra")?,
        rfid_tag: campos.texto("rfid_tag")?,
    })
}

// GET /professores
pub async fn handle_listar(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    Ok(Json(professor_service::find_all_professores(&state.db_pool).await?))
}

// GET /professores/{id}
pub async fn handle_buscar(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    Ok(Json(professor_service::find_professor_by_id(&state.db_pool, id).await?))
}

// POST /professores
pub async fn handle_criar(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
) -> AppResult<Response> {
    let campos = Campos::new(&body)?;
    campos.exigir(&["id_usuario"])?;
    let novo = NovoProfessor {
        id_usuario: campos.inteiro("id_usuario")?,
        dados: ler_dados(&campos)?,
    };
    let id = professor_service::create_professor(&state.db_pool, &novo).await?;
    Ok(criado("Professor cadastrado com sucesso", id))
}

// PUT /professores/{id}
pub async fn handle_atualizar(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<Value>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    let dados = ler_dados(&Campos::new(&body)?)?;
    professor_service::update_professor(&state.db_pool, id, &dados).await?;
    Ok(mensagem("Professor atualizado com sucesso"))
}

// DELETE /professores/{id}
pub async fn handle_remover(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    professor_service::delete_professor(&state.db_pool, id).await?;
    Ok(mensagem("Professor removido com sucesso"))
}

// GET /professores/{id}/disciplinas
pub async fn handle_disciplinas(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    Ok(Json(professor_service::find_disciplinas_of_professor(&state.db_pool, id).await?))
}
