// src/web/disciplina_handlers.rs
use crate::{
    error::AppResult,
    models::disciplina::DadosDisciplina,
    services::disciplina_service::{self, Vinculo},
    state::AppState,
    web::payload::{criado, mensagem, parse_id, Campos, JsonBody},
};
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;

fn ler_dados(body: &Value) -> AppResult<DadosDisciplina> {
    let campos = Campos::new(body)?;
    campos.exigir(&["id_curso", "nome", "descricao", "url_imagem"])?;
    Ok(DadosDisciplina {
        id_curso: campos.inteiro("id_curso")?,
        nome: campos.texto("nome")?,
        descricao: campos.texto("descricao")?,
        url_imagem: campos.texto("url_imagem")?,
    })
}

fn ler_membro(body: &Value, vinculo: Vinculo) -> AppResult<i64> {
    let campo = match vinculo {
        Vinculo::Professor => "id_professor",
        Vinculo::Aluno => "id_aluno",
    };
    let campos = Campos::new(body)?;
    campos.exigir(&[campo])?;
    campos.inteiro(campo)
}

// GET /disciplinas
pub async fn handle_listar(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    Ok(Json(disciplina_service::find_all_disciplinas(&state.db_pool).await?))
}

// GET /disciplinas/{id}
pub async fn handle_buscar(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    Ok(Json(disciplina_service::find_disciplina_by_id(&state.db_pool, id).await?))
}

// POST /disciplinas
pub async fn handle_criar(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
) -> AppResult<Response> {
    let dados = ler_dados(&body)?;
    let id = disciplina_service::create_disciplina(&state.db_pool, &dados).await?;
    Ok(criado("Disciplina cadastrada com sucesso", id))
}

// PUT /disciplinas/{id}
pub async fn handle_atualizar(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<Value>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    let dados = ler_dados(&body)?;
    disciplina_service::update_disciplina(&state.db_pool, id, &dados).await?;
    Ok(mensagem("Disciplina atualizada com sucesso"))
}

// DELETE /disciplinas/{id}
pub async fn handle_remover(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    disciplina_service::delete_disciplina(&state.db_pool, id).await?;
    Ok(mensagem("Disciplina removida com sucesso"))
}

// GET /disciplinas/{id}/professores
pub async fn handle_professores(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    Ok(Json(disciplina_service::find_professores_of_disciplina(&state.db_pool, id).await?))
}

// POST /disciplinas/{id}/professores
pub async fn handle_vincular_professor(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<Value>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    let id_professor = ler_membro(&body, Vinculo::Professor)?;
    let vinculo = disciplina_service::vincular(&state.db_pool, Vinculo::Professor, id, id_professor).await?;
    Ok(criado("Professor vinculado à disciplina com sucesso", vinculo))
}

// DELETE /disciplinas/{id}/professores/{id_professor}
pub async fn handle_desvincular_professor(
    State(state): State<AppState>,
    Path((id, id_professor)): Path<(String, String)>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    let id_professor = parse_id(&id_professor)?;
    disciplina_service::desvincular(&state.db_pool, Vinculo::Professor, id, id_professor).await?;
    Ok(mensagem("Professor desvinculado da disciplina com sucesso"))
}

// GET /disciplinas/{id}/alunos
pub async fn handle_alunos(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    Ok(Json(disciplina_service::find_alunos_of_disciplina(&state.db_pool, id).await?))
}

// POST /disciplinas/{id}/alunos
pub async fn handle_matricular_aluno(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<Value>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    let id_aluno = ler_membro(&body, Vinculo::Aluno)?;
    let vinculo = disciplina_service::vincular(&state.db_pool, Vinculo::Aluno, id, id_aluno).await?;
    Ok(criado("Aluno matriculado na disciplina com sucesso", vinculo))
}

// DELETE /disciplinas/{id}/alunos/{id_aluno}
pub async fn handle_desmatricular_aluno(
    State(state): State<AppState>,
    Path((id, id_aluno)): Path<(String, String)>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    let id_aluno = parse_id(&id_aluno)?;
    disciplina_service::desvincular(&state.db_pool, Vinculo::Aluno, id, id_aluno).await?;
    Ok(mensagem("Aluno removido da disciplina com sucesso"))
}
