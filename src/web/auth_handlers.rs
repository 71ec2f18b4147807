// src/web/auth_handlers.rs
use crate::{
    error::AppResult,
    models::usuario::Claims,
    services::auth_service::{self, Perfil},
    state::AppState,
    web::payload::{Campos, JsonBody},
};
use axum::{
    extract::{Extension, State},
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

// POST /usuarios/login
pub async fn handle_login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
) -> AppResult<impl IntoResponse> {
    let campos = Campos::new(&body)?;
    campos.exigir(&["email", "senha"])?;
    let email = campos.texto("email")?;
    let senha = campos.texto_literal("senha")?;

    let token = auth_service::login(&state.db_pool, &state.jwt, &email, &senha).await?;

    Ok(Json(json!({
        "mensagem": "Login realizado com sucesso",
        "token": token,
    })))
}

// GET /usuarios/me (protegido pelo mw_auth)
pub async fn handle_me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!("GET /usuarios/me: conta {}", claims.id);

    let perfil = auth_service::find_perfil(&state.db_pool, &claims).await?;

    let mut resposta = json!({
        "mensagem": "Usuário validado",
        "usuario": claims,
    });
    // Só a chave do papel da conta aparece; `null` quando o perfil ainda não foi cadastrado.
    match perfil {
        Perfil::Aluno(aluno) => resposta["aluno"] = json!(aluno),
        Perfil::Professor(professor) => resposta["professor"] = json!(professor),
    }

    Ok(Json(resposta))
}
