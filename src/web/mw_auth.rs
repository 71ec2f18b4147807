// src/web/mw_auth.rs
use crate::{
    error::AppError,
    services::auth_service,
    state::AppState,
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    typed_header::TypedHeaderRejection,
    TypedHeader,
};

// Middleware que exige um token Bearer válido
pub async fn require_auth(
    State(state): State<AppState>,
    bearer: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(Authorization(bearer)) = bearer.map_err(|rejection| {
        if rejection.is_missing() {
            tracing::debug!("Autenticação MW: pedido sem cabeçalho Authorization");
            AppError::unauthorized("Token não fornecido")
        } else {
            tracing::debug!("Autenticação MW: cabeçalho Authorization malformado");
            AppError::unauthorized("Token inválido ou expirado")
        }
    })?;

    let claims = auth_service::decode_token(&state.jwt, bearer.token())?;
    tracing::debug!("Autenticação MW: conta {} ({}) autenticada", claims.id, claims.tipo);

    // Os handlers protegidos leem as claims das extensões
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
