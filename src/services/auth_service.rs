// src/services/auth_service.rs
use crate::{
    error::{AppError, AppResult},
    models::{
        aluno::Aluno,
        professor::Professor,
        usuario::{Claims, TipoUsuario, Usuario},
    },
    services::{aluno_service, professor_service, usuario_service},
    state::JwtKeys,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};
use sqlx::SqlitePool;

/// Verifica se a senha fornecida corresponde ao hash guardado.
pub async fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let password = password.to_string();
    let stored_hash = stored_hash.to_string();
    tokio::task::spawn_blocking(move || {
        tracing::debug!("Verificando hash bcrypt...");
        bcrypt::verify(&password, &stored_hash)
    })
    .await
    .map_err(|e| {
        tracing::error!("Erro na task spawn_blocking (verify_password): {:?}", e);
        AppError::InternalServerError
    })?
    .map_err(|e| {
        tracing::error!("Erro bcrypt ao verificar senha: {:?}", e);
        AppError::PasswordHashingError
    })
}

/// Gera um hash bcrypt para uma senha.
pub async fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || {
        tracing::debug!("Gerando hash bcrypt (custo {})...", cost);
        bcrypt::hash(&password, cost)
    })
    .await
    .map_err(|e| {
        tracing::error!("Erro na task spawn_blocking (hash_password): {:?}", e);
        AppError::InternalServerError
    })?
    .map_err(|e| {
        tracing::error!("Erro bcrypt ao gerar hash: {:?}", e);
        AppError::PasswordHashingError
    })
}

/// Emite o token assinado (HS256) para uma conta.
pub fn issue_token(keys: &JwtKeys, usuario: &Usuario) -> AppResult<String> {
    let now = Utc::now();
    let claims = Claims {
        id: usuario.id_usuario,
        email: usuario.email.clone(),
        tipo: usuario.tipo()?,
        iat: now.timestamp(),
        exp: (now + Duration::minutes(keys.expiration_minutes)).timestamp(),
    };

    Ok(encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding)?)
}

/// Valida assinatura e expiração de um token e devolve as claims.
pub fn decode_token(keys: &JwtKeys, token: &str) -> AppResult<Claims> {
    decode::<Claims>(token, &keys.decoding, &Validation::new(Algorithm::HS256))
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!("Token rejeitado: {}", e);
            AppError::unauthorized("Token inválido ou expirado")
        })
}

/// Login por email e senha. A mesma resposta cobre email desconhecido e senha errada.
pub async fn login(
    db_pool: &SqlitePool,
    keys: &JwtKeys,
    email: &str,
    senha: &str,
) -> AppResult<String> {
    tracing::info!("Tentativa de login para: {}", email);

    let usuario = {
        let mut conn = db_pool.acquire().await?;
        usuario_service::find_usuario_by_email(&mut conn, email).await?
    };

    let Some(usuario) = usuario else {
        tracing::warn!("Usuário não encontrado: {}", email);
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(senha, &usuario.hash_senha).await? {
        tracing::warn!("Senha incorreta para: {}", email);
        return Err(AppError::InvalidCredentials);
    }

    let token = issue_token(keys, &usuario)?;
    tracing::info!("✅ Login bem-sucedido para: {}", usuario.id_usuario);
    Ok(token)
}

/// Perfil de domínio associado à conta do token.
#[derive(Debug)]
pub enum Perfil {
    Aluno(Option<Aluno>),
    Professor(Option<Professor>),
}

pub async fn find_perfil(db_pool: &SqlitePool, claims: &Claims) -> AppResult<Perfil> {
    let mut conn = db_pool.acquire().await?;
    let perfil = match claims.tipo {
        TipoUsuario::Aluno => {
            Perfil::Aluno(aluno_service::find_aluno_by_usuario(&mut conn, claims.id).await?)
        }
        TipoUsuario::Professor => Perfil::Professor(
            professor_service::find_professor_by_usuario(&mut conn, claims.id).await?,
        ),
    };
    Ok(perfil)
}
