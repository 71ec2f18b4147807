// src/models/usuario.rs
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::{fmt, str::FromStr};

/// Conta de acesso, lida da tabela `usuario`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Usuario {
    pub id_usuario: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub hash_senha: String,
    pub tipo: String,
}

impl Usuario {
    pub fn tipo(&self) -> Result<TipoUsuario, AppError> {
        self.tipo.parse()
    }
}

/// Papel da conta. Guardado como TEXT ("Professor" / "Aluno").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TipoUsuario {
    Professor,
    Aluno,
}

impl TipoUsuario {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoUsuario::Professor => "Professor",
            TipoUsuario::Aluno => "Aluno",
        }
    }
}

impl fmt::Display for TipoUsuario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TipoUsuario {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Professor" => Ok(TipoUsuario::Professor),
            "Aluno" => Ok(TipoUsuario::Aluno),
            _ => Err(AppError::validation("Tipo de usuário inválido")),
        }
    }
}

/// Dados validados para criar ou substituir uma conta.
#[derive(Debug, Clone)]
pub struct DadosUsuario {
    pub email: String,
    pub senha: String,
    pub tipo: TipoUsuario,
}

/// Conteúdo do token emitido no login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub id: i64,
    pub email: String,
    pub tipo: TipoUsuario,
    pub iat: i64,
    pub exp: i64,
}
