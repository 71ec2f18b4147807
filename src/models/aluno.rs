// src/models/aluno.rs
use crate::error::{AppError, AppResult};
use serde::Serialize;
use sqlx::FromRow;

pub const ANO_LETIVO_MIN: i64 = 1;
pub const ANO_LETIVO_MAX: i64 = 4;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Aluno {
    pub id_aluno: i64,
    pub id_usuario: i64,
    pub id_curso: i64,
    pub nome: String,
    pub ra: i64,
    pub rfid_tag: String,
    pub ano_letivo: i64,
}

#[derive(Debug, Clone)]
pub struct NovoAluno {
    pub id_usuario: i64,
    pub dados: DadosAluno,
}

/// Campos editáveis de um aluno (a conta dona não muda depois do cadastro).
#[derive(Debug, Clone)]
pub struct DadosAluno {
    pub id_curso: i64,
    pub nome: String,
    pub ra: i64,
    pub rfid_tag: String,
    pub ano_letivo: i64,
}

impl DadosAluno {
    pub fn validar(&self) -> AppResult<()> {
        if !(ANO_LETIVO_MIN..=ANO_LETIVO_MAX).contains(&self.ano_letivo) {
            return Err(AppError::validation("Ano letivo inválido"));
        }
        Ok(())
    }
}
