// src/models/disciplina.rs
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Disciplina {
    pub id_disciplina: i64,
    pub id_curso: i64,
    pub nome: String,
    pub descricao: String,
    pub url_imagem: String,
}

#[derive(Debug, Clone)]
pub struct DadosDisciplina {
    pub id_curso: i64,
    pub nome: String,
    pub descricao: String,
    pub url_imagem: String,
}
