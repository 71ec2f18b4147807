// src/models/curso.rs
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Curso {
    pub id_curso: i64,
    pub nome: String,
}
