// src/models/professor.rs
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Professor {
    pub id_professor: i64,
    pub id_usuario: i64,
    pub nome: String,
    pub ra: i64,
    pub rfid_tag: String,
}

#[derive(Debug, Clone)]
pub struct NovoProfessor {
    pub id_usuario: i64,
    pub dados: DadosProfessor,
}

#[derive(Debug, Clone)]
pub struct DadosProfessor {
    pub nome: String,
    pub ra: i64,
    pub rfid_tag: String,
}
