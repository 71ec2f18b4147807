// src/models/presenca.rs
use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

/// Linha da tabela `presenca`: no máximo uma por (aluno, aula).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Presenca {
    pub id_presenca: i64,
    pub id_aluno: i64,
    pub id_aula: i64,
    pub presente: bool,
    pub horario: NaiveDateTime,
}

/// Presença com a disciplina da aula, usada no histórico do aluno.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PresencaDetalhada {
    pub id_presenca: i64,
    pub id_aluno: i64,
    pub id_aula: i64,
    pub presente: bool,
    pub horario: NaiveDateTime,
    pub id_disciplina: i64,
    pub nome_disciplina: String,
}

/// Uma linha da chamada de uma aula: todos os matriculados, presentes ou não.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ItemChamada {
    pub id_aluno: i64,
    pub nome: String,
    pub horario: Option<NaiveDateTime>,
    pub presente: bool,
}

/// Leitura de um cartão RFID num leitor de sala.
#[derive(Debug, Clone)]
pub struct CheckIn {
    pub rfid_tag: String,
    pub id_sala: i64,
}

/// Correção manual de uma presença.
#[derive(Debug, Clone)]
pub struct DadosPresenca {
    pub id_aluno: i64,
    pub id_aula: i64,
    pub presente: bool,
}
