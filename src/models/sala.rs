// src/models/sala.rs
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Sala {
    pub id_sala: i64,
    pub nome: String,
    pub bloco: i64,
    pub espaco: i64,
    pub numero_sala: i64,
}

/// Endereço físico de uma sala; único no sistema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalSala {
    pub bloco: i64,
    pub espaco: i64,
    pub numero_sala: i64,
}

impl Sala {
    pub fn local(&self) -> LocalSala {
        LocalSala {
            bloco: self.bloco,
            espaco: self.espaco,
            numero_sala: self.numero_sala,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DadosSala {
    pub nome: String,
    pub local: LocalSala,
}
