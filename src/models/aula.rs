// src/models/aula.rs
use crate::{
    error::{AppError, AppResult},
    models::sala::LocalSala,
};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use sqlx::FromRow;

static DATA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());
static HORARIO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)(:([0-5]\d))?$").unwrap());

/// Linha da tabela `aula`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Aula {
    pub id_aula: i64,
    pub id_disciplina: i64,
    pub id_sala: i64,
    pub inicio: NaiveDateTime,
    pub fim: NaiveDateTime,
    pub nome_aula: String,
}

impl Aula {
    pub fn periodo(&self) -> Intervalo {
        Intervalo {
            inicio: self.inicio,
            fim: self.fim,
        }
    }
}

/// Aula junto com o endereço da sala, usada nas listagens.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AulaComSala {
    pub id_aula: i64,
    pub id_disciplina: i64,
    pub nome_aula: String,
    pub id_sala: i64,
    pub bloco: i64,
    pub espaco: i64,
    pub numero_sala: i64,
    pub inicio: NaiveDateTime,
    pub fim: NaiveDateTime,
}

/// Período de uma aula, tratado como intervalo semiaberto `[inicio, fim)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intervalo {
    pub inicio: NaiveDateTime,
    pub fim: NaiveDateTime,
}

impl Intervalo {
    /// Monta o intervalo a partir de `data` (YYYY-MM-DD) e horários (HH:MM ou HH:MM:SS).
    pub fn from_data_horarios(data: &str, inicio: &str, fim: &str) -> AppResult<Self> {
        if !DATA_RE.is_match(data) {
            return Err(AppError::validation("Data inválida"));
        }
        let dia = NaiveDate::parse_from_str(data, "%Y-%m-%d")
            .map_err(|_| AppError::validation("Data inválida"))?;

        if !(HORARIO_RE.is_match(inicio) && HORARIO_RE.is_match(fim)) {
            return Err(AppError::validation("Horários inválidos"));
        }

        Ok(Intervalo {
            inicio: dia.and_time(parse_horario(inicio)?),
            fim: dia.and_time(parse_horario(fim)?),
        })
    }

    /// Regras de agendamento: nada no passado e início estritamente antes do fim.
    pub fn validar_agendamento(&self, agora: NaiveDateTime) -> AppResult<()> {
        if self.inicio < agora || self.fim < agora {
            return Err(AppError::validation("Data ou horários já ocorreram"));
        }
        if self.inicio == self.fim {
            return Err(AppError::validation(
                "Horário de início deve ser diferente do horário de fim",
            ));
        }
        if self.inicio > self.fim {
            return Err(AppError::validation(
                "Horário de início deve ser menor que horário de fim",
            ));
        }
        Ok(())
    }

    /// Sobreposição de intervalos semiabertos: encostar no limite não conta.
    pub fn sobrepoe(&self, outro: &Intervalo) -> bool {
        self.inicio < outro.fim && self.fim > outro.inicio
    }

    /// Instante dentro do período, limites incluídos.
    pub fn contem(&self, instante: NaiveDateTime) -> bool {
        self.inicio <= instante && instante <= self.fim
    }
}

fn parse_horario(raw: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|_| AppError::validation("Horários inválidos"))
}

/// Relógio local usado em agendamentos e check-ins.
pub fn agora() -> NaiveDateTime {
    Local::now().naive_local()
}

#[derive(Debug, Clone)]
pub struct DadosAula {
    pub id_disciplina: i64,
    pub local: LocalSala,
    pub periodo: Intervalo,
    pub nome_aula: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn intervalo(inicio: &str, fim: &str) -> Intervalo {
        Intervalo {
            inicio: at(inicio),
            fim: at(fim),
        }
    }

    #[test]
    fn parses_date_and_both_time_formats() {
        let periodo = Intervalo::from_data_horarios("2030-03-15", "10:00", "11:30:15").unwrap();
        assert_eq!(periodo.inicio, at("2030-03-15 10:00:00"));
        assert_eq!(periodo.fim, at("2030-03-15 11:30:15"));
    }

    #[test]
    fn rejects_malformed_or_impossible_dates() {
        for data in ["2030-3-15", "15/03/2030", "2030-02-30", "2030-13-01"] {
            let err = Intervalo::from_data_horarios(data, "10:00", "11:00").unwrap_err();
            assert_eq!(err.to_string(), "Data inválida", "{data}");
        }
    }

    #[test]
    fn rejects_malformed_times() {
        for (inicio, fim) in [("24:00", "10:00"), ("9:00", "10:00"), ("10:60", "11:00"), ("10:00", "aa")] {
            let err = Intervalo::from_data_horarios("2030-03-15", inicio, fim).unwrap_err();
            assert_eq!(err.to_string(), "Horários inválidos");
        }
    }

    #[test]
    fn scheduling_rejects_past_and_inverted_periods() {
        let agora = at("2030-03-15 09:00:00");

        assert!(intervalo("2030-03-15 10:00:00", "2030-03-15 11:00:00")
            .validar_agendamento(agora)
            .is_ok());
        assert!(intervalo("2030-03-15 08:00:00", "2030-03-15 11:00:00")
            .validar_agendamento(agora)
            .is_err());
        assert!(intervalo("2030-03-15 11:00:00", "2030-03-15 10:00:00")
            .validar_agendamento(agora)
            .is_err());
        assert!(intervalo("2030-03-15 10:00:00", "2030-03-15 10:00:00")
            .validar_agendamento(agora)
            .is_err());
    }

    #[test]
    fn overlap_is_half_open() {
        let a = intervalo("2030-03-15 10:00:00", "2030-03-15 11:00:00");

        assert!(a.sobrepoe(&intervalo("2030-03-15 10:30:00", "2030-03-15 11:30:00")));
        assert!(a.sobrepoe(&intervalo("2030-03-15 09:00:00", "2030-03-15 12:00:00")));
        assert!(a.sobrepoe(&intervalo("2030-03-15 10:15:00", "2030-03-15 10:45:00")));
        assert!(!a.sobrepoe(&intervalo("2030-03-15 11:00:00", "2030-03-15 12:00:00")));
        assert!(!a.sobrepoe(&intervalo("2030-03-15 09:00:00", "2030-03-15 10:00:00")));
    }

    #[test]
    fn active_check_includes_both_ends() {
        let a = intervalo("2030-03-15 10:00:00", "2030-03-15 11:00:00");
        assert!(a.contem(at("2030-03-15 10:00:00")));
        assert!(a.contem(at("2030-03-15 11:00:00")));
        assert!(!a.contem(at("2030-03-15 11:00:01")));
    }
}
