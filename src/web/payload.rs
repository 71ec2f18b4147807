// src/web/payload.rs
use crate::error::{AppError, AppResult};
use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

pub const MSG_CAMPOS_OBRIGATORIOS: &str = "Todos os campos são obrigatórios";
pub const MSG_DADOS_INVALIDOS: &str = "Dados inválidos";
pub const MSG_ID_INVALIDO: &str = "ID inválido";

/// Extrator JSON que responde 400 (em vez do 415/422 padrão do axum)
/// quando o corpo não é JSON válido.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                tracing::debug!("Corpo JSON rejeitado: {}", rejection.body_text());
                Err(AppError::validation(MSG_DADOS_INVALIDOS))
            }
        }
    }
}

/// 201 com a mensagem e o id do registo criado.
pub fn criado(mensagem: &str, id: i64) -> Response {
    (StatusCode::CREATED, Json(json!({ "mensagem": mensagem, "id": id }))).into_response()
}

/// 200 apenas com a mensagem (atualizações e remoções).
pub fn mensagem(mensagem: &str) -> Response {
    (StatusCode::OK, Json(json!({ "mensagem": mensagem }))).into_response()
}

/// Converte o segmento `{id}` da rota num inteiro.
pub fn parse_id(raw: &str) -> AppResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::validation(MSG_ID_INVALIDO))
}

/// Filtro opcional vindo da query string: ausente/vazio -> None, não numérico -> 400.
pub fn parse_filtro(raw: Option<&str>, msg: &str) -> AppResult<Option<i64>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v.parse::<i64>().map(Some).map_err(|_| AppError::validation(msg)),
    }
}

/// Vista sobre o objeto JSON de uma requisição.
///
/// Um campo conta como ausente quando não existe, é `null` ou é uma string em branco.
/// Campos numéricos aceitam números JSON ou strings numéricas.
pub struct Campos<'a> {
    obj: &'a Map<String, Value>,
}

impl<'a> Campos<'a> {
    pub fn new(body: &'a Value) -> AppResult<Self> {
        body.as_object()
            .map(|obj| Campos { obj })
            .ok_or_else(|| AppError::validation(MSG_DADOS_INVALIDOS))
    }

    fn presente(&self, nome: &str) -> bool {
        match self.obj.get(nome) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(_) => true,
        }
    }

    /// Falha com 400 se algum dos campos estiver ausente.
    pub fn exigir(&self, nomes: &[&str]) -> AppResult<()> {
        if let Some(faltando) = nomes.iter().find(|n| !self.presente(n)) {
            tracing::debug!("Campo obrigatório ausente: {}", faltando);
            return Err(AppError::validation(MSG_CAMPOS_OBRIGATORIOS));
        }
        Ok(())
    }

    pub fn inteiro(&self, nome: &str) -> AppResult<i64> {
        match self.obj.get(nome) {
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
        .ok_or_else(|| {
            tracing::debug!("Campo '{}' não é um inteiro válido", nome);
            AppError::validation(MSG_DADOS_INVALIDOS)
        })
    }

    pub fn texto(&self, nome: &str) -> AppResult<String> {
        self.texto_literal(nome).map(|s| s.trim().to_string())
    }

    /// Texto exatamente como enviado, sem aparar espaços. Usado para senhas.
    pub fn texto_literal(&self, nome: &str) -> AppResult<String> {
        match self.obj.get(nome) {
            Some(Value::String(s)) => Ok(s.clone()),
            _ => {
                tracing::debug!("Campo '{}' não é texto", nome);
                Err(AppError::validation(MSG_DADOS_INVALIDOS))
            }
        }
    }

    /// Booleano aceitando `true`/`false` ou 0/1 (numérico ou string).
    pub fn booleano(&self, nome: &str) -> AppResult<bool> {
        match self.obj.get(nome) {
            Some(Value::Bool(b)) => Some(*b),
            Some(Value::Number(n)) => match n.as_i64() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            },
            Some(Value::String(s)) => match s.trim() {
                "0" | "false" => Some(false),
                "1" | "true" => Some(true),
                _ => None,
            },
            _ => None,
        }
        .ok_or_else(|| AppError::validation(MSG_DADOS_INVALIDOS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_strings_and_nulls_count_as_missing() {
        let body = json!({ "nome": "  ", "ra": null, "rfid_tag": "A1" });
        let campos = Campos::new(&body).unwrap();

        assert!(campos.exigir(&["rfid_tag"]).is_ok());
        let err = campos.exigir(&["rfid_tag", "nome"]).unwrap_err();
        assert_eq!(err.to_string(), MSG_CAMPOS_OBRIGATORIOS);
        assert!(campos.exigir(&["ra"]).is_err());
        assert!(campos.exigir(&["inexistente"]).is_err());
    }

    #[test]
    fn integers_accept_numbers_and_numeric_strings() {
        let body = json!({ "a": 3, "b": " 42 ", "c": "x1", "d": 1.5, "e": true });
        let campos = Campos::new(&body).unwrap();

        assert_eq!(campos.inteiro("a").unwrap(), 3);
        assert_eq!(campos.inteiro("b").unwrap(), 42);
        assert!(campos.inteiro("c").is_err());
        assert!(campos.inteiro("d").is_err());
        assert!(campos.inteiro("e").is_err());
    }

    #[test]
    fn text_fields_must_be_strings() {
        let body = json!({ "nome": "Ana", "rfid_tag": 1234 });
        let campos = Campos::new(&body).unwrap();

        assert_eq!(campos.texto("nome").unwrap(), "Ana");
        assert_eq!(campos.texto("rfid_tag").unwrap_err().to_string(), MSG_DADOS_INVALIDOS);
    }

    #[test]
    fn literal_text_keeps_surrounding_spaces() {
        let body = json!({ "nome": "  Ana  ", "senha": "  segredo  ", "vazia": "   " });
        let campos = Campos::new(&body).unwrap();

        assert_eq!(campos.texto("nome").unwrap(), "Ana");
        assert_eq!(campos.texto_literal("senha").unwrap(), "  segredo  ");
        // Só espaços continua contando como ausente
        assert!(campos.exigir(&["vazia"]).is_err());
    }

    #[test]
    fn booleans_accept_zero_and_one() {
        let body = json!({ "a": true, "b": 0, "c": "1", "d": 2 });
        let campos = Campos::new(&body).unwrap();

        assert!(campos.booleano("a").unwrap());
        assert!(!campos.booleano("b").unwrap());
        assert!(campos.booleano("c").unwrap());
        assert!(campos.booleano("d").is_err());
    }

    #[test]
    fn non_object_bodies_are_rejected() {
        assert!(Campos::new(&json!([1, 2])).is_err());
        assert!(Campos::new(&json!("texto")).is_err());
    }

    #[test]
    fn ids_and_filters() {
        assert_eq!(parse_id("17").unwrap(), 17);
        assert!(parse_id("abc").is_err());
        assert_eq!(parse_filtro(None, "x").unwrap(), None);
        assert_eq!(parse_filtro(Some(""), "x").unwrap(), None);
        assert_eq!(parse_filtro(Some("2"), "x").unwrap(), Some(2));
        assert_eq!(parse_filtro(Some("dois"), "x").unwrap_err().to_string(), "x");
    }
}
