// tests/common/mod.rs
#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use presenca_rfid::{config::Config, db, state::AppState, web::routes::create_router};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use std::time::Duration;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const SECRET: &str = "segredo-dos-testes-0123456789-abcdef";

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    _dir: TempDir,
}

/// Sobe o router sobre uma base SQLite nova, num diretório temporário.
pub async fn spawn_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        database_url: format!("sqlite://{}", dir.path().join("presencas.db").display()),
        secret_key: SECRET.to_string(),
        jwt_expiration_minutes: 60,
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        max_connections: 5,
        bcrypt_cost: 4,
    };

    let pool = db::create_db_pool(&config).await.unwrap();
    let router = create_router(AppState::new(pool.clone(), &config));

    TestApp {
        router,
        pool,
        _dir: dir,
    }
}

pub fn montar(method: Method, uri: &str, body: Option<Value>, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Executa um pedido sobre um clone do router, sem verificar o pool.
/// Serve para disparar pedidos concorrentes a partir de tarefas separadas.
pub async fn enviar(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body), None).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(body), None).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None, None).await
    }

    pub async fn get_with_token(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None, Some(token)).await
    }

    /// Envia um pedido e verifica que nenhuma conexão ficou emprestada depois dele.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let (status, json) = enviar(self.router.clone(), montar(method, uri, body, token)).await;
        self.assert_no_leases().await;
        (status, json)
    }

    /// A devolução ao pool acontece em segundo plano; espera um pouco antes de falhar.
    pub async fn assert_no_leases(&self) {
        for _ in 0..100 {
            if db::leased_connections(&self.pool) == 0 {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!(
            "conexões ainda emprestadas: {}",
            db::leased_connections(&self.pool)
        );
    }

    pub async fn count(&self, tabela: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {tabela}"))
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }

    // --- Cadastros usados por vários testes ---

    pub async fn criar_usuario(&self, email: &str, tipo: &str) -> i64 {
        let (status, body) = self
            .post(
                "/usuarios",
                json!({ "email": email, "senha": "senha123", "tipo": tipo }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }

    pub async fn criar_curso(&self, nome: &str) -> i64 {
        let (status, body) = self.post("/cursos", json!({ "nome": nome })).await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }

    pub async fn criar_aluno(&self, id_curso: i64, ra: i64, rfid_tag: &str) -> i64 {
        let id_usuario = self
            .criar_usuario(&format!("aluno{ra}@escola.br"), "Aluno")
            .await;
        let (status, body) = self
            .post(
                "/alunos",
                json!({
                    "id_usuario": id_usuario,
                    "id_curso": id_curso,
                    "nome": format!("Aluno {ra}"),
                    "ra": ra,
                    "rfid_tag": rfid_tag,
                    "ano_letivo": 2,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }

    pub async fn criar_disciplina(&self, id_curso: i64, nome: &str) -> i64 {
        let (status, body) = self
            .post(
                "/disciplinas",
                json!({
                    "id_curso": id_curso,
                    "nome": nome,
                    "descricao": "Disciplina de teste",
                    "url_imagem": "https://escola.br/img.png",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }

    pub async fn criar_sala(&self, bloco: i64, espaco: i64, numero_sala: i64) -> i64 {
        let (status, body) = self
            .post(
                "/salas",
                json!({
                    "nome": format!("Sala {bloco}-{espaco}-{numero_sala}"),
                    "bloco": bloco,
                    "espaco": espaco,
                    "numero_sala": numero_sala,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }

    pub async fn matricular(&self, id_disciplina: i64, id_aluno: i64) {
        let (status, body) = self
            .post(
                &format!("/disciplinas/{id_disciplina}/alunos"),
                json!({ "id_aluno": id_aluno }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
    }
}
