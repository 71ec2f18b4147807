// tests/usuarios.rs
mod common;

use axum::http::StatusCode;
use common::spawn_app;
use serde_json::json;

#[tokio::test]
async fn create_requires_every_field_and_persists_nothing_on_failure() {
    let app = spawn_app().await;

    for body in [
        json!({ "senha": "x", "tipo": "Aluno" }),
        json!({ "email": "a@escola.br", "senha": "", "tipo": "Aluno" }),
        json!({ "email": "a@escola.br", "senha": "x", "tipo": null }),
    ] {
        let (status, resposta) = app.post("/usuarios", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resposta["error"], "Todos os campos são obrigatórios");
    }

    let (status, _) = app
        .post("/usuarios", json!({ "email": "a@escola.br", "senha": "x", "tipo": "Admin" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(app.count("usuario").await, 0);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = spawn_app().await;
    let (status, body) = app
        .send(
            axum::http::Method::POST,
            "/usuarios",
            Some(json!("não é objeto")),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Dados inválidos");
}

#[tokio::test]
async fn duplicate_email_conflicts_and_keeps_original() {
    let app = spawn_app().await;
    let id = app.criar_usuario("prof@escola.br", "Professor").await;

    let (status, body) = app
        .post(
            "/usuarios",
            json!({ "email": "prof@escola.br", "senha": "outra", "tipo": "Aluno" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Email já foi cadastrado");

    let (status, usuario) = app.get(&format!("/usuarios/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(usuario["tipo"], "Professor");
    assert!(usuario.get("hash_senha").is_none());
}

#[tokio::test]
async fn update_to_own_email_succeeds_but_not_to_anothers() {
    let app = spawn_app().await;
    let a = app.criar_usuario("a@escola.br", "Aluno").await;
    app.criar_usuario("b@escola.br", "Aluno").await;

    let (status, _) = app
        .put(
            &format!("/usuarios/{a}"),
            json!({ "email": "a@escola.br", "senha": "nova", "tipo": "Aluno" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .put(
            &format!("/usuarios/{a}"),
            json!({ "email": "b@escola.br", "senha": "nova", "tipo": "Aluno" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn missing_or_invalid_ids() {
    let app = spawn_app().await;

    assert_eq!(app.get("/usuarios/999").await.0, StatusCode::NOT_FOUND);
    assert_eq!(app.delete("/usuarios/999").await.0, StatusCode::NOT_FOUND);

    let (status, body) = app.get("/usuarios/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ID inválido");
}

#[tokio::test]
async fn login_issues_token_that_me_resolves() {
    let app = spawn_app().await;
    let id = app.criar_usuario("aluno@escola.br", "Aluno").await;

    let (status, body) = app
        .post(
            "/usuarios/login",
            json!({ "email": "aluno@escola.br", "senha": "senha123" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, me) = app.get_with_token("/usuarios/me", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["mensagem"], "Usuário validado");
    assert_eq!(me["usuario"]["id"], id);
    assert_eq!(me["usuario"]["tipo"], "Aluno");
    // Conta sem perfil de aluno ainda
    assert!(me["aluno"].is_null());
    assert!(me.get("professor").is_none());
}

#[tokio::test]
async fn me_includes_the_profile_once_registered() {
    let app = spawn_app().await;
    let curso = app.criar_curso("Engenharia").await;
    let id_aluno = app.criar_aluno(curso, 1001, "TAG-1001").await;

    let (_, body) = app
        .post(
            "/usuarios/login",
            json!({ "email": "aluno1001@escola.br", "senha": "senha123" }),
        )
        .await;
    let token = body["token"].as_str().unwrap().to_string();

    let (status, me) = app.get_with_token("/usuarios/me", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["aluno"]["id_aluno"], id_aluno);
    assert_eq!(me["aluno"]["ra"], 1001);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_unauthorized() {
    let app = spawn_app().await;
    app.criar_usuario("prof@escola.br", "Professor").await;

    let (status, body) = app
        .post(
            "/usuarios/login",
            json!({ "email": "prof@escola.br", "senha": "errada" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Usuário ou senha inválidos");

    let (status, _) = app
        .post(
            "/usuarios/login",
            json!({ "email": "ninguem@escola.br", "senha": "senha123" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.post("/usuarios/login", json!({ "email": "prof@escola.br" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn passwords_keep_their_surrounding_spaces() {
    let app = spawn_app().await;
    let (status, body) = app
        .post(
            "/usuarios",
            json!({ "email": "espacos@escola.br", "senha": "  senha com espaços  ", "tipo": "Aluno" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (status, body) = app
        .post(
            "/usuarios/login",
            json!({ "email": "espacos@escola.br", "senha": "  senha com espaços  " }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());

    let (status, _) = app
        .post(
            "/usuarios/login",
            json!({ "email": "espacos@escola.br", "senha": "senha com espaços" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Senha só com espaços é tratada como ausente
    let (status, _) = app
        .post(
            "/usuarios",
            json!({ "email": "branco@escola.br", "senha": "   ", "tipo": "Aluno" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn me_rejects_missing_or_forged_tokens() {
    let app = spawn_app().await;

    let (status, body) = app.get("/usuarios/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Token não fornecido");

    let (status, _) = app.get_with_token("/usuarios/me", "nao.e.um.token").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn account_profile_lookups() {
    let app = spawn_app().await;
    let curso = app.criar_curso("Direito").await;
    app.criar_aluno(curso, 2002, "TAG-2002").await;
    let (_, usuarios) = app.get("/usuarios").await;
    let id_usuario = usuarios[0]["id_usuario"].as_i64().unwrap();

    let (status, aluno) = app.get(&format!("/usuarios/{id_usuario}/aluno")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(aluno["ra"], 2002);

    assert_eq!(
        app.get(&format!("/usuarios/{id_usuario}/professor")).await.0,
        StatusCode::NOT_FOUND
    );
    assert_eq!(app.get("/usuarios/999/aluno").await.0, StatusCode::NOT_FOUND);

    // Conta com perfil não pode ser removida
    assert_eq!(
        app.delete(&format!("/usuarios/{id_usuario}")).await.0,
        StatusCode::CONFLICT
    );
}
