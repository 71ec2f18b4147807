// tests/cadastros.rs
mod common;

use axum::http::{Method, StatusCode};
use common::{enviar, montar, spawn_app};
use serde_json::json;
use tokio::task::JoinSet;

#[tokio::test]
async fn course_names_are_unique_and_referenced_courses_stay() {
    let app = spawn_app().await;
    let curso = app.criar_curso("Física").await;

    let (status, _) = app.post("/cursos", json!({ "nome": "Física" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(app.post("/cursos", json!({})).await.0, StatusCode::BAD_REQUEST);

    // Renomear para o próprio nome não é conflito
    let (status, _) = app.put(&format!("/cursos/{curso}"), json!({ "nome": "Física" })).await;
    assert_eq!(status, StatusCode::OK);

    let outro = app.criar_curso("Química").await;
    assert_eq!(
        app.put(&format!("/cursos/{outro}"), json!({ "nome": "Física" })).await.0,
        StatusCode::CONFLICT
    );

    app.criar_disciplina(curso, "Mecânica").await;
    let (status, body) = app.get(&format!("/cursos/{curso}/disciplinas")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    let (_, body) = app.get(&format!("/cursos/{curso}/alunos")).await;
    assert!(body.as_array().unwrap().is_empty());

    assert_eq!(app.delete(&format!("/cursos/{curso}")).await.0, StatusCode::CONFLICT);
    assert_eq!(app.delete(&format!("/cursos/{outro}")).await.0, StatusCode::OK);
    assert_eq!(app.get("/cursos/999/alunos").await.0, StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_duplicate_courses_create_one_row() {
    let app = spawn_app().await;
    let mut pedidos = JoinSet::new();
    for _ in 0..16 {
        let router = app.router.clone();
        pedidos.spawn(async move {
            let pedido = montar(Method::POST, "/cursos", Some(json!({ "nome": "Robótica" })), None);
            enviar(router, pedido).await
        });
    }

    let mut criados = 0;
    while let Some(resultado) = pedidos.join_next().await {
        let (status, body) = resultado.unwrap();
        match status {
            StatusCode::CREATED => criados += 1,
            StatusCode::CONFLICT => assert_eq!(body["error"], "O curso informado já existe"),
            outro => panic!("status inesperado {outro}: {body}"),
        }
    }

    assert_eq!(criados, 1);
    assert_eq!(app.count("curso").await, 1);
    app.assert_no_leases().await;
}

#[tokio::test]
async fn subject_names_are_unique_within_a_course() {
    let app = spawn_app().await;
    let fisica = app.criar_curso("Física").await;
    let quimica = app.criar_curso("Química").await;
    app.criar_disciplina(fisica, "Cálculo I").await;

    let corpo = |id_curso: i64| {
        json!({ "id_curso": id_curso, "nome": "Cálculo I", "descricao": "d", "url_imagem": "u" })
    };
    assert_eq!(app.post("/disciplinas", corpo(fisica)).await.0, StatusCode::CONFLICT);
    assert_eq!(app.post("/disciplinas", corpo(quimica)).await.0, StatusCode::CREATED);
    assert_eq!(app.post("/disciplinas", corpo(999)).await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn teachers_crud_and_subject_links() {
    let app = spawn_app().await;
    let curso = app.criar_curso("Física").await;
    let disciplina = app.criar_disciplina(curso, "Óptica").await;
    let conta = app.criar_usuario("prof@escola.br", "Professor").await;

    let (status, body) = app
        .post(
            "/professores",
            json!({ "id_usuario": conta, "nome": "Carlos", "ra": 500, "rfid_tag": "P500" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let professor = body["id"].as_i64().unwrap();

    let outra = app.criar_usuario("prof2@escola.br", "Professor").await;
    let (status, _) = app
        .post(
            "/professores",
            json!({ "id_usuario": outra, "nome": "Dora", "ra": 500, "rfid_tag": "P501" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .put(
            &format!("/professores/{professor}"),
            json!({ "nome": "Carlos Silva", "ra": 500, "rfid_tag": "P500" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let uri = format!("/disciplinas/{disciplina}/professores");
    assert_eq!(
        app.post(&uri, json!({ "id_professor": professor })).await.0,
        StatusCode::CREATED
    );
    assert_eq!(
        app.post(&uri, json!({ "id_professor": professor })).await.0,
        StatusCode::CONFLICT
    );
    assert_eq!(
        app.post(&uri, json!({ "id_professor": 999 })).await.0,
        StatusCode::NOT_FOUND
    );

    let (_, professores) = app.get(&uri).await;
    assert_eq!(professores[0]["nome"], "Carlos Silva");
    let (_, disciplinas) = app.get(&format!("/professores/{professor}/disciplinas")).await;
    assert_eq!(disciplinas[0]["nome"], "Óptica");

    assert_eq!(
        app.delete(&format!("{uri}/{professor}")).await.0,
        StatusCode::OK
    );
    assert_eq!(
        app.delete(&format!("{uri}/{professor}")).await.0,
        StatusCode::NOT_FOUND
    );

    assert_eq!(
        app.delete(&format!("/professores/{professor}")).await.0,
        StatusCode::OK
    );
    assert_eq!(
        app.get(&format!("/professores/{professor}")).await.0,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn student_enrollment_links() {
    let app = spawn_app().await;
    let curso = app.criar_curso("Física").await;
    let disciplina = app.criar_disciplina(curso, "Óptica").await;
    let aluno = app.criar_aluno(curso, 42, "T42").await;

    app.matricular(disciplina, aluno).await;
    let uri = format!("/disciplinas/{disciplina}/alunos");
    assert_eq!(app.post(&uri, json!({ "id_aluno": aluno })).await.0, StatusCode::CONFLICT);
    assert_eq!(app.post(&uri, json!({})).await.0, StatusCode::BAD_REQUEST);
    assert_eq!(
        app.post("/disciplinas/999/alunos", json!({ "id_aluno": aluno })).await.0,
        StatusCode::NOT_FOUND
    );

    let (_, alunos) = app.get(&uri).await;
    assert_eq!(alunos.as_array().unwrap().len(), 1);

    assert_eq!(app.delete(&format!("{uri}/{aluno}")).await.0, StatusCode::OK);
    let (_, alunos) = app.get(&uri).await;
    assert!(alunos.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn classroom_address_is_unique() {
    let app = spawn_app().await;
    let sala = app.criar_sala(1, 2, 3).await;

    let (status, _) = app
        .post(
            "/salas",
            json!({ "nome": "Outra", "bloco": 1, "espaco": 2, "numero_sala": 3 }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Mesmo endereço da própria sala
    let (status, _) = app
        .put(
            &format!("/salas/{sala}"),
            json!({ "nome": "Laboratório", "bloco": 1, "espaco": 2, "numero_sala": 3 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let outra = app.criar_sala(1, 2, 4).await;
    let (status, _) = app
        .put(
            &format!("/salas/{outra}"),
            json!({ "nome": "X", "bloco": 1, "espaco": 2, "numero_sala": 3 }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, salas) = app.get("/salas").await;
    assert_eq!(salas.as_array().unwrap().len(), 2);
    let (status, aulas) = app.get(&format!("/salas/{sala}/aulas")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(aulas.as_array().unwrap().is_empty());

    assert_eq!(app.delete(&format!("/salas/{outra}")).await.0, StatusCode::OK);
    assert_eq!(app.get(&format!("/salas/{outra}")).await.0, StatusCode::NOT_FOUND);
}
