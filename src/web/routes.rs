// src/web/routes.rs
use crate::{
    state::AppState,
    web::{
        aluno_handlers, auth_handlers, aula_handlers, curso_handlers, disciplina_handlers,
        mw_auth, presenca_handlers, professor_handlers, sala_handlers, usuario_handlers,
    },
};
use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

pub fn create_router(app_state: AppState) -> Router {
    // --- Contas e autenticação ---
    // Apenas /me exige token; o resto segue aberto como os demais recursos
    let me_routes = Router::new()
        .route("/me", get(auth_handlers::handle_me))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            mw_auth::require_auth,
        ));

    let usuario_routes = Router::new()
        .route(
            "/",
            get(usuario_handlers::handle_listar).post(usuario_handlers::handle_criar),
        )
        .route("/login", post(auth_handlers::handle_login))
        .route(
            "/{id}",
            get(usuario_handlers::handle_buscar)
                .put(usuario_handlers::handle_atualizar)
                .delete(usuario_handlers::handle_remover),
        )
        .route("/{id}/aluno", get(usuario_handlers::handle_perfil_aluno))
        .route("/{id}/professor", get(usuario_handlers::handle_perfil_professor))
        .merge(me_routes);

    let aluno_routes = Router::new()
        .route(
            "/",
            get(aluno_handlers::handle_listar).post(aluno_handlers::handle_criar),
        )
        .route(
            "/{id}",
            get(aluno_handlers::handle_buscar)
                .put(aluno_handlers::handle_atualizar)
                .delete(aluno_handlers::handle_remover),
        )
        .route("/{id}/presencas", get(aluno_handlers::handle_presencas))
        .route("/{id}/disciplinas", get(aluno_handlers::handle_disciplinas))
        .route("/{id}/curso", get(aluno_handlers::handle_curso));

    let professor_routes = Router::new()
        .route(
            "/",
            get(professor_handlers::handle_listar).post(professor_handlers::handle_criar),
        )
        .route(
            "/{id}",
            get(professor_handlers::handle_buscar)
                .put(professor_handlers::handle_atualizar)
                .delete(professor_handlers::handle_remover),
        )
        .route("/{id}/disciplinas", get(professor_handlers::handle_disciplinas));

    let curso_routes = Router::new()
        .route(
            "/",
            get(curso_handlers::handle_listar).post(curso_handlers::handle_criar),
        )
        .route(
            "/{id}",
            get(curso_handlers::handle_buscar)
                .put(curso_handlers::handle_atualizar)
                .delete(curso_handlers::handle_remover),
        )
        .route("/{id}/alunos", get(curso_handlers::handle_alunos))
        .route("/{id}/disciplinas", get(curso_handlers::handle_disciplinas));

    let disciplina_routes = Router::new()
        .route(
            "/",
            get(disciplina_handlers::handle_listar).post(disciplina_handlers::handle_criar),
        )
        .route(
            "/{id}",
            get(disciplina_handlers::handle_buscar)
                .put(disciplina_handlers::handle_atualizar)
                .delete(disciplina_handlers::handle_remover),
        )
        .route(
            "/{id}/professores",
            get(disciplina_handlers::handle_professores)
                .post(disciplina_handlers::handle_vincular_professor),
        )
        .route(
            "/{id}/professores/{id_professor}",
            delete(disciplina_handlers::handle_desvincular_professor),
        )
        .route(
            "/{id}/alunos",
            get(disciplina_handlers::handle_alunos)
                .post(disciplina_handlers::handle_matricular_aluno),
        )
        .route(
            "/{id}/alunos/{id_aluno}",
            delete(disciplina_handlers::handle_desmatricular_aluno),
        );

    let sala_routes = Router::new()
        .route(
            "/",
            get(sala_handlers::handle_listar).post(sala_handlers::handle_criar),
        )
        .route(
            "/{id}",
            get(sala_handlers::handle_buscar)
                .put(sala_handlers::handle_atualizar)
                .delete(sala_handlers::handle_remover),
        )
        .route("/{id}/aulas", get(sala_handlers::handle_aulas));

    let aula_routes = Router::new()
        .route(
            "/",
            get(aula_handlers::handle_listar).post(aula_handlers::handle_criar),
        )
        .route(
            "/{id}",
            get(aula_handlers::handle_buscar)
                .put(aula_handlers::handle_atualizar)
                .delete(aula_handlers::handle_remover),
        );

    let presenca_routes = Router::new()
        .route(
            "/",
            get(presenca_handlers::handle_chamada).post(presenca_handlers::handle_check_in),
        )
        .route(
            "/{id}",
            get(presenca_handlers::handle_buscar)
                .put(presenca_handlers::handle_atualizar)
                .delete(presenca_handlers::handle_remover),
        );

    // --- Router Final ---
    Router::new()
        .nest("/usuarios", usuario_routes)
        .nest("/alunos", aluno_routes)
        .nest("/professores", professor_routes)
        .nest("/cursos", curso_routes)
        .nest("/disciplinas", disciplina_routes)
        .nest("/salas", sala_routes)
        .nest("/aulas", aula_routes)
        .nest("/presencas", presenca_routes)
        .with_state(app_state)
}
