// src/web/mod.rs
pub mod aluno_handlers;
pub mod auth_handlers;
pub mod aula_handlers;
pub mod curso_handlers;
pub mod disciplina_handlers;
pub mod mw_auth;
pub mod payload;
pub mod presenca_handlers;
pub mod professor_handlers;
pub mod routes;
pub mod sala_handlers;
pub mod usuario_handlers;
