// src/models/mod.rs
pub mod aluno;
pub mod aula;
pub mod curso;
pub mod disciplina;
pub mod presenca;
pub mod professor;
pub mod sala;
pub mod usuario;
