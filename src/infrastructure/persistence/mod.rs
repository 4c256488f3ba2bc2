//! Repository implementations.
//!
//! - [`PgMedicoRepository`] - PostgreSQL storage via SQLx
//! - [`InMemoryMedicoRepository`] - process-local storage with the same contract

pub mod memory_medico_repository;
pub mod pg_medico_repository;

pub use memory_medico_repository::InMemoryMedicoRepository;
pub use pg_medico_repository::PgMedicoRepository;
