//! Repository trait definitions for the domain layer.
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing

pub mod medico_repository;

pub use medico_repository::MedicoRepository;

#[cfg(test)]
pub use medico_repository::MockMedicoRepository;
