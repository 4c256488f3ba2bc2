//! Core domain entities.
//!
//! Entities follow the "New Type" pattern with separate structs for creation
//! and partial update:
//! - [`NewMedico`] - For registering new records
//! - [`MedicoPatch`] - For partial updates

pub mod medico;

pub use medico::{Endereco, Especialidade, Medico, MedicoPatch, NewMedico};
