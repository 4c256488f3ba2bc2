//! Business logic services for the application layer.

pub mod medico_service;

pub use medico_service::MedicoService;
