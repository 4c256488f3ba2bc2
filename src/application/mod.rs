//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! - [`services::medico_service::MedicoService`] - Doctor registry operations

pub mod services;
