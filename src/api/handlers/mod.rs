//! HTTP request handlers for API endpoints.

pub mod health;
pub mod medicos;

pub use health::health_handler;
pub use medicos::{
    deactivate_medico_handler, list_medicos_handler, register_medico_handler,
    update_medico_handler,
};
