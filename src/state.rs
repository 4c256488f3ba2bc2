//! Shared state injected into every handler.

use std::sync::Arc;

use crate::application::services::MedicoService;
use crate::domain::repositories::MedicoRepository;

/// Doctor service over whichever repository the server was started with.
pub type DynMedicoService = MedicoService<dyn MedicoRepository>;

/// Application state, cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub medico_service: Arc<DynMedicoService>,
}

impl AppState {
    /// Wires the service layer on top of a repository implementation.
    pub fn new(repository: Arc<dyn MedicoRepository>) -> Self {
        Self {
            medico_service: Arc::new(MedicoService::new(repository)),
        }
    }
}
