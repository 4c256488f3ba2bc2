//! API route configuration.

use crate::api::handlers::{
    deactivate_medico_handler, list_medicos_handler, register_medico_handler,
    update_medico_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get},
};

/// Doctor registry routes.
///
/// # Endpoints
///
/// - `POST   /medicos`        - Register a doctor
/// - `GET    /medicos`        - List active doctors (paginated)
/// - `PUT    /medicos`        - Partially update a doctor
/// - `DELETE /medicos/{id}`   - Deactivate (soft-delete) a doctor
pub fn medico_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/medicos",
            get(list_medicos_handler)
                .post(register_medico_handler)
                .put(update_medico_handler),
        )
        .route("/medicos/{id}", delete(deactivate_medico_handler))
}
