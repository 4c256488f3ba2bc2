//! Handlers for the doctor registry endpoints.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
};

use crate::api::dto::medico::{MedicoListItem, RegisterMedicoRequest, UpdateMedicoRequest};
use crate::api::dto::pagination::{PageResponse, PaginationParams};
use crate::api::extract::ValidatedJson;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new doctor.
///
/// # Endpoint
///
/// `POST /medicos`
///
/// # Request Body
///
/// ```json
/// {
///   "nome": "Ana Silva",
///   "email": "ana@x.com",
///   "crm": "12345",
///   "telefone": "11999990000",   // optional
///   "especialidade": "CARDIOLOGIA",
///   "endereco": {
///     "logradouro": "Rua A", "bairro": "Centro", "cep": "12345678",
///     "cidade": "SP", "uf": "SP",
///     "complemento": null, "numero": null   // optional
///   }
/// }
/// ```
///
/// # Errors
///
/// Returns 400 if a required field is missing, blank or malformed.
/// Returns 409 if the `crm` or `email` is already registered.
pub async fn register_medico_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterMedicoRequest>,
) -> Result<StatusCode, AppError> {
    state.medico_service.register(payload.into()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Lists active doctors, one page at a time.
///
/// # Endpoint
///
/// `GET /medicos`
///
/// # Query Parameters
///
/// - `page` (optional): Zero-based page index (default: 0)
/// - `size` (optional): Items per page (default: 10, max: 2000)
/// - `sort` (optional): `field[,asc|desc]` over `id`, `nome`, `email`, `crm`,
///   `especialidade` (default: `nome,asc`)
///
/// Malformed parameters fall back to their defaults. A query string that
/// cannot be decoded at all (e.g. a repeated key) is served with the default
/// page.
pub async fn list_medicos_handler(
    State(state): State<AppState>,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<PageResponse<MedicoListItem>>, AppError> {
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "Ignoring malformed pagination query");
            PaginationParams::default()
        }
    };
    let request = params.to_page_request();

    let page = state.medico_service.list_active(request).await?;

    Ok(Json(page.map(MedicoListItem::from).into()))
}

/// Partially updates a doctor.
///
/// # Endpoint
///
/// `PUT /medicos`
///
/// # Request Body
///
/// Only `id` is required. Fields left out (or `null`) are not changed.
///
/// ```json
/// { "id": 1, "nome": "Ana Souza", "telefone": "11888887777" }
/// ```
///
/// # Errors
///
/// Returns 400 if `id` is missing or a present field is invalid.
/// Returns 404 if no doctor has this id.
pub async fn update_medico_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateMedicoRequest>,
) -> Result<StatusCode, AppError> {
    let (id, patch) = payload.into_patch();
    state.medico_service.update(id, patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Soft-deletes a doctor by clearing its `ativo` flag.
///
/// # Endpoint
///
/// `DELETE /medicos/{id}`
///
/// # Behavior
///
/// - The record is **not** removed. It stops appearing in listings.
/// - Deactivating an already inactive doctor succeeds without changes.
///
/// # Errors
///
/// Returns 400 if `id` is not an integer.
/// Returns 404 if no doctor has this id.
pub async fn deactivate_medico_handler(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    state.medico_service.deactivate(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
