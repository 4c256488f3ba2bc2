//! Repository trait for doctor persistence.

use crate::domain::entities::{Medico, MedicoPatch, NewMedico};
use crate::domain::pagination::{Page, PageRequest};
use crate::error::AppError;
use async_trait::async_trait;

/// Persistence interface for [`Medico`] records.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMedicoRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryMedicoRepository`] - process-local store
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_medico.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MedicoRepository: Send + Sync {
    /// Inserts a new, active doctor and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the `crm` or `email` is already registered.
    /// Returns [`AppError::Internal`] on database errors.
    async fn save(&self, new_medico: NewMedico) -> Result<Medico, AppError>;

    /// Fetches one page of doctors with `ativo = true`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_all_active(&self, request: PageRequest) -> Result<Page<Medico>, AppError>;

    /// Resolves a doctor by id, active or not.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no doctor has this id.
    /// Returns [`AppError::Internal`] on database errors.
    async fn get_reference(&self, id: i64) -> Result<Medico, AppError>;

    /// Writes the fields present in `patch` to an existing doctor in a
    /// single atomic statement. Absent fields keep their stored value, even
    /// if another writer changed them since `get_reference`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the row no longer exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, id: i64, patch: &MedicoPatch) -> Result<(), AppError>;

    /// Clears the `ativo` flag. Already inactive rows are left as they are.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the row no longer exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn deactivate(&self, id: i64) -> Result<(), AppError>;

    /// Checks that the underlying store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be queried.
    async fn ping(&self) -> Result<(), AppError>;
}
