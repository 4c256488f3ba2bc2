//! Doctor registry service.

use crate::domain::entities::{Medico, MedicoPatch, NewMedico};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::repositories::MedicoRepository;
use crate::error::AppError;
use std::sync::Arc;

/// Orchestrates registration, listing, update and deactivation of doctors.
///
/// The repository is supplied by the caller, so the same service runs on
/// PostgreSQL, the in-memory store, or a mock. Uniqueness of `crm`/`email`
/// is left to the store; the service performs no locking.
pub struct MedicoService<R: MedicoRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: MedicoRepository + ?Sized> MedicoService<R> {
    /// Creates a new doctor service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Registers a new, active doctor.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the `crm` or `email` is taken.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn register(&self, new_medico: NewMedico) -> Result<Medico, AppError> {
        let medico = self.repository.save(new_medico).await?;
        tracing::info!(id = medico.id, crm = %medico.crm, "Medico registered");
        Ok(medico)
    }

    /// Returns one page of active doctors.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_active(&self, request: PageRequest) -> Result<Page<Medico>, AppError> {
        self.repository.find_all_active(request).await
    }

    /// Looks up a doctor by id, active or not.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no doctor has this id.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn find(&self, id: i64) -> Result<Medico, AppError> {
        self.repository.get_reference(id).await
    }

    /// Applies a partial update to an existing doctor.
    ///
    /// Nothing is written when the patch leaves every field as it was;
    /// otherwise only the fields present in `patch` reach the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no doctor has this id.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update(&self, id: i64, patch: MedicoPatch) -> Result<Medico, AppError> {
        let mut medico = self.repository.get_reference(id).await?;

        if medico.apply_update(patch.clone()) {
            self.repository.update(id, &patch).await?;
            tracing::info!(id, "Medico updated");
        } else {
            tracing::debug!(id, "Update left medico unchanged");
        }

        Ok(medico)
    }

    /// Soft-deletes a doctor. Deactivating an inactive doctor is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no doctor has this id.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn deactivate(&self, id: i64) -> Result<(), AppError> {
        let mut medico = self.repository.get_reference(id).await?;

        if medico.deactivate() {
            self.repository.deactivate(id).await?;
            tracing::info!(id, "Medico deactivated");
        } else {
            tracing::debug!(id, "Medico already inactive");
        }

        Ok(())
    }

    /// Checks that the backing store answers.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unreachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}
