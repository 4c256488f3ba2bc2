//! Domain layer containing business entities and repository contracts.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository traits define contracts implemented by
//! [`crate::infrastructure::persistence`].
//!
//! - [`entities`] - The [`entities::Medico`] record and its mutation methods
//! - [`pagination`] - Page requests, sorting and result pages
//! - [`repositories`] - Data access trait definitions

pub mod entities;
pub mod pagination;
pub mod repositories;
