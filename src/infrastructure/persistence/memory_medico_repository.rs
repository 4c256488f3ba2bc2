//! In-process implementation of the doctor repository.
//!
//! Used when `STORAGE=memory` and by the handler integration tests. It
//! enforces the same uniqueness rules as the PostgreSQL schema and applies
//! each write under a single lock acquisition.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::domain::entities::{Medico, MedicoPatch, NewMedico};
use crate::domain::pagination::{Direction, Page, PageRequest, SortField};
use crate::domain::repositories::MedicoRepository;
use crate::error::AppError;

#[derive(Default)]
struct Store {
    next_id: i64,
    rows: BTreeMap<i64, Medico>,
}

impl Store {
    fn row_mut(&mut self, id: i64) -> Result<&mut Medico, AppError> {
        self.rows
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Medico not found", json!({ "id": id })))
    }
}

/// Doctor repository backed by a `BTreeMap` behind an async `RwLock`.
#[derive(Default)]
pub struct InMemoryMedicoRepository {
    store: RwLock<Store>,
}

impl InMemoryMedicoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn compare(a: &Medico, b: &Medico, field: SortField) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Nome => a.nome.cmp(&b.nome),
        SortField::Email => a.email.cmp(&b.email),
        SortField::Crm => a.crm.cmp(&b.crm),
        SortField::Especialidade => a.especialidade.as_str().cmp(b.especialidade.as_str()),
    }
}

#[async_trait]
impl MedicoRepository for InMemoryMedicoRepository {
    async fn save(&self, new_medico: NewMedico) -> Result<Medico, AppError> {
        let mut store = self.store.write().await;

        for existing in store.rows.values() {
            if existing.crm == new_medico.crm {
                return Err(AppError::conflict(
                    "Unique constraint violation",
                    json!({ "constraint": "medicos_crm_key", "field": "crm" }),
                ));
            }
            if existing.email == new_medico.email {
                return Err(AppError::conflict(
                    "Unique constraint violation",
                    json!({ "constraint": "medicos_email_key", "field": "email" }),
                ));
            }
        }

        store.next_id += 1;
        let now = Utc::now();
        let medico = Medico {
            id: store.next_id,
            nome: new_medico.nome,
            email: new_medico.email,
            crm: new_medico.crm,
            telefone: new_medico.telefone,
            especialidade: new_medico.especialidade,
            endereco: new_medico.endereco,
            ativo: true,
            created_at: now,
            updated_at: now,
        };

        store.rows.insert(medico.id, medico.clone());
        Ok(medico)
    }

    async fn find_all_active(&self, request: PageRequest) -> Result<Page<Medico>, AppError> {
        let store = self.store.read().await;

        let mut active: Vec<&Medico> = store.rows.values().filter(|m| m.ativo).collect();
        active.sort_by(|a, b| {
            let ord = compare(a, b, request.sort.field);
            let ord = match request.sort.direction {
                Direction::Asc => ord,
                Direction::Desc => ord.reverse(),
            };
            ord.then(a.id.cmp(&b.id))
        });

        let total = active.len() as i64;
        let content = active
            .into_iter()
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(request.limit()).unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok(Page::new(content, request, total))
    }

    async fn get_reference(&self, id: i64) -> Result<Medico, AppError> {
        self.store
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Medico not found", json!({ "id": id })))
    }

    async fn update(&self, id: i64, patch: &MedicoPatch) -> Result<(), AppError> {
        let mut store = self.store.write().await;
        let stored = store.row_mut(id)?;

        if stored.apply_update(patch.clone()) {
            stored.updated_at = Utc::now();
        }

        Ok(())
    }

    async fn deactivate(&self, id: i64) -> Result<(), AppError> {
        let mut store = self.store.write().await;
        let stored = store.row_mut(id)?;

        if stored.deactivate() {
            stored.updated_at = Utc::now();
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
