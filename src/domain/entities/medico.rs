//! Medico entity: the persisted doctor record and its mutations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Medical specialty of a doctor.
///
/// Serialized (JSON and database) as the upper-case name, e.g. `"CARDIOLOGIA"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Especialidade {
    Ortopedia,
    Cardiologia,
    Ginecologia,
    Dermatologia,
}

impl Especialidade {
    pub const ALL: [Especialidade; 4] = [
        Especialidade::Ortopedia,
        Especialidade::Cardiologia,
        Especialidade::Ginecologia,
        Especialidade::Dermatologia,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Especialidade::Ortopedia => "ORTOPEDIA",
            Especialidade::Cardiologia => "CARDIOLOGIA",
            Especialidade::Ginecologia => "GINECOLOGIA",
            Especialidade::Dermatologia => "DERMATOLOGIA",
        }
    }
}

impl fmt::Display for Especialidade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Especialidade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Especialidade::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| format!("unknown especialidade: {s}"))
    }
}

/// Postal address embedded in a [`Medico`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endereco {
    pub logradouro: String,
    pub bairro: String,
    /// Eight digits, no separator.
    pub cep: String,
    pub cidade: String,
    pub uf: String,
    pub complemento: Option<String>,
    pub numero: Option<String>,
}

/// A registered doctor.
///
/// `id` is assigned by the store and never changes. Records are never
/// physically removed; [`Medico::deactivate`] flips `ativo` to `false`.
#[derive(Debug, Clone)]
pub struct Medico {
    pub id: i64,
    pub nome: String,
    pub email: String,
    pub crm: String,
    pub telefone: Option<String>,
    pub especialidade: Especialidade,
    pub endereco: Endereco,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Medico {
    /// Applies a partial update. Only `Some` fields overwrite stored values.
    ///
    /// Returns `true` if anything changed.
    pub fn apply_update(&mut self, patch: MedicoPatch) -> bool {
        let mut changed = false;

        if let Some(nome) = patch.nome {
            changed |= self.nome != nome;
            self.nome = nome;
        }

        if let Some(telefone) = patch.telefone {
            changed |= self.telefone.as_deref() != Some(telefone.as_str());
            self.telefone = Some(telefone);
        }

        if let Some(endereco) = patch.endereco {
            changed |= self.endereco != endereco;
            self.endereco = endereco;
        }

        changed
    }

    /// Marks the doctor inactive.
    ///
    /// Returns `false` if the doctor was already inactive, in which case
    /// nothing changes.
    pub fn deactivate(&mut self) -> bool {
        if !self.ativo {
            return false;
        }
        self.ativo = false;
        true
    }
}

/// Input data for registering a new doctor. New doctors are always active.
#[derive(Debug, Clone)]
pub struct NewMedico {
    pub nome: String,
    pub email: String,
    pub crm: String,
    pub telefone: Option<String>,
    pub especialidade: Especialidade,
    pub endereco: Endereco,
}

/// Partial update for an existing doctor.
///
/// `None` fields are left unchanged. A present `endereco` replaces the whole
/// stored address.
#[derive(Debug, Clone, Default)]
pub struct MedicoPatch {
    pub nome: Option<String>,
    pub telefone: Option<String>,
    pub endereco: Option<Endereco>,
}
