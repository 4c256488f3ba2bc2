//! PostgreSQL implementation of the doctor repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

use crate::domain::entities::{Endereco, Especialidade, Medico, MedicoPatch, NewMedico};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::repositories::MedicoRepository;
use crate::error::AppError;

const COLUMNS: &str = "id, nome, email, crm, telefone, especialidade, \
     logradouro, bairro, cep, cidade, uf, complemento, numero, \
     ativo, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct MedicoRow {
    id: i64,
    nome: String,
    email: String,
    crm: String,
    telefone: Option<String>,
    especialidade: String,
    logradouro: String,
    bairro: String,
    cep: String,
    cidade: String,
    uf: String,
    complemento: Option<String>,
    numero: Option<String>,
    ativo: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MedicoRow> for Medico {
    type Error = AppError;

    fn try_from(r: MedicoRow) -> Result<Self, Self::Error> {
        let especialidade: Especialidade = r.especialidade.parse().map_err(|e: String| {
            tracing::error!(id = r.id, error = %e, "Corrupt especialidade column");
            AppError::internal("Corrupt record", json!({ "id": r.id }))
        })?;

        Ok(Medico {
            id: r.id,
            nome: r.nome,
            email: r.email,
            crm: r.crm,
            telefone: r.telefone,
            especialidade,
            endereco: Endereco {
                logradouro: r.logradouro,
                bairro: r.bairro,
                cep: r.cep,
                cidade: r.cidade,
                uf: r.uf,
                complemento: r.complemento,
                numero: r.numero,
            },
            ativo: r.ativo,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

/// PostgreSQL repository for doctors.
///
/// Soft delete only: `ativo = FALSE` means deactivated. Every write is a
/// single statement, so each one commits or fails as a unit.
pub struct PgMedicoRepository {
    pool: Arc<PgPool>,
}

impl PgMedicoRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Counts doctors by `ativo` flag. Used by the admin CLI.
    pub async fn count_by_status(&self) -> Result<(i64, i64), AppError> {
        let (active, inactive): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*) FILTER (WHERE ativo), COUNT(*) FILTER (WHERE NOT ativo) FROM medicos",
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok((active, inactive))
    }
}

#[async_trait]
impl MedicoRepository for PgMedicoRepository {
    async fn save(&self, new_medico: NewMedico) -> Result<Medico, AppError> {
        let NewMedico {
            nome,
            email,
            crm,
            telefone,
            especialidade,
            endereco,
        } = new_medico;

        let row: MedicoRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO medicos (nome, email, crm, telefone, especialidade,
                                 logradouro, bairro, cep, cidade, uf, complemento, numero)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(nome)
        .bind(email)
        .bind(crm)
        .bind(telefone)
        .bind(especialidade.as_str())
        .bind(endereco.logradouro)
        .bind(endereco.bairro)
        .bind(endereco.cep)
        .bind(endereco.cidade)
        .bind(endereco.uf)
        .bind(endereco.complemento)
        .bind(endereco.numero)
        .fetch_one(self.pool.as_ref())
        .await?;

        row.try_into()
    }

    async fn find_all_active(&self, request: PageRequest) -> Result<Page<Medico>, AppError> {
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {COLUMNS} FROM medicos WHERE ativo ORDER BY "
        ));
        // Column and direction come from closed enums, never from raw input.
        query
            .push(request.sort.field.column())
            .push(" ")
            .push(request.sort.direction.sql())
            .push(", id ASC LIMIT ")
            .push_bind(request.limit())
            .push(" OFFSET ")
            .push_bind(request.offset());

        let count_query =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM medicos WHERE ativo")
                .fetch_one(self.pool.as_ref());
        let rows_query = query
            .build_query_as::<MedicoRow>()
            .fetch_all(self.pool.as_ref());

        let (total, rows) = tokio::try_join!(count_query, rows_query)?;

        let content = rows
            .into_iter()
            .map(Medico::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(content, request, total))
    }

    async fn get_reference(&self, id: i64) -> Result<Medico, AppError> {
        let row: Option<MedicoRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM medicos WHERE id = $1"))
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        row.ok_or_else(|| AppError::not_found("Medico not found", json!({ "id": id })))?
            .try_into()
    }

    async fn update(&self, id: i64, patch: &MedicoPatch) -> Result<(), AppError> {
        let endereco = patch.endereco.as_ref();

        // Only columns present in the patch are touched. A present address
        // is written as a whole, optional parts included.
        let result = sqlx::query(
            r#"
            UPDATE medicos SET
                nome        = COALESCE($2, nome),
                telefone    = COALESCE($3, telefone),
                logradouro  = CASE WHEN $4 THEN $5  ELSE logradouro  END,
                bairro      = CASE WHEN $4 THEN $6  ELSE bairro      END,
                cep         = CASE WHEN $4 THEN $7  ELSE cep         END,
                cidade      = CASE WHEN $4 THEN $8  ELSE cidade      END,
                uf          = CASE WHEN $4 THEN $9  ELSE uf          END,
                complemento = CASE WHEN $4 THEN $10 ELSE complemento END,
                numero      = CASE WHEN $4 THEN $11 ELSE numero      END,
                updated_at  = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(patch.nome.as_deref())
        .bind(patch.telefone.as_deref())
        .bind(endereco.is_some())
        .bind(endereco.map(|e| e.logradouro.as_str()))
        .bind(endereco.map(|e| e.bairro.as_str()))
        .bind(endereco.map(|e| e.cep.as_str()))
        .bind(endereco.map(|e| e.cidade.as_str()))
        .bind(endereco.map(|e| e.uf.as_str()))
        .bind(endereco.and_then(|e| e.complemento.as_deref()))
        .bind(endereco.and_then(|e| e.numero.as_deref()))
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Medico not found", json!({ "id": id })));
        }

        Ok(())
    }

    async fn deactivate(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE medicos SET
                updated_at = CASE WHEN ativo THEN NOW() ELSE updated_at END,
                ativo      = FALSE
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Medico not found", json!({ "id": id })));
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
