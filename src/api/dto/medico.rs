//! DTOs for the doctor registry endpoints.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::{Validate, ValidationError};

use crate::domain::entities::{Endereco, Especialidade, Medico, MedicoPatch, NewMedico};

/// Brazilian postal code: exactly eight digits.
static CEP_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{8}$").unwrap());

/// Rejects empty and whitespace-only strings.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("not_blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Address payload shared by registration and update.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EnderecoRequest {
    #[validate(custom(function = "not_blank"))]
    pub logradouro: String,

    #[validate(custom(function = "not_blank"))]
    pub bairro: String,

    #[validate(regex(path = *CEP_REGEX, message = "must be 8 digits"))]
    pub cep: String,

    #[validate(custom(function = "not_blank"))]
    pub cidade: String,

    #[validate(custom(function = "not_blank"))]
    pub uf: String,

    pub complemento: Option<String>,

    pub numero: Option<String>,
}

impl From<EnderecoRequest> for Endereco {
    fn from(e: EnderecoRequest) -> Self {
        Endereco {
            logradouro: e.logradouro,
            bairro: e.bairro,
            cep: e.cep,
            cidade: e.cidade,
            uf: e.uf,
            complemento: e.complemento,
            numero: e.numero,
        }
    }
}

/// Request body for `POST /medicos`.
///
/// Missing required fields and unknown `especialidade` values are rejected
/// while the body is parsed; blank strings and a malformed `cep` by
/// validation.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterMedicoRequest {
    #[validate(custom(function = "not_blank"))]
    pub nome: String,

    #[validate(custom(function = "not_blank"), email(message = "must be a valid email"))]
    pub email: String,

    #[validate(custom(function = "not_blank"))]
    pub crm: String,

    pub telefone: Option<String>,

    pub especialidade: Especialidade,

    #[validate(nested)]
    pub endereco: EnderecoRequest,
}

impl From<RegisterMedicoRequest> for NewMedico {
    fn from(r: RegisterMedicoRequest) -> Self {
        NewMedico {
            nome: r.nome,
            email: r.email,
            crm: r.crm,
            telefone: r.telefone,
            especialidade: r.especialidade,
            endereco: r.endereco.into(),
        }
    }
}

/// Request body for `PUT /medicos`.
///
/// Only `id` is required. Absent or `null` fields are left unchanged; a
/// present `endereco` must be complete and replaces the stored address.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMedicoRequest {
    pub id: i64,

    #[validate(custom(function = "not_blank"))]
    pub telefone: Option<String>,

    #[validate(custom(function = "not_blank"))]
    pub nome: Option<String>,

    #[validate(nested)]
    pub endereco: Option<EnderecoRequest>,
}

impl UpdateMedicoRequest {
    /// Splits the request into the target id and the patch to apply.
    pub fn into_patch(self) -> (i64, MedicoPatch) {
        let patch = MedicoPatch {
            nome: self.nome,
            telefone: self.telefone,
            endereco: self.endereco.map(Endereco::from),
        };
        (self.id, patch)
    }
}

/// Listing projection: never exposes `telefone` or `endereco`.
#[derive(Debug, Serialize)]
pub struct MedicoListItem {
    pub id: i64,
    pub nome: String,
    pub email: String,
    pub crm: String,
    pub especialidade: Especialidade,
}

impl From<Medico> for MedicoListItem {
    fn from(m: Medico) -> Self {
        MedicoListItem {
            id: m.id,
            nome: m.nome,
            email: m.email,
            crm: m.crm,
            especialidade: m.especialidade,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn register_json() -> serde_json::Value {
        json!({
            "nome": "Ana Silva",
            "email": "ana@x.com",
            "crm": "12345",
            "especialidade": "CARDIOLOGIA",
            "endereco": {
                "logradouro": "Rua A",
                "bairro": "Centro",
                "cep": "12345678",
                "cidade": "SP",
                "uf": "SP"
            }
        })
    }

    fn parse_register(value: serde_json::Value) -> Result<RegisterMedicoRequest, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn test_valid_registration() {
        let req = parse_register(register_json()).unwrap();
        assert!(req.validate().is_ok());
        assert!(req.telefone.is_none());
        assert!(req.endereco.complemento.is_none());
    }

    #[test]
    fn test_blank_nome_is_rejected() {
        let mut body = register_json();
        body["nome"] = json!("   ");
        let errors = parse_register(body).unwrap().validate().unwrap_err();
        assert!(errors.field_errors().contains_key("nome"));
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        let mut body = register_json();
        body["email"] = json!("not-an-email");
        assert!(parse_register(body).unwrap().validate().is_err());
    }

    #[test]
    fn test_missing_required_field_fails_to_parse() {
        for field in ["nome", "email", "crm", "especialidade", "endereco"] {
            let mut body = register_json();
            body.as_object_mut().unwrap().remove(field);
            assert!(parse_register(body).is_err(), "{field} should be required");
        }
    }

    #[test]
    fn test_missing_address_subfield_fails_to_parse() {
        for field in ["logradouro", "bairro", "cep", "cidade", "uf"] {
            let mut body = register_json();
            body["endereco"].as_object_mut().unwrap().remove(field);
            assert!(parse_register(body).is_err(), "{field} should be required");
        }
    }

    #[test]
    fn test_blank_address_subfield_is_rejected() {
        let mut body = register_json();
        body["endereco"]["bairro"] = json!("");
        assert!(parse_register(body).unwrap().validate().is_err());
    }

    #[test]
    fn test_cep_must_be_eight_digits() {
        for cep in ["1234567", "123456789", "12345-678", "abcdefgh", ""] {
            let mut body = register_json();
            body["endereco"]["cep"] = json!(cep);
            assert!(
                parse_register(body).unwrap().validate().is_err(),
                "cep {cep:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_unknown_especialidade_fails_to_parse() {
        let mut body = register_json();
        body["especialidade"] = json!("PEDIATRIA");
        assert!(parse_register(body).is_err());
    }

    #[test]
    fn test_update_requires_id() {
        let result = serde_json::from_value::<UpdateMedicoRequest>(json!({"nome": "X"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_with_only_id_is_valid_and_empty() {
        let req: UpdateMedicoRequest = serde_json::from_value(json!({"id": 7})).unwrap();
        assert!(req.validate().is_ok());

        let (id, patch) = req.into_patch();
        assert_eq!(id, 7);
        assert!(patch.nome.is_none());
        assert!(patch.telefone.is_none());
        assert!(patch.endereco.is_none());
    }

    #[test]
    fn test_update_with_partial_address_fails_to_parse() {
        let result = serde_json::from_value::<UpdateMedicoRequest>(json!({
            "id": 1,
            "endereco": { "logradouro": "Rua B" }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_with_bad_cep_is_rejected() {
        let req: UpdateMedicoRequest = serde_json::from_value(json!({
            "id": 1,
            "endereco": {
                "logradouro": "Rua B", "bairro": "Sul", "cep": "123",
                "cidade": "Rio", "uf": "RJ"
            }
        }))
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_blank_nome_is_rejected() {
        let req: UpdateMedicoRequest =
            serde_json::from_value(json!({"id": 1, "nome": ""})).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_list_item_hides_contact_data() {
        let req = parse_register(register_json()).unwrap();
        let new: NewMedico = req.into();
        let medico = Medico {
            id: 1,
            nome: new.nome,
            email: new.email,
            crm: new.crm,
            telefone: Some("11999990000".to_string()),
            especialidade: new.especialidade,
            endereco: new.endereco,
            ativo: true,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let item = serde_json::to_value(MedicoListItem::from(medico)).unwrap();
        assert_eq!(
            item,
            json!({
                "id": 1,
                "nome": "Ana Silva",
                "email": "ana@x.com",
                "crm": "12345",
                "especialidade": "CARDIOLOGIA"
            })
        );
    }
}
