use serde::{Deserialize, Serialize};
use time::Date;

use velora_core::{Entity, EntityMeta, Patch};
use velora_forms::{FormModel, ValidationErrors};

/// A clinic's patient record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<Date>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub meta: EntityMeta,
}

fn default_true() -> bool {
    true
}

impl Entity for Patient {
    const RESOURCE: &'static str = "patients";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Draft behind the patient create/edit dialog.
#[derive(Debug, Clone, Default)]
pub struct PatientForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: Option<Date>,
    pub active: bool,
    pub notes: String,
}

impl PatientForm {
    pub fn new() -> Self {
        Self {
            active: true,
            ..Self::default()
        }
    }
}

impl FormModel for PatientForm {
    type Entity = Patient;

    fn from_entity(entity: &Patient) -> Self {
        Self {
            full_name: entity.full_name.clone(),
            email: entity.email.clone().unwrap_or_default(),
            phone: entity.phone.clone().unwrap_or_default(),
            birth_date: entity.birth_date,
            active: entity.active,
            notes: entity.notes.clone().unwrap_or_default(),
        }
    }

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require("fullName", &self.full_name, "Full name is required");
        errors.check_email("email", &self.email);
        errors
    }

    fn to_patch(&self) -> Patch {
        Patch::new()
            .set_trimmed("fullName", &self.full_name)
            .set_trimmed("email", &self.email)
            .set_trimmed("phone", &self.phone)
            .set_opt_value("birthDate", self.birth_date.map(|d| d.to_string()))
            .set_trimmed("notes", &self.notes)
            .set_value("active", self.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::date;

    fn wire_patient() -> serde_json::Value {
        json!({
            "id": "p-1",
            "fullName": "Ana Souza",
            "email": "ana@example.com",
            "birthDate": "1990-03-14",
            "active": true,
            "meta": {
                "createdAt": "2025-05-15T14:30:00Z",
                "updatedAt": "2025-06-01T09:00:00Z"
            }
        })
    }

    #[test]
    fn test_wire_decoding() {
        let patient = Patient::from_wire(wire_patient()).unwrap();
        assert_eq!(patient.id(), "p-1");
        assert_eq!(patient.full_name, "Ana Souza");
        assert_eq!(patient.birth_date, Some(date!(1990 - 03 - 14)));
        assert_eq!(patient.phone, None);
        assert!(patient.active);
    }

    #[test]
    fn test_active_defaults_to_true() {
        let mut value = wire_patient();
        value.as_object_mut().unwrap().remove("active");
        let patient = Patient::from_wire(value).unwrap();
        assert!(patient.active);
    }

    #[test]
    fn test_form_validation() {
        let mut form = PatientForm::new();
        let errors = form.validate();
        assert_eq!(errors.get("fullName"), Some("Full name is required"));

        form.full_name = "Ana Souza".to_string();
        form.email = "nope".to_string();
        let errors = form.validate();
        assert_eq!(errors.get("fullName"), None);
        assert_eq!(errors.get("email"), Some("Invalid email address"));
    }

    #[test]
    fn test_patch_strips_blank_optionals_and_keeps_false() {
        let form = PatientForm {
            full_name: "  Ana Souza ".to_string(),
            email: String::new(),
            phone: "  ".to_string(),
            birth_date: None,
            active: false,
            notes: String::new(),
        };
        let patch = form.to_patch();
        assert_eq!(patch.get("fullName").unwrap(), "Ana Souza");
        assert!(!patch.contains("email"));
        assert!(!patch.contains("phone"));
        assert!(!patch.contains("birthDate"));
        assert_eq!(patch.get("active").unwrap(), &json!(false));
    }

    #[test]
    fn test_patch_sends_birth_date_as_iso_string() {
        let form = PatientForm {
            full_name: "Ana Souza".to_string(),
            birth_date: Some(date!(1990 - 03 - 14)),
            active: true,
            ..PatientForm::default()
        };
        let patch = form.to_patch();
        assert_eq!(patch.get("birthDate").unwrap(), &json!("1990-03-14"));
    }

    #[test]
    fn test_edit_draft_copies_entity() {
        let patient = Patient::from_wire(wire_patient()).unwrap();
        let form = PatientForm::from_entity(&patient);
        assert_eq!(form.full_name, "Ana Souza");
        assert_eq!(form.email, "ana@example.com");
        assert_eq!(form.birth_date, patient.birth_date);
    }
}
