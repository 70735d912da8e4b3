use serde::{Deserialize, Serialize};

use velora_core::{Entity, EntityMeta, Patch};
use velora_forms::{FormModel, ValidationErrors};

/// Marketplace supplier catalog segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupplierCategory {
    Equipment,
    Injectables,
    Skincare,
    Disposables,
    Other,
}

impl std::fmt::Display for SupplierCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Equipment => write!(f, "equipment"),
            Self::Injectables => write!(f, "injectables"),
            Self::Skincare => write!(f, "skincare"),
            Self::Disposables => write!(f, "disposables"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// A supplier selling through the marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: String,
    pub name: String,
    /// Company tax identifier (CNPJ).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub category: SupplierCategory,
    #[serde(default = "default_true")]
    pub active: bool,
    pub meta: EntityMeta,
}

fn default_true() -> bool {
    true
}

impl Entity for Supplier {
    const RESOURCE: &'static str = "suppliers";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Draft behind the supplier create/edit dialog.
#[derive(Debug, Clone)]
pub struct SupplierForm {
    pub name: String,
    pub tax_id: String,
    pub email: String,
    pub phone: String,
    pub category: Option<SupplierCategory>,
    pub active: bool,
}

impl SupplierForm {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            tax_id: String::new(),
            email: String::new(),
            phone: String::new(),
            category: None,
            active: true,
        }
    }
}

impl Default for SupplierForm {
    fn default() -> Self {
        Self::new()
    }
}

impl FormModel for SupplierForm {
    type Entity = Supplier;

    fn from_entity(entity: &Supplier) -> Self {
        Self {
            name: entity.name.clone(),
            tax_id: entity.tax_id.clone().unwrap_or_default(),
            email: entity.email.clone().unwrap_or_default(),
            phone: entity.phone.clone().unwrap_or_default(),
            category: Some(entity.category),
            active: entity.active,
        }
    }

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name, "Name is required");
        errors.require_selected("category", &self.category, "Select a category");
        errors.check_email("email", &self.email);
        errors
    }

    fn to_patch(&self) -> Patch {
        Patch::new()
            .set_trimmed("name", &self.name)
            .set_trimmed("taxId", &self.tax_id)
            .set_trimmed("email", &self.email)
            .set_trimmed("phone", &self.phone)
            .set_opt_value("category", self.category.map(|c| c.to_string()))
            .set_value("active", self.active)
    }
}
