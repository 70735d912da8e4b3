use serde::{Deserialize, Serialize};

use velora_core::{Entity, EntityMeta};

/// A billable procedure offered by a clinic or professional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Procedure {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Price in cents; avoids float money.
    pub price_cents: i64,
    pub duration_minutes: u32,
    #[serde(default = "default_true")]
    pub active: bool,
    pub meta: EntityMeta,
}

fn default_true() -> bool {
    true
}

impl Procedure {
    /// Display price in whole currency units.
    pub fn price(&self) -> f64 {
        self.price_cents as f64 / 100.0
    }
}

impl Entity for Procedure {
    const RESOURCE: &'static str = "procedures";

    fn id(&self) -> &str {
        &self.id
    }
}
