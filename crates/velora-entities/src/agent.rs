use serde::{Deserialize, Serialize, Serializer};

use velora_core::{Entity, EntityMeta, Patch, parse_blob_or_default};
use velora_forms::{FormModel, ValidationErrors};

/// Behavior settings of a lead-capture chat agent.
///
/// Stored on the wire as a JSON-encoded string inside the agent record and
/// merged with these defaults at read time. A malformed blob falls back to
/// `AgentConfig::default()` for that record only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AgentConfig {
    /// Opening message shown when the widget starts a conversation.
    pub greeting: String,
    /// BCP 47 language tag the agent answers in.
    pub language: String,
    /// Questions asked before offering a human handoff.
    pub max_questions: u32,
    /// Lead fields the agent tries to capture.
    pub capture_fields: Vec<String>,
    /// WhatsApp number leads are handed off to, when configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handoff_whatsapp: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            greeting: "Hi! How can I help you today?".to_string(),
            language: "pt-BR".to_string(),
            max_questions: 5,
            capture_fields: vec!["name".to_string(), "phone".to_string()],
            handoff_whatsapp: None,
        }
    }
}

/// A configurable lead-capture chat agent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Model identifier the backend routes conversations to.
    pub model: String,
    pub active: bool,
    #[serde(serialize_with = "config_to_blob")]
    pub config: AgentConfig,
    pub meta: EntityMeta,
}

/// Wire shape: `config` arrives as a JSON-encoded string (or not at all).
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AgentWire {
    id: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    model: String,
    #[serde(default = "default_true")]
    active: bool,
    #[serde(default)]
    config: Option<String>,
    meta: EntityMeta,
}

fn default_true() -> bool {
    true
}

impl<'de> Deserialize<'de> for Agent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let wire = AgentWire::deserialize(deserializer)?;
        let config = parse_blob_or_default(wire.config.as_deref(), Agent::RESOURCE, &wire.id);
        Ok(Agent {
            id: wire.id,
            name: wire.name,
            description: wire.description,
            model: wire.model,
            active: wire.active,
            config,
            meta: wire.meta,
        })
    }
}

fn config_to_blob<S: Serializer>(config: &AgentConfig, serializer: S) -> Result<S::Ok, S::Error> {
    let encoded = serde_json::to_string(config).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&encoded)
}

impl Entity for Agent {
    const RESOURCE: &'static str = "agents";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Draft behind the agent dialog. Two tabs — profile and behavior — over
/// this one draft; switching tabs must not reset either half.
#[derive(Debug, Clone)]
pub struct AgentForm {
    // Profile tab
    pub name: String,
    pub description: String,
    pub model: Option<String>,
    pub active: bool,
    // Behavior tab
    pub greeting: String,
    pub language: String,
    pub max_questions: u32,
    // Not editable in the dialog, but carried so an edit doesn't reset them
    pub capture_fields: Vec<String>,
    pub handoff_whatsapp: Option<String>,
}

impl AgentForm {
    pub fn new() -> Self {
        let defaults = AgentConfig::default();
        Self {
            name: String::new(),
            description: String::new(),
            model: None,
            active: true,
            greeting: defaults.greeting,
            language: defaults.language,
            max_questions: defaults.max_questions,
            capture_fields: defaults.capture_fields,
            handoff_whatsapp: defaults.handoff_whatsapp,
        }
    }
}

impl Default for AgentForm {
    fn default() -> Self {
        Self::new()
    }
}

impl FormModel for AgentForm {
    type Entity = Agent;

    fn from_entity(entity: &Agent) -> Self {
        Self {
            name: entity.name.clone(),
            description: entity.description.clone().unwrap_or_default(),
            model: Some(entity.model.clone()),
            active: entity.active,
            greeting: entity.config.greeting.clone(),
            language: entity.config.language.clone(),
            max_questions: entity.config.max_questions,
            capture_fields: entity.config.capture_fields.clone(),
            handoff_whatsapp: entity.config.handoff_whatsapp.clone(),
        }
    }

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name, "Name is required");
        errors.require_selected("model", &self.model, "Select a model");
        errors
    }

    fn to_patch(&self) -> Patch {
        let config = AgentConfig {
            greeting: self.greeting.trim().to_string(),
            language: self.language.trim().to_string(),
            max_questions: self.max_questions,
            capture_fields: self.capture_fields.clone(),
            handoff_whatsapp: self.handoff_whatsapp.clone(),
        };
        let encoded = serde_json::to_string(&config).unwrap_or_default();
        Patch::new()
            .set_trimmed("name", &self.name)
            .set_trimmed("description", &self.description)
            .set_opt_value("model", self.model.as_deref())
            .set_value("active", self.active)
            .set_value("config", encoded)
    }
}
