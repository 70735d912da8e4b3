use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use velora_core::{Entity, EntityMeta, parse_blob_or_default};

/// HTTP method a tool call uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    #[serde(rename = "GET")]
    Get,
    #[serde(rename = "POST")]
    Post,
    #[serde(rename = "PUT")]
    Put,
    #[serde(rename = "DELETE")]
    Delete,
}

/// Parameter schema of a tool, stored as a JSON-encoded string blob.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolParameters {
    pub required: Vec<String>,
    pub properties: Map<String, Value>,
}

/// An external tool an agent may call during a conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentTool {
    pub id: String,
    pub agent_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub endpoint: String,
    pub http_method: HttpMethod,
    #[serde(serialize_with = "parameters_to_blob")]
    pub parameters: ToolParameters,
    pub active: bool,
    pub meta: EntityMeta,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AgentToolWire {
    id: String,
    agent_id: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    endpoint: String,
    http_method: HttpMethod,
    #[serde(default)]
    parameters: Option<String>,
    #[serde(default = "default_true")]
    active: bool,
    meta: EntityMeta,
}

fn default_true() -> bool {
    true
}

impl<'de> Deserialize<'de> for AgentTool {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let wire = AgentToolWire::deserialize(deserializer)?;
        let parameters =
            parse_blob_or_default(wire.parameters.as_deref(), AgentTool::RESOURCE, &wire.id);
        Ok(AgentTool {
            id: wire.id,
            agent_id: wire.agent_id,
            name: wire.name,
            description: wire.description,
            endpoint: wire.endpoint,
            http_method: wire.http_method,
            parameters,
            active: wire.active,
            meta: wire.meta,
        })
    }
}

fn parameters_to_blob<S: Serializer>(
    parameters: &ToolParameters,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let encoded = serde_json::to_string(parameters).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&encoded)
}

impl Entity for AgentTool {
    const RESOURCE: &'static str = "agent-tools";

    fn id(&self) -> &str {
        &self.id
    }
}
