use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::schema::SchemaNode;

/// The only content type whose schema becomes body inputs.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// One entry of a request body's `content` map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaNode>,
}

/// A request body definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub content: IndexMap<String, MediaType>,

    #[serde(default)]
    pub required: bool,
}

impl RequestBody {
    pub fn json(&self) -> Option<&MediaType> {
        self.content.get(JSON_CONTENT_TYPE)
    }
}

/// A reference or inline request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestBodyNode {
    Unresolved {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Resolved(RequestBody),
}

impl RequestBodyNode {
    pub fn as_resolved(&self) -> Result<&RequestBody, &str> {
        match self {
            RequestBodyNode::Resolved(body) => Ok(body),
            RequestBodyNode::Unresolved { ref_path } => Err(ref_path),
        }
    }
}
