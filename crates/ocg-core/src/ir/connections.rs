use indexmap::IndexMap;
use serde::Serialize;

use super::inputs::InputFieldType;

pub const ORDER_PRIORITY_OAUTH2: u32 = 0;
pub const ORDER_PRIORITY_API_KEY: u32 = 50;
pub const ORDER_PRIORITY_BASIC: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OAuth2Type {
    AuthorizationCode,
}

impl OAuth2Type {
    pub fn as_str(&self) -> &'static str {
        match self {
            OAuth2Type::AuthorizationCode => "AuthorizationCode",
        }
    }
}

/// A field a user fills in when configuring a connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IrConnectionInput {
    pub label: String,
    #[serde(rename = "type")]
    pub input_type: InputFieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shown: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl IrConnectionInput {
    pub fn new(label: impl Into<String>, input_type: InputFieldType) -> Self {
        Self {
            label: label.into(),
            input_type,
            required: None,
            shown: None,
            default: None,
            comments: None,
            example: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn shown(mut self, shown: bool) -> Self {
        self.shown = Some(shown);
        self
    }

    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }
}

/// A connection derived from one OpenAPI security scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IrConnection {
    /// The security scheme's name in `components.securitySchemes`.
    pub key: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth2_type: Option<OAuth2Type>,
    pub inputs: IndexMap<String, IrConnectionInput>,
    /// Lower values are listed first.
    pub order_priority: u32,
}
