use serde::Serialize;

/// The input widget type a generated input declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFieldType {
    String,
    Password,
    Boolean,
    Connection,
}

impl InputFieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputFieldType::String => "string",
            InputFieldType::Password => "password",
            InputFieldType::Boolean => "boolean",
            InputFieldType::Connection => "connection",
        }
    }
}

/// Coercion helper applied to an input value before `perform` sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CleanFn {
    ToString,
    ToNumber,
    ToBool,
}

impl CleanFn {
    /// Name of the helper under `util.types`.
    pub fn helper_name(&self) -> &'static str {
        match self {
            CleanFn::ToString => "toString",
            CleanFn::ToNumber => "toNumber",
            CleanFn::ToBool => "toBool",
        }
    }
}

/// How an input's value is cleaned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IrClean {
    pub function: CleanFn,
    /// Falsy results become `undefined` so optional fields drop out of requests.
    pub coalesce_falsy: bool,
}

/// One selectable value of an enumerated input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IrChoice {
    pub label: String,
    pub value: String,
}

/// An action input derived from a parameter or body property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IrInput {
    /// The name as written in the API description.
    pub upstream_key: String,
    /// Sanitized, collision-free identifier used in generated code.
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub input_type: InputFieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<Vec<IrChoice>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clean: Option<IrClean>,
}

impl IrInput {
    /// Key of the synthetic input every action starts with.
    pub const CONNECTION_KEY: &'static str = "connection";

    /// The synthetic connection input prepended to every action.
    pub fn connection() -> Self {
        Self {
            upstream_key: Self::CONNECTION_KEY.to_string(),
            key: Self::CONNECTION_KEY.to_string(),
            label: "Connection".to_string(),
            input_type: InputFieldType::Connection,
            required: Some(true),
            comments: None,
            default: None,
            example: None,
            model: None,
            clean: None,
        }
    }
}
