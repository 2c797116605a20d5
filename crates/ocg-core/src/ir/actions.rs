use indexmap::IndexMap;
use serde::Serialize;

use super::inputs::IrInput;
use super::types::IrDisplay;
pub use crate::parse::operation::HttpMethod;

/// Key of the generic pass-through action every component carries.
pub const RAW_REQUEST_ACTION_KEY: &str = "rawRequest";

/// Maps a sanitized input key back to the name the upstream API expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMapping {
    pub key: String,
    pub upstream_key: String,
}

impl KeyMapping {
    pub fn is_renamed(&self) -> bool {
        self.key != self.upstream_key
    }
}

impl From<&IrInput> for KeyMapping {
    fn from(input: &IrInput) -> Self {
        Self {
            key: input.key.clone(),
            upstream_key: input.upstream_key.clone(),
        }
    }
}

/// A piece of an action's URL template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum UrlPart {
    Literal(String),
    /// Interpolates the input with this sanitized key.
    Input(String),
}

/// What an action's `perform` function does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformPlan {
    pub method: HttpMethod,
    pub url: Vec<UrlPart>,
    /// Present for body-carrying methods; maps body inputs to upstream keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Vec<KeyMapping>>,
    /// Present when the operation has query inputs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Vec<KeyMapping>>,
}

impl PerformPlan {
    /// The URL in string-interpolation form, e.g. `/users/${userId}`.
    pub fn interpolated_url(&self) -> String {
        self.url
            .iter()
            .map(|part| match part {
                UrlPart::Literal(text) => text.clone(),
                UrlPart::Input(key) => format!("${{{key}}}"),
            })
            .collect()
    }

    /// Sanitized keys of every input the plan reads, in URL, query, body order.
    pub fn referenced_keys(&self) -> Vec<&str> {
        let url = self.url.iter().filter_map(|part| match part {
            UrlPart::Input(key) => Some(key.as_str()),
            UrlPart::Literal(_) => None,
        });
        let mappings = self
            .query
            .iter()
            .chain(self.body.iter())
            .flatten()
            .map(|m| m.key.as_str());
        url.chain(mappings).collect()
    }
}

/// One generated action, built from a single (path, method) operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IrAction {
    pub key: String,
    pub group_tag: String,
    pub path: String,
    pub display: IrDisplay,
    /// Keyed by sanitized input key; the connection input always comes first.
    pub inputs: IndexMap<String, IrInput>,
    pub perform: PerformPlan,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_url_parts() {
        let plan = PerformPlan {
            method: HttpMethod::Get,
            url: vec![
                UrlPart::Literal("/users/".to_string()),
                UrlPart::Input("userId".to_string()),
                UrlPart::Literal("/posts".to_string()),
            ],
            body: None,
            query: None,
        };
        assert_eq!(plan.interpolated_url(), "/users/${userId}/posts");
    }
}
