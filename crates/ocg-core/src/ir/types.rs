use serde::Serialize;

use super::actions::IrAction;
use super::connections::IrConnection;

/// Icon shipped alongside every generated component.
pub const DEFAULT_ICON_PATH: &str = "icon.png";

/// The assembled integration component, ready for emission.
///
/// Built once by the assembler and consumed once by an emitter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IrComponent {
    pub base_url: String,
    pub display: IrDisplay,
    pub actions: Vec<IrAction>,
    pub connections: Vec<IrConnection>,
}

/// Human-facing label and description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IrDisplay {
    pub label: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<String>,
}

impl IrDisplay {
    pub fn new(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
            icon_path: None,
        }
    }
}
