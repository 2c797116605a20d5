use log::{info, warn};

use super::actions::build_action;
use super::connections::build_connections;
use super::inputs::SeenKeys;
use crate::config::DisplayOverrides;
use crate::error::TransformError;
use crate::ir::{
    DEFAULT_ICON_PATH, IrAction, IrComponent, IrConnection, IrDisplay,
    RAW_REQUEST_ACTION_KEY,
};
use crate::parse::spec::OpenApiSpec;

/// Options applied on top of what the document declares.
#[derive(Debug, Clone, Default)]
pub struct AssembleOptions {
    pub display: DisplayOverrides,
    pub base_url: Option<String>,
}

/// Assemble a dereferenced document into the component IR.
pub fn assemble(spec: &OpenApiSpec) -> Result<IrComponent, TransformError> {
    assemble_with_options(spec, &AssembleOptions::default())
}

/// Assemble with explicit display and base URL overrides.
pub fn assemble_with_options(
    spec: &OpenApiSpec,
    options: &AssembleOptions,
) -> Result<IrComponent, TransformError> {
    let base_url = resolve_base_url(spec, options)?;
    let display = resolve_display(spec, &options.display);

    info!("building actions from {} paths", spec.paths.len());
    let actions = build_actions(spec)?;

    let connections = build_all_connections(spec)?;
    info!(
        "assembled {} actions and {} connections",
        actions.len(),
        connections.len()
    );

    Ok(IrComponent {
        base_url,
        display,
        actions,
        connections,
    })
}

/// Configured override, then `basePath`, then the first server.
fn resolve_base_url(
    spec: &OpenApiSpec,
    options: &AssembleOptions,
) -> Result<String, TransformError> {
    options
        .base_url
        .clone()
        .or_else(|| spec.base_path.clone())
        .or_else(|| spec.servers.first().map(|s| s.resolved_url()))
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| {
            TransformError::MissingRequiredField(
                "base URL: the document declares neither basePath nor servers".to_string(),
            )
        })
}

fn resolve_display(spec: &OpenApiSpec, overrides: &DisplayOverrides) -> IrDisplay {
    let title = spec.info.title.trim();
    let label = overrides
        .label
        .clone()
        .unwrap_or_else(|| title.to_string());
    let description = overrides
        .description
        .clone()
        .or_else(|| {
            spec.info
                .description
                .clone()
                .filter(|d| !d.trim().is_empty())
        })
        .unwrap_or_else(|| format!("Interact with the {title} API"));
    IrDisplay {
        icon_path: Some(
            overrides
                .icon_path
                .clone()
                .unwrap_or_else(|| DEFAULT_ICON_PATH.to_string()),
        ),
        ..IrDisplay::new(label, description)
    }
}

/// One action per (path, method), paths in document order and methods in
/// a fixed order within each path. Action keys are unique component-wide.
fn build_actions(spec: &OpenApiSpec) -> Result<Vec<IrAction>, TransformError> {
    let mut actions = Vec::new();
    let mut keys = SeenKeys::empty().reserve(RAW_REQUEST_ACTION_KEY);

    for (path, item) in &spec.paths {
        for (method, op) in item.operations() {
            let (action, claimed) = build_action(path, method, op, &item.parameters, keys)?;
            actions.push(action);
            keys = claimed;
        }
    }

    Ok(actions)
}

fn build_all_connections(spec: &OpenApiSpec) -> Result<Vec<IrConnection>, TransformError> {
    let Some(ref components) = spec.components else {
        return Ok(Vec::new());
    };
    if components.security_schemes.is_empty() {
        warn!("document declares no security schemes; the component has no connections");
    }

    let mut connections = Vec::new();
    for (key, scheme) in &components.security_schemes {
        connections.extend(build_connections(key, scheme)?);
    }
    Ok(connections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::from_yaml;

    const DOC: &str = r#"
openapi: 3.0.3
info:
  title: Pets
  version: "1"
servers:
  - url: https://{env}.pets.dev/v1
    variables:
      env: {default: api}
paths:
  /pets:
    get: {operationId: listPets}
    post: {operationId: createPet}
  /pets/{petId}:
    delete: {operationId: deletePet}
    get: {operationId: getPet}
"#;

    #[test]
    fn actions_follow_path_then_method_order() {
        let ir = assemble(&from_yaml(DOC).unwrap()).unwrap();
        let keys: Vec<&str> = ir.actions.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, ["listPets", "createPet", "getPet", "deletePet"]);
    }

    #[test]
    fn base_url_from_first_server() {
        let ir = assemble(&from_yaml(DOC).unwrap()).unwrap();
        assert_eq!(ir.base_url, "https://api.pets.dev/v1");
    }

    #[test]
    fn base_path_and_override_take_precedence() {
        let mut spec = from_yaml(DOC).unwrap();
        spec.base_path = Some("https://legacy.pets.dev".to_string());
        assert_eq!(assemble(&spec).unwrap().base_url, "https://legacy.pets.dev");

        let options = AssembleOptions {
            base_url: Some("http://localhost:8080".to_string()),
            ..AssembleOptions::default()
        };
        let ir = assemble_with_options(&spec, &options).unwrap();
        assert_eq!(ir.base_url, "http://localhost:8080");
    }

    #[test]
    fn missing_base_url_is_fatal() {
        let mut spec = from_yaml(DOC).unwrap();
        spec.servers.clear();
        let err = assemble(&spec).unwrap_err();
        assert!(matches!(err, TransformError::MissingRequiredField(_)));
    }

    #[test]
    fn display_defaults_and_overrides() {
        let spec = from_yaml(DOC).unwrap();
        let ir = assemble(&spec).unwrap();
        assert_eq!(ir.display.label, "Pets");
        assert_eq!(ir.display.description, "Interact with the Pets API");
        assert_eq!(ir.display.icon_path.as_deref(), Some("icon.png"));

        let options = AssembleOptions {
            display: DisplayOverrides {
                label: Some("Pet Store".to_string()),
                description: None,
                icon_path: Some("pets.png".to_string()),
            },
            base_url: None,
        };
        let ir = assemble_with_options(&spec, &options).unwrap();
        assert_eq!(ir.display.label, "Pet Store");
        assert_eq!(ir.display.icon_path.as_deref(), Some("pets.png"));
    }
}
