use indexmap::IndexMap;
use log::{debug, warn};

use super::inputs::{DerivedInputs, SeenKeys, derive_inputs, merge_parameters};
use super::naming::{title_case, to_group_tag};
use crate::error::TransformError;
use crate::ir::{
    Finalize, HttpMethod, IrAction, IrDisplay, IrInput, KeyMapping, PerformPlan, UrlPart,
};
use crate::parse::operation::Operation;
use crate::parse::parameter::ParameterNode;

/// Build the action for one (path, method) operation.
///
/// `shared` holds the path item's parameters; operation parameters of the
/// same name replace them. `action_keys` holds the keys of actions built so
/// far and is handed back with this action's key claimed.
pub fn build_action(
    path: &str,
    method: HttpMethod,
    operation: &Operation,
    shared: &[ParameterNode],
    action_keys: SeenKeys,
) -> Result<(IrAction, SeenKeys), TransformError> {
    let (key, action_keys) = action_keys.claim(&key_source(path, method, operation)?);

    let params = merge_parameters(shared, &operation.parameters)?;
    let (derived, _) = derive_inputs(&params, operation.request_body.as_ref(), SeenKeys::new())?;

    let perform = perform_plan(path, method, &derived);

    let mut inputs = IndexMap::new();
    inputs.insert(IrInput::CONNECTION_KEY.to_string(), IrInput::connection());
    for input in derived.iter() {
        inputs.insert(input.key.clone(), input.clone());
    }

    let label = operation
        .summary
        .clone()
        .unwrap_or_else(|| title_case(&key));
    let description = operation
        .description
        .clone()
        .or_else(|| operation.summary.clone())
        .unwrap_or_else(|| label.clone());

    debug!("built action {key} for {} {path}", method.as_str().to_uppercase());

    let action = IrAction {
        key,
        group_tag: to_group_tag(path),
        path: path.to_string(),
        display: IrDisplay::new(label, description),
        inputs,
        perform,
    };
    Ok((action.finalize(), action_keys))
}

/// The `operationId`, or `"<method> <path>"` when it has none.
fn key_source(
    path: &str,
    method: HttpMethod,
    operation: &Operation,
) -> Result<String, TransformError> {
    let has_word = |s: &str| s.chars().any(|c| c.is_ascii_alphanumeric());
    let source = match operation.operation_id.as_deref() {
        Some(id) if has_word(id) => id.to_string(),
        _ => format!("{} {path}", method.as_str()),
    };
    if !has_word(&source) {
        return Err(TransformError::MissingRequiredField(format!(
            "cannot derive an action key for {} {path}",
            method.as_str().to_uppercase()
        )));
    }
    Ok(source)
}

fn perform_plan(path: &str, method: HttpMethod, derived: &DerivedInputs) -> PerformPlan {
    let mappings = |inputs: &[IrInput]| inputs.iter().map(KeyMapping::from).collect::<Vec<_>>();

    PerformPlan {
        method,
        url: url_parts(path, &derived.path),
        body: method.has_body().then(|| mappings(&derived.body)),
        query: (!derived.query.is_empty()).then(|| mappings(&derived.query)),
    }
}

/// Split a path template into literal text and input placeholders.
/// Placeholders without a matching path input are kept as literal text.
fn url_parts(path: &str, path_inputs: &[IrInput]) -> Vec<UrlPart> {
    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut rest = path;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}').map(|i| open + i) else {
            break;
        };
        literal.push_str(&rest[..open]);
        let name = &rest[open + 1..close];
        match path_inputs.iter().find(|i| i.upstream_key == name) {
            Some(input) => {
                if !literal.is_empty() {
                    parts.push(UrlPart::Literal(std::mem::take(&mut literal)));
                }
                parts.push(UrlPart::Input(input.key.clone()));
            }
            None => {
                warn!("path placeholder {{{name}}} in {path} has no matching path parameter");
                literal.push_str(&rest[open..=close]);
            }
        }
        rest = &rest[close + 1..];
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        parts.push(UrlPart::Literal(literal));
    }
    parts
}
