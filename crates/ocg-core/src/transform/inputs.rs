use std::collections::BTreeSet;

use indexmap::IndexMap;
use log::warn;

use super::naming::{clean_identifier, title_case};
use crate::error::TransformError;
use crate::ir::{CleanFn, Finalize, InputFieldType, IrChoice, IrClean, IrInput};
use crate::parse::parameter::{Parameter, ParameterLocation, ParameterNode};
use crate::parse::request_body::{JSON_CONTENT_TYPE, RequestBodyNode};
use crate::parse::schema::{Schema, SchemaNode, SchemaType};

/// Sanitized keys already taken within one operation.
///
/// Threaded through derivation by value: every claim consumes the set and
/// hands back the extended one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenKeys(BTreeSet<String>);

impl Default for SeenKeys {
    fn default() -> Self {
        Self(BTreeSet::from([IrInput::CONNECTION_KEY.to_string()]))
    }
}

impl SeenKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set with nothing taken.
    pub fn empty() -> Self {
        Self(BTreeSet::new())
    }

    /// Mark `key` as taken verbatim.
    pub fn reserve(mut self, key: &str) -> Self {
        self.0.insert(key.to_string());
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    /// Assign a collision-free key for `upstream_key`. A taken key is
    /// re-derived from `"other " + upstream_key`, repeatedly if needed.
    pub fn claim(mut self, upstream_key: &str) -> (String, Self) {
        let mut source = upstream_key.to_string();
        let mut key = clean_identifier(&source);
        while self.contains(&key) {
            source = format!("other {source}");
            key = clean_identifier(&source);
        }
        self.0.insert(key.clone());
        (key, self)
    }
}

/// Inputs of one operation, by location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedInputs {
    pub path: Vec<IrInput>,
    pub query: Vec<IrInput>,
    pub body: Vec<IrInput>,
}

impl DerivedInputs {
    /// All inputs in path, query, body order.
    pub fn iter(&self) -> impl Iterator<Item = &IrInput> {
        self.path.iter().chain(&self.query).chain(&self.body)
    }
}

/// Merge path-item parameters into an operation's own. Operation entries come
/// first and win over shared entries of the same name.
///
/// Entries are matched on `name` alone, regardless of `in`.
pub fn merge_parameters(
    shared: &[ParameterNode],
    own: &[ParameterNode],
) -> Result<Vec<Parameter>, TransformError> {
    let mut merged: IndexMap<String, Parameter> = IndexMap::new();
    for node in own.iter().chain(shared) {
        let param = node
            .as_resolved()
            .map_err(|r| TransformError::unresolved(r, "parameters"))?;
        if !merged.contains_key(&param.name) {
            merged.insert(param.name.clone(), param.clone());
        }
    }
    Ok(merged.into_values().collect())
}

/// Derive path, query and body inputs for one operation.
///
/// Keys are claimed path first, then query, then body, so later inputs lose
/// collisions to earlier ones.
pub fn derive_inputs(
    params: &[Parameter],
    body: Option<&RequestBodyNode>,
    seen: SeenKeys,
) -> Result<(DerivedInputs, SeenKeys), TransformError> {
    let mut derived = DerivedInputs::default();

    let path_params = params.iter().filter(|p| p.location == ParameterLocation::Path);
    let (path, seen) = fold_parameters(path_params, seen)?;
    derived.path = path;

    let query_params = params.iter().filter(|p| p.location == ParameterLocation::Query);
    let (query, seen) = fold_parameters(query_params, seen)?;
    derived.query = query;

    for param in params {
        if matches!(
            param.location,
            ParameterLocation::Header | ParameterLocation::Cookie
        ) {
            warn!(
                "ignoring {:?} parameter '{}'",
                param.location, param.name
            );
        }
    }

    let (body, seen) = match body {
        Some(node) => derive_body_inputs(node, seen)?,
        None => (Vec::new(), seen),
    };
    derived.body = body;

    Ok((derived, seen))
}

fn fold_parameters<'p>(
    mut params: impl Iterator<Item = &'p Parameter>,
    seen: SeenKeys,
) -> Result<(Vec<IrInput>, SeenKeys), TransformError> {
    params.try_fold((Vec::new(), seen), |(mut inputs, seen), param| {
        let (input, seen) = input_from_parameter(param, seen)?;
        inputs.push(input);
        Ok((inputs, seen))
    })
}

fn input_from_parameter(
    param: &Parameter,
    seen: SeenKeys,
) -> Result<(IrInput, SeenKeys), TransformError> {
    let untyped = Schema::default();
    let schema = match param.schema {
        Some(ref node) => node
            .as_resolved()
            .map_err(|r| TransformError::unresolved(r, format!("parameter '{}'", param.name)))?,
        None => &untyped,
    };
    ensure_resolved(schema, &format!("parameter '{}'", param.name))?;
    let required = param
        .required
        .unwrap_or(param.location == ParameterLocation::Path);

    let (key, seen) = seen.claim(&param.name);
    let mut input = input_from_schema(&param.name, key, schema, required)?;
    if param.description.is_some() {
        input.comments = param.description.clone();
    }
    if let Some(ref example) = param.example {
        input.example = display_value(example);
    }
    Ok((input.finalize(), seen))
}

/// Derive inputs from the JSON request body's top-level properties, merged
/// with the properties of every `allOf` member. Read-only properties are
/// skipped.
pub fn derive_body_inputs(
    node: &RequestBodyNode,
    seen: SeenKeys,
) -> Result<(Vec<IrInput>, SeenKeys), TransformError> {
    let body = node
        .as_resolved()
        .map_err(|r| TransformError::unresolved(r, "requestBody"))?;

    let Some(media) = body.json() else {
        if !body.content.is_empty() {
            let types: Vec<&str> = body.content.keys().map(String::as_str).collect();
            warn!(
                "no {JSON_CONTENT_TYPE} request body (found {}), skipping body inputs",
                types.join(", ")
            );
        }
        return Ok((Vec::new(), seen));
    };
    let Some(ref schema_node) = media.schema else {
        return Ok((Vec::new(), seen));
    };
    let schema = resolved(schema_node, "requestBody schema")?;

    let mut properties: IndexMap<&str, &SchemaNode> = schema
        .properties
        .iter()
        .map(|(name, node)| (name.as_str(), node))
        .collect();
    let mut required: BTreeSet<&str> = schema.required.iter().map(String::as_str).collect();
    for member in &schema.all_of {
        let member = resolved(member, "requestBody allOf")?;
        for (name, node) in &member.properties {
            properties.insert(name.as_str(), node);
        }
        required.extend(member.required.iter().map(String::as_str));
    }

    let derived = properties
        .into_iter()
        .try_fold((Vec::new(), seen), |(mut inputs, seen), (name, node)| {
            let property = resolved(node, &format!("requestBody property '{name}'"))?;
            if property.is_read_only() {
                return Ok::<_, TransformError>((inputs, seen));
            }
            let (key, seen) = seen.claim(name);
            let input = input_from_schema(name, key, property, required.contains(name))?;
            inputs.push(input.finalize());
            Ok((inputs, seen))
        })?;
    ensure_resolved(schema, "requestBody schema")?;
    Ok(derived)
}

/// Pointer prefix of the references a circular-schema cut leaves in place.
const LOCAL_SCHEMA_PREFIX: &str = "#/components/schemas/";

/// Fail on any reference nested anywhere below `schema`, except the local
/// schema pointers left behind where a cycle was cut.
fn ensure_resolved(schema: &Schema, location: &str) -> Result<(), TransformError> {
    let children = schema
        .properties
        .values()
        .chain(schema.items.as_deref())
        .chain(&schema.all_of)
        .chain(&schema.one_of)
        .chain(&schema.any_of);
    for child in children {
        match child {
            SchemaNode::Resolved(nested) => ensure_resolved(nested, location)?,
            SchemaNode::Unresolved { ref_path } if ref_path.starts_with(LOCAL_SCHEMA_PREFIX) => {}
            SchemaNode::Unresolved { ref_path } => {
                return Err(TransformError::unresolved(ref_path, location));
            }
        }
    }
    Ok(())
}

fn resolved<'s>(node: &'s SchemaNode, location: &str) -> Result<&'s Schema, TransformError> {
    node.as_resolved()
        .map_err(|r| TransformError::unresolved(r, location))
}

fn input_from_schema(
    upstream_key: &str,
    key: String,
    schema: &Schema,
    required: bool,
) -> Result<IrInput, TransformError> {
    let (input_type, clean) = field_type(schema.primary_type());
    Ok(IrInput {
        upstream_key: upstream_key.to_string(),
        key,
        label: schema
            .title
            .clone()
            .unwrap_or_else(|| title_case(upstream_key)),
        input_type,
        required: Some(required),
        comments: schema.description.clone(),
        default: schema.default_value.as_ref().and_then(display_value),
        example: schema.example.as_ref().and_then(display_value),
        model: choices(upstream_key, schema)?,
        clean: Some(clean),
    })
}

/// Map an upstream schema type to its input type and clean function.
/// Anything that is not a number or boolean is treated as a string.
pub fn field_type(schema_type: Option<&SchemaType>) -> (InputFieldType, IrClean) {
    match schema_type {
        Some(SchemaType::Integer | SchemaType::Number) => (
            InputFieldType::String,
            IrClean {
                function: CleanFn::ToNumber,
                coalesce_falsy: false,
            },
        ),
        Some(SchemaType::Boolean) => (
            InputFieldType::Boolean,
            IrClean {
                function: CleanFn::ToBool,
                coalesce_falsy: false,
            },
        ),
        _ => (
            InputFieldType::String,
            IrClean {
                function: CleanFn::ToString,
                coalesce_falsy: true,
            },
        ),
    }
}

/// Choices for an enumerated schema. Boolean schemas never get choices; an
/// enum nested as the first `allOf` member is unwrapped one level.
fn choices(upstream_key: &str, schema: &Schema) -> Result<Option<Vec<IrChoice>>, TransformError> {
    if schema.primary_type() == Some(&SchemaType::Boolean) {
        return Ok(None);
    }
    if !schema.enum_values.is_empty() {
        return Ok(Some(enum_choices(&schema.enum_values)));
    }
    if let Some(first) = schema.all_of.first() {
        let nested = resolved(first, &format!("allOf of '{upstream_key}'"))?;
        if !nested.enum_values.is_empty() && nested.primary_type() != Some(&SchemaType::Boolean) {
            return Ok(Some(enum_choices(&nested.enum_values)));
        }
    }
    Ok(None)
}

fn enum_choices(values: &[serde_json::Value]) -> Vec<IrChoice> {
    values
        .iter()
        .filter_map(display_value)
        .map(|value| IrChoice {
            label: title_case(&value),
            value,
        })
        .collect()
}

/// Render a JSON value for display: strings bare, `null` as absent, anything
/// else as compact JSON.
pub fn display_value(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
