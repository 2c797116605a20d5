use std::collections::HashSet;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use log::debug;

use super::operation::{Operation, PathItem};
use super::parameter::ParameterNode;
use super::request_body::RequestBodyNode;
use super::schema::{Schema, SchemaNode};
use super::security::SecuritySchemeNode;
use super::spec::{Components, OpenApiSpec};
use crate::error::DerefError;

/// Loads a document and inlines its `$ref` pointers.
pub trait Dereferencer {
    fn dereference(&self, path: &Path) -> Result<OpenApiSpec, DerefError>;
}

/// Reads YAML or JSON from the local filesystem and inlines every
/// `#/components/...` pointer. External pointers are left unresolved for the
/// transform stages to reject.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDereferencer;

impl Dereferencer for LocalDereferencer {
    fn dereference(&self, path: &Path) -> Result<OpenApiSpec, DerefError> {
        let content = fs::read_to_string(path).map_err(|source| DerefError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let spec = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => super::from_json(&content)?,
            _ => super::from_yaml(&content)?,
        };

        inline_refs(&spec)
    }
}

/// Return a copy of `spec` with every resolvable local reference inlined.
pub fn inline_refs(spec: &OpenApiSpec) -> Result<OpenApiSpec, DerefError> {
    RefInliner::new(spec).inline_spec(spec)
}

struct RefInliner<'a> {
    components: Option<&'a Components>,
    visited: HashSet<String>,
}

impl<'a> RefInliner<'a> {
    fn new(spec: &'a OpenApiSpec) -> Self {
        Self {
            components: spec.components.as_ref(),
            visited: HashSet::new(),
        }
    }

    fn inline_spec(&mut self, spec: &OpenApiSpec) -> Result<OpenApiSpec, DerefError> {
        let mut resolved = spec.clone();

        for item in resolved.paths.values_mut() {
            self.inline_path_item(item)?;
        }

        if let Some(ref mut components) = resolved.components {
            let mut schemes = IndexMap::new();
            for (name, scheme) in &components.security_schemes {
                schemes.insert(name.clone(), self.inline_security_scheme(scheme)?);
            }
            components.security_schemes = schemes;
        }

        Ok(resolved)
    }

    fn inline_path_item(&mut self, item: &mut PathItem) -> Result<(), DerefError> {
        item.parameters = self.inline_parameters(&item.parameters)?;

        for op in item.operations_mut() {
            self.inline_operation(op)?;
        }
        Ok(())
    }

    fn inline_operation(&mut self, op: &mut Operation) -> Result<(), DerefError> {
        op.parameters = self.inline_parameters(&op.parameters)?;

        if let Some(ref body) = op.request_body {
            op.request_body = Some(self.inline_request_body(body)?);
        }

        Ok(())
    }

    fn inline_parameters(
        &mut self,
        params: &[ParameterNode],
    ) -> Result<Vec<ParameterNode>, DerefError> {
        params.iter().map(|p| self.inline_parameter(p)).collect()
    }

    fn inline_parameter(&mut self, param: &ParameterNode) -> Result<ParameterNode, DerefError> {
        match param {
            ParameterNode::Unresolved { ref_path } => {
                let Some(target) = self.lookup(ref_path, "parameters", |c| &c.parameters)? else {
                    return Ok(param.clone());
                };
                self.follow(ref_path, target, |this, t| this.inline_parameter(t))
            }
            ParameterNode::Resolved(p) => {
                let mut resolved = p.clone();
                if let Some(ref s) = p.schema {
                    resolved.schema = Some(self.inline_schema_node(s)?);
                }
                Ok(ParameterNode::Resolved(resolved))
            }
        }
    }

    fn inline_request_body(
        &mut self,
        body: &RequestBodyNode,
    ) -> Result<RequestBodyNode, DerefError> {
        match body {
            RequestBodyNode::Unresolved { ref_path } => {
                let Some(target) =
                    self.lookup(ref_path, "requestBodies", |c| &c.request_bodies)?
                else {
                    return Ok(body.clone());
                };
                self.follow(ref_path, target, |this, t| this.inline_request_body(t))
            }
            RequestBodyNode::Resolved(rb) => {
                let mut resolved = rb.clone();
                for media in resolved.content.values_mut() {
                    if let Some(ref s) = media.schema {
                        media.schema = Some(self.inline_schema_node(s)?);
                    }
                }
                Ok(RequestBodyNode::Resolved(resolved))
            }
        }
    }

    fn inline_security_scheme(
        &mut self,
        scheme: &SecuritySchemeNode,
    ) -> Result<SecuritySchemeNode, DerefError> {
        match scheme {
            SecuritySchemeNode::Unresolved { ref_path } => {
                let Some(target) =
                    self.lookup(ref_path, "securitySchemes", |c| &c.security_schemes)?
                else {
                    return Ok(scheme.clone());
                };
                self.follow(ref_path, target, |this, t| this.inline_security_scheme(t))
            }
            SecuritySchemeNode::Resolved(_) => Ok(scheme.clone()),
        }
    }

    fn inline_schema_node(&mut self, node: &SchemaNode) -> Result<SchemaNode, DerefError> {
        match node {
            SchemaNode::Unresolved { ref_path } => {
                let Some(target) = self.lookup(ref_path, "schemas", |c| &c.schemas)? else {
                    return Ok(node.clone());
                };
                self.follow(ref_path, target, |this, t| this.inline_schema_node(t))
            }
            SchemaNode::Resolved(schema) => Ok(SchemaNode::Resolved(Box::new(
                self.inline_schema(schema)?,
            ))),
        }
    }

    fn inline_schema(&mut self, schema: &Schema) -> Result<Schema, DerefError> {
        let mut resolved = schema.clone();

        let mut properties = IndexMap::new();
        for (name, prop) in &schema.properties {
            properties.insert(name.clone(), self.inline_schema_node(prop)?);
        }
        resolved.properties = properties;

        if let Some(ref items) = schema.items {
            resolved.items = Some(Box::new(self.inline_schema_node(items)?));
        }

        resolved.all_of = self.inline_schema_list(&schema.all_of)?;
        resolved.one_of = self.inline_schema_list(&schema.one_of)?;
        resolved.any_of = self.inline_schema_list(&schema.any_of)?;

        Ok(resolved)
    }

    fn inline_schema_list(&mut self, nodes: &[SchemaNode]) -> Result<Vec<SchemaNode>, DerefError> {
        nodes.iter().map(|n| self.inline_schema_node(n)).collect()
    }

    /// Inline `target` while guarding against cycles through `ref_path`.
    /// A pointer already on the stack is expanded one level without
    /// descending into it again.
    fn follow<T>(
        &mut self,
        ref_path: &str,
        target: T,
        inline: impl FnOnce(&mut Self, &T) -> Result<T, DerefError>,
    ) -> Result<T, DerefError> {
        if !self.visited.insert(ref_path.to_string()) {
            debug!("cutting circular reference {ref_path} after one level");
            return Ok(target);
        }
        let result = inline(self, &target);
        self.visited.remove(ref_path);
        result
    }

    /// Look up a `#/components/<section>/<name>` pointer. Pointers outside the
    /// components object yield `None` and stay unresolved.
    fn lookup<T: Clone + 'a>(
        &self,
        ref_path: &str,
        section: &str,
        select: impl Fn(&'a Components) -> &'a IndexMap<String, T>,
    ) -> Result<Option<T>, DerefError> {
        let Some(name) = parse_ref_name(ref_path, section)? else {
            debug!("leaving non-local reference {ref_path} unresolved");
            return Ok(None);
        };
        self.components
            .and_then(|c| select(c).get(name))
            .cloned()
            .map(Some)
            .ok_or_else(|| DerefError::RefTargetNotFound(ref_path.to_string()))
    }
}

/// Split `#/components/<section>/<name>` and return `name`. Non-local pointers
/// yield `Ok(None)`; a local pointer into the wrong section is malformed.
fn parse_ref_name<'r>(ref_path: &'r str, expected_section: &str) -> Result<Option<&'r str>, DerefError> {
    let Some(stripped) = ref_path.strip_prefix("#/components/") else {
        return Ok(None);
    };
    let (section, name) = stripped
        .split_once('/')
        .ok_or_else(|| DerefError::InvalidRefFormat(ref_path.to_string()))?;
    if section != expected_section {
        return Err(DerefError::InvalidRefFormat(format!(
            "expected section '{}', got '{}' in {}",
            expected_section, section, ref_path
        )));
    }
    Ok(Some(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ref_name_local() {
        assert_eq!(
            parse_ref_name("#/components/schemas/Pet", "schemas").unwrap(),
            Some("Pet")
        );
    }

    #[test]
    fn parse_ref_name_external_is_left_alone() {
        assert_eq!(
            parse_ref_name("common.yaml#/Pet", "schemas").unwrap(),
            None
        );
    }

    #[test]
    fn parse_ref_name_wrong_section() {
        assert!(matches!(
            parse_ref_name("#/components/parameters/Limit", "schemas"),
            Err(DerefError::InvalidRefFormat(_))
        ));
    }
}
