pub mod deref;
pub mod operation;
pub mod parameter;
pub mod request_body;
pub mod schema;
pub mod security;
pub mod server;
pub mod spec;

use crate::error::ParseError;
use spec::OpenApiSpec;

/// Parse an OpenAPI document from YAML.
pub fn from_yaml(input: &str) -> Result<OpenApiSpec, ParseError> {
    let spec: OpenApiSpec = serde_yaml_ng::from_str(input)?;
    validate_version(&spec)?;
    Ok(spec)
}

/// Parse an OpenAPI document from JSON.
pub fn from_json(input: &str) -> Result<OpenApiSpec, ParseError> {
    let spec: OpenApiSpec = serde_json::from_str(input)?;
    validate_version(&spec)?;
    Ok(spec)
}

/// Parse an OpenAPI document, picking JSON when the text opens with `{`.
pub fn from_str_auto(input: &str) -> Result<OpenApiSpec, ParseError> {
    if input.trim_start().starts_with('{') {
        from_json(input)
    } else {
        from_yaml(input)
    }
}

fn validate_version(spec: &OpenApiSpec) -> Result<(), ParseError> {
    if !spec.openapi.starts_with("3.") {
        return Err(ParseError::UnsupportedVersion(spec.openapi.clone()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = "openapi: 3.1.0\ninfo:\n  title: Minimal\n  version: '1'\npaths: {}\n";

    #[test]
    fn detects_json_and_yaml() {
        let yaml = from_str_auto(MINIMAL).unwrap();
        let json = from_str_auto(r#"{"openapi":"3.0.3","info":{"title":"Minimal","version":"1"}}"#)
            .unwrap();
        assert_eq!(yaml.info.title, json.info.title);
    }

    #[test]
    fn rejects_swagger_two() {
        let err = from_yaml("openapi: 2.0.0\ninfo:\n  title: Old\n").unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedVersion(v) if v == "2.0.0"));
    }
}
