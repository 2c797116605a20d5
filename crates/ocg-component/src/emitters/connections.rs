use ocg_core::ir::{IrComponent, IrConnection, IrConnectionInput};
use ocg_core::transform::SeenKeys;

use super::SPECTRAL;
use crate::source::{SourceFile, TsConst, TsExpr, TsImport};

/// Top-level names of `connections.ts` and `client.ts`, both of which bind
/// every connection.
const RESERVED_BINDINGS: [&str; 10] = [
    "oauth2Connection",
    "OAuth2Type",
    "Connection",
    "ConnectionError",
    "util",
    "createHttpClient",
    "baseUrl",
    "connectionKeys",
    "toAuthorizationHeaders",
    "createClient",
];

/// Connections paired with their exported binding names, ordered by
/// priority. Ties keep document order.
pub fn connection_bindings(ir: &IrComponent) -> Vec<(String, &IrConnection)> {
    let mut taken = RESERVED_BINDINGS
        .into_iter()
        .fold(SeenKeys::new(), SeenKeys::reserve);
    let mut bindings = Vec::with_capacity(ir.connections.len());
    for connection in &ir.connections {
        let (name, claimed) = taken.claim(&connection.key);
        taken = claimed;
        bindings.push((name, connection));
    }
    bindings.sort_by_key(|(_, connection)| connection.order_priority);
    bindings
}

/// Emit `src/connections.ts`.
pub fn emit_connections(ir: &IrComponent) -> String {
    let bindings = connection_bindings(ir);

    let has_oauth2 = bindings.iter().any(|(_, c)| c.oauth2_type.is_some());
    let has_plain = bindings.iter().any(|(_, c)| c.oauth2_type.is_none());
    let mut names = Vec::new();
    if has_plain {
        names.push("connection");
    }
    if has_oauth2 {
        names.extend(["oauth2Connection", "OAuth2Type"]);
    }

    let mut file = SourceFile::default();
    if !names.is_empty() {
        file.imports.push(TsImport::named(&names, SPECTRAL));
    }
    for (name, connection) in &bindings {
        file.declarations.push(TsConst {
            exported: true,
            name: name.clone(),
            value: connection_expr(connection),
        });
    }
    file.default_export = Some(TsExpr::Array(
        bindings
            .iter()
            .map(|(name, _)| TsExpr::ident(name))
            .collect(),
    ));

    file.render()
}

fn connection_expr(connection: &IrConnection) -> TsExpr {
    let description = connection
        .comments
        .clone()
        .unwrap_or_else(|| connection.label.clone());

    let mut props = vec![
        ("key".to_string(), TsExpr::str(&connection.key)),
        (
            "display".to_string(),
            TsExpr::object([
                ("label".to_string(), TsExpr::str(&connection.label)),
                ("description".to_string(), TsExpr::str(description)),
            ]),
        ),
    ];
    if let Some(oauth2_type) = connection.oauth2_type {
        props.push((
            "oauth2Type".to_string(),
            TsExpr::ident("OAuth2Type").member(oauth2_type.as_str()),
        ));
    }
    props.push((
        "inputs".to_string(),
        TsExpr::object(
            connection
                .inputs
                .iter()
                .map(|(key, input)| (key.clone(), connection_input_expr(input))),
        ),
    ));

    let factory = if connection.oauth2_type.is_some() {
        "oauth2Connection"
    } else {
        "connection"
    };
    TsExpr::call(factory, vec![TsExpr::object(props)])
}

fn connection_input_expr(input: &IrConnectionInput) -> TsExpr {
    let mut props = vec![
        ("label".to_string(), TsExpr::str(&input.label)),
        ("type".to_string(), TsExpr::str(input.input_type.as_str())),
    ];
    if let Some(required) = input.required {
        props.push(("required".to_string(), TsExpr::Bool(required)));
    }
    if let Some(shown) = input.shown {
        props.push(("shown".to_string(), TsExpr::Bool(shown)));
    }
    if let Some(ref default) = input.default {
        props.push(("default".to_string(), TsExpr::str(default)));
    }
    if let Some(ref comments) = input.comments {
        props.push(("comments".to_string(), TsExpr::str(comments)));
    }
    if let Some(ref example) = input.example {
        props.push(("example".to_string(), TsExpr::str(example)));
    }
    TsExpr::object(props)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use ocg_core::ir::{IrDisplay, OAuth2Type};

    fn connection(key: &str, priority: u32, oauth2: bool) -> IrConnection {
        IrConnection {
            key: key.to_string(),
            label: key.to_string(),
            comments: None,
            oauth2_type: oauth2.then_some(OAuth2Type::AuthorizationCode),
            inputs: IndexMap::new(),
            order_priority: priority,
        }
    }

    fn component(connections: Vec<IrConnection>) -> IrComponent {
        IrComponent {
            base_url: "https://example.com".to_string(),
            display: IrDisplay::new("Example", "Example"),
            actions: vec![],
            connections,
        }
    }

    #[test]
    fn orders_by_priority_then_document_order() {
        let ir = component(vec![
            connection("basic", 1000, false),
            connection("keyA", 50, false),
            connection("oauth", 0, true),
            connection("keyB", 50, false),
        ]);
        let names: Vec<String> = connection_bindings(&ir)
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, ["oauth", "keyA", "keyB", "basic"]);

        let content = emit_connections(&ir);
        assert!(content.ends_with("export default [oauth, keyA, keyB, basic];\n"));
        assert!(content.starts_with(
            "import { connection, oauth2Connection, OAuth2Type } from \"@prismatic-io/spectral\";"
        ));
        assert!(content.contains("oauth2Type: OAuth2Type.AuthorizationCode,"));
    }

    #[test]
    fn binding_names_avoid_imports() {
        let ir = component(vec![
            connection("connection", 50, false),
            connection("basic-auth", 1000, false),
        ]);
        let names: Vec<String> = connection_bindings(&ir)
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, ["otherConnection", "basicAuth"]);

        let content = emit_connections(&ir);
        assert!(content.contains("export const otherConnection = connection({\n  key: \"connection\","));
        assert!(!content.contains("oauth2Connection"));
    }

    #[test]
    fn binding_names_avoid_client_module_names() {
        let ir = component(vec![
            connection("util", 50, false),
            connection("baseUrl", 50, false),
            connection("createClient", 50, false),
        ]);
        let names: Vec<String> = connection_bindings(&ir)
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, ["otherUtil", "otherBaseUrl", "otherCreateClient"]);
    }

    #[test]
    fn empty_component_exports_empty_list() {
        assert_eq!(emit_connections(&component(vec![])), "export default [];\n");
    }
}
