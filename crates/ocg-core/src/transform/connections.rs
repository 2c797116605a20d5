use indexmap::IndexMap;
use log::debug;

use super::naming::title_case;
use crate::error::TransformError;
use crate::ir::{
    Finalize, InputFieldType, IrConnection, IrConnectionInput, OAuth2Type,
    ORDER_PRIORITY_API_KEY, ORDER_PRIORITY_BASIC, ORDER_PRIORITY_OAUTH2,
};
use crate::parse::security::{
    OAuthFlow, SecurityScheme, SecuritySchemeNode, SecuritySchemeType,
};

/// Build the connections for one security scheme. Every supported scheme
/// currently yields exactly one connection.
pub fn build_connections(
    key: &str,
    node: &SecuritySchemeNode,
) -> Result<Vec<IrConnection>, TransformError> {
    let scheme = match node {
        SecuritySchemeNode::Resolved(scheme) => scheme,
        SecuritySchemeNode::Unresolved { ref_path } => {
            return Err(TransformError::unresolved(
                ref_path,
                format!("security scheme '{key}'"),
            ));
        }
    };

    let connection = if scheme.scheme_type == SecuritySchemeType::ApiKey || scheme.is_http("bearer")
    {
        api_key_connection(key, scheme)
    } else if scheme.is_http("basic") {
        basic_connection(key, scheme)
    } else if scheme.scheme_type == SecuritySchemeType::OAuth2 {
        let flows = scheme.flows.as_ref();
        let flow = flows
            .and_then(|f| f.authorization_code.as_ref())
            .ok_or_else(|| {
                let declared: Vec<&str> = flows
                    .map(|f| f.other.keys().map(String::as_str).collect())
                    .unwrap_or_default();
                TransformError::UnsupportedConstruct(format!(
                    "security scheme '{key}': only the OAuth2 authorizationCode flow is supported (declared: {})",
                    if declared.is_empty() { "none".to_string() } else { declared.join(", ") }
                ))
            })?;
        oauth2_connection(key, scheme, flow)
    } else {
        return Err(TransformError::UnsupportedConstruct(format!(
            "security scheme '{key}': unsupported type {}",
            describe_type(scheme)
        )));
    };

    debug!("built connection {key} (priority {})", connection.order_priority);
    Ok(vec![connection.finalize()])
}

fn describe_type(scheme: &SecurityScheme) -> String {
    match (&scheme.scheme_type, scheme.scheme.as_deref()) {
        (SecuritySchemeType::Http, Some(http)) => format!("http ({http})"),
        (SecuritySchemeType::Http, None) => "http".to_string(),
        (SecuritySchemeType::OpenIdConnect, _) => "openIdConnect".to_string(),
        (SecuritySchemeType::MutualTls, _) => "mutualTLS".to_string(),
        (other, _) => format!("{other:?}"),
    }
}

fn connection(
    key: &str,
    label: String,
    scheme: &SecurityScheme,
    inputs: IndexMap<String, IrConnectionInput>,
    order_priority: u32,
) -> IrConnection {
    IrConnection {
        key: key.to_string(),
        label,
        comments: scheme.description.clone(),
        oauth2_type: None,
        inputs,
        order_priority,
    }
}

fn api_key_connection(key: &str, scheme: &SecurityScheme) -> IrConnection {
    let (label, input_label) = match scheme.name.as_deref() {
        Some(name) if scheme.scheme_type == SecuritySchemeType::ApiKey => {
            (title_case(name), name.to_string())
        }
        _ => ("Token".to_string(), "Token".to_string()),
    };

    let mut inputs = IndexMap::new();
    inputs.insert(
        "apiKey".to_string(),
        IrConnectionInput::new(input_label, InputFieldType::Password).required(true),
    );
    connection(key, label, scheme, inputs, ORDER_PRIORITY_API_KEY)
}

fn basic_connection(key: &str, scheme: &SecurityScheme) -> IrConnection {
    let mut inputs = IndexMap::new();
    inputs.insert(
        "username".to_string(),
        IrConnectionInput::new("Username", InputFieldType::String).required(true),
    );
    inputs.insert(
        "password".to_string(),
        IrConnectionInput::new("Password", InputFieldType::Password).required(true),
    );
    connection(
        key,
        "Basic Authentication".to_string(),
        scheme,
        inputs,
        ORDER_PRIORITY_BASIC,
    )
}

/// URL inputs are pre-filled and hidden when the flow declares them.
fn url_input(label: &str, url: Option<&str>) -> IrConnectionInput {
    let input = IrConnectionInput::new(label, InputFieldType::String).required(true);
    match url {
        Some(url) => input.shown(false).default_value(url),
        None => input.shown(true),
    }
}

fn oauth2_connection(key: &str, scheme: &SecurityScheme, flow: &OAuthFlow) -> IrConnection {
    let mut inputs = IndexMap::new();
    inputs.insert(
        "authorizeUrl".to_string(),
        url_input("Authorize URL", flow.authorization_url.as_deref())
            .comments("The OAuth 2.0 Authorization URL"),
    );
    inputs.insert(
        "tokenUrl".to_string(),
        url_input("Token URL", flow.token_url.as_deref()).comments("The OAuth 2.0 Token URL"),
    );

    let scopes = IrConnectionInput::new("Scopes", InputFieldType::String);
    let scopes = if flow.scopes.is_empty() {
        scopes.required(false).shown(false).default_value("")
    } else {
        let names: Vec<&str> = flow.scopes.keys().map(String::as_str).collect();
        scopes
            .required(true)
            .shown(true)
            .default_value(names.join(" "))
            .comments("Space separated OAuth 2.0 permission scopes")
    };
    inputs.insert("scopes".to_string(), scopes);

    inputs.insert(
        "clientId".to_string(),
        IrConnectionInput::new("Client ID", InputFieldType::String)
            .required(true)
            .shown(true),
    );
    inputs.insert(
        "clientSecret".to_string(),
        IrConnectionInput::new("Client Secret", InputFieldType::Password)
            .required(true)
            .shown(true),
    );

    IrConnection {
        oauth2_type: Some(OAuth2Type::AuthorizationCode),
        ..connection(
            key,
            "OAuth 2.0".to_string(),
            scheme,
            inputs,
            ORDER_PRIORITY_OAUTH2,
        )
    }
}
