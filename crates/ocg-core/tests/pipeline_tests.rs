use std::path::PathBuf;

use ocg_core::error::TransformError;
use ocg_core::ir::{CleanFn, HttpMethod, InputFieldType, IrComponent, OAuth2Type, group_actions};
use ocg_core::parse;
use ocg_core::transform;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn petstore() -> IrComponent {
    ocg_core::read(&fixture("petstore.yaml")).unwrap()
}

#[test]
fn petstore_component_metadata() {
    let ir = petstore();
    assert_eq!(ir.base_url, "https://api.petstore.dev/v1");
    assert_eq!(ir.display.label, "Pet Store");
    assert_eq!(ir.display.description, "Manage pets and their owners.");
    assert_eq!(ir.display.icon_path.as_deref(), Some("icon.png"));
}

#[test]
fn petstore_actions_in_document_order() {
    let ir = petstore();
    let keys: Vec<&str> = ir.actions.iter().map(|a| a.key.as_str()).collect();
    assert_eq!(
        keys,
        [
            "getUser",
            "deleteUser",
            "listPets",
            "createPet",
            "updatePet",
            "post2FaVerify",
            "defaultValue",
        ]
    );

    let groups: Vec<(String, usize)> = group_actions(&ir)
        .into_iter()
        .map(|g| (g.tag, g.actions.len()))
        .collect();
    assert_eq!(
        groups,
        [
            ("users".to_string(), 2),
            ("pets".to_string(), 3),
            ("twoFa".to_string(), 1),
            ("root".to_string(), 1),
        ]
    );
}

#[test]
fn operation_parameters_override_shared_ones() {
    let ir = petstore();
    let get_user = &ir.actions[0];
    let keys: Vec<&str> = get_user.inputs.keys().map(String::as_str).collect();
    assert_eq!(keys, ["connection", "userId", "verbose"]);
    assert_eq!(
        get_user.inputs["userId"].comments.as_deref(),
        Some("The user to fetch")
    );

    let delete_user = &ir.actions[1];
    assert_eq!(
        delete_user.inputs["userId"].comments.as_deref(),
        Some("Shared user id")
    );
    assert_eq!(delete_user.perform.method, HttpMethod::Delete);
    assert_eq!(delete_user.perform.body, None);
}

#[test]
fn query_inputs_from_referenced_schemas() {
    let ir = petstore();
    let list_pets = &ir.actions[2];
    let keys: Vec<&str> = list_pets.inputs.keys().map(String::as_str).collect();
    assert_eq!(keys, ["connection", "limit", "status"]);

    let limit = &list_pets.inputs["limit"];
    assert_eq!(limit.default.as_deref(), Some("20"));
    assert_eq!(limit.clean.map(|c| c.function), Some(CleanFn::ToNumber));

    let status = &list_pets.inputs["status"];
    let values: Vec<&str> = status
        .model
        .iter()
        .flatten()
        .map(|c| c.value.as_str())
        .collect();
    assert_eq!(values, ["available", "pending", "sold"]);

    let query = list_pets.perform.query.as_ref().unwrap();
    assert_eq!(query.len(), 2);
}

#[test]
fn referenced_request_body_with_cycle() {
    let ir = petstore();
    let create_pet = &ir.actions[3];
    let keys: Vec<&str> = create_pet.inputs.keys().map(String::as_str).collect();
    assert_eq!(keys, ["connection", "name", "status", "owner"]);
    assert_eq!(create_pet.inputs["name"].required, Some(true));
    assert_eq!(create_pet.inputs["name"].example.as_deref(), Some("Rex"));
    assert_eq!(create_pet.inputs["status"].required, Some(false));

    let body = create_pet.perform.body.as_ref().unwrap();
    assert!(body.iter().all(|m| !m.is_renamed()));
}

#[test]
fn body_input_loses_collision_to_path_input() {
    let ir = petstore();
    let update_pet = &ir.actions[4];
    let keys: Vec<&str> = update_pet.inputs.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        ["connection", "petId", "name", "status", "owner", "otherPetId"]
    );
    assert_eq!(update_pet.inputs["petId"].upstream_key, "petId");
    assert_eq!(update_pet.inputs["otherPetId"].upstream_key, "pet_id");
    assert_eq!(
        update_pet.inputs["otherPetId"].comments.as_deref(),
        Some("Replacement id")
    );
    assert_eq!(update_pet.perform.interpolated_url(), "/pets/${petId}");

    let renamed: Vec<(&str, &str)> = update_pet
        .perform
        .body
        .iter()
        .flatten()
        .filter(|m| m.is_renamed())
        .map(|m| (m.key.as_str(), m.upstream_key.as_str()))
        .collect();
    assert_eq!(renamed, [("otherPetId", "pet_id")]);
}

#[test]
fn synthesized_keys_and_reserved_operation_ids() {
    let ir = petstore();
    let verify = &ir.actions[5];
    assert_eq!(verify.group_tag, "twoFa");
    assert_eq!(verify.display.label, "Verify a code");
    assert_eq!(verify.inputs["code"].required, Some(true));

    let root = &ir.actions[6];
    assert_eq!(root.key, "defaultValue");
    assert_eq!(root.group_tag, "root");
    assert_eq!(root.perform.interpolated_url(), "/");
}

#[test]
fn petstore_connections() {
    let ir = petstore();
    let keys: Vec<(&str, u32)> = ir
        .connections
        .iter()
        .map(|c| (c.key.as_str(), c.order_priority))
        .collect();
    assert_eq!(keys, [("basicAuth", 1000), ("apiKeyAuth", 50), ("oauth", 0)]);

    let api_key = &ir.connections[1];
    let input = &api_key.inputs["apiKey"];
    assert_eq!(input.label, "X-Api-Key");
    assert_eq!(input.input_type, InputFieldType::Password);
    assert_eq!(input.required, Some(true));

    let oauth = &ir.connections[2];
    assert_eq!(oauth.oauth2_type, Some(OAuth2Type::AuthorizationCode));
    assert_eq!(oauth.comments.as_deref(), Some("Sign in with Pet Store"));
    let scopes = &oauth.inputs["scopes"];
    assert_eq!(scopes.shown, Some(false));
    assert_eq!(scopes.default.as_deref(), Some(""));
    assert_eq!(
        oauth.inputs["tokenUrl"].default.as_deref(),
        Some("https://petstore.dev/oauth/token")
    );
}

#[test]
fn get_user_scenario() {
    let spec = parse::from_yaml(
        r#"
openapi: 3.1.0
info: {title: Users, version: "1"}
servers: [{url: "https://users.example.com"}]
paths:
  /users/{userId}:
    get:
      operationId: getUser
      parameters:
        - {name: userId, in: path, required: true, schema: {type: string}}
"#,
    )
    .unwrap();
    let ir = transform::assemble(&spec).unwrap();
    let action = &ir.actions[0];

    assert_eq!(action.key, "getUser");
    assert_eq!(action.group_tag, "users");
    let keys: Vec<&str> = action.inputs.keys().map(String::as_str).collect();
    assert_eq!(keys, ["connection", "userId"]);
    assert_eq!(action.perform.interpolated_url(), "/users/${userId}");
    assert_eq!(action.perform.body, None);
    assert_eq!(action.perform.query, None);
}

#[test]
fn client_credentials_only_is_rejected() {
    let err = ocg_core::read(&fixture("unsupported-oauth.yaml")).unwrap_err();
    assert!(matches!(err, TransformError::UnsupportedConstruct(_)));
    assert!(err.to_string().contains("machineAuth"));
}

#[test]
fn external_reference_is_fatal() {
    let err = ocg_core::read(&fixture("external-ref.json")).unwrap_err();
    match err {
        TransformError::UnresolvedReference { reference, .. } => {
            assert_eq!(reference, "shared.yaml#/components/schemas/Thing");
        }
        other => panic!("expected an unresolved reference, got {other}"),
    }
}

#[test]
fn external_reference_below_items_is_fatal() {
    let spec = parse::from_yaml(
        r##"
openapi: 3.0.3
info: {title: Tags, version: "1"}
servers: [{url: "https://tags.example.com"}]
paths:
  /tags:
    post:
      operationId: createTags
      requestBody:
        content:
          application/json:
            schema:
              properties:
                tags:
                  type: array
                  items: {$ref: "#/components/schemas/TagList"}
components:
  schemas:
    TagList:
      type: array
      items: {$ref: "shared.yaml#/Tag"}
"##,
    )
    .unwrap();
    let spec = parse::deref::inline_refs(&spec).unwrap();
    let err = transform::assemble(&spec).unwrap_err();
    assert!(matches!(
        err,
        TransformError::UnresolvedReference { ref reference, .. } if reference == "shared.yaml#/Tag"
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = ocg_core::read(&fixture("missing.yaml")).unwrap_err();
    assert!(matches!(
        err,
        TransformError::Deref(ocg_core::error::DerefError::Io { .. })
    ));
}

#[test]
fn assembly_is_deterministic() {
    let first = serde_json::to_string(&petstore()).unwrap();
    let second = serde_json::to_string(&petstore()).unwrap();
    assert_eq!(first, second);
}
