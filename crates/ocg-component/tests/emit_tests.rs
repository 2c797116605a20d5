use std::fs;
use std::path::PathBuf;

use ocg_component::{ComponentConfig, ComponentGenerator, write, write_files};
use ocg_core::ir::IrComponent;
use ocg_core::{CodeGenerator, GeneratedFile, parse, transform};

const USERS: &str = r#"
openapi: 3.1.0
info:
  title: Users
  version: "1"
servers:
  - url: https://users.example.com
paths:
  /users/{userId}:
    get:
      operationId: getUser
      parameters:
        - name: userId
          in: path
          required: true
          schema:
            type: string
components:
  securitySchemes:
    apiKeyAuth:
      type: apiKey
      name: X-Api-Key
      in: header
"#;

fn users() -> IrComponent {
    transform::assemble(&parse::from_yaml(USERS).unwrap()).unwrap()
}

fn petstore() -> IrComponent {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../ocg-core/tests/fixtures/petstore.yaml");
    ocg_core::read(&path).unwrap()
}

fn generate(ir: &IrComponent, key: &str) -> Vec<GeneratedFile> {
    let config = ComponentConfig {
        key: key.to_string(),
    };
    ComponentGenerator.generate(ir, &config).unwrap()
}

fn content<'a>(files: &'a [GeneratedFile], path: &str) -> &'a str {
    files
        .iter()
        .find(|f| f.path == path)
        .map(|f| f.content.as_str())
        .unwrap_or_else(|| panic!("{path} was not generated"))
}

#[test]
fn petstore_file_set() {
    let files = generate(&petstore(), "pet-store");
    let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(
        paths,
        [
            "src/actions/index.ts",
            "src/actions/pets.ts",
            "src/actions/root.ts",
            "src/actions/twoFa.ts",
            "src/actions/users.ts",
            "src/client.ts",
            "src/connections.ts",
            "src/index.ts",
        ]
    );
}

#[test]
fn generation_is_deterministic() {
    let ir = petstore();
    assert_eq!(generate(&ir, "pet-store"), generate(&ir, "pet-store"));
    assert_eq!(generate(&ir, "pet-store"), generate(&petstore(), "pet-store"));
}

#[test]
fn users_group_module() {
    let files = generate(&users(), "users");
    insta::assert_snapshot!(content(&files, "src/actions/users.ts"), @r#"
    import { action, input, util } from "@prismatic-io/spectral";
    import { createClient } from "../client";

    const getUser = action({
      display: {
        label: "Get User",
        description: "Get User",
      },
      inputs: {
        connection: input({
          label: "Connection",
          type: "connection",
          required: true,
        }),
        userId: input({
          label: "User Id",
          type: "string",
          required: true,
          clean: (value) => util.types.toString(value) || undefined,
        }),
      },
      perform: async (context, { connection, userId }) => {
        const client = createClient(connection);
        const { data } = await client.get(`/users/${userId}`);
        return {
          data,
        };
      },
    });

    export default {
      getUser,
    };
    "#);
}

#[test]
fn users_connections_module() {
    let files = generate(&users(), "users");
    let expected = r#"import { connection } from "@prismatic-io/spectral";

export const apiKeyAuth = connection({
  key: "apiKeyAuth",
  display: {
    label: "X Api Key",
    description: "X Api Key",
  },
  inputs: {
    apiKey: {
      label: "X-Api-Key",
      type: "password",
      required: true,
    },
  },
});

export default [apiKeyAuth];
"#;
    assert_eq!(content(&files, "src/connections.ts"), expected);
}

#[test]
fn actions_index_merges_groups_and_raw_request() {
    let files = generate(&petstore(), "pet-store");
    let expected = r#"import { buildRawRequestAction } from "@prismatic-io/spectral/dist/clients/http";
import { baseUrl } from "../client";
import usersActions from "./users";
import petsActions from "./pets";
import twoFaActions from "./twoFa";
import rootActions from "./root";

export default {
  ...usersActions,
  ...petsActions,
  ...twoFaActions,
  ...rootActions,
  rawRequest: buildRawRequestAction(baseUrl),
};
"#;
    assert_eq!(content(&files, "src/actions/index.ts"), expected);
}

#[test]
fn petstore_modules_reference_each_other() {
    let files = generate(&petstore(), "pet-store");

    let connections = content(&files, "src/connections.ts");
    let oauth = connections.find("export const oauth =").unwrap();
    let api_key = connections.find("export const apiKeyAuth =").unwrap();
    let basic = connections.find("export const basicAuth =").unwrap();
    assert!(oauth < api_key && api_key < basic);
    assert!(connections.ends_with("export default [oauth, apiKeyAuth, basicAuth];\n"));

    let client = content(&files, "src/client.ts");
    assert!(client.contains("import { oauth, apiKeyAuth, basicAuth } from \"./connections\";"));
    assert!(client.contains("export const baseUrl = \"https://api.petstore.dev/v1\";"));

    let pets = content(&files, "src/actions/pets.ts");
    assert!(pets.contains("\"pet_id\": otherPetId,") || pets.contains("pet_id: otherPetId,"));
    assert!(pets.contains("await client.patch(`/pets/${petId}`, body);"));
    assert!(pets.contains("await client.get(\"/pets\", {\n      params,\n    });"));

    let root = content(&files, "src/actions/root.ts");
    assert!(root.contains("const defaultValue = action({"));

    let index = content(&files, "src/index.ts");
    assert!(index.contains("key: \"pet-store\","));
    assert!(index.contains("description: \"Manage pets and their owners.\","));
}

#[test]
fn writes_all_files_under_root() {
    let dir = tempfile::tempdir().unwrap();
    let written = write(dir.path(), "users", &users()).unwrap();

    for file in &written {
        let on_disk = fs::read_to_string(dir.path().join(&file.path)).unwrap();
        assert_eq!(on_disk, file.content);
    }

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(leftovers, ["src"]);
}

#[test]
fn rewriting_replaces_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let stale = [GeneratedFile {
        path: "src/index.ts".to_string(),
        content: "stale".to_string(),
    }];
    write_files(dir.path(), &stale).unwrap();

    let files = generate(&users(), "users");
    write_files(dir.path(), &files).unwrap();

    let index = fs::read_to_string(dir.path().join("src/index.ts")).unwrap();
    assert!(index.starts_with("import { component }"));
}

#[test]
fn rewriting_keeps_unrelated_files() {
    let dir = tempfile::tempdir().unwrap();
    let custom = dir.path().join("src/custom.ts");
    fs::create_dir_all(custom.parent().unwrap()).unwrap();
    fs::write(&custom, "export const custom = 1;\n").unwrap();

    let written = write(dir.path(), "users", &users()).unwrap();

    assert_eq!(fs::read_to_string(&custom).unwrap(), "export const custom = 1;\n");
    for file in &written {
        assert!(dir.path().join(&file.path).is_file(), "{}", file.path);
    }
}
