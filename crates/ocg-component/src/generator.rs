use log::info;
use ocg_core::ir::{IrComponent, group_actions};
use ocg_core::{CodeGenerator, GeneratedFile};

use crate::emitters::{self, source_path};
use crate::error::EmitError;

/// Settings the IR does not carry.
#[derive(Debug, Clone)]
pub struct ComponentConfig {
    /// Component key written into the manifest.
    pub key: String,
}

/// Renders an `IrComponent` into the component's TypeScript sources.
pub struct ComponentGenerator;

impl CodeGenerator for ComponentGenerator {
    type Config = ComponentConfig;
    type Error = EmitError;

    fn generate(
        &self,
        ir: &IrComponent,
        config: &ComponentConfig,
    ) -> Result<Vec<GeneratedFile>, EmitError> {
        let groups = group_actions(ir);
        let stems = emitters::actions::group_stems(&groups);

        let mut files = vec![
            GeneratedFile {
                path: source_path("index.ts"),
                content: emitters::index::emit_index(ir, &config.key),
            },
            GeneratedFile {
                path: source_path("client.ts"),
                content: emitters::client::emit_client(ir)?,
            },
            GeneratedFile {
                path: source_path("connections.ts"),
                content: emitters::connections::emit_connections(ir),
            },
            GeneratedFile {
                path: source_path("actions/index.ts"),
                content: emitters::actions::emit_actions_index(&stems),
            },
        ];

        for (group, stem) in groups.iter().zip(&stems) {
            files.push(GeneratedFile {
                path: source_path(&format!("actions/{stem}.ts")),
                content: emitters::actions::emit_action_group(group),
            });
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        info!("rendered {} files for component {}", files.len(), config.key);
        Ok(files)
    }
}
