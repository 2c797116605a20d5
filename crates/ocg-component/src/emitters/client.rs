use minijinja::{Environment, context};
use ocg_core::ir::IrComponent;

use super::connections::connection_bindings;
use super::{SPECTRAL, SPECTRAL_HTTP};
use crate::error::EmitError;
use crate::source::string_literal;

/// Emit `src/client.ts`: the `baseUrl` constant and a `createClient` factory
/// that only accepts this component's connections.
pub fn emit_client(ir: &IrComponent) -> Result<String, EmitError> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_keep_trailing_newline(true);
    env.add_template("client.ts.j2", include_str!("../../templates/client.ts.j2"))?;
    let tmpl = env.get_template("client.ts.j2")?;

    let connections: Vec<String> = connection_bindings(ir)
        .into_iter()
        .map(|(name, _)| name)
        .collect();

    let content = tmpl.render(context! {
        spectral => SPECTRAL,
        spectral_http => SPECTRAL_HTTP,
        base_url => string_literal(&ir.base_url),
        connections => connections,
    })?;
    Ok(content)
}
