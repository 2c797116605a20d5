use ocg_core::ir::IrComponent;

use super::{SPECTRAL, SPECTRAL_HTTP};
use crate::source::{SourceFile, TsExpr, TsImport, TsProp};

/// Emit `src/index.ts`, the component manifest.
pub fn emit_index(ir: &IrComponent, key: &str) -> String {
    let mut display = vec![
        ("label".to_string(), TsExpr::str(&ir.display.label)),
        ("description".to_string(), TsExpr::str(&ir.display.description)),
    ];
    if let Some(ref icon) = ir.display.icon_path {
        display.push(("iconPath".to_string(), TsExpr::str(icon)));
    }

    let manifest = TsExpr::Object(vec![
        TsProp::KeyValue("key".to_string(), TsExpr::str(key)),
        TsProp::KeyValue("public".to_string(), TsExpr::Bool(false)),
        TsProp::KeyValue("display".to_string(), TsExpr::object(display)),
        TsProp::KeyValue(
            "hooks".to_string(),
            TsExpr::object([("error".to_string(), TsExpr::ident("handleErrors"))]),
        ),
        TsProp::Shorthand("actions".to_string()),
        TsProp::Shorthand("connections".to_string()),
    ]);

    SourceFile {
        imports: vec![
            TsImport::named(&["component"], SPECTRAL),
            TsImport::named(&["handleErrors"], SPECTRAL_HTTP),
            TsImport::default_import("actions", "./actions"),
            TsImport::default_import("connections", "./connections"),
        ],
        declarations: Vec::new(),
        default_export: Some(TsExpr::call("component", vec![manifest])),
    }
    .render()
}
