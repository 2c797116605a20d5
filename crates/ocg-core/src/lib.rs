pub mod config;
pub mod error;
pub mod ir;
pub mod parse;
pub mod transform;

use std::path::Path;

use error::TransformError;
use parse::deref::{Dereferencer, LocalDereferencer};
use transform::AssembleOptions;

/// A generated file with path and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for code generators that produce files from a component IR.
pub trait CodeGenerator {
    type Config;
    type Error: std::error::Error;
    fn generate(
        &self,
        ir: &ir::IrComponent,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, Self::Error>;
}

/// Dereference the document at `path` from the local filesystem and
/// assemble it into the component IR.
pub fn read(path: &Path) -> Result<ir::IrComponent, TransformError> {
    read_with(&LocalDereferencer, path, &AssembleOptions::default())
}

/// Like [`read`], with an explicit dereferencer and assembly options.
pub fn read_with(
    dereferencer: &impl Dereferencer,
    path: &Path,
    options: &AssembleOptions,
) -> Result<ir::IrComponent, TransformError> {
    let spec = dereferencer.dereference(path)?;
    transform::assemble_with_options(&spec, options)
}
