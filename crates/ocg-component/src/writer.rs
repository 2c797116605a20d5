use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fs;
use std::path::{Component, Path};

use log::{debug, info};
use ocg_core::ir::IrComponent;
use ocg_core::{CodeGenerator, GeneratedFile};

use crate::error::EmitError;
use crate::generator::{ComponentConfig, ComponentGenerator};

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> EmitError + '_ {
    move |source| EmitError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Write `files` under `root`.
///
/// Everything is first written to a staging directory inside `root`. A
/// top-level directory that does not exist yet (a fresh `src/`) is then moved
/// into place with a single rename. When it already exists the files are
/// renamed one at a time; that step is best-effort and a failure part way
/// can leave a mix of old and new files.
pub fn write_files(root: &Path, files: &[GeneratedFile]) -> Result<(), EmitError> {
    fs::create_dir_all(root).map_err(io_error(root))?;

    let staging = tempfile::Builder::new()
        .prefix(".ocg-staging-")
        .tempdir_in(root)
        .map_err(io_error(root))?;

    for file in files {
        let staged = staging.path().join(&file.path);
        if let Some(parent) = staged.parent() {
            fs::create_dir_all(parent).map_err(io_error(parent))?;
        }
        fs::write(&staged, &file.content).map_err(io_error(&staged))?;
    }

    let mut fresh: BTreeSet<&OsStr> = BTreeSet::new();
    for file in files {
        let top = Path::new(&file.path).components().next();
        if let Some(Component::Normal(top)) = top {
            let staged_top = staging.path().join(top);
            if staged_top.is_dir() && !root.join(top).exists() {
                fresh.insert(top);
            }
        }
    }
    for top in &fresh {
        let target = root.join(top);
        fs::rename(staging.path().join(top), &target).map_err(io_error(&target))?;
        debug!("moved {} into place", target.display());
    }

    for file in files {
        let in_fresh = matches!(
            Path::new(&file.path).components().next(),
            Some(Component::Normal(top)) if fresh.contains(top)
        );
        if in_fresh {
            continue;
        }
        let staged = staging.path().join(&file.path);
        let target = root.join(&file.path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(io_error(parent))?;
        }
        fs::rename(&staged, &target).map_err(io_error(&target))?;
        debug!("wrote {}", target.display());
    }

    info!("wrote {} files to {}", files.len(), root.display());
    Ok(())
}

/// Render `ir` as component `key` and write it under `root`. Returns the
/// files that were written.
pub fn write(root: &Path, key: &str, ir: &IrComponent) -> Result<Vec<GeneratedFile>, EmitError> {
    let config = ComponentConfig {
        key: key.to_string(),
    };
    let files = ComponentGenerator.generate(ir, &config)?;
    write_files(root, &files)?;
    Ok(files)
}
