pub mod actions;
pub mod client;
pub mod connections;
pub mod index;

/// Runtime library every generated component builds on.
pub const SPECTRAL: &str = "@prismatic-io/spectral";
/// HTTP helpers shipped with the runtime library.
pub const SPECTRAL_HTTP: &str = "@prismatic-io/spectral/dist/clients/http";

/// Directory the generated sources live in, relative to the output root.
pub const SOURCE_DIR: &str = "src";

/// Build a file path under the source directory.
pub fn source_path(file: &str) -> String {
    format!("{SOURCE_DIR}/{file}")
}
