use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Top-level project configuration loaded from `.ocg.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OcgConfig {
    pub input: String,
    pub output: String,
    /// Component key; defaults to the kebab-cased document title.
    pub key: Option<String>,
    pub display: DisplayOverrides,
    /// Overrides the base URL derived from `basePath` or `servers`.
    pub base_url: Option<String>,
}

impl Default for OcgConfig {
    fn default() -> Self {
        Self {
            input: "openapi.yaml".to_string(),
            output: ".".to_string(),
            key: None,
            display: DisplayOverrides::default(),
            base_url: None,
        }
    }
}

/// Replacements for the component's derived display block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DisplayOverrides {
    pub label: Option<String>,
    pub description: Option<String>,
    pub icon_path: Option<String>,
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".ocg.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<OcgConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: OcgConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# ocg configuration
input: openapi.yaml
output: .                 # src/ is created under this directory
# key: my-component       # defaults to the kebab-cased API title

display: {}
  # label: My API
  # description: Interact with the My API
  # icon_path: icon.png

# base_url: https://api.example.com
"#
}
