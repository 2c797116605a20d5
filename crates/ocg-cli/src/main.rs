use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use log::debug;

use ocg_core::config::{self, CONFIG_FILE_NAME, OcgConfig};
use ocg_core::ir::{IrComponent, group_actions};
use ocg_core::parse::deref::{Dereferencer, LocalDereferencer};
use ocg_core::transform::{self, AssembleOptions};

#[derive(Parser)]
#[command(name = "ocg", about = "OpenAPI 3.x integration component generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a component from an OpenAPI spec
    Generate {
        /// Path to the OpenAPI spec file (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Directory to write `src/` into
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Component key (defaults to the kebab-cased API title)
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Validate an OpenAPI spec
    Validate {
        /// Path to the OpenAPI spec file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Inspect the component IR built from an OpenAPI spec
    Inspect {
        /// Path to the OpenAPI spec file
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,

        /// Print the complete IR instead of a summary
        #[arg(long)]
        full: bool,
    },

    /// Initialize a new ocg configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { input, output, key } => cmd_generate(input, output, key),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect {
            input,
            format,
            full,
        } => cmd_inspect(input, format, full),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "ocg", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<OcgConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    let cfg = config::load_config(&config_path)?;
    if cfg.is_some() {
        debug!("using {}", config_path.display());
    }
    Ok(cfg)
}

fn assemble_options(cfg: &OcgConfig) -> AssembleOptions {
    AssembleOptions {
        display: cfg.display.clone(),
        base_url: cfg.base_url.clone(),
    }
}

fn load_component(path: &Path, cfg: &OcgConfig) -> Result<(String, IrComponent)> {
    debug!("loading {}", path.display());
    let spec = LocalDereferencer
        .dereference(path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    let ir = transform::assemble_with_options(&spec, &assemble_options(cfg))?;
    Ok((spec.info.title, ir))
}

fn cmd_generate(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    key: Option<String>,
) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let output_dir = output.unwrap_or_else(|| PathBuf::from(&cfg.output));

    let (title, ir) = load_component(&input, &cfg)?;
    let key = key
        .or_else(|| cfg.key.clone())
        .unwrap_or_else(|| transform::component_key(&title));

    eprintln!("Generating component {key} → {}", output_dir.display());
    let files = ocg_component::write(&output_dir, &key, &ir)
        .with_context(|| format!("failed to generate component {key}"))?;
    for file in &files {
        eprintln!("  wrote {}", output_dir.join(&file.path).display());
    }

    eprintln!(
        "Generated {} files ({} actions, {} connections) in {}",
        files.len(),
        ir.actions.len(),
        ir.connections.len(),
        output_dir.display()
    );
    Ok(())
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let spec = LocalDereferencer
        .dereference(&input)
        .with_context(|| format!("failed to load {}", input.display()))?;

    eprintln!("Valid OpenAPI {} spec: {}", spec.openapi, spec.info.title);
    eprintln!("  Version: {}", spec.info.version);
    eprintln!("  Paths: {}", spec.paths.len());

    if let Some(ref components) = spec.components {
        eprintln!("  Security schemes: {}", components.security_schemes.len());
    }

    // Also validate that it assembles into a component
    let ir = transform::assemble(&spec)?;
    eprintln!("  Actions: {}", ir.actions.len());
    eprintln!("  Connections: {}", ir.connections.len());
    eprintln!("  Base URL: {}", ir.base_url);

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: InspectFormat, full: bool) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let (_, ir) = load_component(&input, &cfg)?;

    let summary = if full {
        serde_json::to_value(&ir)?
    } else {
        build_inspect_summary(&ir)
    };

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(ir: &IrComponent) -> serde_json::Value {
    let groups: Vec<serde_json::Value> = group_actions(ir)
        .iter()
        .map(|group| {
            let actions: Vec<serde_json::Value> = group
                .actions
                .iter()
                .map(|action| {
                    serde_json::json!({
                        "key": action.key,
                        "method": action.perform.method.as_str(),
                        "path": action.path,
                        "inputs": action.inputs.keys().collect::<Vec<_>>(),
                    })
                })
                .collect();
            serde_json::json!({
                "tag": group.tag,
                "actions": actions,
            })
        })
        .collect();

    let connections: Vec<serde_json::Value> = ir
        .connections
        .iter()
        .map(|c| {
            serde_json::json!({
                "key": c.key,
                "label": c.label,
                "order_priority": c.order_priority,
                "inputs": c.inputs.keys().collect::<Vec<_>>(),
            })
        })
        .collect();

    serde_json::json!({
        "display": ir.display,
        "base_url": ir.base_url,
        "groups": groups,
        "connections": connections,
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
