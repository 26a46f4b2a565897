use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use decl_projector::{
    project, project_symbol_dirs, Config, ModelProjector, ProjectionMode, ProjectionRun, RecordCatalog, SymbolTable,
    TreeNode,
};

#[derive(Parser)]
#[command(name = "projector")]
#[command(about = "Projects Go declaration trees into record catalogs and symbol tables")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Print the record catalog of the models directory")]
    Models {
        #[command(flatten)]
        project: ProjectArgs,
    },
    #[command(about = "Print the symbol table of each symbol directory")]
    Symbols {
        #[command(flatten)]
        project: ProjectArgs,
    },
    #[command(about = "Print the record catalog and all symbol tables")]
    Inspect {
        #[command(flatten)]
        project: ProjectArgs,
    },
    #[command(about = "Project a declaration tree read from a JSON file")]
    ProjectTree {
        #[arg(short, long, help = "JSON file holding a package group or file node")]
        input: PathBuf,
        #[arg(short, long, value_enum, default_value = "model")]
        mode: ProjectionMode,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
struct ProjectArgs {
    #[arg(short, long, help = "TOML configuration file")]
    config: Option<PathBuf>,
    #[arg(short, long, help = "Project directory, overrides the configured root")]
    dir: Option<PathBuf>,
}

#[derive(Serialize)]
struct Inspection {
    models: ProjectionRun<RecordCatalog>,
    symbols: BTreeMap<String, ProjectionRun<SymbolTable>>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.command {
        Commands::Models { project } | Commands::Symbols { project } | Commands::Inspect { project } => {
            load_config(project.config.as_deref(), project.dir.as_deref())?
        }
        Commands::ProjectTree { config, .. } => load_config(config.as_deref(), None)?,
    };
    init(&config);

    match cli.command {
        Commands::Models { .. } => print_json(&project_models(&config)?),
        Commands::Symbols { .. } => print_json(&project_symbols(&config)?),
        Commands::Inspect { .. } => {
            let inspection = Inspection {
                models: project_models(&config)?,
                symbols: project_symbols(&config)?,
            };
            print_json(&inspection)
        }
        Commands::ProjectTree { input, mode, .. } => project_tree(&input, mode),
    }
}

fn load_config(config_path: Option<&Path>, dir: Option<&Path>) -> Result<Config> {
    let mut config = match config_path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(dir) = dir {
        config.project.root = dir.to_path_buf();
    }
    Ok(config)
}

fn init(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(config.performance.max_threads)
        .build_global()
    {
        warn!("Failed to size the parser thread pool: {}", e);
    }
}

fn project_models(config: &Config) -> Result<ProjectionRun<RecordCatalog>> {
    let models_path = config.models_path();
    let run = ModelProjector::new(config.parse.clone())
        .project_dir(&models_path)
        .with_context(|| format!("Failed to project models in {}", models_path.display()))?;

    info!("found {} models in {}", run.output.len(), models_path.display());
    Ok(run)
}

fn project_symbols(config: &Config) -> Result<BTreeMap<String, ProjectionRun<SymbolTable>>> {
    let dirs = config.symbol_paths();
    let tables = project_symbol_dirs(&dirs, &config.parse).context("Failed to project symbol directories")?;

    info!("built {} symbol tables", tables.len());
    Ok(tables)
}

fn project_tree(input: &Path, mode: ProjectionMode) -> Result<()> {
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read tree file: {}", input.display()))?;
    let root: TreeNode = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse tree file: {}", input.display()))?;
    info!("projecting {} tree from {}", root.kind_name(), input.display());

    let roots = [root];
    match mode {
        ProjectionMode::Model => print_json(&project::<RecordCatalog>(&roots)),
        ProjectionMode::Symbol => print_json(&project::<SymbolTable>(&roots)),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
