pub mod dispatch;
pub mod model;
pub mod symbol;
pub mod value;

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

use crate::tree::TreeNode;
use crate::workspace::{load_dir, LoadError, LoadOptions};

pub use dispatch::{project_file, visit, Projection};
pub use model::{DataRecord, Field, RecordCatalog};
pub use symbol::SymbolTable;
pub use value::{ProjectionError, Value};

/// Which projection a walk builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ProjectionMode {
    Model,
    Symbol,
}

/// A file whose contribution was dropped from a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedFile {
    pub path: String,
    pub error: ProjectionError,
}

/// Result of one projection run over a set of package groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectionRun<T> {
    pub output: T,
    pub skipped: Vec<SkippedFile>,
}

/// Walk every file under `roots` (package groups or single files) with a
/// fresh accumulator per file and merge the successful ones in order.
pub fn project<P: Projection>(roots: &[TreeNode]) -> ProjectionRun<P> {
    let mut run = ProjectionRun {
        output: P::default(),
        skipped: Vec::new(),
    };

    for file in roots.iter().flat_map(TreeNode::files) {
        let path = file.file_path().filter(|p| !p.is_empty()).unwrap_or("<unnamed>");
        info!("processing: {}", path);
        match project_file::<P>(file) {
            Ok(acc) => run.output.absorb(acc),
            Err(error) => {
                warn!("skipping {}: {}", path, error);
                run.skipped.push(SkippedFile {
                    path: path.to_string(),
                    error,
                });
            }
        }
    }

    run
}

/// Builds the record catalog of a directory.
#[derive(Debug, Clone, Default)]
pub struct ModelProjector {
    options: LoadOptions,
}

impl ModelProjector {
    pub fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    pub fn project(&self, roots: &[TreeNode]) -> ProjectionRun<RecordCatalog> {
        project(roots)
    }

    pub fn project_dir(&self, dir: &Path) -> Result<ProjectionRun<RecordCatalog>, LoadError> {
        let groups = load_dir(dir, &self.options)?;
        Ok(self.project(&groups))
    }
}

/// Builds the symbol table of a directory.
#[derive(Debug, Clone, Default)]
pub struct SymbolProjector {
    options: LoadOptions,
}

impl SymbolProjector {
    pub fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    pub fn project(&self, roots: &[TreeNode]) -> ProjectionRun<SymbolTable> {
        project(roots)
    }

    pub fn project_dir(&self, dir: &Path) -> Result<ProjectionRun<SymbolTable>, LoadError> {
        let groups = load_dir(dir, &self.options)?;
        Ok(self.project(&groups))
    }
}

pub fn project_models_dir(dir: &Path, options: &LoadOptions) -> Result<ProjectionRun<RecordCatalog>, LoadError> {
    ModelProjector::new(options.clone()).project_dir(dir)
}

pub fn project_symbols_dir(dir: &Path, options: &LoadOptions) -> Result<ProjectionRun<SymbolTable>, LoadError> {
    SymbolProjector::new(options.clone()).project_dir(dir)
}

/// Symbol tables keyed by directory. A missing directory yields an empty
/// table; any other load failure fails the whole call.
pub fn project_symbol_dirs<P: AsRef<Path>>(
    dirs: &[P],
    options: &LoadOptions,
) -> Result<BTreeMap<String, ProjectionRun<SymbolTable>>, LoadError> {
    let projector = SymbolProjector::new(options.clone());
    let mut tables = BTreeMap::new();

    for dir in dirs {
        let dir = dir.as_ref();
        let run = match projector.project_dir(dir) {
            Ok(run) => run,
            Err(LoadError::MissingDirectory(_)) => {
                info!("no symbol directory at {}", dir.display());
                ProjectionRun::default()
            }
            Err(e) => return Err(e),
        };
        tables.insert(dir.display().to_string(), run);
    }

    Ok(tables)
}
