use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::parser::{GoParser, ParseError};
use crate::tree::TreeNode;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Directory does not exist: {0:?}")]
    MissingDirectory(PathBuf),

    #[error("Failed to list {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// What to do with a file the parser rejects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorPolicy {
    /// Fail the whole load.
    #[default]
    Abort,
    /// Log the file and leave it out.
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOptions {
    #[serde(default = "default_true")]
    pub include_tests: bool,
    #[serde(default)]
    pub on_parse_error: ParseErrorPolicy,
}

fn default_true() -> bool {
    true
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            include_tests: true,
            on_parse_error: ParseErrorPolicy::Abort,
        }
    }
}

/// Go source files directly inside `dir`, sorted by path.
pub fn find_source_files(dir: &Path, options: &LoadOptions) -> Result<Vec<PathBuf>, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::MissingDirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|source| LoadError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        if !entry.file_type().is_file() {
            continue;
        }
        let is_go = path.extension().and_then(|ext| ext.to_str()) == Some("go");
        if !is_go {
            continue;
        }
        let is_test = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.ends_with("_test.go"))
            .unwrap_or(false);
        if is_test && !options.include_tests {
            continue;
        }

        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

/// Parse one directory into package groups sorted by package name, each
/// holding its files sorted by path.
pub fn load_dir(dir: &Path, options: &LoadOptions) -> Result<Vec<TreeNode>, LoadError> {
    let files = find_source_files(dir, options)?;
    debug!("found {} Go files in {}", files.len(), dir.display());

    let parsed: Vec<(PathBuf, Result<TreeNode, ParseError>)> = files
        .into_par_iter()
        .map_init(GoParser::new, |parser, path| {
            let result = match parser {
                Ok(parser) => parser.parse_file(&path),
                Err(e) => Err(e.clone()),
            };
            (path, result)
        })
        .collect();

    let mut packages: BTreeMap<String, Vec<TreeNode>> = BTreeMap::new();
    for (path, result) in parsed {
        let file = match result {
            Ok(file) => file,
            Err(e) => match options.on_parse_error {
                ParseErrorPolicy::Abort => return Err(e.into()),
                ParseErrorPolicy::Skip => {
                    warn!("skipping {}: {}", path.display(), e);
                    continue;
                }
            },
        };

        let package = file.package_name().unwrap_or_default().to_string();
        packages.entry(package).or_default().push(file);
    }

    Ok(packages
        .into_iter()
        .map(|(name, files)| TreeNode::PackageGroup { name, files })
        .collect())
}
