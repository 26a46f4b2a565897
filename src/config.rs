use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::workspace::LoadOptions;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub project: ProjectConfig,
    #[serde(default)]
    pub parse: LoadOptions,
    #[serde(default)]
    pub performance: PerformanceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub root: PathBuf,
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,
    #[serde(default = "default_symbol_dirs")]
    pub symbol_dirs: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceConfig {
    #[serde(default = "default_max_threads")]
    pub max_threads: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_models_dir() -> PathBuf {
    PathBuf::from("models")
}

fn default_symbol_dirs() -> Vec<PathBuf> {
    vec![PathBuf::from("services"), PathBuf::from("controllers")]
}

fn default_max_threads() -> usize {
    num_cpus::get()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            max_threads: default_max_threads(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    pub fn from_project_root<P: AsRef<Path>>(project_root: P) -> Self {
        let mut config = Self::default();
        config.project.root = project_root.as_ref().to_path_buf();
        config
    }

    pub fn models_path(&self) -> PathBuf {
        self.project.root.join(&self.project.models_dir)
    }

    pub fn symbol_paths(&self) -> Vec<PathBuf> {
        self.project
            .symbol_dirs
            .iter()
            .map(|dir| self.project.root.join(dir))
            .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project: ProjectConfig {
                root: PathBuf::from("."),
                models_dir: default_models_dir(),
                symbol_dirs: default_symbol_dirs(),
            },
            parse: LoadOptions::default(),
            performance: PerformanceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
