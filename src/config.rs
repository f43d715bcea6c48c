use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    /// Path to the GEDCOM file, relative to the config file's directory.
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_cache_file")]
    pub cache_file: String,
    #[serde(default = "default_current_file")]
    pub current_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            dir: default_output_dir(),
            cache_file: default_cache_file(),
            current_file: default_current_file(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_cache_file() -> String {
    "families.json".to_string()
}
fn default_current_file() -> String {
    "current.json".to_string()
}

impl Config {
    /// Absolute (or config-relative) path to the GEDCOM source file.
    pub fn source_path(&self) -> &Path {
        &self.source.path
    }

    pub fn cache_path(&self) -> PathBuf {
        self.output.dir.join(&self.output.cache_file)
    }

    pub fn current_path(&self) -> PathBuf {
        self.output.dir.join(&self.output.current_file)
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config: Config =
        toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.source.path.as_os_str().is_empty() {
        anyhow::bail!("source.path must not be empty");
    }
    if config.output.cache_file.is_empty() || config.output.current_file.is_empty() {
        anyhow::bail!("output.cache_file and output.current_file must not be empty");
    }

    // Relative paths are resolved against the config file's directory, so
    // invocations from cron don't depend on the working directory.
    if let Some(base) = path.parent() {
        if config.source.path.is_relative() {
            config.source.path = base.join(&config.source.path);
        }
        if config.output.dir.is_relative() {
            config.output.dir = base.join(&config.output.dir);
        }
    }

    Ok(config)
}
