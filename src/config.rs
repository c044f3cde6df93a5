use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::detect::DEFAULT_PROPERTY_SUFFIX;

pub const CONFIG_FILE_NAME: &str = ".cspropsrc.json";

pub const DEFAULT_LEARN_MORE_URL: &str =
    "https://learn.microsoft.com/visualstudio/msbuild/msbuild-properties";

const MAX_INDENT: usize = 8;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default = "default_property_suffix")]
    pub property_suffix: String,
    #[serde(default = "default_learn_more_url")]
    pub learn_more_url: String,
    #[serde(default = "default_indent")]
    pub indent: usize,
    #[serde(default)]
    pub atomic_writes: bool,
}

fn default_includes() -> Vec<String> {
    ["**/*.csproj", "**/*.props", "**/*.targets"]
        .map(String::from)
        .to_vec()
}

fn default_ignores() -> Vec<String> {
    ["**/bin/**", "**/obj/**"].map(String::from).to_vec()
}

fn default_property_suffix() -> String {
    DEFAULT_PROPERTY_SUFFIX.to_string()
}

fn default_learn_more_url() -> String {
    DEFAULT_LEARN_MORE_URL.to_string()
}

fn default_indent() -> usize {
    2
}

impl Default for Config {
    fn default() -> Self {
        Self {
            includes: default_includes(),
            ignores: default_ignores(),
            property_suffix: default_property_suffix(),
            learn_more_url: default_learn_more_url(),
            indent: default_indent(),
            atomic_writes: false,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Rejects invalid glob patterns, a property suffix that is not identifier-safe,
    /// and indents wider than 8 spaces.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.includes {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'includes': \"{}\"", pattern))?;
        }
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Appended to a slug, so a leading digit is fine.
        if self.property_suffix.is_empty()
            || self
                .property_suffix
                .chars()
                .any(|c| !(c.is_ascii_alphanumeric() || c == '_'))
        {
            bail!(
                "Invalid 'propertySuffix': \"{}\" must only contain letters, digits and '_'",
                self.property_suffix
            );
        }

        if self.indent > MAX_INDENT {
            bail!(
                "Invalid 'indent': {} (maximum is {})",
                self.indent,
                MAX_INDENT
            );
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            tracing::debug!("Loaded config from {}", path.display());
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
