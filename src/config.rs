use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::ExtractOptions;

pub const CONFIG_FILE_NAME: &str = ".mdlocrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_locale")]
    pub default_locale: String,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    #[serde(default = "default_cross_reference_elements")]
    pub cross_reference_elements: Vec<String>,
    #[serde(default = "default_collapsible_elements")]
    pub collapsible_elements: Vec<String>,
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_ignores() -> Vec<String> {
    vec!["**/node_modules/**".to_string()]
}

fn default_extensions() -> Vec<String> {
    ["md", "mdx"].map(String::from).to_vec()
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_placeholder() -> String {
    "locale".to_string()
}

fn default_cross_reference_elements() -> Vec<String> {
    vec!["Card".to_string()]
}

fn default_collapsible_elements() -> Vec<String> {
    ["Accordion", "Expandable"].map(String::from).to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            includes: Vec::new(),
            ignores: default_ignores(),
            extensions: default_extensions(),
            default_locale: default_locale(),
            placeholder: default_placeholder(),
            cross_reference_elements: default_cross_reference_elements(),
            collapsible_elements: default_collapsible_elements(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for invalid glob patterns in `ignores` or `includes`,
    /// an empty `defaultLocale`, or a `placeholder` that would break the
    /// `%%name%%` token.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Patterns without wildcards are literal directory paths.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if self.default_locale.trim().is_empty() {
            bail!("'defaultLocale' must not be empty");
        }
        if self.placeholder.is_empty() || self.placeholder.contains('%') {
            bail!(
                "Invalid 'placeholder': \"{}\" (must be non-empty and contain no '%')",
                self.placeholder
            );
        }

        Ok(())
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            default_locale: self.default_locale.clone(),
            placeholder: self.placeholder.clone(),
            cross_reference_elements: self.cross_reference_elements.clone(),
            collapsible_elements: self.collapsible_elements.clone(),
        }
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
