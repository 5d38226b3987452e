//! Project configuration (retrofit.toml).

use std::fs;
use std::path::{Path, PathBuf};

use retrofit_core::{HowToUse, ImportDescriptor, PathRule};
use serde::Deserialize;

use crate::converter::CodeConverter;
use crate::usage::{elision, instance_snippet, tag_substitution};

/// Errors raised while loading or applying configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid path rule `{rule}`: {source}")]
    InvalidRule { rule: String, source: regex::Error },

    #[error("Component `{0}` cannot both be removed and replaced by a tag")]
    ConflictingUsage(String),
}

/// Configuration file structure.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrofitConfig {
    #[serde(default = "default_indent")]
    pub indent: usize,

    #[serde(default)]
    pub path_rules: Vec<PathRuleConfig>,

    #[serde(default)]
    pub components: Vec<ComponentConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathRuleConfig {
    /// Only for this framework (all when absent)
    pub framework: Option<String>,
    /// Regex matched against the module path
    pub rule: String,
    pub module: String,
    /// Renamed import specifiers
    #[serde(default)]
    pub specifiers: indexmap::IndexMap<String, String>,
}

/// How one component is used from one framework.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentConfig {
    pub framework: String,
    pub component: String,

    /// Replace the component with this element
    pub tag: Option<String>,

    /// Drop the component from the markup
    #[serde(default)]
    pub remove: bool,

    /// Code that creates an instance; `{selector}` is the component's class selector
    pub instance: Option<String>,

    /// Module to import for this framework
    pub module: Option<String>,
    pub default_import: Option<String>,
    #[serde(default)]
    pub named: Vec<String>,
}

fn default_indent() -> usize {
    4
}

impl Default for RetrofitConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            path_rules: Vec::new(),
            components: Vec::new(),
        }
    }
}

impl RetrofitConfig {
    /// Load configuration from `path` if it exists.
    /// Returns an error if the file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn path_rules(&self) -> Result<Vec<PathRule>, ConfigError> {
        self.path_rules
            .iter()
            .map(|config| {
                let mut rule = PathRule::new(config.framework.as_deref(), &config.rule, &config.module)
                    .map_err(|source| ConfigError::InvalidRule {
                        rule: config.rule.clone(),
                        source,
                    })?;
                rule.specifiers = config.specifiers.clone();
                Ok(rule)
            })
            .collect()
    }

    pub fn how_to_uses(&self) -> Result<Vec<HowToUse>, ConfigError> {
        self.components.iter().map(ComponentConfig::how_to_use).collect()
    }

    /// A converter for `code` with every rule and descriptor applied.
    pub fn converter(&self, code: impl Into<String>) -> Result<CodeConverter, ConfigError> {
        let mut converter = CodeConverter::new(code).with_indent(self.indent);
        for rule in self.path_rules()? {
            converter.add_path_rule(rule);
        }
        for how_to_use in self.how_to_uses()? {
            converter.add_how_to_use(how_to_use);
        }
        Ok(converter)
    }
}

impl ComponentConfig {
    pub fn how_to_use(&self) -> Result<HowToUse, ConfigError> {
        let mut how_to_use = match (&self.tag, self.remove) {
            (Some(_), true) => return Err(ConfigError::ConflictingUsage(self.component.clone())),
            (Some(tag), false) => tag_substitution(&self.framework, &self.component, tag),
            (None, true) => elision(&self.framework, &self.component),
            (None, false) => HowToUse::new(&self.framework, &self.component),
        };

        if let Some(module) = &self.module {
            let mut import = ImportDescriptor::new(module).framework(&self.framework);
            if let Some(local) = &self.default_import {
                import = import.default_import(local);
            }
            for name in &self.named {
                import = import.named(name);
            }
            how_to_use = how_to_use.import(import);
        }
        if let Some(snippet) = &self.instance {
            how_to_use = instance_snippet(how_to_use, snippet);
        }
        Ok(how_to_use)
    }
}
