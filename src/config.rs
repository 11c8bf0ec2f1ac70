//! # Configuration Module
//!
//! This module provides configuration support for headerfix, allowing users
//! to add classification rules for files the builtin table does not know
//! about, or to exempt files from the header requirement.
//!
//! Configuration can be specified in a `.headerfix.toml` file or via the
//! `HEADERFIX_CONFIG` environment variable.
//!
//! ```toml
//! builtin-rules = true
//!
//! [[rules]]
//! pattern = "*.c"
//! prefix = "//"
//!
//! [[rules]]
//! pattern = "vendor/*"
//! skip = true
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::rules::{CommentStyle, Rule, RuleAction, StyleClassifier, builtin_rules};
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".headerfix.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "HEADERFIX_CONFIG";

/// A classification rule as written in the configuration file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
  /// Glob matched against the workspace-relative path.
  pub pattern: String,

  /// Comment prefix for matching files. An empty string writes the header as
  /// plain text.
  #[serde(default)]
  pub prefix: Option<String>,

  /// Exempt matching files from the header requirement.
  #[serde(default)]
  pub skip: bool,
}

const fn default_builtin_rules() -> bool {
  true
}

/// Main configuration struct for headerfix.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
  /// User rules, tried in order before the builtin ones.
  #[serde(default)]
  pub rules: Vec<RuleConfig>,

  /// Whether the builtin rules are appended after the user rules.
  #[serde(default = "default_builtin_rules", rename = "builtin-rules")]
  pub builtin_rules: bool,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      rules: Vec::new(),
      builtin_rules: true,
    }
  }
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A rule is invalid.
  #[error("Invalid rule for '{pattern}': {message}")]
  InvalidRule { pattern: String, message: String },

  /// The builtin rule table contains a malformed pattern.
  #[error("Invalid builtin rule: {0}")]
  BuiltinRule(#[from] glob::PatternError),
}

impl Config {
  /// Load configuration from a file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    verbose_log!("Loaded {} classification rules", config.rules.len());

    Ok(config)
  }

  /// Validate the configuration.
  ///
  /// Checks that:
  /// - Every rule sets exactly one of `prefix` and `skip`
  /// - Prefixes fit on a single line
  /// - Every pattern is a valid glob
  fn validate(&self) -> Result<(), ConfigError> {
    for rule in &self.rules {
      let invalid = |message: &str| ConfigError::InvalidRule {
        pattern: rule.pattern.clone(),
        message: message.to_string(),
      };

      match (&rule.prefix, rule.skip) {
        (Some(_), true) => return Err(invalid("prefix and skip are mutually exclusive")),
        (None, false) => return Err(invalid("either prefix or skip = true is required")),
        (Some(prefix), false) if prefix.contains(['\n', '\r']) => {
          return Err(invalid("prefix cannot contain a line break"));
        }
        _ => {}
      }

      if let Err(e) = glob::Pattern::new(&rule.pattern) {
        return Err(invalid(&e.to_string()));
      }
    }

    Ok(())
  }

  /// Compile the configured rules, followed by the builtin ones if enabled.
  pub fn to_rules(&self) -> Result<Vec<Rule>, ConfigError> {
    let mut rules = Vec::with_capacity(self.rules.len());

    for rule in &self.rules {
      let action = match &rule.prefix {
        Some(prefix) if !rule.skip => RuleAction::Comment(CommentStyle::new(prefix.as_str())),
        _ => RuleAction::Skip,
      };
      let compiled = Rule::new(&rule.pattern, action).map_err(|e| ConfigError::InvalidRule {
        pattern: rule.pattern.clone(),
        message: e.to_string(),
      })?;
      rules.push(compiled);
    }

    if self.builtin_rules {
      rules.extend(builtin_rules()?);
    }

    Ok(rules)
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `HEADERFIX_CONFIG` environment variable
/// 3. `.headerfix.toml` in the workspace root
pub fn discover_config_path(explicit_path: Option<&Path>, workspace_root: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    if path.exists() {
      verbose_log!("Using explicit config path: {}", path.display());
      return Some(path.to_path_buf());
    }
    verbose_log!("Explicit config path does not exist: {}", path.display());
    return None;
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let workspace_config = workspace_root.join(DEFAULT_CONFIG_FILENAME);
  if workspace_config.exists() {
    verbose_log!("Using workspace config: {}", workspace_config.display());
    return Some(workspace_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path.
///
/// Returns `None` when discovery is disabled or no file is found.
pub fn load_config(explicit_path: Option<&Path>, workspace_root: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  match discover_config_path(explicit_path, workspace_root) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}

/// Build the classifier for an optional configuration.
pub fn create_classifier(config: Option<&Config>) -> Result<StyleClassifier> {
  match config {
    Some(cfg) => Ok(StyleClassifier::new(cfg.to_rules()?)),
    None => Ok(StyleClassifier::builtin()?),
  }
}
