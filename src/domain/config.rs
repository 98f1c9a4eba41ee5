/*!
Configuration discovery, merging, and domain path resolution.

Two optional YAML sources share one shape:

  domain_paths:
    - ~/my-craft-domains
  include_builtin_domains: true
  config:
    default_human_mode: false
    verbose_execution: false
    show_startup_checklist: true

User level lives at `~/.config/craft/craftrc`, project level at `./.craftrc`.
Merging concatenates `domain_paths` (user first) and lets the later source
win every scalar. A file that fails to parse downgrades to "absent" with a
warning and never aborts the run.

The `ConfigManager` is built once in `main` and handed down by reference;
there is no ambient global.
*/

use crate::{log_debug, log_warn};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_true() -> bool {
    true
}

/// Nested `config:` block of a craftrc file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RuntimeOptions {
    pub default_human_mode: bool,
    pub verbose_execution: bool,
    #[serde(default = "default_true")]
    pub show_startup_checklist: bool,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            default_human_mode: false,
            verbose_execution: false,
            show_startup_checklist: true,
        }
    }
}

/// Fully merged craft configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CraftConfig {
    pub domain_paths: Vec<String>,
    #[serde(default = "default_true")]
    pub include_builtin_domains: bool,
    #[serde(rename = "config")]
    pub options: RuntimeOptions,
}

impl Default for CraftConfig {
    fn default() -> Self {
        Self {
            domain_paths: Vec::new(),
            include_builtin_domains: true,
            options: RuntimeOptions::default(),
        }
    }
}

impl CraftConfig {
    /// Merge with a higher-precedence source: paths concatenate, scalars are
    /// taken from `other` wholesale.
    pub fn merge_with(&self, other: &CraftConfig) -> CraftConfig {
        let mut domain_paths = self.domain_paths.clone();
        domain_paths.extend(other.domain_paths.iter().cloned());
        CraftConfig {
            domain_paths,
            include_builtin_domains: other.include_builtin_domains,
            options: other.options.clone(),
        }
    }
}

/// Owns the config source locations and the resolved, merged result.
#[derive(Debug)]
pub struct ConfigManager {
    project_config_path: PathBuf,
    user_config_path: PathBuf,
    builtin_domains_dir: Option<PathBuf>,
    config: CraftConfig,
}

impl ConfigManager {
    /// Standard locations: `./.craftrc`, `~/.config/craft/craftrc`, and a
    /// `domains/` directory next to the executable for built-ins.
    pub fn discover() -> Self {
        let project = PathBuf::from(".craftrc");
        let user = dirs::home_dir()
            .map(|h| h.join(".config").join("craft").join("craftrc"))
            .unwrap_or_else(|| PathBuf::from(".config/craft/craftrc"));
        let builtin = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|d| d.join("domains")));
        Self::with_paths(project, user, builtin)
    }

    /// Explicit source locations, used directly by tests.
    pub fn with_paths(
        project_config_path: PathBuf,
        user_config_path: PathBuf,
        builtin_domains_dir: Option<PathBuf>,
    ) -> Self {
        let mut base = CraftConfig::default();
        if let Some(user) = load_config_file(&user_config_path) {
            base = base.merge_with(&user);
        }
        if let Some(project) = load_config_file(&project_config_path) {
            base = base.merge_with(&project);
        }
        Self {
            project_config_path,
            user_config_path,
            builtin_domains_dir,
            config: base,
        }
    }

    pub fn config(&self) -> &CraftConfig {
        &self.config
    }

    pub fn user_config_path(&self) -> &Path {
        &self.user_config_path
    }

    /// Ordered, existing domain roots. Earlier entries shadow later ones.
    pub fn domain_paths(&self) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if self.config.include_builtin_domains
            && let Some(builtin) = &self.builtin_domains_dir
            && builtin.is_dir()
        {
            paths.push(builtin.clone());
        }
        for raw in &self.config.domain_paths {
            let expanded = expand_user(raw);
            let absolute = if expanded.is_absolute() {
                expanded
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(&expanded))
                    .unwrap_or(expanded)
            };
            if absolute.is_dir() {
                log_debug!("domain root: {}", absolute.display());
                paths.push(absolute);
            } else {
                log_warn!("domain path does not exist: {raw}");
            }
        }
        paths
    }

    /// True when neither config source exists on disk (first-run condition).
    pub fn no_config_found(&self) -> bool {
        !self.user_config_path.exists() && !self.project_config_path.exists()
    }

    /// Write an example user config with placeholder defaults. Only called
    /// on explicit user consent during the first-run prompt.
    pub fn write_example_user_config(&self) -> Result<()> {
        if let Some(parent) = self.user_config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let example = CraftConfig {
            domain_paths: vec!["~/my-craft-domains".to_string()],
            include_builtin_domains: true,
            options: RuntimeOptions::default(),
        };
        let yaml = serde_yaml::to_string(&example).context("failed to serialize example config")?;
        std::fs::write(&self.user_config_path, yaml)
            .with_context(|| format!("failed to write {}", self.user_config_path.display()))?;
        Ok(())
    }
}

/// Load one config source; malformed or unreadable files count as absent.
fn load_config_file(path: &Path) -> Option<CraftConfig> {
    if !path.exists() {
        return None;
    }
    let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) => {
            log_warn!("failed to read config {}: {e}", path.display());
            return None;
        }
    };
    match serde_yaml::from_str::<CraftConfig>(&text) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            log_warn!("failed to parse config {}: {e}", path.display());
            None
        }
    }
}

/// Expand a leading `~` or `~/` to the home directory.
fn expand_user(raw: &str) -> PathBuf {
    if raw == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = raw.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(raw)
}
