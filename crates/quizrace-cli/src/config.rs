//! Configuration defaults for the quiz runner.
//!
//! Precedence, lowest first: built-in defaults, config file, environment
//! (`QUIZRACE_CSV`, `QUIZRACE_TIME_LIMIT`), command-line flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Name of the config file looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "quizrace.toml";

/// Top-level quizrace configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Question file to load.
    #[serde(default = "default_csv")]
    pub csv: PathBuf,
    /// Overall time limit in seconds; 0 disables it.
    #[serde(default)]
    pub time_limit_secs: u64,
    /// Wait for Enter before the first question.
    #[serde(default = "default_true")]
    pub wait_for_start: bool,
}

fn default_csv() -> PathBuf {
    PathBuf::from("problems.csv")
}

fn default_true() -> bool {
    true
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            csv: default_csv(),
            time_limit_secs: 0,
            wait_for_start: true,
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without an explicit path:
/// 1. `quizrace.toml` in the current directory
/// 2. `~/.config/quizrace/config.toml`
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizConfig::default(),
    };

    apply_env_overrides(&mut config)?;
    Ok(config)
}

pub fn parse_config_str(content: &str) -> Result<QuizConfig> {
    Ok(toml::from_str::<QuizConfig>(content)?)
}

fn apply_env_overrides(config: &mut QuizConfig) -> Result<()> {
    if let Ok(csv) = std::env::var("QUIZRACE_CSV") {
        config.csv = PathBuf::from(csv);
    }
    if let Ok(secs) = std::env::var("QUIZRACE_TIME_LIMIT") {
        config.time_limit_secs = secs
            .trim()
            .parse()
            .with_context(|| format!("invalid QUIZRACE_TIME_LIMIT: '{secs}'"))?;
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizrace"))
}
