//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{NbportError, NbportResult};

use super::env_validator::{nearest, EnvVarValidator};
use super::types::{Config, LogLevel};

/// Project config file name, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "nbport.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> NbportResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| NbportError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(&content, &key),
                suggestion: nearest(&key, KNOWN_KEYS, 2).map(str::to_string),
                file: path.to_path_buf(),
                key,
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load the first config file found, then apply environment overrides
///
/// Project config (`nbport.toml` in `project_dir`) wins over the user
/// config; files are not merged.
pub fn load_layered(project_dir: &Path) -> NbportResult<(Config, Vec<ConfigWarning>)> {
    let candidates = [
        Some(project_dir.join(PROJECT_CONFIG_FILE)),
        user_config_dir().map(|d| d.join("nbport").join("config.toml")),
    ];

    for path in candidates.into_iter().flatten() {
        if path.is_file() {
            let (config, warnings) = load_with_warnings(&path)?;
            return Ok((with_env_overrides(config), warnings));
        }
    }

    Ok((with_env_overrides(Config::default()), Vec::new()))
}

/// Apply environment variable overrides (NBPORT_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_env_overrides_from(config, |key| std::env::var(key).ok(), &mut std::io::stderr())
}

/// Apply overrides from an arbitrary variable lookup
pub fn with_env_overrides_from<F, W>(mut config: Config, lookup: F, warnings: &mut W) -> Config
where
    F: Fn(&str) -> Option<String>,
    W: std::io::Write,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(source) = non_empty("NBPORT_SOURCE") {
        config.source.location = Some(PathBuf::from(source));
    }
    if let Some(sheet) = non_empty("NBPORT_SOURCE_SHEET") {
        config.source.sheet = Some(sheet);
    }
    if let Some(sheet) = non_empty("NBPORT_SUMMARY_SHEET") {
        config.summary.sheet = sheet;
    }
    if let Some(folder) = non_empty("NBPORT_OUT_FOLDER") {
        config.output.folder = folder;
    }
    if let Some(template) = non_empty("NBPORT_NAMING_TEMPLATE") {
        config.output.naming_template = template;
    }
    if let Some(dir) = non_empty("NBPORT_PAYLOAD_DIR") {
        config.payloads.dir = PathBuf::from(dir);
    }
    if let Some(level) = non_empty("NBPORT_LOG_LEVEL") {
        let validator = EnvVarValidator::new("NBPORT_LOG_LEVEL", LogLevel::NAMES);
        config.log.level =
            validator.parse_with_writer(&level, LogLevel::parse, config.log.level, warnings);
    }

    config
}

/// `$XDG_CONFIG_HOME`, else the platform config directory
fn user_config_dir() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

const KNOWN_KEYS: &[&str] = &[
    "source",
    "location",
    "sheet",
    "summary",
    "output",
    "folder",
    "naming_template",
    "payloads",
    "dir",
    "services",
    "default_db",
    "log",
    "level",
];
