//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ServiceId;
use crate::error::{NbportError, NbportResult};

use super::loader::{self, ConfigWarning};

/// Tracker source configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SourceConfig {
    /// Workbook directory of CSV sheets, or a single CSV file
    #[serde(default)]
    pub location: Option<PathBuf>,

    /// Sheet to read (first sheet when unset)
    #[serde(default)]
    pub sheet: Option<String>,
}

/// Summary sheet configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    #[serde(default = "default_summary_sheet")]
    pub sheet: String,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            sheet: default_summary_sheet(),
        }
    }
}

fn default_summary_sheet() -> String {
    "Generated_Colabs".to_string()
}

/// Generated notebook placement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Folder (next to the workbook) receiving notebooks
    #[serde(default = "default_out_folder")]
    pub folder: String,

    /// File name prefix; names are `<template>_<task_id>.ipynb`
    #[serde(default = "default_naming_template")]
    pub naming_template: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            folder: default_out_folder(),
            naming_template: default_naming_template(),
        }
    }
}

fn default_out_folder() -> String {
    "generated_colabs".to_string()
}

fn default_naming_template() -> String {
    "Gemini_Apps_ID_Data_Port".to_string()
}

/// Payload directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadsConfig {
    #[serde(default = "default_payload_dir")]
    pub dir: PathBuf,
}

impl Default for PayloadsConfig {
    fn default() -> Self {
        Self {
            dir: default_payload_dir(),
        }
    }
}

fn default_payload_dir() -> PathBuf {
    PathBuf::from("payloads")
}

/// Per-service overrides
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServicesConfig {
    /// Default dataset path per service
    #[serde(default)]
    pub default_db: BTreeMap<ServiceId, String>,
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub const NAMES: &'static [&'static str] = &["error", "warn", "info", "debug", "trace"];

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }

    /// Directive for `tracing_subscriber::EnvFilter`
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LogConfig {
    #[serde(default)]
    pub level: LogLevel,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub summary: SummaryConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub payloads: PayloadsConfig,

    #[serde(default)]
    pub services: ServicesConfig,

    #[serde(default)]
    pub log: LogConfig,
}

/// Values given on the command line; `None` leaves the layer below intact
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub source: Option<PathBuf>,
    pub sheet: Option<String>,
    pub out_folder: Option<String>,
    pub payload_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> NbportResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> NbportResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load project config, else user config, else defaults; then env
    pub fn load_layered(project_dir: &Path) -> NbportResult<(Self, Vec<ConfigWarning>)> {
        loader::load_layered(project_dir)
    }

    /// Apply environment variable overrides (NBPORT_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Apply command-line values (highest priority)
    pub fn with_cli_overrides(mut self, cli: &CliOverrides) -> Self {
        if let Some(source) = &cli.source {
            self.source.location = Some(source.clone());
        }
        if let Some(sheet) = &cli.sheet {
            self.source.sheet = Some(sheet.clone());
        }
        if let Some(folder) = &cli.out_folder {
            self.output.folder = folder.clone();
        }
        if let Some(dir) = &cli.payload_dir {
            self.payloads.dir = dir.clone();
        }
        self
    }

    /// The required source location
    pub fn source_location(&self) -> NbportResult<&Path> {
        self.source
            .location
            .as_deref()
            .ok_or(NbportError::MissingSetting {
                key: "source.location",
                env: "NBPORT_SOURCE",
                section: "source",
            })
    }
}
