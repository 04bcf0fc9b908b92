use boxoffice_core::{DuplicateSeatPolicy, UndoMode};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::env;

use crate::report::ReportFormat;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub session: SessionConfig,
    pub users: Vec<UserConfig>,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub scenario: ScenarioConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub id: String,
    pub starts_at: DateTime<Utc>,
    #[serde(default)]
    pub duplicate_seats: DuplicateSeatPolicy,
    pub seats: Vec<SeatConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeatConfig {
    pub id: String,
    pub row: u32,
    pub number: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UserConfig {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct BookingConfig {
    #[serde(default)]
    pub undo_mode: UndoMode,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ReportConfig {
    #[serde(default)]
    pub format: ReportFormat,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub steps: Vec<StepConfig>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Reserve,
    Cancel,
    Purchase,
    Undo,
}

/// One scripted step; `seat` and `user` are required for everything but undo
#[derive(Debug, Deserialize, Clone)]
pub struct StepConfig {
    pub action: Action,
    pub seat: Option<String>,
    pub user: Option<String>,
}

impl Config {
    /// Load the demo configuration, later sources overriding earlier ones:
    /// `config/default.toml` (the shipped session and script),
    /// `config/<RUN_MODE>.toml`, `config/local.toml`, then `BOXOFFICE__*`
    /// variables such as `BOXOFFICE__SESSION__DUPLICATE_SEATS=overwrite` or
    /// `BOXOFFICE__REPORT__FORMAT=json`.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("BOXOFFICE").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Build from a single TOML document, without files or environment.
    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
