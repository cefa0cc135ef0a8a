//! Runtime configuration: a RON file with every field defaulted, then CLI overrides.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use alertfeed_core::{DashboardSettings, UserId};
use alertfeed_engine::GatewaySettings;
use anyhow::Context;
use clap::Parser;
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_PATH: &str = "alertfeed.ron";

#[derive(Debug, Parser)]
#[command(name = "alertfeed", version, about = "Console client for the job and exam alert dashboard")]
pub struct Args {
    #[arg(long, short = 'c', value_name = "FILE", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
    #[arg(long, value_name = "URL")]
    pub api_base_url: Option<String>,
    #[arg(long)]
    pub user_id: Option<UserId>,
    #[arg(long, value_name = "DIR")]
    pub state_dir: Option<PathBuf>,
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
    #[arg(long, value_enum)]
    pub log_destination: Option<LogDestination>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub user_id: Option<UserId>,
    pub per_page: u32,
    pub poll_interval_secs: u64,
    pub draft_interval_secs: u64,
    pub toast_fade_ms: u64,
    pub toast_remove_ms: u64,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub state_dir: PathBuf,
    pub log_level: String,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            user_id: None,
            per_page: 20,
            poll_interval_secs: 5 * 60,
            draft_interval_secs: 30,
            toast_fade_ms: 2500,
            toast_remove_ms: 3000,
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            state_dir: PathBuf::from(".alertfeed"),
            log_level: "info".to_string(),
            log_destination: LogDestination::File,
            log_file: PathBuf::from("alertfeed.log"),
        }
    }
}

impl AppConfig {
    /// Reads `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => {
                return Err(err).with_context(|| format!("reading config {}", path.display()))
            }
        };
        ron::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Loads the file named by `args` and applies the flag overrides.
    pub fn resolve(args: &Args) -> anyhow::Result<Self> {
        let mut config = Self::load(&args.config)?;
        config.apply(args);
        Ok(config)
    }

    pub fn apply(&mut self, args: &Args) {
        if let Some(url) = &args.api_base_url {
            self.api_base_url = url.clone();
        }
        if let Some(user_id) = args.user_id {
            self.user_id = Some(user_id);
        }
        if let Some(dir) = &args.state_dir {
            self.state_dir = dir.clone();
        }
        if let Some(level) = &args.log_level {
            self.log_level = level.clone();
        }
        if let Some(destination) = args.log_destination {
            self.log_destination = destination;
        }
    }

    pub fn dashboard_settings(&self) -> DashboardSettings {
        DashboardSettings {
            per_page: self.per_page.max(1),
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            draft_interval: Duration::from_secs(self.draft_interval_secs),
            toast_fade: Duration::from_millis(self.toast_fade_ms),
            toast_remove: Duration::from_millis(self.toast_remove_ms),
        }
    }

    pub fn gateway_settings(&self) -> GatewaySettings {
        GatewaySettings {
            base_url: self.api_base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}
