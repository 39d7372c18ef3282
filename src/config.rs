use crate::error::AppError;
use serde::Deserialize;
use std::env;
use std::fs;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_REGION: &str = "asia";
const DEFAULT_ROUTING: &str = "sea";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_REQUESTS_PER_SECOND: u32 = 20;
pub const DEFAULT_LIVE_CLIENT_URL: &str = "https://127.0.0.1:2999/liveclientdata/activeplayer";

/// Clusters serving account-v1.
const ACCOUNT_CLUSTERS: &[&str] = &["americas", "asia", "europe"];
/// Clusters serving match-v5.
const MATCH_CLUSTERS: &[&str] = &["americas", "asia", "europe", "sea"];

#[derive(Debug, Clone)]
pub struct Config {
    /// Only needed for Riot API calls; the live client probe runs without it.
    pub api_key: Option<String>,
    /// Routing cluster for account lookups.
    pub region: String,
    /// Routing cluster for match lookups.
    pub routing: String,
    pub ddragon_version: Option<String>,
    pub timeout: Duration,
    pub requests_per_second: NonZeroU32,
    pub live_client_url: String,
}

/// On-disk `config.json` layout. Every key is optional; env and CLI fill the gaps.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub api_key: Option<String>,
    pub region: Option<String>,
    pub routing: Option<String>,
    pub ddragon_version: Option<String>,
    pub timeout_secs: Option<u64>,
    pub requests_per_second: Option<u32>,
    pub live_client_url: Option<String>,
}

/// Values given on the command line. They win over file and environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub region: Option<String>,
    pub routing: Option<String>,
}

impl ConfigFile {
    pub fn read(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            AppError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}

impl Config {
    pub fn load(path: Option<&Path>, overrides: Overrides) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let file = match path {
            Some(path) => ConfigFile::read(path)?,
            None => match Self::default_paths().into_iter().find(|p| p.is_file()) {
                Some(found) => {
                    tracing::debug!("using config file {}", found.display());
                    ConfigFile::read(&found)?
                }
                None => ConfigFile::default(),
            },
        };

        Self::from_sources(file, |key| env::var(key).ok(), overrides)
    }

    fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.json")];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".lol_track").join("config.json"));
        }
        paths
    }

    /// Merge file, environment and CLI values (later wins) and validate the result.
    pub fn from_sources<F>(file: ConfigFile, env: F, overrides: Overrides) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = env("RIOT_API_KEY")
            .or(file.api_key)
            .filter(|k| !k.trim().is_empty());

        let region = overrides
            .region
            .or_else(|| env("RIOT_ACCOUNT_REGION"))
            .or(file.region)
            .unwrap_or_else(|| DEFAULT_REGION.to_string())
            .to_lowercase();

        let routing = overrides
            .routing
            .or_else(|| env("RIOT_MATCH_ROUTING"))
            .or(file.routing)
            .unwrap_or_else(|| DEFAULT_ROUTING.to_string())
            .to_lowercase();

        let ddragon_version = env("DDRAGON_VERSION").or(file.ddragon_version);

        let timeout_secs = match env("RIOT_TIMEOUT_SECS") {
            Some(raw) => parse_number::<u64>("RIOT_TIMEOUT_SECS", &raw)?,
            None => file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        };
        if timeout_secs == 0 {
            return Err(AppError::Config("timeout must be at least 1 second".to_string()));
        }

        let requests_per_second = match env("RIOT_RATE_LIMIT_PER_SECOND") {
            Some(raw) => parse_number::<u32>("RIOT_RATE_LIMIT_PER_SECOND", &raw)?,
            None => file.requests_per_second.unwrap_or(DEFAULT_REQUESTS_PER_SECOND),
        };
        let requests_per_second = NonZeroU32::new(requests_per_second).ok_or_else(|| {
            AppError::Config("requests per second must be greater than zero".to_string())
        })?;

        let live_client_url = env("LIVE_CLIENT_URL")
            .or(file.live_client_url)
            .unwrap_or_else(|| DEFAULT_LIVE_CLIENT_URL.to_string());

        if !ACCOUNT_CLUSTERS.contains(&region.as_str()) {
            return Err(AppError::Config(format!(
                "unknown account region '{}' (expected one of: {})",
                region,
                ACCOUNT_CLUSTERS.join(", ")
            )));
        }
        if !MATCH_CLUSTERS.contains(&routing.as_str()) {
            return Err(AppError::Config(format!(
                "unknown match routing '{}' (expected one of: {})",
                routing,
                MATCH_CLUSTERS.join(", ")
            )));
        }

        Ok(Config {
            api_key,
            region,
            routing,
            ddragon_version,
            timeout: Duration::from_secs(timeout_secs),
            requests_per_second,
            live_client_url,
        })
    }

    pub fn require_api_key(&self) -> Result<&str, AppError> {
        self.api_key.as_deref().ok_or_else(|| {
            AppError::Config("RIOT_API_KEY not found in environment, .env or config.json".to_string())
        })
    }
}

fn parse_number<T: FromStr>(key: &str, raw: &str) -> Result<T, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Config(format!("{} must be a number, got '{}'", key, raw)))
}
