use crate::error::AppError;
use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use ureq::Agent;

use super::client::{build_agent, read_error, transport_error};
use super::endpoints;

/// Patch used when no version is configured and the versions list is unreachable.
pub const FALLBACK_VERSION: &str = "14.13.1";

const MAX_PORTRAIT_BYTES: u64 = 1024 * 1024;

/// Data Dragon champion portraits.
pub struct PortraitFetcher {
    agent: Agent,
    version: String,
}

impl PortraitFetcher {
    /// Uses `configured` when set, otherwise asks Data Dragon for the latest patch.
    pub fn new(configured: Option<String>, timeout: Duration) -> Self {
        let agent = build_agent(timeout);
        let version = match configured {
            Some(version) => version,
            None => latest_version(&agent).unwrap_or_else(|e| {
                tracing::warn!("could not fetch Data Dragon versions ({}), using {}", e, FALLBACK_VERSION);
                FALLBACK_VERSION.to_string()
            }),
        };

        PortraitFetcher { agent, version }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn portrait_url(&self, champion_name: &str) -> String {
        endpoints::champion_portrait(&self.version, champion_name)
    }

    pub fn download(&self, champion_name: &str) -> Result<Vec<u8>, AppError> {
        let url = self.portrait_url(champion_name);
        tracing::debug!("GET {}", url);

        let resp = self.agent.get(&url).call().map_err(|e| match e {
            ureq::Error::Status(status, resp) => AppError::Api {
                status,
                body: resp.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(transport) => transport_error(&url, &transport),
        })?;

        let mut bytes = Vec::new();
        resp.into_reader()
            .take(MAX_PORTRAIT_BYTES)
            .read_to_end(&mut bytes)
            .map_err(|e| read_error(&url, e))?;
        Ok(bytes)
    }

    /// Saves one PNG per distinct champion into `dir`. Failures are logged and skipped so
    /// the report still renders, just without that portrait.
    pub fn save_all<'a, I>(&self, champions: I, dir: &Path) -> BTreeMap<String, PathBuf>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut saved = BTreeMap::new();

        if let Err(e) = fs::create_dir_all(dir) {
            tracing::warn!("cannot create portrait directory {}: {}", dir.display(), e);
            return saved;
        }

        for champion in champions {
            if saved.contains_key(champion) {
                continue;
            }
            if !is_safe_file_stem(champion) {
                tracing::warn!("portrait for {:?} not saved: not a plain file name", champion);
                continue;
            }
            let path = dir.join(format!("{}.png", champion));
            let result = self
                .download(champion)
                .and_then(|bytes| fs::write(&path, bytes).map_err(AppError::from));
            match result {
                Ok(()) => {
                    saved.insert(champion.to_string(), path);
                }
                Err(e) => tracing::warn!("portrait for {} not saved: {}", champion, e),
            }
        }

        saved
    }
}

/// Champion names come from match payloads; keep them from escaping the portrait directory.
fn is_safe_file_stem(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && !name.contains("..")
        && !name.contains(['/', '\\', '\0'])
}

fn latest_version(agent: &Agent) -> Result<String, AppError> {
    let url = endpoints::ddragon_versions();
    let body = agent
        .get(&url)
        .call()
        .map_err(|e| match e {
            ureq::Error::Status(status, _) => AppError::Api {
                status,
                body: String::new(),
            },
            ureq::Error::Transport(transport) => transport_error(&url, &transport),
        })?
        .into_string()
        .map_err(|e| read_error(&url, e))?;

    let versions: Vec<String> =
        serde_json::from_str(&body).map_err(|e| AppError::Json(e.to_string()))?;
    versions
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Json("empty Data Dragon versions list".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn champion_names_with_path_parts_are_rejected() {
        assert!(is_safe_file_stem("Ahri"));
        assert!(is_safe_file_stem("MonkeyKing"));
        assert!(!is_safe_file_stem("../evil"));
        assert!(!is_safe_file_stem(".."));
        assert!(!is_safe_file_stem("a/b"));
        assert!(!is_safe_file_stem("a\\b"));
        assert!(!is_safe_file_stem(""));
    }

    #[test]
    fn unsafe_names_are_never_written() {
        let dir = std::env::temp_dir().join(format!("lol_track_portraits_{}", std::process::id()));
        let fetcher = PortraitFetcher::new(Some("15.1.1".to_string()), Duration::from_secs(1));

        let saved = fetcher.save_all(["../escape", "/etc/passwd"], &dir);

        assert!(saved.is_empty());
        assert!(!dir.parent().unwrap().join("escape.png").exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn configured_version_skips_lookup() {
        let fetcher = PortraitFetcher::new(Some("15.1.1".to_string()), Duration::from_secs(1));
        assert_eq!(fetcher.version(), "15.1.1");
        assert_eq!(
            fetcher.portrait_url("Ahri"),
            "https://ddragon.leagueoflegends.com/cdn/15.1.1/img/champion/Ahri.png"
        );
    }
}
