use crate::config::Config;
use crate::error::AppError;
use governor::{
    clock::{Clock, DefaultClock},
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use serde::de::DeserializeOwned;
use std::io;
use std::thread;
use std::time::Duration;
use ureq::{Agent, AgentBuilder};

use super::endpoints;
use super::models::*;

pub const USER_AGENT: &str = concat!("lol_track/", env!("CARGO_PKG_VERSION"));

/// The three Riot endpoints the tracker consumes. The history pipeline is generic over
/// this trait so tests can count calls without touching the network.
pub trait RiotApi {
    fn get_account(&self, game_name: &str, tag_line: &str) -> Result<AccountDto, AppError>;

    fn get_match_ids(&self, puuid: &str, count: Option<usize>) -> Result<Vec<String>, AppError>;

    fn get_match(&self, match_id: &str) -> Result<MatchDto, AppError>;
}

pub struct RiotApiClient {
    config: Config,
    api_key: String,
    agent: Agent,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    clock: DefaultClock,
}

impl RiotApiClient {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let api_key = config.require_api_key()?.to_string();
        let agent = build_agent(config.timeout);
        let rate_limiter = RateLimiter::direct(Quota::per_second(config.requests_per_second));
        Ok(RiotApiClient {
            config,
            api_key,
            agent,
            rate_limiter,
            clock: DefaultClock::default(),
        })
    }

    /// Blocks until the token bucket grants a request slot.
    fn wait_for_slot(&self) {
        while let Err(not_until) = self.rate_limiter.check() {
            thread::sleep(not_until.wait_time_from(self.clock.now()));
        }
    }

    fn execute_request<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        self.wait_for_slot();
        tracing::debug!("GET {}", url);

        let response = self
            .agent
            .get(url)
            .set("X-Riot-Token", &self.api_key)
            .call();

        match response {
            Ok(resp) => {
                let body = resp.into_string().map_err(|e| read_error(url, e))?;
                serde_json::from_str(&body).map_err(|e| AppError::Json(e.to_string()))
            }
            Err(ureq::Error::Status(status, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                tracing::debug!("GET {} returned {}", url, status);
                Err(AppError::Api { status, body })
            }
            Err(ureq::Error::Transport(transport)) => Err(transport_error(url, &transport)),
        }
    }
}

impl RiotApi for RiotApiClient {
    fn get_account(&self, game_name: &str, tag_line: &str) -> Result<AccountDto, AppError> {
        let url = endpoints::account_by_riot_id(&self.config.region, game_name, tag_line);
        self.execute_request(&url)
    }

    fn get_match_ids(&self, puuid: &str, count: Option<usize>) -> Result<Vec<String>, AppError> {
        let url = endpoints::match_ids_by_puuid(&self.config.routing, puuid, count);
        self.execute_request(&url)
    }

    fn get_match(&self, match_id: &str) -> Result<MatchDto, AppError> {
        let url = endpoints::match_by_id(&self.config.routing, match_id);
        self.execute_request(&url)
    }
}

pub(crate) fn build_agent(timeout: Duration) -> Agent {
    AgentBuilder::new()
        .timeout_connect(timeout)
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

pub(crate) fn transport_error(url: &str, transport: &ureq::Transport) -> AppError {
    if is_timeout(transport) {
        AppError::Timeout(url.to_string())
    } else {
        AppError::Http(transport.to_string())
    }
}

pub(crate) fn read_error(url: &str, err: io::Error) -> AppError {
    if is_timeout_kind(err.kind()) {
        AppError::Timeout(url.to_string())
    } else {
        AppError::Http(err.to_string())
    }
}

pub(crate) fn is_timeout(transport: &ureq::Transport) -> bool {
    std::error::Error::source(transport)
        .and_then(|source| source.downcast_ref::<io::Error>())
        .is_some_and(|e| is_timeout_kind(e.kind()))
}

fn is_timeout_kind(kind: io::ErrorKind) -> bool {
    matches!(kind, io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
}
