//! In-memory `RiotApi` double with call counters.

use crate::api::client::RiotApi;
use crate::api::models::{AccountDto, MatchDto, MatchInfo, ParticipantDto};
use crate::error::AppError;
use std::cell::Cell;
use std::collections::HashMap;

pub const PUUID: &str = "puuid-me";

pub enum Detail {
    Ok(MatchDto),
    Status(u16),
    Timeout,
}

#[derive(Default)]
pub struct FakeApi {
    /// `None` answers the account lookup with a 404.
    pub puuid: Option<String>,
    pub account_timeout: bool,
    pub match_ids: Vec<String>,
    pub list_status: Option<u16>,
    pub details: HashMap<String, Detail>,

    pub account_calls: Cell<usize>,
    pub list_calls: Cell<usize>,
    pub last_count: Cell<Option<usize>>,
    pub detail_calls: Cell<usize>,
}

impl FakeApi {
    pub fn with_account() -> Self {
        FakeApi {
            puuid: Some(PUUID.to_string()),
            ..Default::default()
        }
    }

    pub fn with_match(mut self, match_id: &str, detail: Detail) -> Self {
        self.match_ids.push(match_id.to_string());
        self.details.insert(match_id.to_string(), detail);
        self
    }

    pub fn total_calls(&self) -> usize {
        self.account_calls.get() + self.list_calls.get() + self.detail_calls.get()
    }
}

impl RiotApi for FakeApi {
    fn get_account(&self, game_name: &str, tag_line: &str) -> Result<AccountDto, AppError> {
        self.account_calls.set(self.account_calls.get() + 1);
        if self.account_timeout {
            return Err(AppError::Timeout("account".to_string()));
        }
        match &self.puuid {
            Some(puuid) => Ok(AccountDto {
                puuid: puuid.clone(),
                game_name: Some(game_name.to_string()),
                tag_line: Some(tag_line.to_string()),
            }),
            None => Err(AppError::Api {
                status: 404,
                body: r#"{"status":{"message":"Data not found","status_code":404}}"#.to_string(),
            }),
        }
    }

    fn get_match_ids(&self, _puuid: &str, count: Option<usize>) -> Result<Vec<String>, AppError> {
        self.list_calls.set(self.list_calls.get() + 1);
        self.last_count.set(count);
        if let Some(status) = self.list_status {
            return Err(AppError::Api {
                status,
                body: String::new(),
            });
        }
        let ids = self.match_ids.iter().cloned();
        Ok(match count {
            Some(n) => ids.take(n).collect(),
            None => ids.take(20).collect(),
        })
    }

    fn get_match(&self, match_id: &str) -> Result<MatchDto, AppError> {
        self.detail_calls.set(self.detail_calls.get() + 1);
        match self.details.get(match_id) {
            Some(Detail::Ok(dto)) => Ok(dto.clone()),
            Some(Detail::Status(status)) => Err(AppError::Api {
                status: *status,
                body: String::new(),
            }),
            Some(Detail::Timeout) => Err(AppError::Timeout(match_id.to_string())),
            None => Err(AppError::Api {
                status: 404,
                body: String::new(),
            }),
        }
    }
}

pub fn participant(puuid: &str, champion: &str, kda: (u32, u32, u32), win: bool) -> ParticipantDto {
    ParticipantDto {
        puuid: puuid.to_string(),
        champion_name: champion.to_string(),
        kills: kda.0,
        deaths: kda.1,
        assists: kda.2,
        win,
        individual_position: Some("MIDDLE".to_string()),
    }
}

/// A ten-player match in which `me` is the fifth participant.
pub fn match_with(me: ParticipantDto) -> MatchDto {
    let mut participants: Vec<ParticipantDto> = (0..9)
        .map(|i| participant(&format!("other-{}", i), "Garen", (1, 1, 1), i % 2 == 0))
        .collect();
    participants.insert(4, me);

    MatchDto {
        info: MatchInfo {
            game_mode: "CLASSIC".to_string(),
            game_creation: Some(1_718_000_000_000),
            game_duration: 1_845,
            participants,
        },
    }
}
