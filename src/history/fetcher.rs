use crate::analysis::match_stats::MatchRecord;
use crate::analysis::role::Role;
use crate::api::client::RiotApi;
use crate::api::models::{MatchDto, ParticipantDto};
use crate::error::AppError;
use chrono::{DateTime, Utc};

pub struct MatchHistoryFetcher<'a, A: RiotApi> {
    api: &'a A,
}

impl<'a, A: RiotApi> MatchHistoryFetcher<'a, A> {
    pub fn new(api: &'a A) -> Self {
        MatchHistoryFetcher { api }
    }

    /// Most recent first, exactly as the API returns them. `None` leaves the API
    /// default of 20. An empty list is not an error.
    pub fn list_recent_matches(
        &self,
        puuid: &str,
        limit: Option<usize>,
    ) -> Result<Vec<String>, AppError> {
        let ids = self.api.get_match_ids(puuid, limit)?;
        tracing::info!("found {} recent matches", ids.len());
        Ok(ids)
    }

    /// Any failure, including a missing participant, is reported as `MatchNotFound` so the
    /// caller can skip the match.
    pub fn fetch_match_detail(&self, match_id: &str, puuid: &str) -> Result<MatchRecord, AppError> {
        let dto = self
            .api
            .get_match(match_id)
            .map_err(|e| AppError::MatchNotFound {
                match_id: match_id.to_string(),
                reason: e.to_string(),
            })?;

        let participant = dto
            .info
            .participants
            .iter()
            .find(|p| p.puuid == puuid)
            .ok_or_else(|| AppError::MatchNotFound {
                match_id: match_id.to_string(),
                reason: "player is not a participant".to_string(),
            })?;

        Ok(project(match_id, &dto, participant))
    }
}

fn project(match_id: &str, dto: &MatchDto, participant: &ParticipantDto) -> MatchRecord {
    MatchRecord {
        match_id: match_id.to_string(),
        champion_name: participant.champion_name.clone(),
        kills: participant.kills,
        deaths: participant.deaths,
        assists: participant.assists,
        win: participant.win,
        game_mode: dto.info.game_mode.clone(),
        role: participant
            .individual_position
            .as_deref()
            .map(Role::from_api)
            .unwrap_or_default(),
        played_at: dto
            .info
            .game_creation
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        duration_secs: dto.info.game_duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::test_support::{match_with, participant, Detail, FakeApi, PUUID};

    #[test]
    fn list_passes_limit_through() {
        let api = FakeApi::with_account()
            .with_match("M1", Detail::Status(500))
            .with_match("M2", Detail::Status(500));
        let fetcher = MatchHistoryFetcher::new(&api);

        assert_eq!(fetcher.list_recent_matches(PUUID, Some(5)).unwrap(), ["M1", "M2"]);
        assert_eq!(api.last_count.get(), Some(5));

        fetcher.list_recent_matches(PUUID, None).unwrap();
        assert_eq!(api.last_count.get(), None);
    }

    #[test]
    fn empty_list_is_not_an_error() {
        let api = FakeApi::with_account();
        let ids = MatchHistoryFetcher::new(&api).list_recent_matches(PUUID, Some(5)).unwrap();
        assert!(ids.is_empty());
    }

    #[test]
    fn list_failure_propagates() {
        let api = FakeApi {
            list_status: Some(403),
            ..FakeApi::with_account()
        };
        let err = MatchHistoryFetcher::new(&api)
            .list_recent_matches(PUUID, Some(5))
            .unwrap_err();
        assert!(matches!(err, AppError::Api { status: 403, .. }));
    }

    #[test]
    fn detail_projects_the_requesting_player() {
        let me = participant(PUUID, "Ahri", (5, 2, 3), true);
        let api = FakeApi::with_account().with_match("TW2_1", Detail::Ok(match_with(me)));

        let record = MatchHistoryFetcher::new(&api)
            .fetch_match_detail("TW2_1", PUUID)
            .unwrap();

        assert_eq!(record.match_id, "TW2_1");
        assert_eq!(record.champion_name, "Ahri");
        assert_eq!((record.kills, record.deaths, record.assists), (5, 2, 3));
        assert!(record.win);
        assert_eq!(record.game_mode, "CLASSIC");
        assert_eq!(record.role, Role::Middle);
        assert_eq!(record.duration_secs, 1_845);
        assert_eq!(
            record.played_at.map(|t| t.timestamp_millis()),
            Some(1_718_000_000_000)
        );
    }

    #[test]
    fn missing_position_defaults_to_unknown() {
        let mut me = participant(PUUID, "Ahri", (1, 1, 1), true);
        me.individual_position = None;
        let api = FakeApi::with_account().with_match("M", Detail::Ok(match_with(me)));

        let record = MatchHistoryFetcher::new(&api).fetch_match_detail("M", PUUID).unwrap();

        assert_eq!(record.role, Role::Unknown);
    }

    #[test]
    fn absent_participant_is_not_found() {
        let stranger = participant("someone-else", "Ahri", (1, 1, 1), true);
        let api = FakeApi::with_account().with_match("M", Detail::Ok(match_with(stranger)));

        let err = MatchHistoryFetcher::new(&api)
            .fetch_match_detail("M", PUUID)
            .unwrap_err();

        assert!(matches!(err, AppError::MatchNotFound { match_id, .. } if match_id == "M"));
    }

    #[test]
    fn non_200_and_timeout_are_not_found() {
        let api = FakeApi::with_account()
            .with_match("X", Detail::Status(500))
            .with_match("Y", Detail::Timeout);
        let fetcher = MatchHistoryFetcher::new(&api);

        assert!(matches!(
            fetcher.fetch_match_detail("X", PUUID),
            Err(AppError::MatchNotFound { .. })
        ));
        assert!(matches!(
            fetcher.fetch_match_detail("Y", PUUID),
            Err(AppError::MatchNotFound { .. })
        ));
    }
}
