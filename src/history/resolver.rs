use crate::api::client::RiotApi;
use crate::error::AppError;

use super::riot_id::RiotId;

/// Maps a Riot ID to the account's PUUID.
pub struct AccountResolver<'a, A: RiotApi> {
    api: &'a A,
}

impl<'a, A: RiotApi> AccountResolver<'a, A> {
    pub fn new(api: &'a A) -> Self {
        AccountResolver { api }
    }

    /// Every failure except a timeout is reported as `AccountNotFound`. No retry.
    pub fn resolve(&self, riot_id: &RiotId) -> Result<String, AppError> {
        match self.api.get_account(&riot_id.game_name, &riot_id.tag_line) {
            Ok(account) => {
                tracing::info!(
                    "resolved {}#{} to {}",
                    account.game_name.as_deref().unwrap_or(&riot_id.game_name),
                    account.tag_line.as_deref().unwrap_or(&riot_id.tag_line),
                    account.puuid
                );
                Ok(account.puuid)
            }
            Err(AppError::Timeout(url)) => Err(AppError::Timeout(url)),
            Err(AppError::Api { status, body }) => {
                tracing::warn!("account lookup for {} failed: HTTP {} {}", riot_id, status, body);
                Err(AppError::AccountNotFound {
                    riot_id: riot_id.to_string(),
                    status: Some(status),
                    body,
                })
            }
            Err(other) => {
                tracing::warn!("account lookup for {} failed: {}", riot_id, other);
                Err(AppError::AccountNotFound {
                    riot_id: riot_id.to_string(),
                    status: None,
                    body: other.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::test_support::{FakeApi, PUUID};

    fn faker() -> RiotId {
        RiotId::parse("Faker#KR1").unwrap()
    }

    #[test]
    fn returns_puuid_on_success() {
        let api = FakeApi::with_account();
        assert_eq!(AccountResolver::new(&api).resolve(&faker()).unwrap(), PUUID);
        assert_eq!(api.account_calls.get(), 1);
    }

    #[test]
    fn non_200_becomes_account_not_found_with_status_and_body() {
        let api = FakeApi::default();

        let err = AccountResolver::new(&api).resolve(&faker()).unwrap_err();

        match err {
            AppError::AccountNotFound {
                riot_id,
                status,
                body,
            } => {
                assert_eq!(riot_id, "Faker#KR1");
                assert_eq!(status, Some(404));
                assert!(body.contains("Data not found"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(api.account_calls.get(), 1);
    }

    #[test]
    fn timeout_stays_distinct_from_not_found() {
        let api = FakeApi {
            account_timeout: true,
            ..FakeApi::with_account()
        };

        let err = AccountResolver::new(&api).resolve(&faker()).unwrap_err();

        assert!(matches!(err, AppError::Timeout(_)));
    }
}
