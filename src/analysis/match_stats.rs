use super::role::Role;
use chrono::{DateTime, Utc};

/// One player's participation in one match.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub match_id: String,
    pub champion_name: String,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub win: bool,
    pub game_mode: String,
    pub role: Role,
    pub played_at: Option<DateTime<Utc>>,
    pub duration_secs: i64,
}

impl MatchRecord {
    /// (kills + assists) / deaths, with deaths floored to 1.
    pub fn kda(&self) -> f64 {
        (f64::from(self.kills) + f64::from(self.assists)) / f64::from(self.deaths.max(1))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChampionUsage {
    pub champion_name: String,
    pub games: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoleUsage {
    pub role: Role,
    pub games: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateReport {
    pub total_games: usize,
    pub wins: usize,
    /// 0-100, one decimal.
    pub win_rate_percent: f64,
    /// Two decimals.
    pub average_kda: f64,
    /// At most three, most played first.
    pub top_champions: Vec<ChampionUsage>,
    pub top_role: RoleUsage,
}

impl AggregateReport {
    pub const TOP_CHAMPIONS: usize = 3;

    /// Returns `None` for an empty history instead of dividing by zero.
    ///
    /// Ties in champion and role counts keep the order in which each value first appears
    /// in `records`.
    pub fn aggregate(records: &[MatchRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let total = records.len();
        let mut wins = 0;
        let mut kda_sum = 0.0;
        for record in records {
            if record.win {
                wins += 1;
            }
            kda_sum += record.kda();
        }

        let top_champions = count_in_first_seen_order(records.iter().map(|r| r.champion_name.as_str()))
            .into_iter()
            .take(Self::TOP_CHAMPIONS)
            .map(|(name, games)| ChampionUsage {
                champion_name: name.to_string(),
                games,
            })
            .collect();

        let top_role = count_in_first_seen_order(records.iter().map(|r| r.role))
            .into_iter()
            .next()
            .map(|(role, games)| RoleUsage { role, games })
            .unwrap_or(RoleUsage {
                role: Role::Unknown,
                games: 0,
            });

        Some(AggregateReport {
            total_games: total,
            wins,
            win_rate_percent: round_to(100.0 * wins as f64 / total as f64, 1),
            average_kda: round_to(kda_sum / total as f64, 2),
            top_champions,
            top_role,
        })
    }

    pub fn losses(&self) -> usize {
        self.total_games - self.wins
    }
}

/// Occurrence counts sorted by count descending. The sort is stable, so equal counts stay
/// in first-occurrence order.
fn count_in_first_seen_order<K, I>(items: I) -> Vec<(K, usize)>
where
    K: PartialEq,
    I: IntoIterator<Item = K>,
{
    let mut counts: Vec<(K, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(seen, _)| *seen == item) {
            Some((_, count)) => *count += 1,
            None => counts.push((item, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
