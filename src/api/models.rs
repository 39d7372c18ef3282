use serde::Deserialize;

// Account V1 response
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub puuid: String,
    #[serde(default)]
    pub game_name: Option<String>,
    #[serde(default)]
    pub tag_line: Option<String>,
}

// Match V5 response, reduced to the fields the report reads
#[derive(Debug, Deserialize, Clone)]
pub struct MatchDto {
    pub info: MatchInfo,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    #[serde(default)]
    pub game_mode: String,
    /// Milliseconds since epoch.
    #[serde(default)]
    pub game_creation: Option<i64>,
    /// Seconds.
    #[serde(default)]
    pub game_duration: i64,
    pub participants: Vec<ParticipantDto>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub puuid: String,
    pub champion_name: String,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub win: bool,
    #[serde(default)]
    pub individual_position: Option<String>, // TOP, JUNGLE, MIDDLE, BOTTOM, UTILITY, Invalid
}

// Live Client Data activeplayer response
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ActivePlayerDto {
    #[serde(default)]
    pub summoner_name: String,
    #[serde(default)]
    pub riot_id: Option<String>,
    #[serde(default)]
    pub level: u32,
}
