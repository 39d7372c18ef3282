use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid Riot ID '{0}'. Use format: Name#TAG")]
    InvalidRiotId(String),

    #[error("Account not found: {riot_id} ({}). Check the name and tag", .status.map_or_else(|| "no response".to_string(), |s| format!("HTTP {}", s)))]
    AccountNotFound {
        riot_id: String,
        status: Option<u16>,
        body: String,
    },

    #[error("Match {match_id} unavailable: {reason}")]
    MatchNotFound { match_id: String, reason: String },

    #[error("Riot API error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("JSON parsing error: {0}")]
    Json(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}
