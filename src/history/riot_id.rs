use crate::error::AppError;
use std::fmt;

/// A player's `GameName#TAG` handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiotId {
    pub game_name: String,
    pub tag_line: String,
}

impl RiotId {
    /// Splits on the first `#`. Both halves must be non-empty.
    pub fn parse(input: &str) -> Result<Self, AppError> {
        let (game_name, tag_line) = input
            .split_once('#')
            .ok_or_else(|| AppError::InvalidRiotId(input.to_string()))?;

        let game_name = game_name.trim();
        let tag_line = tag_line.trim();
        if game_name.is_empty() || tag_line.is_empty() {
            return Err(AppError::InvalidRiotId(input.to_string()));
        }

        Ok(RiotId {
            game_name: game_name.to_string(),
            tag_line: tag_line.to_string(),
        })
    }
}

impl fmt::Display for RiotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.game_name, self.tag_line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_first_separator() {
        let id = RiotId::parse("草莓糖水O口O#shuga").unwrap();
        assert_eq!(id.game_name, "草莓糖水O口O");
        assert_eq!(id.tag_line, "shuga");

        let id = RiotId::parse("odd#name#tag").unwrap();
        assert_eq!(id.game_name, "odd");
        assert_eq!(id.tag_line, "name#tag");
    }

    #[test]
    fn trims_whitespace_around_halves() {
        let id = RiotId::parse("  Faker #KR1 ").unwrap();
        assert_eq!(id.to_string(), "Faker#KR1");
    }

    #[test]
    fn rejects_missing_separator() {
        assert!(matches!(
            RiotId::parse("NoSeparatorHere"),
            Err(AppError::InvalidRiotId(input)) if input == "NoSeparatorHere"
        ));
    }

    #[test]
    fn rejects_empty_halves() {
        for input in ["#tag", "name#", "#", " # "] {
            assert!(matches!(RiotId::parse(input), Err(AppError::InvalidRiotId(_))));
        }
    }
}
