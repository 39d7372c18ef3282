use std::fmt;

/// Lane assignment as reported by `individualPosition`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    Top,
    Jungle,
    Middle,
    Bottom,
    Utility,
    #[default]
    Unknown,
}

impl Role {
    /// Anything outside the five lanes (including Riot's `Invalid`) becomes `Unknown`.
    pub fn from_api(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "TOP" => Role::Top,
            "JUNGLE" => Role::Jungle,
            "MIDDLE" | "MID" => Role::Middle,
            "BOTTOM" | "BOT" => Role::Bottom,
            "UTILITY" | "SUPPORT" => Role::Utility,
            _ => Role::Unknown,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Role::Top => "Top",
            Role::Jungle => "Jungle",
            Role::Middle => "Mid",
            Role::Bottom => "Bottom",
            Role::Utility => "Support",
            Role::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
