use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// The job boards this crate knows how to talk to.
///
/// `Display` yields the human readable board name that ends up in
/// `Job::source_board`, and parsing accepts the same names (case-insensitive).
/// Serde uses the short id tag so configuration files can list boards as
/// `remotive`, `muse`, ...
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Board {
    #[strum(serialize = "Remotive")]
    #[serde(rename = "remotive")]
    Remotive,
    #[strum(serialize = "Jobicy")]
    #[serde(rename = "jobicy")]
    Jobicy,
    #[strum(serialize = "Arbeitnow")]
    #[serde(rename = "arbeitnow")]
    Arbeitnow,
    #[strum(serialize = "The Muse")]
    #[serde(rename = "muse")]
    TheMuse,
    #[strum(serialize = "Adzuna")]
    #[serde(rename = "adzuna")]
    Adzuna,
    #[strum(serialize = "Remote OK")]
    #[serde(rename = "remoteok")]
    RemoteOk,
    #[strum(serialize = "Himalayas")]
    #[serde(rename = "himalayas")]
    Himalayas,
    #[strum(serialize = "Jooble")]
    #[serde(rename = "jooble")]
    Jooble,
}

impl Board {
    /// All boards in their canonical declaration order.
    pub fn all() -> Vec<Board> {
        Board::iter().collect()
    }

    /// Looks up a board by its display name.
    pub fn from_name(name: &str) -> Option<Board> {
        name.trim().parse().ok()
    }

    /// Display name, same as `to_string()`.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Prefix used when building globally unique job ids.
    pub fn tag(&self) -> &'static str {
        match self {
            Board::Remotive => "remotive",
            Board::Jobicy => "jobicy",
            Board::Arbeitnow => "arbeitnow",
            Board::TheMuse => "muse",
            Board::Adzuna => "adzuna",
            Board::RemoteOk => "remoteok",
            Board::Himalayas => "himalayas",
            Board::Jooble => "jooble",
        }
    }

    /// Public landing page, used when a posting carries no usable link.
    pub fn homepage(&self) -> &'static str {
        match self {
            Board::Remotive => "https://remotive.com",
            Board::Jobicy => "https://jobicy.com",
            Board::Arbeitnow => "https://www.arbeitnow.com",
            Board::TheMuse => "https://www.themuse.com/jobs",
            Board::Adzuna => "https://www.adzuna.com/jobs",
            Board::RemoteOk => "https://remoteok.com",
            Board::Himalayas => "https://himalayas.app/jobs",
            Board::Jooble => "https://jooble.org",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Board::Remotive => "https://remotive.com",
            Board::Jobicy => "https://jobicy.com",
            Board::Arbeitnow => "https://www.arbeitnow.com",
            Board::TheMuse => "https://www.themuse.com",
            Board::Adzuna => "https://api.adzuna.com",
            Board::RemoteOk => "https://remoteok.com",
            Board::Himalayas => "https://himalayas.app",
            Board::Jooble => "https://jooble.org",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_parse_use_board_names() {
        assert_eq!(Board::TheMuse.to_string(), "The Muse");
        assert_eq!(Board::RemoteOk.name(), "Remote OK");
        assert_eq!(Board::from_name("the muse"), Some(Board::TheMuse));
        assert_eq!(Board::from_name("Remote OK"), Some(Board::RemoteOk));
        assert_eq!(Board::from_name("Monster"), None);
    }

    #[test]
    fn all_keeps_declaration_order() {
        let boards = Board::all();
        assert_eq!(boards.len(), 8);
        assert_eq!(boards[0], Board::Remotive);
        assert_eq!(boards[4], Board::Adzuna);
        assert_eq!(boards[7], Board::Jooble);
    }

    #[test]
    fn serde_uses_tags() {
        let board: Board = serde_json::from_str("\"muse\"").unwrap();
        assert_eq!(board, Board::TheMuse);
        assert_eq!(serde_json::to_string(&Board::RemoteOk).unwrap(), "\"remoteok\"");
        for board in Board::all() {
            let encoded = serde_json::to_string(&board).unwrap();
            assert_eq!(encoded.trim_matches('"'), board.tag());
        }
    }
}
