use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::app::FeedbricksError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkKind {
    Facebook,
    Twitter,
    Rss,
}

impl NetworkKind {
    pub const ALL: [NetworkKind; 3] =
        [NetworkKind::Facebook, NetworkKind::Twitter, NetworkKind::Rss];

    /// Config identifier, as written in `[[networks]] name = "..."`.
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkKind::Facebook => "facebook",
            NetworkKind::Twitter => "twitter",
            NetworkKind::Rss => "rss",
        }
    }

    /// Human label shown as an item's source.
    pub fn label(&self) -> &'static str {
        match self {
            NetworkKind::Facebook => "Facebook",
            NetworkKind::Twitter => "Twitter",
            NetworkKind::Rss => "RSS",
        }
    }
}

impl fmt::Display for NetworkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkKind {
    type Err = FeedbricksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        NetworkKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| FeedbricksError::UnknownNetwork(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("RSS".parse::<NetworkKind>().unwrap(), NetworkKind::Rss);
        assert_eq!(" twitter ".parse::<NetworkKind>().unwrap(), NetworkKind::Twitter);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "myspace".parse::<NetworkKind>().unwrap_err();
        assert!(matches!(err, FeedbricksError::UnknownNetwork(ref n) if n == "myspace"));
    }

    #[test]
    fn test_labels() {
        assert_eq!(NetworkKind::Rss.label(), "RSS");
        assert_eq!(NetworkKind::Facebook.to_string(), "facebook");
    }
}
