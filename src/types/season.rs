//! Season identifiers.
//!
//! A campaign calendar is a totally ordered sequence of `{year, season}`
//! pairs. Chronology validation leans on [`SeasonId::successor`]: a rollover
//! may only target the season immediately following the last applied one.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four recurring calendar periods, in year order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// First season of the year.
    Winter,
    /// Second season.
    Spring,
    /// Third season.
    Summer,
    /// Fourth season.
    Autumn,
}

impl Season {
    /// Parse season from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "winter" => Some(Self::Winter),
            "spring" => Some(Self::Spring),
            "summer" => Some(Self::Summer),
            "autumn" | "fall" => Some(Self::Autumn),
            _ => None,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Winter => write!(f, "winter"),
            Self::Spring => write!(f, "spring"),
            Self::Summer => write!(f, "summer"),
            Self::Autumn => write!(f, "autumn"),
        }
    }
}

/// A specific season of a specific year, totally ordered.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SeasonId {
    /// Campaign year.
    pub year: i32,
    /// Season within the year.
    pub season: Season,
}

impl SeasonId {
    /// Create a season id.
    pub fn new(year: i32, season: Season) -> Self {
        Self { year, season }
    }

    /// The season immediately following this one.
    pub fn successor(&self) -> SeasonId {
        match self.season {
            Season::Winter => Self::new(self.year, Season::Spring),
            Season::Spring => Self::new(self.year, Season::Summer),
            Season::Summer => Self::new(self.year, Season::Autumn),
            Season::Autumn => Self::new(self.year + 1, Season::Winter),
        }
    }

    /// Parse from the `"<year>-<season>"` form, e.g. `"1165-spring"`.
    pub fn from_str(s: &str) -> Option<Self> {
        let (year, season) = s.trim().split_once('-')?;
        Some(Self {
            year: year.parse().ok()?,
            season: Season::from_str(season)?,
        })
    }
}

impl fmt::Display for SeasonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.season)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_order() {
        let a = SeasonId::new(1165, Season::Autumn);
        let b = SeasonId::new(1166, Season::Winter);
        assert!(a < b);
        assert!(SeasonId::new(1165, Season::Winter) < SeasonId::new(1165, Season::Spring));
    }

    #[test]
    fn test_successor_wraps_year() {
        let a = SeasonId::new(1165, Season::Autumn);
        assert_eq!(a.successor(), SeasonId::new(1166, Season::Winter));
        assert_eq!(
            SeasonId::new(1165, Season::Spring).successor(),
            SeasonId::new(1165, Season::Summer)
        );
    }

    #[test]
    fn test_display_round_trip() {
        let a = SeasonId::new(1165, Season::Summer);
        assert_eq!(a.to_string(), "1165-summer");
        assert_eq!(SeasonId::from_str("1165-summer"), Some(a));
        assert_eq!(SeasonId::from_str("garbage"), None);
    }
}
