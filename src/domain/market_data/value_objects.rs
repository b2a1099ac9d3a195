use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

/// Candle interval. The review UI works with exactly two of them: a fast
/// execution timeframe and a slow trend timeframe.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    EnumIter,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
pub enum Timeframe {
    #[default]
    #[strum(serialize = "3m")]
    #[serde(rename = "3m")]
    ThreeMinutes,

    #[strum(serialize = "4h")]
    #[serde(rename = "4h")]
    FourHours,
}

impl Timeframe {
    pub fn minutes(&self) -> u32 {
        match self {
            Self::ThreeMinutes => 3,
            Self::FourHours => 240,
        }
    }

    pub fn duration_secs(&self) -> i64 {
        i64::from(self.minutes()) * 60
    }

    /// Human readable name for selectors
    pub fn label(&self) -> &'static str {
        match self {
            Self::ThreeMinutes => "3 minutes",
            Self::FourHours => "4 hours",
        }
    }

    /// Number of bars requested from the kline source for this timeframe
    pub fn default_fetch_limit(&self) -> usize {
        match self {
            Self::ThreeMinutes => 200,
            Self::FourHours => 100,
        }
    }
}
