use super::value_objects::Timeframe;
use crate::domain::errors::SeriesError;
use serde::{Deserialize, Serialize};

/// One OHLC bar. `time` is unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl Candle {
    pub fn new(time: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self { time, open, high, low, close, volume: None }
    }

    /// `high >= max(open, close)` and `low <= min(open, close)`.
    /// The indicator engine never checks this.
    pub fn is_consistent(&self) -> bool {
        self.high >= self.open.max(self.close) && self.low <= self.open.min(self.close)
    }
}

/// A hole in a series: the bar after `after` arrived later than one
/// timeframe step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Gap {
    pub after: i64,
    pub next: i64,
    pub missing_bars: i64,
}

/// Candles ordered by strictly increasing time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    /// Validate that `candles` are already strictly increasing in time.
    pub fn try_from_sorted(candles: Vec<Candle>) -> Result<Self, SeriesError> {
        validate_series(&candles)?;
        Ok(Self { candles })
    }

    /// Sort by time; on duplicate timestamps the later element of the input wins.
    pub fn from_unsorted(mut candles: Vec<Candle>) -> Self {
        // stable sort keeps input order among equal timestamps
        candles.sort_by_key(|c| c.time);
        let mut deduped: Vec<Candle> = Vec::with_capacity(candles.len());
        for candle in candles {
            match deduped.last_mut() {
                Some(last) if last.time == candle.time => *last = candle,
                _ => deduped.push(candle),
            }
        }
        Self { candles: deduped }
    }

    pub fn as_slice(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn first(&self) -> Option<&Candle> {
        self.candles.first()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// Bars whose high/low do not enclose open and close
    pub fn inconsistent_count(&self) -> usize {
        self.candles.iter().filter(|c| !c.is_consistent()).count()
    }

    /// Places where consecutive bars are further apart than one `timeframe`
    /// step. Positional joins (MACD's default alignment) drift after a gap.
    pub fn find_gaps(&self, timeframe: Timeframe) -> Vec<Gap> {
        let step = timeframe.duration_secs();
        self.candles
            .windows(2)
            .filter_map(|pair| {
                let delta = pair[1].time - pair[0].time;
                (delta > step).then(|| Gap {
                    after: pair[0].time,
                    next: pair[1].time,
                    missing_bars: delta / step - 1,
                })
            })
            .collect()
    }
}

impl AsRef<[Candle]> for CandleSeries {
    fn as_ref(&self) -> &[Candle] {
        &self.candles
    }
}

/// Check strict ascending order of `time`.
pub fn validate_series(candles: &[Candle]) -> Result<(), SeriesError> {
    for (offset, pair) in candles.windows(2).enumerate() {
        if pair[1].time <= pair[0].time {
            return Err(SeriesError::NotStrictlyIncreasing {
                index: offset + 1,
                previous: pair[0].time,
                current: pair[1].time,
            });
        }
    }
    Ok(())
}
