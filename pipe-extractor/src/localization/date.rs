use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// A point in time, possibly only known to the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWrapper {
    instant: DateTime<Utc>,
    is_approximation: bool,
}

impl DateWrapper {
    /// Approximate dates are normalized to midnight UTC of their day.
    #[must_use]
    pub fn new(instant: DateTime<Utc>, is_approximation: bool) -> Self {
        let instant = if is_approximation {
            instant.date_naive().and_time(NaiveTime::MIN).and_utc()
        } else {
            instant
        };
        Self {
            instant,
            is_approximation,
        }
    }

    #[must_use]
    pub fn exact(instant: DateTime<Utc>) -> Self {
        Self::new(instant, false)
    }

    #[must_use]
    pub const fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    #[must_use]
    pub const fn is_approximation(&self) -> bool {
        self.is_approximation
    }
}
