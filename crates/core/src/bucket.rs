//! Time buckets: the `(date, hour, minute)` grouping key shared by every
//! aggregation row.
//!
//! A bucket's label always carries the full date, so sorting labels as
//! strings gives the same order as sorting buckets chronologically, even for
//! windows spanning several days.

use std::fmt;

use crate::error::CoreError;
use crate::types::SampleDate;

/// A discrete time slot used as a grouping key.
///
/// Field order matters: the derived `Ord` compares date, then hour, then
/// minute, which is chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeBucket {
    date: SampleDate,
    hour: u8,
    minute: u8,
}

impl TimeBucket {
    /// Build a bucket from raw column values.
    ///
    /// Storage keeps hour and minute as `SMALLINT`, so this takes `i16` and
    /// rejects anything outside `0..=23` / `0..=59`.
    pub fn new(date: SampleDate, hour: i16, minute: i16) -> Result<Self, CoreError> {
        let hour = u8::try_from(hour)
            .ok()
            .filter(|h| *h < 24)
            .ok_or_else(|| CoreError::Validation(format!("hour out of range: {hour}")))?;
        let minute = u8::try_from(minute)
            .ok()
            .filter(|m| *m < 60)
            .ok_or_else(|| CoreError::Validation(format!("minute out of range: {minute}")))?;
        Ok(Self { date, hour, minute })
    }

    /// Top-of-hour bucket.
    pub fn hourly(date: SampleDate, hour: i16) -> Result<Self, CoreError> {
        Self::new(date, hour, 0)
    }

    pub fn date(&self) -> SampleDate {
        self.date
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Zero-padded `YYYY-MM-DD HH:MM` label.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:02}:{:02}",
            self.date.format("%Y-%m-%d"),
            self.hour,
            self.minute
        )
    }
}
