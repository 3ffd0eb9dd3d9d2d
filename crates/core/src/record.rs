//! The measurement record and its legal reading range.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Reading;

/// Lowest legal reading when no range is configured.
pub const DEFAULT_READING_MIN: Reading = 1;

/// Highest legal reading when no range is configured.
pub const DEFAULT_READING_MAX: Reading = 100;

/// The two independent measurement channels carried by every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Water,
    Wind,
}

impl Channel {
    /// Both channels, in display order.
    pub const ALL: [Channel; 2] = [Channel::Water, Channel::Wind];

    /// Display name used in rendered output ("Water", "Wind").
    pub fn display_name(self) -> &'static str {
        match self {
            Channel::Water => "Water",
            Channel::Wind => "Wind",
        }
    }

    /// Unit suffix for rendered readings.
    pub fn unit(self) -> &'static str {
        match self {
            Channel::Water => "meter",
            Channel::Wind => "meter/s",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One tick's measurement: both channels are always present together.
///
/// Records are `Copy` and never mutated in place; the next tick supersedes
/// the whole value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeasurementRecord {
    pub water: Reading,
    pub wind: Reading,
}

impl MeasurementRecord {
    pub fn new(water: Reading, wind: Reading) -> Self {
        Self { water, wind }
    }

    /// Reading for a single channel.
    pub fn reading(&self, channel: Channel) -> Reading {
        match channel {
            Channel::Water => self.water,
            Channel::Wind => self.wind,
        }
    }

    /// Reject records with a channel outside `range`.
    pub fn validate(&self, range: &ReadingRange) -> Result<(), CoreError> {
        for channel in Channel::ALL {
            let value = self.reading(channel);
            if !range.contains(value) {
                return Err(CoreError::Validation(format!(
                    "{channel} reading {value} outside legal range {range}"
                )));
            }
        }
        Ok(())
    }
}

/// Inclusive legal range for a channel reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingRange {
    min: Reading,
    max: Reading,
}

impl ReadingRange {
    /// Build a range, rejecting `min > max`.
    pub fn new(min: Reading, max: Reading) -> Result<Self, CoreError> {
        if min > max {
            return Err(CoreError::Validation(format!(
                "reading range min {min} is greater than max {max}"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Reading {
        self.min
    }

    pub fn max(&self) -> Reading {
        self.max
    }

    pub fn contains(&self, value: Reading) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

impl Default for ReadingRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_READING_MIN,
            max: DEFAULT_READING_MAX,
        }
    }
}

impl fmt::Display for ReadingRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
