//! Threshold classification engine.
//!
//! Pure logic: the caller supplies a [`MeasurementRecord`] and a
//! [`ClassificationPolicy`] and gets back one [`Severity`] per channel.
//!
//! A channel's policy is an ordered list of bands. Each band carries an
//! inclusive upper bound and the severity assigned to readings at or below
//! it; the last band is unbounded and catches everything above.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;
use crate::record::{Channel, MeasurementRecord};
use crate::types::Reading;

/// Severity level assigned to a single channel reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Safe,
    Alert,
    Danger,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Safe => "safe",
            Severity::Alert => "alert",
            Severity::Danger => "danger",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "safe" => Ok(Severity::Safe),
            "alert" => Ok(Severity::Alert),
            "danger" => Ok(Severity::Danger),
            other => Err(CoreError::InvalidBands(format!("unknown severity '{other}'"))),
        }
    }
}

/// A single threshold band. `upper == None` marks the unbounded last band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub upper: Option<Reading>,
    pub severity: Severity,
}

impl Band {
    /// Band covering readings up to and including `upper`.
    pub fn up_to(upper: Reading, severity: Severity) -> Self {
        Self {
            upper: Some(upper),
            severity,
        }
    }

    /// Band covering every reading above the previous band.
    pub fn above(severity: Severity) -> Self {
        Self {
            upper: None,
            severity,
        }
    }
}

/// Ordered bands for one channel.
///
/// Invariants (checked by [`ChannelBands::new`]): at least one band, upper
/// bounds strictly increasing, exactly the last band unbounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelBands {
    bands: Vec<Band>,
}

impl ChannelBands {
    pub fn new(bands: Vec<Band>) -> Result<Self, CoreError> {
        let Some((last, bounded)) = bands.split_last() else {
            return Err(CoreError::InvalidBands("at least one band is required".into()));
        };

        if last.upper.is_some() {
            return Err(CoreError::InvalidBands(
                "the last band must be unbounded ('*')".into(),
            ));
        }

        let mut previous: Option<Reading> = None;
        for band in bounded {
            let Some(upper) = band.upper else {
                return Err(CoreError::InvalidBands(
                    "only the last band may be unbounded".into(),
                ));
            };
            if let Some(prev) = previous.filter(|&prev| upper <= prev) {
                return Err(CoreError::InvalidBands(format!(
                    "upper bounds must be strictly increasing (got {upper} after {prev})"
                )));
            }
            previous = Some(upper);
        }

        Ok(Self { bands })
    }

    /// Baseline water bands: `< 5` safe, `5..=8` alert, `> 8` danger.
    pub fn water_baseline() -> Self {
        Self {
            bands: vec![
                Band::up_to(4, Severity::Safe),
                Band::up_to(8, Severity::Alert),
                Band::above(Severity::Danger),
            ],
        }
    }

    /// Baseline wind bands: `< 6` safe, `6..=15` alert, `> 15` danger.
    pub fn wind_baseline() -> Self {
        Self {
            bands: vec![
                Band::up_to(5, Severity::Safe),
                Band::up_to(15, Severity::Alert),
                Band::above(Severity::Danger),
            ],
        }
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// Severity of the first band whose upper bound admits `value`.
    pub fn classify(&self, value: Reading) -> Severity {
        self.bands
            .iter()
            .find(|band| band.upper.is_none_or(|upper| value <= upper))
            .map(|band| band.severity)
            // Unreachable: the last band is unbounded.
            .unwrap_or(Severity::Danger)
    }
}

/// Parses `"4:safe,8:alert,*:danger"`.
impl FromStr for ChannelBands {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bands = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                let (bound, severity) = part.split_once(':').ok_or_else(|| {
                    CoreError::InvalidBands(format!("band '{part}' is not '<upper>:<severity>'"))
                })?;
                let severity: Severity = severity.parse()?;
                match bound.trim() {
                    "*" => Ok(Band::above(severity)),
                    bound => bound
                        .parse::<Reading>()
                        .map(|upper| Band::up_to(upper, severity))
                        .map_err(|e| {
                            CoreError::InvalidBands(format!("bad upper bound '{bound}': {e}"))
                        }),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(bands)
    }
}

impl fmt::Display for ChannelBands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, band) in self.bands.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            match band.upper {
                Some(upper) => write!(f, "{upper}:{}", band.severity)?,
                None => write!(f, "*:{}", band.severity)?,
            }
        }
        Ok(())
    }
}

/// Per-channel bands used to classify a whole record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationPolicy {
    pub water: ChannelBands,
    pub wind: ChannelBands,
}

impl Default for ClassificationPolicy {
    fn default() -> Self {
        Self {
            water: ChannelBands::water_baseline(),
            wind: ChannelBands::wind_baseline(),
        }
    }
}

impl ClassificationPolicy {
    pub fn bands(&self, channel: Channel) -> &ChannelBands {
        match channel {
            Channel::Water => &self.water,
            Channel::Wind => &self.wind,
        }
    }

    /// Classify both channels of `record` independently.
    pub fn classify(&self, record: &MeasurementRecord) -> Classification {
        Classification {
            water: self.water.classify(record.water),
            wind: self.wind.classify(record.wind),
        }
    }
}

/// Derived per-channel severities. Recomputed on every read, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub water: Severity,
    pub wind: Severity,
}

impl Classification {
    pub fn severity(&self, channel: Channel) -> Severity {
        match channel {
            Channel::Water => self.water,
            Channel::Wind => self.wind,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn water_boundaries_are_exact() {
        let bands = ChannelBands::water_baseline();
        assert_eq!(bands.classify(1), Severity::Safe);
        assert_eq!(bands.classify(4), Severity::Safe);
        assert_eq!(bands.classify(5), Severity::Alert);
        assert_eq!(bands.classify(8), Severity::Alert);
        assert_eq!(bands.classify(9), Severity::Danger);
        assert_eq!(bands.classify(100), Severity::Danger);
    }

    #[test]
    fn wind_boundaries_are_exact() {
        let bands = ChannelBands::wind_baseline();
        assert_eq!(bands.classify(5), Severity::Safe);
        assert_eq!(bands.classify(6), Severity::Alert);
        assert_eq!(bands.classify(15), Severity::Alert);
        assert_eq!(bands.classify(16), Severity::Danger);
    }

    #[test]
    fn channels_are_classified_independently() {
        let policy = ClassificationPolicy::default();
        let result = policy.classify(&MeasurementRecord::new(3, 10));
        assert_eq!(result.water, Severity::Safe);
        assert_eq!(result.wind, Severity::Alert);

        let result = policy.classify(&MeasurementRecord::new(9, 2));
        assert_eq!(result.water, Severity::Danger);
        assert_eq!(result.wind, Severity::Safe);
    }

    #[test]
    fn parses_band_syntax() {
        let bands: ChannelBands = "4:safe, 8:alert, *:danger".parse().unwrap();
        assert_eq!(bands, ChannelBands::water_baseline());
        assert_eq!(bands.to_string(), "4:safe,8:alert,*:danger");
    }

    #[test]
    fn single_unbounded_band_is_valid() {
        let bands: ChannelBands = "*:safe".parse().unwrap();
        assert_eq!(bands.classify(i32::MAX), Severity::Safe);
        assert_eq!(bands.classify(i32::MIN), Severity::Safe);
    }

    #[test]
    fn rejects_malformed_bands() {
        assert_matches!("".parse::<ChannelBands>(), Err(CoreError::InvalidBands(_)));
        assert_matches!("4:safe,8:alert".parse::<ChannelBands>(), Err(CoreError::InvalidBands(_)));
        assert_matches!("*:safe,8:alert".parse::<ChannelBands>(), Err(CoreError::InvalidBands(_)));
        assert_matches!(
            "8:safe,4:alert,*:danger".parse::<ChannelBands>(),
            Err(CoreError::InvalidBands(_))
        );
        assert_matches!("4-safe,*:danger".parse::<ChannelBands>(), Err(CoreError::InvalidBands(_)));
        assert_matches!("4:calm,*:danger".parse::<ChannelBands>(), Err(CoreError::InvalidBands(_)));
        assert_matches!("x:safe,*:danger".parse::<ChannelBands>(), Err(CoreError::InvalidBands(_)));
    }

    #[test]
    fn severity_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Severity::Alert).unwrap(), "alert");
    }
}
