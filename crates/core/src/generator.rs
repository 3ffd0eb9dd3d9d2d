//! Pluggable measurement sources.
//!
//! [`RandomGenerator`] stands in for a real sensor feed. [`SequenceGenerator`]
//! replays a fixed list of records, which makes producer behaviour
//! deterministic in tests and demos.

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::Rng;

use crate::error::CoreError;
use crate::record::{MeasurementRecord, ReadingRange};

/// Produces one [`MeasurementRecord`] per producer tick.
///
/// Implementations must return a complete record or an error; the producer
/// skips the tick on error rather than publishing anything partial.
pub trait MeasurementGenerator: Send + Sync {
    fn generate(&self) -> Result<MeasurementRecord, CoreError>;
}

/// Independent uniformly distributed readings for each channel.
#[derive(Debug, Clone, Default)]
pub struct RandomGenerator {
    range: ReadingRange,
}

impl RandomGenerator {
    pub fn new(range: ReadingRange) -> Self {
        Self { range }
    }

    pub fn range(&self) -> ReadingRange {
        self.range
    }
}

impl MeasurementGenerator for RandomGenerator {
    fn generate(&self) -> Result<MeasurementRecord, CoreError> {
        let mut rng = rand::rng();
        let span = self.range.min()..=self.range.max();
        Ok(MeasurementRecord::new(
            rng.random_range(span.clone()),
            rng.random_range(span),
        ))
    }
}

/// Cycles through a fixed list of records.
#[derive(Debug)]
pub struct SequenceGenerator {
    records: Vec<MeasurementRecord>,
    cursor: AtomicUsize,
}

impl SequenceGenerator {
    pub fn new(records: Vec<MeasurementRecord>) -> Self {
        Self {
            records,
            cursor: AtomicUsize::new(0),
        }
    }
}

impl MeasurementGenerator for SequenceGenerator {
    fn generate(&self) -> Result<MeasurementRecord, CoreError> {
        if self.records.is_empty() {
            return Err(CoreError::Generation("sequence is empty".into()));
        }
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed) % self.records.len();
        Ok(self.records[idx])
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn random_readings_stay_in_range() {
        let range = ReadingRange::default();
        let generator = RandomGenerator::new(range);
        for _ in 0..10_000 {
            let record = generator.generate().unwrap();
            assert!(record.validate(&range).is_ok(), "{record:?} out of range");
        }
    }

    #[test]
    fn degenerate_range_yields_constant_readings() {
        let generator = RandomGenerator::new(ReadingRange::new(7, 7).unwrap());
        assert_eq!(generator.generate().unwrap(), MeasurementRecord::new(7, 7));
    }

    #[test]
    fn sequence_cycles() {
        let generator = SequenceGenerator::new(vec![
            MeasurementRecord::new(1, 2),
            MeasurementRecord::new(3, 4),
        ]);
        assert_eq!(generator.generate().unwrap(), MeasurementRecord::new(1, 2));
        assert_eq!(generator.generate().unwrap(), MeasurementRecord::new(3, 4));
        assert_eq!(generator.generate().unwrap(), MeasurementRecord::new(1, 2));
    }

    #[test]
    fn empty_sequence_fails() {
        let generator = SequenceGenerator::new(Vec::new());
        assert_matches!(generator.generate(), Err(CoreError::Generation(_)));
    }
}
