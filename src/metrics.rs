//! Learning-curve metrics.
//!
//! The trial loop samples the learner once per block of trials:
//!
//! - **BlockAccumulator** - running reward/error sums within one block
//! - **MetricsAggregator** - fixed-length series with one slot per block
//! - **LearningCurve** - the finished series, exportable for plotting
//!
//! # Example
//!
//! ```
//! use rmux::metrics::{BlockAccumulator, MetricsAggregator};
//!
//! let mut acc = BlockAccumulator::new();
//! acc.add(1, 0.0);
//! acc.add(0, 0.5);
//! let (performance, error) = acc.means();
//!
//! let mut metrics = MetricsAggregator::new(2);
//! metrics.record(0, 2, 10, 4.0, performance, error).unwrap();
//! assert_eq!(metrics.samples()[0].mean_performance, 0.5);
//! assert!(!metrics.is_complete());
//! ```

use crate::{Result, Reward, RmuxError};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Learner and loop statistics for one block of trials.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricSample {
    /// Learner trials elapsed at the end of the block
    pub trial_count: u64,
    /// Learner population size
    pub population_size: usize,
    /// Learner mean match set size
    pub match_set_size: f64,
    /// Mean exploit reward over the block, in `[0, 1]`
    pub mean_performance: f64,
    /// Mean learner-reported error over the block
    pub mean_error: f64,
}

/// Running exploit reward and error sums for the current block.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockAccumulator {
    performance_sum: f64,
    error_sum: f64,
    trials: usize,
}

impl BlockAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one exploit sub-trial.
    #[inline]
    pub fn add(&mut self, reward: Reward, error: f64) {
        self.performance_sum += f64::from(reward);
        self.error_sum += error;
        self.trials += 1;
    }

    #[inline]
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Mean performance and mean error; `(0.0, 0.0)` for an empty block.
    pub fn means(&self) -> (f64, f64) {
        if self.trials == 0 {
            return (0.0, 0.0);
        }
        let n = self.trials as f64;
        (self.performance_sum / n, self.error_sum / n)
    }
}

/// Fixed-length series of per-block samples.
///
/// Slot `i` holds the sample of block `i`; recording a block again
/// overwrites it.
#[derive(Debug, Clone)]
pub struct MetricsAggregator {
    samples: Vec<MetricSample>,
    filled: Vec<bool>,
}

impl MetricsAggregator {
    /// Create an aggregator for `num_blocks` blocks.
    pub fn new(num_blocks: usize) -> Self {
        Self {
            samples: vec![MetricSample::default(); num_blocks],
            filled: vec![false; num_blocks],
        }
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Store the sample for `block_index`.
    ///
    /// # Errors
    ///
    /// Returns [`RmuxError::IndexOutOfBounds`] if `block_index >= len()`.
    pub fn record(
        &mut self,
        block_index: usize,
        trial_count: u64,
        population_size: usize,
        match_set_size: f64,
        mean_performance: f64,
        mean_error: f64,
    ) -> Result<()> {
        if block_index >= self.samples.len() {
            return Err(RmuxError::IndexOutOfBounds {
                index: block_index,
                length: self.samples.len(),
            });
        }

        self.samples[block_index] = MetricSample {
            trial_count,
            population_size,
            match_set_size,
            mean_performance,
            mean_error,
        };
        self.filled[block_index] = true;
        Ok(())
    }

    /// All slots in block order, including unrecorded ones.
    pub fn samples(&self) -> &[MetricSample] {
        &self.samples
    }

    /// Number of blocks recorded so far.
    pub fn num_recorded(&self) -> usize {
        self.filled.iter().filter(|&&f| f).count()
    }

    /// Recorded samples only, in block order.
    pub fn recorded(&self) -> Vec<MetricSample> {
        self.samples
            .iter()
            .zip(&self.filled)
            .filter(|&(_, &f)| f)
            .map(|(s, _)| *s)
            .collect()
    }

    /// Whether every block has been recorded.
    pub fn is_complete(&self) -> bool {
        self.filled.iter().all(|&f| f)
    }

    pub fn reset(&mut self) {
        self.samples.fill(MetricSample::default());
        self.filled.fill(false);
    }
}

/// Finished learning curve of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningCurve {
    /// Multiplexer size
    pub total_bits: usize,
    /// Address bits of the multiplexer
    pub address_bits: usize,
    /// Exploit trials per block
    pub perf_trials: usize,
    /// One sample per block, chronological
    pub samples: Vec<MetricSample>,
}

impl LearningCurve {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Trial counts (x axis of the curve).
    pub fn trials(&self) -> Vec<u64> {
        self.samples.iter().map(|s| s.trial_count).collect()
    }

    pub fn performance(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.mean_performance).collect()
    }

    pub fn error(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.mean_error).collect()
    }

    /// Mean performance of the last block.
    pub fn final_performance(&self) -> Option<f64> {
        self.samples.last().map(|s| s.mean_performance)
    }

    /// Whether trial counts strictly increase from block to block.
    pub fn is_chronological(&self) -> bool {
        self.samples
            .iter()
            .tuple_windows()
            .all(|(a, b)| a.trial_count < b.trial_count)
    }

    /// Export curve to JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            RmuxError::Other(format!("Failed to serialize learning curve to JSON: {}", e))
        })
    }

    /// Import curve from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            RmuxError::Other(format!(
                "Failed to deserialize learning curve from JSON: {}",
                e
            ))
        })
    }

    /// Export curve to JSON file
    pub fn to_json_file(&self, path: &str) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Import curve from JSON file
    pub fn from_json_file(path: &str) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize to binary (bincode).
    pub fn to_binary(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize from binary (bincode).
    pub fn from_binary(data: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulator_means() {
        let mut acc = BlockAccumulator::new();
        assert_eq!(acc.means(), (0.0, 0.0));

        acc.add(1, 0.2);
        acc.add(1, 0.4);
        acc.add(0, 0.0);
        acc.add(1, 0.2);
        let (perf, err) = acc.means();
        assert_eq!(acc.trials(), 4);
        assert!((perf - 0.75).abs() < 1e-12);
        assert!((err - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_record_out_of_range() {
        let mut metrics = MetricsAggregator::new(3);
        let err = metrics.record(3, 0, 0, 0.0, 0.0, 0.0).unwrap_err();
        assert!(matches!(
            err,
            RmuxError::IndexOutOfBounds {
                index: 3,
                length: 3
            }
        ));
    }

    #[test]
    fn test_record_overwrites() {
        let mut metrics = MetricsAggregator::new(2);
        metrics.record(1, 10, 5, 2.0, 0.5, 0.1).unwrap();
        metrics.record(1, 20, 6, 3.0, 0.75, 0.05).unwrap();
        assert_eq!(metrics.num_recorded(), 1);
        assert_eq!(metrics.samples()[1].trial_count, 20);
        assert_eq!(metrics.recorded().len(), 1);
    }

    #[test]
    fn test_chronological() {
        let mut curve = LearningCurve {
            total_bits: 6,
            address_bits: 2,
            perf_trials: 10,
            samples: Vec::new(),
        };
        assert!(curve.is_chronological());

        for t in [10, 20, 30] {
            curve.samples.push(MetricSample {
                trial_count: t,
                ..MetricSample::default()
            });
        }
        assert!(curve.is_chronological());

        curve.samples[2].trial_count = 20;
        assert!(!curve.is_chronological());
    }
}
