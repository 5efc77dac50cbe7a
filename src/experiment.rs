//! Experiment - the single-step explore/exploit trial loop.
//!
//! An [`Experiment`] owns a [`RealMultiplexer`], an injected [`Learner`] and a
//! [`MetricsAggregator`]. A run is `n_blocks` blocks of `PERF_TRIALS`
//! iterations, and every iteration executes two sub-trials in fixed order:
//!
//! 1. **Explore** - fresh state, `decide(state, true)`, reward fed back
//! 2. **Exploit** - fresh state, `decide(state, false)`, reward and learner
//!    error accumulated for the block, reward fed back
//!
//! After each block the means are recorded together with the learner's trial
//! count, population size and match set size.
//!
//! # Examples
//!
//! ```
//! use rmux::{BanditLearner, Experiment, ExperimentConfig, LearnerParams};
//!
//! let mut params = LearnerParams::default();
//! params.set_perf_trials(50);
//!
//! let config = ExperimentConfig {
//!     total_bits: 6,
//!     n_blocks: 4,
//!     seed: 42,
//!     params,
//! };
//!
//! let mut experiment = Experiment::new(BanditLearner::new(1), config).unwrap();
//! let curve = experiment.run().unwrap();
//!
//! assert_eq!(curve.len(), 4);
//! assert_eq!(curve.trials(), vec![50, 100, 150, 200]);
//! ```

use crate::metrics::{BlockAccumulator, LearningCurve, MetricSample, MetricsAggregator};
use crate::problem::NUM_ACTIONS;
use crate::{Action, Learner, LearnerParams, LearnerSetup, RealMultiplexer, Result, Reward, RmuxError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

/// Settings of one experiment run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Multiplexer size
    pub total_bits: usize,
    /// Number of metric blocks
    pub n_blocks: usize,
    /// Seed of the problem generator
    pub seed: u64,
    /// Hyperparameters passed to the learner; `PERF_TRIALS` sets the block size
    pub params: LearnerParams,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            total_bits: 6,
            n_blocks: 100,
            seed: 0,
            params: LearnerParams::default(),
        }
    }
}

impl ExperimentConfig {
    /// Total number of sub-trials a full run executes.
    pub fn total_sub_trials(&self) -> usize {
        self.n_blocks * self.params.perf_trials() * 2
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| RmuxError::Other(e.to_string()))
    }

    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| RmuxError::Other(e.to_string()))
    }
}

/// Where the trial loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrialPhase {
    Idle,
    ExploreRunning,
    ExploitRunning,
}

/// Single-step explore/exploit driver for a learner on the real multiplexer.
pub struct Experiment<L: Learner> {
    learner: L,
    problem: RealMultiplexer,
    metrics: MetricsAggregator,
    config: ExperimentConfig,
    phase: TrialPhase,
}

impl<L: Learner> Experiment<L> {
    /// Build the problem and configure `learner` for it.
    ///
    /// # Errors
    ///
    /// - [`RmuxError::InvalidLayout`] if `total_bits < 3`
    /// - [`RmuxError::InvalidParameter`] if `n_blocks == 0`
    /// - any error returned by [`Learner::configure`]
    pub fn new(mut learner: L, config: ExperimentConfig) -> Result<Self> {
        let problem = RealMultiplexer::new(config.total_bits, config.seed)?;
        if config.n_blocks == 0 {
            return Err(RmuxError::InvalidParameter(
                "n_blocks must be at least 1".to_string(),
            ));
        }

        let setup = LearnerSetup {
            input_dim: config.total_bits,
            n_actions: NUM_ACTIONS,
            single_step: true,
        };
        learner.configure(&setup, &config.params)?;

        info!(
            total_bits = config.total_bits,
            address_bits = problem.layout().address_bits(),
            n_blocks = config.n_blocks,
            perf_trials = config.params.perf_trials(),
            "{} bits, {} position bits",
            config.total_bits,
            problem.layout().address_bits()
        );
        config.params.log_summary();

        Ok(Self {
            learner,
            problem,
            metrics: MetricsAggregator::new(config.n_blocks),
            config,
            phase: TrialPhase::Idle,
        })
    }

    #[inline]
    pub fn phase(&self) -> TrialPhase {
        self.phase
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    pub fn problem(&self) -> &RealMultiplexer {
        &self.problem
    }

    pub fn learner(&self) -> &L {
        &self.learner
    }

    pub fn into_learner(self) -> L {
        self.learner
    }

    /// Samples recorded so far; survives a failed run.
    pub fn metrics(&self) -> &MetricsAggregator {
        &self.metrics
    }

    /// Run every block in order and return the learning curve.
    ///
    /// The first learner error aborts the run; blocks completed before it
    /// remain available through [`Experiment::metrics`].
    pub fn run(&mut self) -> Result<LearningCurve> {
        for block in 0..self.config.n_blocks {
            self.run_block(block)?;
        }
        Ok(self.curve())
    }

    /// Run one block of `PERF_TRIALS` explore/exploit pairs and record it.
    pub fn run_block(&mut self, block_index: usize) -> Result<MetricSample> {
        if block_index >= self.config.n_blocks {
            return Err(RmuxError::IndexOutOfBounds {
                index: block_index,
                length: self.config.n_blocks,
            });
        }

        let _span = info_span!("block", index = block_index).entered();
        let mut acc = BlockAccumulator::new();
        for _ in 0..self.config.params.perf_trials() {
            self.explore_trial()?;
            self.exploit_trial(&mut acc)?;
        }

        let (mean_performance, mean_error) = acc.means();
        let sample = MetricSample {
            trial_count: self.learner.elapsed_trials(),
            population_size: self.learner.population_size(),
            match_set_size: self.learner.mean_match_set_size(),
            mean_performance,
            mean_error,
        };
        self.metrics.record(
            block_index,
            sample.trial_count,
            sample.population_size,
            sample.match_set_size,
            sample.mean_performance,
            sample.mean_error,
        )?;

        info!(
            trials = sample.trial_count,
            performance = format_args!("{:.5}", sample.mean_performance),
            error = format_args!("{:.5}", sample.mean_error),
            psize = sample.population_size,
            msize = format_args!("{:.1}", sample.match_set_size),
            "block complete"
        );
        Ok(sample)
    }

    /// Explore sub-trial: the learner may act stochastically and learns from
    /// the reward. Nothing is recorded.
    ///
    /// A failing sub-trial leaves the loop [`TrialPhase::Idle`].
    pub fn explore_trial(&mut self) -> Result<Reward> {
        self.phase = TrialPhase::ExploreRunning;
        self.explore_steps().map_err(|e| {
            self.phase = TrialPhase::Idle;
            e
        })
    }

    fn explore_steps(&mut self) -> Result<Reward> {
        let state = self.problem.reset();
        self.learner.begin_trial()?;
        let action = self.learner.decide(state, true)?;
        let reward = self.score(action)?;
        self.learner.update(reward)?;
        self.learner.end_trial()?;
        Ok(reward)
    }

    /// Exploit sub-trial: the learner acts greedily; reward and its error are
    /// added to `acc` before the reward is fed back.
    ///
    /// The loop is [`TrialPhase::Idle`] afterwards, whether or not the
    /// sub-trial succeeded.
    pub fn exploit_trial(&mut self, acc: &mut BlockAccumulator) -> Result<Reward> {
        self.phase = TrialPhase::ExploitRunning;
        let result = self.exploit_steps(acc);
        self.phase = TrialPhase::Idle;
        result
    }

    fn exploit_steps(&mut self, acc: &mut BlockAccumulator) -> Result<Reward> {
        let state = self.problem.reset();
        self.learner.begin_trial()?;
        let action = self.learner.decide(state, false)?;
        let reward = self.score(action)?;
        let error = self.learner.current_error(reward)?;
        acc.add(reward, error);
        self.learner.update(reward)?;
        self.learner.end_trial()?;
        Ok(reward)
    }

    fn score(&self, action: Action) -> Result<Reward> {
        if action >= NUM_ACTIONS {
            return Err(RmuxError::Learner(format!(
                "action {} outside 0..{}",
                action, NUM_ACTIONS
            )));
        }
        let reward = self.problem.reward(action);
        debug!(action, answer = self.problem.answer(), reward, "scored");
        Ok(reward)
    }

    /// Learning curve over all slots, recorded or not.
    pub fn curve(&self) -> LearningCurve {
        LearningCurve {
            total_bits: self.problem.layout().total_bits(),
            address_bits: self.problem.layout().address_bits(),
            perf_trials: self.config.params.perf_trials(),
            samples: self.metrics.samples().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BanditLearner;

    fn config(n_blocks: usize, perf_trials: i64) -> ExperimentConfig {
        let mut params = LearnerParams::default();
        params.set_perf_trials(perf_trials);
        ExperimentConfig {
            total_bits: 6,
            n_blocks,
            seed: 7,
            params,
        }
    }

    #[test]
    fn test_rejects_degenerate_layout() {
        let mut cfg = config(1, 1);
        cfg.total_bits = 2;
        let result = Experiment::new(BanditLearner::new(0), cfg);
        assert!(matches!(result, Err(RmuxError::InvalidLayout { total_bits: 2 })));
    }

    #[test]
    fn test_rejects_zero_blocks() {
        let result = Experiment::new(BanditLearner::new(0), config(0, 1));
        assert!(matches!(result, Err(RmuxError::InvalidParameter(_))));
    }

    #[test]
    fn test_phase_returns_to_idle() {
        let mut experiment = Experiment::new(BanditLearner::new(0), config(1, 3)).unwrap();
        assert_eq!(experiment.phase(), TrialPhase::Idle);
        experiment.run_block(0).unwrap();
        assert_eq!(experiment.phase(), TrialPhase::Idle);
    }

    #[test]
    fn test_block_index_checked() {
        let mut experiment = Experiment::new(BanditLearner::new(0), config(2, 1)).unwrap();
        assert!(matches!(
            experiment.run_block(2),
            Err(RmuxError::IndexOutOfBounds { index: 2, length: 2 })
        ));
    }

    #[test]
    fn test_total_sub_trials() {
        assert_eq!(config(100, 1000).total_sub_trials(), 200_000);
    }

    #[test]
    fn test_config_json_roundtrip() {
        let cfg = config(5, 10);
        let restored = ExperimentConfig::from_json(&cfg.to_json().unwrap()).unwrap();
        assert_eq!(restored, cfg);
    }
}
