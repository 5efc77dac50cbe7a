//! Rmux - Real-Multiplexer Experiment Driver
//!
//! Rmux drives single-step reinforcement-learning experiments on the
//! real-valued multiplexer problem. It generates problem instances, runs an
//! alternating explore/exploit trial loop against an adaptive rule-based
//! learner, and records the learning curve.
//!
//! The learner itself is not part of this crate: anything implementing the
//! [`Learner`] trait can be driven, and [`ProtocolGuard`] checks that the
//! calls arrive in the order the learner expects.
//!
//! # Architecture
//!
//! - **Layout**: address/data split of a multiplexer of `total_bits`
//! - **RealMultiplexer**: random states, correct answers and rewards
//! - **LearnerParams**: typed, clamped learner hyperparameters
//! - **Experiment**: the explore/exploit trial loop
//! - **Metrics**: per-block samples collected into a [`LearningCurve`]
//!
//! # Examples
//!
//! ## The 6-bit multiplexer
//!
//! ```
//! use rmux::{Layout, RealMultiplexer};
//!
//! let layout = Layout::new(6).unwrap();
//! assert_eq!(layout.address_bits(), 2);
//!
//! let mut mux = RealMultiplexer::new(6, 42).unwrap();
//! mux.reset();
//! let correct = mux.answer();
//! assert_eq!(mux.reward(correct), 1);
//! assert_eq!(mux.reward(1 - correct), 0);
//! ```
//!
//! ## Running an experiment
//!
//! ```
//! use rmux::{BanditLearner, Experiment, ExperimentConfig, LearnerParams};
//!
//! let mut params = LearnerParams::default();
//! params.set_perf_trials(100);
//!
//! let config = ExperimentConfig { total_bits: 11, n_blocks: 5, seed: 1, params };
//! let mut experiment = Experiment::new(BanditLearner::new(2), config).unwrap();
//! let curve = experiment.run().unwrap();
//!
//! assert_eq!(curve.len(), 5);
//! assert!(curve.is_chronological());
//! ```
//!
//! # Logging
//!
//! Rmux emits `tracing` events (a status line per block at `info`, parameter
//! clamping at `warn`, per-trial scoring at `debug`) and never installs a
//! subscriber itself.

pub mod error;
pub mod layout;
pub mod problem;
pub mod params;

pub mod learner;
pub mod protocol;
pub mod baseline;

pub mod metrics;
pub mod experiment;

// Re-exports for convenient access
pub use error::{Result, RmuxError};
pub use layout::{derive_layout, Layout};
pub use problem::{Action, RealMultiplexer, Reward};
pub use params::{LearnerParams, ParamValue};

pub use learner::{Learner, LearnerSetup};
pub use protocol::{GuardPhase, ProtocolGuard};
pub use baseline::BanditLearner;

pub use metrics::{BlockAccumulator, LearningCurve, MetricSample, MetricsAggregator};
pub use experiment::{Experiment, ExperimentConfig, TrialPhase};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = "Rmux";

/// Get version string
pub fn version() -> String {
    format!("{} v{}", NAME, VERSION)
}
