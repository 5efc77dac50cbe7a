//! Learner trait - the contract between the trial loop and a rule-based learner.
//!
//! The learner itself (rule induction, matching, credit assignment) lives
//! outside this crate. The trial loop only needs the capability interface
//! below and drives it in a fixed order for every sub-trial:
//!
//! ```text
//! begin_trial() -> decide(state, explore) -> [current_error(reward)] -> update(reward) -> end_trial()
//! ```
//!
//! `current_error` is only queried on exploit sub-trials. Calling the methods
//! in any other order is a programming error; wrap a learner in
//! [`ProtocolGuard`](crate::ProtocolGuard) to have violations reported.
//!
//! # Examples
//!
//! ```
//! use rmux::{Action, Learner, LearnerParams, LearnerSetup, Result, Reward};
//!
//! /// Always picks action 0.
//! struct Constant {
//!     trials: u64,
//! }
//!
//! impl Learner for Constant {
//!     fn configure(&mut self, _setup: &LearnerSetup, _params: &LearnerParams) -> Result<()> {
//!         Ok(())
//!     }
//!     fn decide(&mut self, _state: &[f64], _explore: bool) -> Result<Action> {
//!         Ok(0)
//!     }
//!     fn update(&mut self, _reward: Reward) -> Result<()> {
//!         Ok(())
//!     }
//!     fn current_error(&self, reward: Reward) -> Result<f64> {
//!         Ok(1.0 - f64::from(reward))
//!     }
//!     fn end_trial(&mut self) -> Result<()> {
//!         self.trials += 1;
//!         Ok(())
//!     }
//!     fn elapsed_trials(&self) -> u64 {
//!         self.trials
//!     }
//!     fn population_size(&self) -> usize {
//!         1
//!     }
//!     fn mean_match_set_size(&self) -> f64 {
//!         1.0
//!     }
//! }
//! ```

use crate::{Action, LearnerParams, Result, Reward};
use serde::{Deserialize, Serialize};

/// Problem shape handed to a learner before the first trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnerSetup {
    /// Length of every state vector
    pub input_dim: usize,
    /// Number of distinct actions
    pub n_actions: usize,
    /// Single-step (true) or multistep (false) reinforcement learning
    pub single_step: bool,
}

/// Capability interface of an adaptive rule-based learner.
pub trait Learner {
    /// Configure the learner for a problem shape and hyperparameters.
    ///
    /// Called exactly once, before any trial.
    fn configure(&mut self, setup: &LearnerSetup, params: &LearnerParams) -> Result<()>;

    /// Open a sub-trial.
    fn begin_trial(&mut self) -> Result<()> {
        Ok(())
    }

    /// Choose an action for `state`.
    ///
    /// With `explore` set the learner may act stochastically; otherwise it
    /// must act greedily.
    fn decide(&mut self, state: &[f64], explore: bool) -> Result<Action>;

    /// Apply credit assignment for the action chosen by the last `decide`.
    fn update(&mut self, reward: Reward) -> Result<()>;

    /// Prediction error of the last decision given the received `reward`.
    fn current_error(&self, reward: Reward) -> Result<f64>;

    /// Close a sub-trial.
    fn end_trial(&mut self) -> Result<()> {
        Ok(())
    }

    /// Number of learning trials performed so far.
    fn elapsed_trials(&self) -> u64;

    /// Current number of rules in the population.
    fn population_size(&self) -> usize;

    /// Mean size of the match sets formed so far.
    fn mean_match_set_size(&self) -> f64;
}

impl<L: Learner + ?Sized> Learner for Box<L> {
    fn configure(&mut self, setup: &LearnerSetup, params: &LearnerParams) -> Result<()> {
        (**self).configure(setup, params)
    }

    fn begin_trial(&mut self) -> Result<()> {
        (**self).begin_trial()
    }

    fn decide(&mut self, state: &[f64], explore: bool) -> Result<Action> {
        (**self).decide(state, explore)
    }

    fn update(&mut self, reward: Reward) -> Result<()> {
        (**self).update(reward)
    }

    fn current_error(&self, reward: Reward) -> Result<f64> {
        (**self).current_error(reward)
    }

    fn end_trial(&mut self) -> Result<()> {
        (**self).end_trial()
    }

    fn elapsed_trials(&self) -> u64 {
        (**self).elapsed_trials()
    }

    fn population_size(&self) -> usize {
        (**self).population_size()
    }

    fn mean_match_set_size(&self) -> f64 {
        (**self).mean_match_set_size()
    }
}
