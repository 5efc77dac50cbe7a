//! ProtocolGuard - checks the order of calls into a learner.
//!
//! Learners are stateful and assume they are driven as a single
//! `configure`, then repeated `begin_trial -> decide -> update -> end_trial`
//! sequences, with `current_error` allowed between `decide` and `update`.
//! The guard tracks that sequence and turns any deviation into
//! [`RmuxError::Protocol`] before the call reaches the wrapped learner.

use crate::{Action, Learner, LearnerParams, LearnerSetup, Result, Reward, RmuxError};

/// Position of a guarded learner in the call sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardPhase {
    /// `configure` has not been called
    Unconfigured,
    /// Between sub-trials
    Idle,
    /// `begin_trial` called, waiting for `decide`
    Begun,
    /// `decide` called, waiting for `update`
    Decided,
    /// `update` called, waiting for `end_trial`
    Updated,
}

impl GuardPhase {
    pub fn name(&self) -> &'static str {
        match self {
            GuardPhase::Unconfigured => "unconfigured",
            GuardPhase::Idle => "idle",
            GuardPhase::Begun => "awaiting decide",
            GuardPhase::Decided => "awaiting update",
            GuardPhase::Updated => "awaiting end_trial",
        }
    }
}

/// Learner wrapper that rejects out-of-sequence calls.
///
/// # Examples
///
/// ```
/// use rmux::{BanditLearner, GuardPhase, Learner, LearnerParams, LearnerSetup, ProtocolGuard};
///
/// let mut learner = ProtocolGuard::new(BanditLearner::new(0));
/// let setup = LearnerSetup { input_dim: 6, n_actions: 2, single_step: true };
///
/// // deciding before configure/begin_trial is rejected
/// assert!(learner.decide(&[0.0; 6], true).is_err());
///
/// learner.configure(&setup, &LearnerParams::default()).unwrap();
/// learner.begin_trial().unwrap();
/// learner.decide(&[0.0; 6], true).unwrap();
/// assert_eq!(learner.phase(), GuardPhase::Decided);
/// ```
#[derive(Debug)]
pub struct ProtocolGuard<L> {
    inner: L,
    phase: GuardPhase,
}

impl<L: Learner> ProtocolGuard<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            phase: GuardPhase::Unconfigured,
        }
    }

    #[inline]
    pub fn phase(&self) -> GuardPhase {
        self.phase
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }

    pub fn into_inner(self) -> L {
        self.inner
    }

    fn expect(&self, call: &'static str, allowed: &[GuardPhase]) -> Result<()> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(RmuxError::Protocol {
                call,
                phase: self.phase.name(),
            })
        }
    }
}

impl<L: Learner> Learner for ProtocolGuard<L> {
    fn configure(&mut self, setup: &LearnerSetup, params: &LearnerParams) -> Result<()> {
        self.expect("configure", &[GuardPhase::Unconfigured])?;
        self.inner.configure(setup, params)?;
        self.phase = GuardPhase::Idle;
        Ok(())
    }

    fn begin_trial(&mut self) -> Result<()> {
        self.expect("begin_trial", &[GuardPhase::Idle])?;
        self.inner.begin_trial()?;
        self.phase = GuardPhase::Begun;
        Ok(())
    }

    fn decide(&mut self, state: &[f64], explore: bool) -> Result<Action> {
        self.expect("decide", &[GuardPhase::Begun])?;
        let action = self.inner.decide(state, explore)?;
        self.phase = GuardPhase::Decided;
        Ok(action)
    }

    fn update(&mut self, reward: Reward) -> Result<()> {
        self.expect("update", &[GuardPhase::Decided])?;
        self.inner.update(reward)?;
        self.phase = GuardPhase::Updated;
        Ok(())
    }

    fn current_error(&self, reward: Reward) -> Result<f64> {
        self.expect("current_error", &[GuardPhase::Decided])?;
        self.inner.current_error(reward)
    }

    fn end_trial(&mut self) -> Result<()> {
        self.expect("end_trial", &[GuardPhase::Updated])?;
        self.inner.end_trial()?;
        self.phase = GuardPhase::Idle;
        Ok(())
    }

    fn elapsed_trials(&self) -> u64 {
        self.inner.elapsed_trials()
    }

    fn population_size(&self) -> usize {
        self.inner.population_size()
    }

    fn mean_match_set_size(&self) -> f64 {
        self.inner.mean_match_set_size()
    }
}
