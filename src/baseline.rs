//! BanditLearner - a context-free payoff learner.
//!
//! Keeps one payoff prediction and one error estimate per action and ignores
//! the state entirely, so on the multiplexer it settles around 50%
//! performance. It gives the trial loop a working [`Learner`] for demos,
//! benchmarks and smoke tests without an external rule-based engine.
//!
//! - Explore sub-trials pick a uniformly random action with probability
//!   `P_EXPLORE`, otherwise the greedy one
//! - Exploit sub-trials always pick the action with the highest prediction
//! - Predictions and errors move towards their targets at rate `BETA`
//! - Only explore sub-trials advance [`Learner::elapsed_trials`]

use crate::{Action, Learner, LearnerParams, LearnerSetup, Result, Reward, RmuxError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Per-action payoff learner with epsilon-greedy exploration.
#[derive(Debug, Clone)]
pub struct BanditLearner {
    rng: StdRng,
    seed: u64,

    // Parameters (set by configure)
    n_actions: usize,
    beta: f64,
    p_explore: f64,
    init_error: f64,

    // State
    predictions: Vec<f64>,
    errors: Vec<f64>,
    last_action: Option<Action>,
    exploring: bool,
    time: u64,
}

impl BanditLearner {
    /// Create an unconfigured learner with a seeded RNG.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            n_actions: 0,
            beta: 0.0,
            p_explore: 0.0,
            init_error: 0.0,
            predictions: Vec::new(),
            errors: Vec::new(),
            last_action: None,
            exploring: false,
            time: 0,
        }
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Payoff prediction for every action.
    pub fn predictions(&self) -> &[f64] {
        &self.predictions
    }

    /// Running error estimate for every action.
    pub fn errors(&self) -> &[f64] {
        &self.errors
    }

    /// Action with the highest prediction (lowest index on ties).
    fn best_action(&self) -> Action {
        let mut best = 0;
        for (a, &p) in self.predictions.iter().enumerate() {
            if p > self.predictions[best] {
                best = a;
            }
        }
        best
    }

    fn last_action(&self, call: &str) -> Result<Action> {
        self.last_action
            .ok_or_else(|| RmuxError::Learner(format!("{} before any decision", call)))
    }
}

impl Learner for BanditLearner {
    fn configure(&mut self, setup: &LearnerSetup, params: &LearnerParams) -> Result<()> {
        if setup.n_actions == 0 {
            return Err(RmuxError::InvalidParameter(
                "n_actions must be at least 1".to_string(),
            ));
        }
        if !setup.single_step {
            return Err(RmuxError::InvalidParameter(
                "BanditLearner only supports single-step problems".to_string(),
            ));
        }

        self.n_actions = setup.n_actions;
        self.beta = params.beta();
        self.p_explore = params.p_explore();
        self.init_error = params.init_error();
        self.predictions = vec![0.0; setup.n_actions];
        self.errors = vec![self.init_error; setup.n_actions];
        self.last_action = None;
        self.time = 0;

        debug!(
            n_actions = self.n_actions,
            beta = self.beta,
            p_explore = self.p_explore,
            "bandit learner configured"
        );
        Ok(())
    }

    fn begin_trial(&mut self) -> Result<()> {
        self.last_action = None;
        Ok(())
    }

    fn decide(&mut self, _state: &[f64], explore: bool) -> Result<Action> {
        if self.n_actions == 0 {
            return Err(RmuxError::Learner("decide before configure".to_string()));
        }

        let action = if explore && self.rng.gen::<f64>() < self.p_explore {
            self.rng.gen_range(0..self.n_actions)
        } else {
            self.best_action()
        };

        self.exploring = explore;
        self.last_action = Some(action);
        Ok(action)
    }

    fn update(&mut self, reward: Reward) -> Result<()> {
        let a = self.last_action("update")?;
        let target = f64::from(reward);
        let abs_err = (target - self.predictions[a]).abs();

        self.errors[a] += self.beta * (abs_err - self.errors[a]);
        self.predictions[a] += self.beta * (target - self.predictions[a]);
        Ok(())
    }

    /// Running error estimate of the chosen action, before this reward is
    /// learned from.
    fn current_error(&self, _reward: Reward) -> Result<f64> {
        let a = self.last_action("current_error")?;
        Ok(self.errors[a])
    }

    fn end_trial(&mut self) -> Result<()> {
        if self.exploring {
            self.time += 1;
        }
        Ok(())
    }

    fn elapsed_trials(&self) -> u64 {
        self.time
    }

    fn population_size(&self) -> usize {
        self.n_actions
    }

    /// Every prediction matches every state.
    fn mean_match_set_size(&self) -> f64 {
        self.n_actions as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured(seed: u64) -> BanditLearner {
        let mut learner = BanditLearner::new(seed);
        let setup = LearnerSetup {
            input_dim: 6,
            n_actions: 2,
            single_step: true,
        };
        learner.configure(&setup, &LearnerParams::default()).unwrap();
        learner
    }

    #[test]
    fn test_configure_sizes() {
        let learner = configured(0);
        assert_eq!(learner.population_size(), 2);
        assert_eq!(learner.mean_match_set_size(), 2.0);
        assert_eq!(learner.predictions(), &[0.0, 0.0]);
        assert_eq!(learner.elapsed_trials(), 0);
    }

    #[test]
    fn test_multistep_rejected() {
        let mut learner = BanditLearner::new(0);
        let setup = LearnerSetup {
            input_dim: 6,
            n_actions: 2,
            single_step: false,
        };
        assert!(learner.configure(&setup, &LearnerParams::default()).is_err());
    }

    #[test]
    fn test_update_moves_prediction() {
        let mut learner = configured(0);
        learner.begin_trial().unwrap();
        let a = learner.decide(&[0.0; 6], false).unwrap();
        assert_eq!(a, 0);
        // default INIT_ERROR = 0
        assert_eq!(learner.current_error(1).unwrap(), 0.0);
        learner.update(1).unwrap();
        learner.end_trial().unwrap();

        // default BETA = 0.1
        assert!((learner.predictions()[0] - 0.1).abs() < 1e-12);
        assert!((learner.errors()[0] - 0.1).abs() < 1e-12);

        learner.begin_trial().unwrap();
        assert_eq!(learner.decide(&[0.0; 6], false).unwrap(), 0);
        assert!((learner.current_error(1).unwrap() - learner.errors()[0]).abs() < 1e-12);
        assert!((learner.current_error(0).unwrap() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_error_starts_at_init_error() {
        let mut learner = BanditLearner::new(0);
        let setup = LearnerSetup {
            input_dim: 6,
            n_actions: 2,
            single_step: true,
        };
        let mut params = LearnerParams::default();
        params.set_init_error(0.5);
        learner.configure(&setup, &params).unwrap();

        learner.begin_trial().unwrap();
        learner.decide(&[0.0; 6], false).unwrap();
        assert_eq!(learner.current_error(1).unwrap(), 0.5);
    }

    #[test]
    fn test_only_explore_advances_time() {
        let mut learner = configured(3);
        for explore in [true, false, true] {
            learner.begin_trial().unwrap();
            learner.decide(&[0.0; 6], explore).unwrap();
            learner.update(0).unwrap();
            learner.end_trial().unwrap();
        }
        assert_eq!(learner.elapsed_trials(), 2);
    }

    #[test]
    fn test_update_without_decision_fails() {
        let mut learner = configured(0);
        learner.begin_trial().unwrap();
        assert!(matches!(learner.update(1), Err(RmuxError::Learner(_))));
    }
}
