//! Tests for the explore/exploit trial loop.
//!
//! Tests cover:
//! - Exact call sequence into the learner
//! - Block means for perfect, hopeless and mixed learners
//! - Sample count, ordering and ranges over a full run
//! - Fatal learner failures and the samples that survive them

use approx::assert_abs_diff_eq;
use rmux::layout::derive_layout;
use rmux::problem::answer;
use rmux::{
    Action, BanditLearner, Experiment, ExperimentConfig, Learner, LearnerParams, LearnerSetup,
    Result, Reward, RmuxError, TrialPhase,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Configure,
    Begin,
    Decide(bool),
    Update(Reward),
    End,
}

#[derive(Debug, Clone, Copy)]
enum Policy {
    /// Always correct
    Oracle,
    /// Always wrong
    AntiOracle,
    /// Correct when exploring, wrong when exploiting
    ExploreOnly,
    /// Returns an action outside the problem's range
    OutOfRange,
}

struct MockLearner {
    policy: Policy,
    error: f64,
    fail_on_decide: Option<usize>,
    fail_configure: bool,
    address_bits: usize,
    setup: Option<LearnerSetup>,
    calls: Vec<Call>,
    states: Vec<Vec<f64>>,
    exploring: bool,
    time: u64,
}

impl MockLearner {
    fn new(policy: Policy) -> Self {
        Self {
            policy,
            error: 0.0,
            fail_on_decide: None,
            fail_configure: false,
            address_bits: 0,
            setup: None,
            calls: Vec::new(),
            states: Vec::new(),
            exploring: false,
            time: 0,
        }
    }

    fn with_error(mut self, error: f64) -> Self {
        self.error = error;
        self
    }

    fn failing_on_decide(mut self, n: usize) -> Self {
        self.fail_on_decide = Some(n);
        self
    }
}

impl Learner for MockLearner {
    fn configure(&mut self, setup: &LearnerSetup, _params: &LearnerParams) -> Result<()> {
        self.calls.push(Call::Configure);
        if self.fail_configure {
            return Err(RmuxError::Learner("malformed configuration".to_string()));
        }
        self.address_bits = derive_layout(setup.input_dim)?;
        self.setup = Some(*setup);
        Ok(())
    }

    fn begin_trial(&mut self) -> Result<()> {
        self.calls.push(Call::Begin);
        Ok(())
    }

    fn decide(&mut self, state: &[f64], explore: bool) -> Result<Action> {
        self.calls.push(Call::Decide(explore));
        self.states.push(state.to_vec());
        if let Some(n) = self.fail_on_decide {
            if self.states.len() >= n {
                return Err(RmuxError::Learner("decision failed".to_string()));
            }
        }

        self.exploring = explore;
        let correct = answer(state, self.address_bits);
        let action = match self.policy {
            Policy::Oracle => correct,
            Policy::AntiOracle => 1 - correct,
            Policy::ExploreOnly if explore => correct,
            Policy::ExploreOnly => 1 - correct,
            Policy::OutOfRange => 2,
        };
        Ok(action)
    }

    fn update(&mut self, reward: Reward) -> Result<()> {
        self.calls.push(Call::Update(reward));
        Ok(())
    }

    fn current_error(&self, _reward: Reward) -> Result<f64> {
        Ok(self.error)
    }

    fn end_trial(&mut self) -> Result<()> {
        self.calls.push(Call::End);
        if self.exploring {
            self.time += 1;
        }
        Ok(())
    }

    fn elapsed_trials(&self) -> u64 {
        self.time
    }

    fn population_size(&self) -> usize {
        42
    }

    fn mean_match_set_size(&self) -> f64 {
        7.5
    }
}

fn config(total_bits: usize, n_blocks: usize, perf_trials: i64) -> ExperimentConfig {
    let mut params = LearnerParams::default();
    params.set_perf_trials(perf_trials);
    ExperimentConfig {
        total_bits,
        n_blocks,
        seed: 2024,
        params,
    }
}

#[test]
fn test_learner_setup() {
    let experiment = Experiment::new(MockLearner::new(Policy::Oracle), config(11, 1, 1)).unwrap();
    let setup = experiment.learner().setup.unwrap();
    assert_eq!(setup.input_dim, 11);
    assert_eq!(setup.n_actions, 2);
    assert!(setup.single_step);
}

#[test]
fn test_call_sequence() {
    let mut experiment =
        Experiment::new(MockLearner::new(Policy::Oracle), config(6, 1, 2)).unwrap();
    experiment.run().unwrap();

    let mut expected = vec![Call::Configure];
    for _ in 0..2 {
        expected.extend([
            Call::Begin,
            Call::Decide(true),
            Call::Update(1),
            Call::End,
            Call::Begin,
            Call::Decide(false),
            Call::Update(1),
            Call::End,
        ]);
    }
    assert_eq!(experiment.learner().calls, expected);
}

#[test]
fn test_error_queried_only_on_exploit() {
    struct Counting {
        inner: MockLearner,
        queries: std::cell::Cell<usize>,
        exploring: bool,
    }

    impl Learner for Counting {
        fn configure(&mut self, setup: &LearnerSetup, params: &LearnerParams) -> Result<()> {
            self.inner.configure(setup, params)
        }
        fn decide(&mut self, state: &[f64], explore: bool) -> Result<Action> {
            self.exploring = explore;
            self.inner.decide(state, explore)
        }
        fn update(&mut self, reward: Reward) -> Result<()> {
            self.inner.update(reward)
        }
        fn current_error(&self, reward: Reward) -> Result<f64> {
            assert!(!self.exploring, "error queried on an explore sub-trial");
            self.queries.set(self.queries.get() + 1);
            self.inner.current_error(reward)
        }
        fn end_trial(&mut self) -> Result<()> {
            self.inner.end_trial()
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

    let learner = Counting {
        inner: MockLearner::new(Policy::Oracle),
        queries: std::cell::Cell::new(0),
        exploring: false,
    };
    let mut experiment = Experiment::new(learner, config(6, 3, 5)).unwrap();
    experiment.run().unwrap();
    assert_eq!(experiment.learner().queries.get(), 15);
}

#[test]
fn test_perfect_block_of_four() {
    let mut experiment =
        Experiment::new(MockLearner::new(Policy::Oracle).with_error(0.0), config(6, 1, 4))
            .unwrap();
    let sample = experiment.run_block(0).unwrap();

    assert_eq!(sample.mean_performance, 1.0);
    assert_eq!(sample.mean_error, 0.0);
    assert_eq!(sample.trial_count, 4);
    assert_eq!(sample.population_size, 42);
    assert_eq!(sample.match_set_size, 7.5);
}

#[test]
fn test_anti_oracle_scores_zero() {
    let mut experiment =
        Experiment::new(MockLearner::new(Policy::AntiOracle).with_error(1.0), config(11, 3, 50))
            .unwrap();
    let curve = experiment.run().unwrap();
    for sample in curve.samples.iter() {
        assert_eq!(sample.mean_performance, 0.0);
        assert_eq!(sample.mean_error, 1.0);
    }
}

#[test]
fn test_explore_rewards_not_recorded() {
    let mut experiment =
        Experiment::new(MockLearner::new(Policy::ExploreOnly), config(6, 2, 25)).unwrap();
    let curve = experiment.run().unwrap();
    assert_eq!(curve.performance(), vec![0.0, 0.0]);

    // explore rewards still reached the learner
    let updates: Vec<Reward> = experiment
        .learner()
        .calls
        .iter()
        .filter_map(|c| match c {
            Call::Update(r) => Some(*r),
            _ => None,
        })
        .collect();
    assert_eq!(updates.len(), 100);
    assert_eq!(updates.iter().filter(|&&r| r == 1).count(), 50);
}

#[test]
fn test_fresh_state_every_sub_trial() {
    let mut experiment =
        Experiment::new(MockLearner::new(Policy::Oracle), config(6, 1, 10)).unwrap();
    experiment.run().unwrap();

    let states = &experiment.learner().states;
    assert_eq!(states.len(), 20);
    for state in states {
        assert_eq!(state.len(), 6);
        assert!(state.iter().all(|&v| (0.0..1.0).contains(&v)));
    }
    for pair in states.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
}

#[test]
fn test_full_run_shape() {
    let n = 20;
    let mut experiment = Experiment::new(BanditLearner::new(5), config(6, n, 50)).unwrap();
    let curve = experiment.run().unwrap();

    assert_eq!(curve.len(), n);
    assert_eq!(curve.total_bits, 6);
    assert_eq!(curve.address_bits, 2);
    assert_eq!(curve.perf_trials, 50);
    assert!(curve.is_chronological());
    assert!(experiment.metrics().is_complete());
    for sample in curve.samples.iter() {
        assert!((0.0..=1.0).contains(&sample.mean_performance));
        assert!(sample.mean_error >= 0.0);
    }
}

#[test]
fn test_bandit_hovers_around_chance() {
    let mut experiment = Experiment::new(BanditLearner::new(9), config(6, 10, 500)).unwrap();
    let curve = experiment.run().unwrap();
    let mean: f64 = curve.performance().iter().sum::<f64>() / curve.len() as f64;
    assert_abs_diff_eq!(mean, 0.5, epsilon = 0.05);
}

#[test]
fn test_same_seeds_same_curve() {
    let run = || {
        let mut experiment =
            Experiment::new(BanditLearner::new(3), config(11, 5, 40)).unwrap();
        experiment.run().unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_learner_failure_aborts_run() {
    // 2 blocks x 3 trials x 2 sub-trials succeed, the next decision fails
    let learner = MockLearner::new(Policy::Oracle).failing_on_decide(13);
    let mut experiment = Experiment::new(learner, config(6, 5, 3)).unwrap();

    let err = experiment.run().unwrap_err();
    assert!(matches!(err, RmuxError::Learner(_)));

    assert_eq!(experiment.phase(), TrialPhase::Idle);
    let metrics = experiment.metrics();
    assert_eq!(metrics.num_recorded(), 2);
    assert_eq!(metrics.recorded()[1].trial_count, 6);
    assert!(!metrics.is_complete());
}

#[test]
fn test_configure_failure_is_fatal() {
    let mut learner = MockLearner::new(Policy::Oracle);
    learner.fail_configure = true;
    let result = Experiment::new(learner, config(6, 1, 1));
    assert!(matches!(result, Err(RmuxError::Learner(_))));
}

#[test]
fn test_out_of_range_action_is_fatal() {
    let mut experiment =
        Experiment::new(MockLearner::new(Policy::OutOfRange), config(6, 1, 1)).unwrap();
    assert!(matches!(experiment.run(), Err(RmuxError::Learner(_))));
}

#[test]
fn test_boxed_learner() {
    let learner: Box<dyn Learner> = Box::new(MockLearner::new(Policy::Oracle));
    let mut experiment = Experiment::new(learner, config(6, 2, 5)).unwrap();
    let curve = experiment.run().unwrap();
    assert_eq!(curve.performance(), vec![1.0, 1.0]);
}

#[test]
fn test_failed_sub_trial_leaves_loop_idle() {
    // decision 1 is an explore sub-trial, decision 2 an exploit one
    for n in [1, 2] {
        let learner = MockLearner::new(Policy::Oracle).failing_on_decide(n);
        let mut experiment = Experiment::new(learner, config(6, 1, 1)).unwrap();
        assert!(experiment.run_block(0).is_err());
        assert_eq!(experiment.phase(), TrialPhase::Idle);
    }

    let mut experiment =
        Experiment::new(MockLearner::new(Policy::OutOfRange), config(6, 1, 1)).unwrap();
    assert!(experiment.explore_trial().is_err());
    assert_eq!(experiment.phase(), TrialPhase::Idle);
}
