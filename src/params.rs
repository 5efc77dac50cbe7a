//! Learner hyperparameters.
//!
//! [`LearnerParams`] enumerates every option the driver hands to a learner in
//! [`Learner::configure`](crate::Learner::configure), grouped as:
//!
//! - **General**: threads, population limits, trial counts, loss function
//! - **Multistep**: discount and exploration schedule
//! - **EA**: selection, crossover and self-adaptive mutation
//! - **Subsumption**: EA and action-set subsumption
//! - **Classifier**: accuracy, update rates and deletion thresholds
//! - **Representation**: condition, prediction and action types
//!
//! Setters clamp out-of-range values to the nearest valid value and log a
//! warning instead of failing. The same options are reachable by name through
//! [`LearnerParams::set`] and [`LearnerParams::get`] for learners that consume
//! a flat `NAME -> value` mapping.
//!
//! # Examples
//!
//! ```
//! use rmux::{LearnerParams, ParamValue};
//!
//! let mut params = LearnerParams::default();
//! params.set_pop_size(1000);
//! params.set("BETA", 0.2.into()).unwrap();
//! params.set("EA_SUBSUMPTION", true.into()).unwrap();
//!
//! assert_eq!(params.pop_size(), 1000);
//! assert_eq!(params.get("BETA").unwrap(), ParamValue::Real(0.2));
//!
//! // Out-of-range values are clamped
//! params.set_p_explore(1.5);
//! assert_eq!(params.p_explore(), 1.0);
//! ```

use crate::{Result, RmuxError};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

/// Number of loss functions a learner may select with `LOSS_FUNC`.
pub const LOSS_NUM: u32 = 6;

/// Every recognized parameter name, in group order.
pub const PARAM_NAMES: [&str; 33] = [
    // general
    "OMP_NUM_THREADS",
    "POP_INIT",
    "MAX_TRIALS",
    "PERF_TRIALS",
    "POP_SIZE",
    "LOSS_FUNC",
    "AUTO_ENCODE",
    // multistep
    "GAMMA",
    "TELETRANSPORTATION",
    "P_EXPLORE",
    // ea
    "EA_SELECT_TYPE",
    "EA_SELECT_SIZE",
    "THETA_EA",
    "LAMBDA",
    "P_CROSSOVER",
    "SAM_TYPE",
    // subsumption
    "EA_SUBSUMPTION",
    "SET_SUBSUMPTION",
    "THETA_SUB",
    // classifier
    "EPS_0",
    "ALPHA",
    "NU",
    "BETA",
    "DELTA",
    "THETA_DEL",
    "INIT_FITNESS",
    "INIT_ERROR",
    "ERR_REDUC",
    "FIT_REDUC",
    "M_PROBATION",
    // representation
    "COND_TYPE",
    "PRED_TYPE",
    "ACT_TYPE",
];

/// A single named parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Real(f64),
}

impl ParamValue {
    fn as_int(self, name: &str) -> Result<i64> {
        match self {
            ParamValue::Int(v) => Ok(v),
            other => Err(RmuxError::InvalidParameter(format!(
                "{} expects an integer, got {}",
                name, other
            ))),
        }
    }

    /// Integers are accepted where a real is expected.
    fn as_real(self, name: &str) -> Result<f64> {
        match self {
            ParamValue::Real(v) => Ok(v),
            ParamValue::Int(v) => Ok(v as f64),
            other => Err(RmuxError::InvalidParameter(format!(
                "{} expects a real, got {}",
                name, other
            ))),
        }
    }

    fn as_bool(self, name: &str) -> Result<bool> {
        match self {
            ParamValue::Bool(v) => Ok(v),
            other => Err(RmuxError::InvalidParameter(format!(
                "{} expects a boolean, got {}",
                name, other
            ))),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(v) => write!(f, "{}", v),
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Real(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(i64::from(v))
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Real(v)
    }
}

fn clamp_real(name: &str, a: f64, min: f64, max: f64) -> f64 {
    if a.is_nan() {
        warn!(param = name, "tried to set {} to NaN", name);
        min
    } else if a < min {
        warn!(param = name, value = a, "tried to set {} too small", name);
        min
    } else if a > max {
        warn!(param = name, value = a, "tried to set {} too large", name);
        max
    } else {
        a
    }
}

fn clamp_int(name: &str, a: i64, min: i64, max: i64) -> i64 {
    if a < min {
        warn!(param = name, value = a, "tried to set {} too small", name);
        min
    } else if a > max {
        warn!(param = name, value = a, "tried to set {} too large", name);
        max
    } else {
        a
    }
}

fn clamp_u32(name: &str, a: i64, min: u32, max: u32) -> u32 {
    // bounds are u32, so the clamped value always fits
    clamp_int(name, a, i64::from(min), i64::from(max)) as u32
}

/// Typed learner hyperparameters with the learner's defaults.
///
/// Deserialized values pass through the same setters as
/// [`LearnerParams::set`], so out-of-range fields are clamped on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawLearnerParams")]
pub struct LearnerParams {
    // general
    omp_num_threads: u32,
    pop_init: bool,
    max_trials: u64,
    perf_trials: usize,
    pop_size: usize,
    loss_func: u32,
    auto_encode: bool,

    // multistep
    gamma: f64,
    teletransportation: u32,
    p_explore: f64,

    // ea
    ea_select_type: u32,
    ea_select_size: f64,
    theta_ea: f64,
    lambda: u32,
    p_crossover: f64,
    sam_type: u32,

    // subsumption
    ea_subsumption: bool,
    set_subsumption: bool,
    theta_sub: u32,

    // classifier
    eps_0: f64,
    alpha: f64,
    nu: f64,
    beta: f64,
    delta: f64,
    theta_del: u32,
    init_fitness: f64,
    init_error: f64,
    err_reduc: f64,
    fit_reduc: f64,
    m_probation: u32,

    // representation
    cond_type: u32,
    pred_type: u32,
    act_type: u32,
}

impl Default for LearnerParams {
    fn default() -> Self {
        Self {
            omp_num_threads: 8,
            pop_init: true,
            max_trials: 100_000,
            perf_trials: 1000,
            pop_size: 2000,
            loss_func: 0,
            auto_encode: false,

            gamma: 0.95,
            teletransportation: 50,
            p_explore: 0.9,

            ea_select_type: 0,
            ea_select_size: 0.4,
            theta_ea: 50.0,
            lambda: 2,
            p_crossover: 0.8,
            sam_type: 0,

            ea_subsumption: false,
            set_subsumption: false,
            theta_sub: 20,

            eps_0: 0.01,
            alpha: 0.1,
            nu: 5.0,
            beta: 0.1,
            delta: 0.1,
            theta_del: 20,
            init_fitness: 0.01,
            init_error: 0.0,
            err_reduc: 1.0,
            fit_reduc: 0.1,
            m_probation: 10_000,

            cond_type: 1,
            pred_type: 1,
            act_type: 0,
        }
    }
}

impl LearnerParams {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- general ----

    pub fn omp_num_threads(&self) -> u32 {
        self.omp_num_threads
    }
    pub fn set_omp_num_threads(&mut self, a: i64) {
        self.omp_num_threads = clamp_u32("OMP_NUM_THREADS", a, 1, 1000);
    }

    pub fn pop_init(&self) -> bool {
        self.pop_init
    }
    pub fn set_pop_init(&mut self, a: bool) {
        self.pop_init = a;
    }

    pub fn max_trials(&self) -> u64 {
        self.max_trials
    }
    pub fn set_max_trials(&mut self, a: i64) {
        self.max_trials = clamp_int("MAX_TRIALS", a, 1, i64::MAX) as u64;
    }

    /// Exploit trials per metric block.
    pub fn perf_trials(&self) -> usize {
        self.perf_trials
    }
    pub fn set_perf_trials(&mut self, a: i64) {
        self.perf_trials = clamp_int("PERF_TRIALS", a, 1, i64::MAX) as usize;
    }

    /// Maximum population size (in micro-classifiers).
    pub fn pop_size(&self) -> usize {
        self.pop_size
    }
    pub fn set_pop_size(&mut self, a: i64) {
        self.pop_size = clamp_int("POP_SIZE", a, 1, i64::MAX) as usize;
    }

    pub fn loss_func(&self) -> u32 {
        self.loss_func
    }
    pub fn set_loss_func(&mut self, a: i64) {
        self.loss_func = clamp_u32("LOSS_FUNC", a, 0, LOSS_NUM - 1);
    }

    pub fn auto_encode(&self) -> bool {
        self.auto_encode
    }
    pub fn set_auto_encode(&mut self, a: bool) {
        self.auto_encode = a;
    }

    // ---- multistep ----

    pub fn gamma(&self) -> f64 {
        self.gamma
    }
    pub fn set_gamma(&mut self, a: f64) {
        self.gamma = clamp_real("GAMMA", a, 0.0, 1.0);
    }

    pub fn teletransportation(&self) -> u32 {
        self.teletransportation
    }
    pub fn set_teletransportation(&mut self, a: i64) {
        self.teletransportation = clamp_u32("TELETRANSPORTATION", a, 0, u32::MAX);
    }

    pub fn p_explore(&self) -> f64 {
        self.p_explore
    }
    pub fn set_p_explore(&mut self, a: f64) {
        self.p_explore = clamp_real("P_EXPLORE", a, 0.0, 1.0);
    }

    // ---- ea ----

    pub fn ea_select_type(&self) -> u32 {
        self.ea_select_type
    }
    pub fn set_ea_select_type(&mut self, a: i64) {
        self.ea_select_type = clamp_u32("EA_SELECT_TYPE", a, 0, u32::MAX);
    }

    pub fn ea_select_size(&self) -> f64 {
        self.ea_select_size
    }
    pub fn set_ea_select_size(&mut self, a: f64) {
        self.ea_select_size = clamp_real("EA_SELECT_SIZE", a, 0.0, 1.0);
    }

    /// Average match set time between EA invocations.
    pub fn theta_ea(&self) -> f64 {
        self.theta_ea
    }
    pub fn set_theta_ea(&mut self, a: f64) {
        self.theta_ea = clamp_real("THETA_EA", a, 0.0, f64::MAX);
    }

    pub fn lambda(&self) -> u32 {
        self.lambda
    }
    pub fn set_lambda(&mut self, a: i64) {
        self.lambda = clamp_u32("LAMBDA", a, 0, u32::MAX);
    }

    pub fn p_crossover(&self) -> f64 {
        self.p_crossover
    }
    pub fn set_p_crossover(&mut self, a: f64) {
        self.p_crossover = clamp_real("P_CROSSOVER", a, 0.0, 1.0);
    }

    pub fn sam_type(&self) -> u32 {
        self.sam_type
    }
    pub fn set_sam_type(&mut self, a: i64) {
        self.sam_type = clamp_u32("SAM_TYPE", a, 0, u32::MAX);
    }

    // ---- subsumption ----

    pub fn ea_subsumption(&self) -> bool {
        self.ea_subsumption
    }
    pub fn set_ea_subsumption(&mut self, a: bool) {
        self.ea_subsumption = a;
    }

    pub fn set_subsumption(&self) -> bool {
        self.set_subsumption
    }
    pub fn set_set_subsumption(&mut self, a: bool) {
        self.set_subsumption = a;
    }

    /// Minimum experience of a subsumer.
    pub fn theta_sub(&self) -> u32 {
        self.theta_sub
    }
    pub fn set_theta_sub(&mut self, a: i64) {
        self.theta_sub = clamp_u32("THETA_SUB", a, 0, u32::MAX);
    }

    // ---- classifier ----

    /// Target error under which accuracy is 1.
    pub fn eps_0(&self) -> f64 {
        self.eps_0
    }
    pub fn set_eps_0(&mut self, a: f64) {
        self.eps_0 = clamp_real("EPS_0", a, 0.0, f64::MAX);
    }

    /// Accuracy offset.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
    pub fn set_alpha(&mut self, a: f64) {
        self.alpha = clamp_real("ALPHA", a, 0.0, 1.0);
    }

    /// Accuracy slope.
    pub fn nu(&self) -> f64 {
        self.nu
    }
    pub fn set_nu(&mut self, a: f64) {
        self.nu = clamp_real("NU", a, 0.0, f64::MAX);
    }

    /// Classifier parameter update rate.
    pub fn beta(&self) -> f64 {
        self.beta
    }
    pub fn set_beta(&mut self, a: f64) {
        self.beta = clamp_real("BETA", a, 0.0, 1.0);
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }
    pub fn set_delta(&mut self, a: f64) {
        self.delta = clamp_real("DELTA", a, 0.0, 1.0);
    }

    pub fn theta_del(&self) -> u32 {
        self.theta_del
    }
    pub fn set_theta_del(&mut self, a: i64) {
        self.theta_del = clamp_u32("THETA_DEL", a, 0, u32::MAX);
    }

    pub fn init_fitness(&self) -> f64 {
        self.init_fitness
    }
    pub fn set_init_fitness(&mut self, a: f64) {
        self.init_fitness = clamp_real("INIT_FITNESS", a, 0.0, f64::MAX);
    }

    pub fn init_error(&self) -> f64 {
        self.init_error
    }
    pub fn set_init_error(&mut self, a: f64) {
        self.init_error = clamp_real("INIT_ERROR", a, 0.0, f64::MAX);
    }

    pub fn err_reduc(&self) -> f64 {
        self.err_reduc
    }
    pub fn set_err_reduc(&mut self, a: f64) {
        self.err_reduc = clamp_real("ERR_REDUC", a, 0.0, 1.0);
    }

    pub fn fit_reduc(&self) -> f64 {
        self.fit_reduc
    }
    pub fn set_fit_reduc(&mut self, a: f64) {
        self.fit_reduc = clamp_real("FIT_REDUC", a, 0.0, 1.0);
    }

    pub fn m_probation(&self) -> u32 {
        self.m_probation
    }
    pub fn set_m_probation(&mut self, a: i64) {
        self.m_probation = clamp_u32("M_PROBATION", a, 0, u32::MAX);
    }

    // ---- representation ----

    pub fn cond_type(&self) -> u32 {
        self.cond_type
    }
    pub fn set_cond_type(&mut self, a: i64) {
        self.cond_type = clamp_u32("COND_TYPE", a, 0, u32::MAX);
    }

    pub fn pred_type(&self) -> u32 {
        self.pred_type
    }
    pub fn set_pred_type(&mut self, a: i64) {
        self.pred_type = clamp_u32("PRED_TYPE", a, 0, u32::MAX);
    }

    pub fn act_type(&self) -> u32 {
        self.act_type
    }
    pub fn set_act_type(&mut self, a: i64) {
        self.act_type = clamp_u32("ACT_TYPE", a, 0, u32::MAX);
    }

    /// Set a parameter by its upper-case name.
    ///
    /// # Errors
    ///
    /// Returns [`RmuxError::InvalidParameter`] for an unknown name or a value
    /// of the wrong kind. Out-of-range values are clamped, not rejected.
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<()> {
        match name {
            "OMP_NUM_THREADS" => self.set_omp_num_threads(value.as_int(name)?),
            "POP_INIT" => self.set_pop_init(value.as_bool(name)?),
            "MAX_TRIALS" => self.set_max_trials(value.as_int(name)?),
            "PERF_TRIALS" => self.set_perf_trials(value.as_int(name)?),
            "POP_SIZE" => self.set_pop_size(value.as_int(name)?),
            "LOSS_FUNC" => self.set_loss_func(value.as_int(name)?),
            "AUTO_ENCODE" => self.set_auto_encode(value.as_bool(name)?),
            "GAMMA" => self.set_gamma(value.as_real(name)?),
            "TELETRANSPORTATION" => self.set_teletransportation(value.as_int(name)?),
            "P_EXPLORE" => self.set_p_explore(value.as_real(name)?),
            "EA_SELECT_TYPE" => self.set_ea_select_type(value.as_int(name)?),
            "EA_SELECT_SIZE" => self.set_ea_select_size(value.as_real(name)?),
            "THETA_EA" => self.set_theta_ea(value.as_real(name)?),
            "LAMBDA" => self.set_lambda(value.as_int(name)?),
            "P_CROSSOVER" => self.set_p_crossover(value.as_real(name)?),
            "SAM_TYPE" => self.set_sam_type(value.as_int(name)?),
            "EA_SUBSUMPTION" => self.set_ea_subsumption(value.as_bool(name)?),
            "SET_SUBSUMPTION" => self.set_set_subsumption(value.as_bool(name)?),
            "THETA_SUB" => self.set_theta_sub(value.as_int(name)?),
            "EPS_0" => self.set_eps_0(value.as_real(name)?),
            "ALPHA" => self.set_alpha(value.as_real(name)?),
            "NU" => self.set_nu(value.as_real(name)?),
            "BETA" => self.set_beta(value.as_real(name)?),
            "DELTA" => self.set_delta(value.as_real(name)?),
            "THETA_DEL" => self.set_theta_del(value.as_int(name)?),
            "INIT_FITNESS" => self.set_init_fitness(value.as_real(name)?),
            "INIT_ERROR" => self.set_init_error(value.as_real(name)?),
            "ERR_REDUC" => self.set_err_reduc(value.as_real(name)?),
            "FIT_REDUC" => self.set_fit_reduc(value.as_real(name)?),
            "M_PROBATION" => self.set_m_probation(value.as_int(name)?),
            "COND_TYPE" => self.set_cond_type(value.as_int(name)?),
            "PRED_TYPE" => self.set_pred_type(value.as_int(name)?),
            "ACT_TYPE" => self.set_act_type(value.as_int(name)?),
            _ => {
                return Err(RmuxError::InvalidParameter(format!(
                    "unknown parameter {}",
                    name
                )))
            }
        }
        Ok(())
    }

    /// Get a parameter by its upper-case name.
    pub fn get(&self, name: &str) -> Result<ParamValue> {
        self.lookup(name)
            .ok_or_else(|| RmuxError::InvalidParameter(format!("unknown parameter {}", name)))
    }

    fn lookup(&self, name: &str) -> Option<ParamValue> {
        let value = match name {
            "OMP_NUM_THREADS" => ParamValue::Int(i64::from(self.omp_num_threads)),
            "POP_INIT" => ParamValue::Bool(self.pop_init),
            "MAX_TRIALS" => ParamValue::Int(self.max_trials as i64),
            "PERF_TRIALS" => ParamValue::Int(self.perf_trials as i64),
            "POP_SIZE" => ParamValue::Int(self.pop_size as i64),
            "LOSS_FUNC" => ParamValue::Int(i64::from(self.loss_func)),
            "AUTO_ENCODE" => ParamValue::Bool(self.auto_encode),
            "GAMMA" => ParamValue::Real(self.gamma),
            "TELETRANSPORTATION" => ParamValue::Int(i64::from(self.teletransportation)),
            "P_EXPLORE" => ParamValue::Real(self.p_explore),
            "EA_SELECT_TYPE" => ParamValue::Int(i64::from(self.ea_select_type)),
            "EA_SELECT_SIZE" => ParamValue::Real(self.ea_select_size),
            "THETA_EA" => ParamValue::Real(self.theta_ea),
            "LAMBDA" => ParamValue::Int(i64::from(self.lambda)),
            "P_CROSSOVER" => ParamValue::Real(self.p_crossover),
            "SAM_TYPE" => ParamValue::Int(i64::from(self.sam_type)),
            "EA_SUBSUMPTION" => ParamValue::Bool(self.ea_subsumption),
            "SET_SUBSUMPTION" => ParamValue::Bool(self.set_subsumption),
            "THETA_SUB" => ParamValue::Int(i64::from(self.theta_sub)),
            "EPS_0" => ParamValue::Real(self.eps_0),
            "ALPHA" => ParamValue::Real(self.alpha),
            "NU" => ParamValue::Real(self.nu),
            "BETA" => ParamValue::Real(self.beta),
            "DELTA" => ParamValue::Real(self.delta),
            "THETA_DEL" => ParamValue::Int(i64::from(self.theta_del)),
            "INIT_FITNESS" => ParamValue::Real(self.init_fitness),
            "INIT_ERROR" => ParamValue::Real(self.init_error),
            "ERR_REDUC" => ParamValue::Real(self.err_reduc),
            "FIT_REDUC" => ParamValue::Real(self.fit_reduc),
            "M_PROBATION" => ParamValue::Int(i64::from(self.m_probation)),
            "COND_TYPE" => ParamValue::Int(i64::from(self.cond_type)),
            "PRED_TYPE" => ParamValue::Int(i64::from(self.pred_type)),
            "ACT_TYPE" => ParamValue::Int(i64::from(self.act_type)),
            _ => return None,
        };
        Some(value)
    }

    /// Every parameter as a `(NAME, value)` pair, in group order.
    pub fn entries(&self) -> Vec<(&'static str, ParamValue)> {
        PARAM_NAMES
            .iter()
            .filter_map(|&name| self.lookup(name).map(|value| (name, value)))
            .collect()
    }

    /// Log every parameter at `info` level.
    pub fn log_summary(&self) {
        info!(params = %self, "learner parameters");
    }
}

/// Field-for-field image of [`LearnerParams`] as it appears on the wire.
#[derive(Deserialize)]
struct RawLearnerParams {
    omp_num_threads: u32,
    pop_init: bool,
    max_trials: u64,
    perf_trials: usize,
    pop_size: usize,
    loss_func: u32,
    auto_encode: bool,
    gamma: f64,
    teletransportation: u32,
    p_explore: f64,
    ea_select_type: u32,
    ea_select_size: f64,
    theta_ea: f64,
    lambda: u32,
    p_crossover: f64,
    sam_type: u32,
    ea_subsumption: bool,
    set_subsumption: bool,
    theta_sub: u32,
    eps_0: f64,
    alpha: f64,
    nu: f64,
    beta: f64,
    delta: f64,
    theta_del: u32,
    init_fitness: f64,
    init_error: f64,
    err_reduc: f64,
    fit_reduc: f64,
    m_probation: u32,
    cond_type: u32,
    pred_type: u32,
    act_type: u32,
}

fn saturating_i64<T: TryInto<i64>>(v: T) -> i64 {
    v.try_into().unwrap_or(i64::MAX)
}

impl From<RawLearnerParams> for LearnerParams {
    fn from(raw: RawLearnerParams) -> Self {
        let mut params = LearnerParams::default();
        params.set_omp_num_threads(i64::from(raw.omp_num_threads));
        params.set_pop_init(raw.pop_init);
        params.set_max_trials(saturating_i64(raw.max_trials));
        params.set_perf_trials(saturating_i64(raw.perf_trials));
        params.set_pop_size(saturating_i64(raw.pop_size));
        params.set_loss_func(i64::from(raw.loss_func));
        params.set_auto_encode(raw.auto_encode);
        params.set_gamma(raw.gamma);
        params.set_teletransportation(i64::from(raw.teletransportation));
        params.set_p_explore(raw.p_explore);
        params.set_ea_select_type(i64::from(raw.ea_select_type));
        params.set_ea_select_size(raw.ea_select_size);
        params.set_theta_ea(raw.theta_ea);
        params.set_lambda(i64::from(raw.lambda));
        params.set_p_crossover(raw.p_crossover);
        params.set_sam_type(i64::from(raw.sam_type));
        params.set_ea_subsumption(raw.ea_subsumption);
        params.set_set_subsumption(raw.set_subsumption);
        params.set_theta_sub(i64::from(raw.theta_sub));
        params.set_eps_0(raw.eps_0);
        params.set_alpha(raw.alpha);
        params.set_nu(raw.nu);
        params.set_beta(raw.beta);
        params.set_delta(raw.delta);
        params.set_theta_del(i64::from(raw.theta_del));
        params.set_init_fitness(raw.init_fitness);
        params.set_init_error(raw.init_error);
        params.set_err_reduc(raw.err_reduc);
        params.set_fit_reduc(raw.fit_reduc);
        params.set_m_probation(i64::from(raw.m_probation));
        params.set_cond_type(i64::from(raw.cond_type));
        params.set_pred_type(i64::from(raw.pred_type));
        params.set_act_type(i64::from(raw.act_type));
        params
    }
}

impl fmt::Display for LearnerParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = self
            .entries()
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .join(", ");
        f.write_str(&line)
    }
}
