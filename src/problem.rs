//! Real-valued multiplexer problem generator.
//!
//! Each state is a vector of reals drawn uniformly from `[0, 1)` and read as
//! bits with a `> 0.5` threshold. The leading address bits (most significant
//! first) select one of the trailing data bits, and the correct action is the
//! value of that bit.
//!
//! # Examples
//!
//! ```
//! use rmux::problem::{answer, reward};
//!
//! // 6-bit multiplexer: 2 address bits, 4 data bits.
//! // Address bits [1, 0] select data bit 2, which sits at position 4.
//! let state = [0.9, 0.1, 0.2, 0.3, 0.8, 0.4];
//! assert_eq!(answer(&state, 2), 1);
//! assert_eq!(reward(&state, 2, 1), 1);
//! assert_eq!(reward(&state, 2, 0), 0);
//! ```

use crate::{Layout, Result, RmuxError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Value above which a state position reads as a set bit.
pub const BIT_THRESHOLD: f64 = 0.5;

/// Number of distinct actions in the multiplexer problem.
pub const NUM_ACTIONS: usize = 2;

/// A decision produced by a learner, in `0..NUM_ACTIONS`.
pub type Action = usize;

/// Binary payoff: `1` for the correct action, `0` otherwise.
pub type Reward = u8;

/// Fill `state` with independent uniform draws from `[0, 1)`.
pub fn reset<R: Rng>(state: &mut [f64], rng: &mut R) {
    for value in state.iter_mut() {
        *value = rng.gen::<f64>();
    }
}

/// Read a state position as a bit.
#[inline]
pub fn is_set(value: f64) -> bool {
    value > BIT_THRESHOLD
}

/// Thresholded bit view of a state.
pub fn state_bits(state: &[f64]) -> Vec<bool> {
    state.iter().map(|&v| is_set(v)).collect()
}

/// Address encoded by the first `address_bits` positions, most significant first.
#[inline]
pub fn address(state: &[f64], address_bits: usize) -> usize {
    state[..address_bits]
        .iter()
        .enumerate()
        .fold(0, |acc, (i, &v)| {
            if is_set(v) {
                acc | (1 << (address_bits - 1 - i))
            } else {
                acc
            }
        })
}

/// Correct action for `state`: the value of the addressed data bit.
///
/// # Panics
///
/// Panics if `state` is shorter than `address_bits + 2^address_bits`.
#[inline]
pub fn answer(state: &[f64], address_bits: usize) -> Action {
    let pos = address_bits + address(state, address_bits);
    if is_set(state[pos]) {
        1
    } else {
        0
    }
}

/// Payoff for taking `action` in `state`.
///
/// # Panics
///
/// Panics if `state` is shorter than `address_bits + 2^address_bits`.
#[inline]
pub fn reward(state: &[f64], address_bits: usize, action: Action) -> Reward {
    if action == answer(state, address_bits) {
        1
    } else {
        0
    }
}

/// Real-multiplexer environment with its own seeded RNG and state buffer.
///
/// The buffer is overwritten by every [`RealMultiplexer::reset`] call, so a
/// state borrowed from the generator is only valid until the next reset.
#[derive(Debug, Clone)]
pub struct RealMultiplexer {
    layout: Layout,
    state: Vec<f64>,
    rng: StdRng,
    seed: u64,
}

impl RealMultiplexer {
    /// Create a generator for a multiplexer of `total_bits`.
    ///
    /// # Errors
    ///
    /// Returns [`RmuxError::InvalidLayout`] when `total_bits < 3`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rmux::RealMultiplexer;
    ///
    /// let mut mux = RealMultiplexer::new(6, 42).unwrap();
    /// let state = mux.reset().to_vec();
    /// assert_eq!(state.len(), 6);
    /// assert!(state.iter().all(|&v| (0.0..1.0).contains(&v)));
    /// ```
    pub fn new(total_bits: usize, seed: u64) -> Result<Self> {
        let layout = Layout::new(total_bits)?;
        Ok(Self {
            layout,
            state: vec![0.0; total_bits],
            rng: StdRng::seed_from_u64(seed),
            seed,
        })
    }

    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> &[f64] {
        &self.state
    }

    /// Draw a new random state and return it.
    pub fn reset(&mut self) -> &[f64] {
        reset(&mut self.state, &mut self.rng);
        &self.state
    }

    /// Correct action for the current state.
    #[inline]
    pub fn answer(&self) -> Action {
        answer(&self.state, self.layout.address_bits())
    }

    /// Payoff for taking `action` in the current state.
    #[inline]
    pub fn reward(&self, action: Action) -> Reward {
        reward(&self.state, self.layout.address_bits(), action)
    }

    /// Correct action for an externally supplied state.
    ///
    /// # Errors
    ///
    /// Returns [`RmuxError::StateLength`] if `state` does not have
    /// `total_bits` positions.
    pub fn answer_for(&self, state: &[f64]) -> Result<Action> {
        self.check_len(state)?;
        Ok(answer(state, self.layout.address_bits()))
    }

    /// Payoff for taking `action` in an externally supplied state.
    pub fn reward_for(&self, state: &[f64], action: Action) -> Result<Reward> {
        self.check_len(state)?;
        Ok(reward(state, self.layout.address_bits(), action))
    }

    fn check_len(&self, state: &[f64]) -> Result<()> {
        if state.len() != self.layout.total_bits() {
            return Err(RmuxError::StateLength {
                expected: self.layout.total_bits(),
                actual: state.len(),
            });
        }
        Ok(())
    }
}
