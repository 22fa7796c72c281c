//! Random source abstraction for trial generators.
//!
//! Every generator and runner takes its randomness as an explicit
//! `&mut impl RandomSource` instead of reaching for a process-wide generator:
//! - **Reproducible runs**: `SimRng::new(seed)` gives the same draws every time
//! - **Fresh runs**: `SimRng::from_entropy()` seeds from the OS, so repeated
//!   processes differ
//! - **Scripted runs**: `ScriptedRng` replays a fixed sequence for unit tests
//!
//! # Performance
//!
//! `next_uniform` sits on the hot path of every trial. Take sources as
//! `<R: RandomSource>` generic parameters so calls are monomorphized and
//! inlined; the trait stays object safe for the rare `&mut dyn` caller.
//!
//! # Example: Per-Worker Forking
//!
//! ```rust
//! use probsim::{RandomSource, SimRng};
//!
//! let mut master = SimRng::new(42);
//! let mut worker0 = master.fork(); // Independent stream
//! let mut worker1 = master.fork(); // Independent stream
//!
//! assert!(worker0.next_uniform(6) < 6);
//! assert!(worker1.next_uniform(6) < 6);
//! ```

use rand::rngs::SmallRng;
use rand::{Rng as _, RngCore, SeedableRng};

/// Source of uniformly distributed integers.
///
/// Implementations must return values uniformly distributed over
/// `[0, bound)`, each call independent of the previous ones. Draws never run
/// out.
pub trait RandomSource {
    /// Returns a uniform integer in `[0, bound)`.
    ///
    /// `bound` is always positive; generators validate their parameters
    /// before drawing.
    fn next_uniform(&mut self, bound: u64) -> u64;

    /// Derives an independent child stream from this source.
    ///
    /// The child is deterministic given the parent's state, so a forked run
    /// is reproducible whenever the parent is.
    fn fork(&mut self) -> Self
    where
        Self: Sized;
}

// ============================================================================
// Seedable Implementation
// ============================================================================

/// Seedable pseudo-random source backed by `SmallRng`.
#[derive(Debug, Clone)]
pub struct SimRng {
    inner: SmallRng,
    seed: Option<u64>,
}

impl SimRng {
    /// Creates a reproducible source from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Creates a source seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self {
            inner: SmallRng::from_entropy(),
            seed: None,
        }
    }

    /// Returns the seed, or `None` for entropy-seeded sources.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns a raw 64-bit draw.
    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }
}

impl RandomSource for SimRng {
    #[inline]
    fn next_uniform(&mut self, bound: u64) -> u64 {
        debug_assert!(bound > 0, "bound must be positive");
        self.inner.gen_range(0..bound)
    }

    fn fork(&mut self) -> Self {
        Self::new(self.inner.next_u64())
    }
}

// ============================================================================
// Scripted Implementation
// ============================================================================

/// Replays a fixed sequence of draws, cycling when exhausted.
///
/// Each scripted value is reduced modulo the requested bound, so a script
/// written for `bound = 6` stays in range when reused for `bound = 3`. An empty
/// script always draws 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    script: Vec<u64>,
    cursor: usize,
    draws: u64,
}

impl ScriptedRng {
    /// Creates a source that replays `script` in order.
    pub fn new(script: impl Into<Vec<u64>>) -> Self {
        Self {
            script: script.into(),
            cursor: 0,
            draws: 0,
        }
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl RandomSource for ScriptedRng {
    fn next_uniform(&mut self, bound: u64) -> u64 {
        debug_assert!(bound > 0, "bound must be positive");
        self.draws += 1;
        if self.script.is_empty() {
            return 0;
        }
        let value = self.script[self.cursor % self.script.len()];
        self.cursor = (self.cursor + 1) % self.script.len();
        value % bound
    }

    /// Forks a replay of the parent's upcoming draws.
    fn fork(&mut self) -> Self {
        Self {
            script: self.script.clone(),
            cursor: self.cursor,
            draws: 0,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
