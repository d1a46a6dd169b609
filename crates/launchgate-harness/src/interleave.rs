//! Seeded signal interleavings.
//!
//! The launch gate must reach the same decision whatever order the timer,
//! ready signal and navigations arrive in, as long as navigations keep their
//! relative order. [`Interleaving`] produces such orders reproducibly.

use rand::{SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;

use crate::model::{ModelPoint, Operation};

/// Reproducible interleaving generator.
pub struct Interleaving {
    rng: ChaCha8Rng,
}

impl Interleaving {
    /// Generator seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// One appearance: `Appear`, then the timer, the ready signal and
    /// `navigations` in a shuffled order that keeps navigations in sequence.
    pub fn appearance(&mut self, navigations: &[ModelPoint]) -> Vec<Operation> {
        let mut slots: Vec<Option<Operation>> = vec![Some(Operation::FireTimer), Some(Operation::SurfaceReady)];
        slots.extend(std::iter::repeat_n(None, navigations.len()));
        slots.shuffle(&mut self.rng);

        let mut pending = navigations.iter().copied();
        let mut ops = Vec::with_capacity(slots.len() + 1);
        ops.push(Operation::Appear);
        for slot in slots {
            match slot {
                Some(op) => ops.push(op),
                None => ops.extend(pending.next().map(Operation::Navigate)),
            }
        }
        ops
    }
}
