//! Per-event random streams.

use std::hash::Hasher;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use siphasher::sip::SipHasher13;

/// Seeded random stream owned by whoever draws for one event.
///
/// Conversion itself is deterministic; only smearing and the cascade
/// generator draw from a handle. Event streams come from [`event_seed`], so
/// replaying an event with the same master seed replays its draws.
#[derive(Debug, Clone)]
pub struct RngHandle {
    seed: u64,
    rng: StdRng,
}

impl RngHandle {
    /// Stream seeded directly with `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Stream for event `event_number` of a run seeded with `master_seed`.
    pub fn for_event(master_seed: u64, event_number: u64) -> Self {
        Self::from_seed(event_seed(master_seed, event_number))
    }

    /// Seed the stream started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Underlying generator, for distributions that want a concrete `Rng`.
    pub fn inner_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

impl RngCore for RngHandle {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

/// SipHash-1-3 (zero keys) of `(master_seed, event_number)`; platform independent.
pub fn event_seed(master_seed: u64, event_number: u64) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write_u64(master_seed);
    hasher.write_u64(event_number);
    hasher.finish()
}
