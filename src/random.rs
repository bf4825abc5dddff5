//! Shared random source for point sampling.
//!
//! [`Cell::sample_point`] takes any `Rng`, so single-threaded callers just
//! pass their own generator. `SharedRng` is for the case where several
//! threads sample from one seeded stream.

use crate::cell::Cell;
use geo::Point;
use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;

/// Cloneable handle to a lock-guarded `StdRng`.
#[derive(Debug, Clone)]
pub struct SharedRng {
    inner: Arc<Mutex<StdRng>>,
}

impl SharedRng {
    /// Deterministic source for reproducible sampling.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    pub fn from_rng(rng: StdRng) -> Self {
        Self {
            inner: Arc::new(Mutex::new(rng)),
        }
    }

    /// Sample a point inside `cell`, holding the lock for one draw.
    pub fn sample_point(&self, cell: &Cell) -> Point {
        let mut rng = self.inner.lock();
        cell.sample_point(&mut *rng)
    }

    /// Run `f` with exclusive access to the generator.
    pub fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.inner.lock();
        f(&mut rng)
    }
}

impl Default for SharedRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
