use std::cell::RefCell;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Shared handle to the process-wide random source.
///
/// Variant groups draw from this on every lookup. Clones share one generator,
/// so the draw order across all holders is observable and a seeded generator
/// makes lookups reproducible.
#[derive(Clone)]
pub struct SharedRng(Rc<RefCell<dyn RngCore>>);

impl SharedRng {
    /// Wraps any generator.
    pub fn new(rng: impl RngCore + 'static) -> Self {
        Self(Rc::new(RefCell::new(rng)))
    }

    /// A deterministic generator.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// A generator seeded from the operating system.
    pub fn from_os() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Draws an index uniformly from `0..len`. `len` must be non-zero.
    pub fn index(&self, len: usize) -> usize {
        self.0.borrow_mut().random_range(0..len)
    }
}

impl Default for SharedRng {
    fn default() -> Self {
        Self::from_os()
    }
}

impl Debug for SharedRng {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("SharedRng")
    }
}
