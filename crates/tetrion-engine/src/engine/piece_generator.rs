use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{PieceDefinition, PieceKind};

/// Produces new pieces, each kind chosen uniformly at random.
///
/// Every call draws independently from the 7-entry catalog; there is no bag or
/// history. Each returned [`PieceDefinition`] owns its shape.
///
/// # Example
///
/// ```
/// use tetrion_engine::PieceFactory;
///
/// let mut a = PieceFactory::from_seed(42);
/// let mut b = PieceFactory::from_seed(42);
/// assert_eq!(a.next_piece(), b.next_piece());
/// ```
#[derive(Debug, Clone)]
pub struct PieceFactory {
    rng: Pcg32,
}

impl Default for PieceFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceFactory {
    /// Creates a new [`PieceFactory`].
    ///
    /// The random seed is initialized from the OS's random data source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: Pcg32::from_os_rng(),
        }
    }

    /// Creates a factory producing a reproducible sequence.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Returns a fresh piece of a uniformly chosen kind.
    pub fn next_piece(&mut self) -> PieceDefinition {
        let kind: PieceKind = self.rng.random();
        PieceDefinition::new(kind)
    }
}
