//! Trait Selection
//!
//! One selection routine, two entropy sources. The seeded source carves
//! non-overlapping bit windows out of a single hash; the random source draws
//! from any `rand::Rng`.

use rand::Rng;
use tracing::debug;

use crate::traits::{AvatarConfig, ContainerVariant, ExpressionVariant, PaletteVariant};

/// Right-shift applied to the seed hash for each slot, in selection order:
/// container, expression, palette, accent palette.
///
/// Changing these values changes every seeded avatar ever generated.
pub const SEED_WINDOW_SHIFTS: [u32; 4] = [0, 4, 8, 12];

/// Supplies "next index in `0..len`" to the selection routine.
pub trait IndexSource {
    fn next_index(&mut self, len: usize) -> usize;
}

/// Deterministic source reading successive bit windows of a seed hash.
#[derive(Debug, Clone)]
pub struct SeedWindows {
    hash: u32,
    slot: usize,
}

impl SeedWindows {
    pub fn new(hash: u32) -> Self {
        Self { hash, slot: 0 }
    }
}

impl IndexSource for SeedWindows {
    fn next_index(&mut self, len: usize) -> usize {
        // Past the documented windows, keep shifting by the same stride.
        let shift = SEED_WINDOW_SHIFTS
            .get(self.slot)
            .copied()
            .unwrap_or(4 * self.slot as u32)
            .min(31);
        self.slot += 1;
        (self.hash >> shift) as usize % len
    }
}

/// Uniform source backed by an RNG.
pub struct RngSource<'a, R: Rng> {
    rng: &'a mut R,
}

impl<'a, R: Rng> RngSource<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> IndexSource for RngSource<'_, R> {
    fn next_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Pick every trait category from `source`, in slot order.
pub fn select<S: IndexSource>(source: &mut S) -> AvatarConfig {
    let container = ContainerVariant::ALL[source.next_index(ContainerVariant::ALL.len())];
    let expression = ExpressionVariant::ALL[source.next_index(ExpressionVariant::ALL.len())];
    let palette = PaletteVariant::ALL[source.next_index(PaletteVariant::ALL.len())];
    let accent = PaletteVariant::ALL[source.next_index(PaletteVariant::ALL.len())];

    AvatarConfig::new(container, expression, palette).with_accent(accent)
}

/// Seeded path: reproducible selection from a seed hash.
pub fn select_seeded(hash: u32, seed: impl Into<String>) -> AvatarConfig {
    let config = select(&mut SeedWindows::new(hash)).with_seed(seed);
    debug!(
        hash,
        container = %config.container,
        expression = %config.expression,
        palette = %config.palette,
        "seeded trait selection"
    );
    config
}

/// Random path: each category drawn uniformly and independently.
pub fn select_random<R: Rng>(rng: &mut R) -> AvatarConfig {
    select(&mut RngSource::new(rng))
}
