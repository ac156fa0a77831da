//! Random sources for the placement engine.
//!
//! The engine never reaches for a global generator. It draws from a
//! [`RandomSource`], which production code backs with a `rand` generator and
//! tests replace with a scripted sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

/// A uniform generator over `[0, 1)`.
pub trait RandomSource {
    /// Next value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

/// [`RandomSource`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Deterministic source: the same seed yields the same sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        // `Standard` for f64 samples the half-open interval [0, 1).
        self.rng.r#gen::<f64>()
    }
}

/// Derive a stable seed from the ordered item ids.
///
/// Adding, removing or reordering an item changes the seed; rebuilding the
/// same scene does not.
pub fn content_seed<'a>(ids: impl IntoIterator<Item = &'a str>) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(b"collage\0");
    for id in ids {
        hasher.update(id.as_bytes());
        hasher.update(b"\0");
    }
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

/// Pick the seed for a run: an explicit seed wins, then the content seed
/// when `stable` is set. `None` means seed from entropy.
pub fn choose_seed<'a>(
    explicit: Option<u64>,
    stable: bool,
    ids: impl IntoIterator<Item = &'a str>,
) -> Option<u64> {
    explicit.or_else(|| stable.then(|| content_seed(ids)))
}

/// Build the random source for a run from [`choose_seed`]'s result.
pub fn source_for(seed: Option<u64>) -> RngSource<StdRng> {
    match seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_entropy(),
    }
}
