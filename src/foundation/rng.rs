use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::foundation::math::Fnv1a64;

/// Random source threaded through every randomized choice in the pipeline.
pub type ReelRng = StdRng;

/// Build the pipeline random source.
///
/// `Some(seed)` is fully deterministic; `None` draws a seed from the OS.
pub fn rng_from_seed(seed: Option<u64>) -> ReelRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Derive an independent seed for `(stream, index)` from a base seed.
///
/// Per-frame effects (handheld jitter, glitch rows, grain) seed a fresh RNG from this so a
/// frame can be regenerated without replaying the frames before it.
pub fn derive_seed(base: u64, stream: u64, index: u64) -> u64 {
    let mut h = Fnv1a64::new_default();
    h.write_u64(base);
    h.write_u64(stream);
    h.write_u64(index);
    h.finish()
}

/// RNG for one frame of one effect stream.
pub fn frame_rng(base: u64, stream: u64, index: u64) -> ReelRng {
    StdRng::seed_from_u64(derive_seed(base, stream, index))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rng.rs"]
mod tests;
