//! # Random Selection
//!
//! File: cli/src/bot/random.rs
//! Author: Clarence Itai Msindo
//!
//! One RNG is created at startup and handed to the responder. Passing
//! `--seed` makes the sequence of randomized replies reproducible.
//!
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Creates the process-wide RNG, seeded from the OS unless a seed is given.
///
/// # Arguments
///
/// * `seed` - The value of `--seed`, if any. The same seed reproduces the same
///   sequence of randomized replies for the same input.
///
/// # Returns
///
/// * `StdRng` - Owned by the `Responder` for the rest of the process.
pub fn process_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            debug!("Seeding reply RNG with {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    }
}

/// Uniformly selects one item.
///
/// # Arguments
///
/// * `items` - The candidates. Config validation rejects empty lists, so the
///   responder never passes one.
/// * `rng` - The injected random source.
///
/// # Returns
///
/// * `Option<&T>` - `None` only for an empty slice.
pub fn pick_random<'a, T, R>(items: &'a [T], rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    items.choose(rng)
}
