use rand::{prelude::*, rngs::SmallRng};
use rand_distr::{Distribution, Uniform};

/// The generator that drives a whole layout. All draws come from this one stream, so their order
/// is part of the output.
pub fn dungeon_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Uniform draw from `[0, bound)`. `bound` must be positive.
pub fn sample_below<R: Rng>(rng: &mut R, bound: i32) -> i32 {
    Uniform::from(0..bound).sample(rng)
}

/// Uniform draw from `[min, min + spread)`.
pub fn sample_offset<R: Rng>(rng: &mut R, min: i32, spread: i32) -> i32 {
    min + sample_below(rng, spread)
}
