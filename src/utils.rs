//! Utility functions for the taxi-driver crate

use rand::{Rng, SeedableRng, prelude::IndexedRandom, rngs::StdRng};

/// Build a random number generator, seeded when a seed is given.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use taxi_driver::utils::build_rng;
///
/// let a: u64 = build_rng(Some(7)).random();
/// let b: u64 = build_rng(Some(7)).random();
/// assert_eq!(a, b);
/// ```
pub fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Items whose score is maximal, in their original order.
///
/// NaN scores never win. Returns an empty vector for empty input.
///
/// # Examples
///
/// ```
/// use taxi_driver::utils::max_ties;
///
/// let best = max_ties(vec![("a", -2.0), ("b", -1.0), ("c", -1.0)]);
/// assert_eq!(best, vec!["b", "c"]);
/// ```
pub fn max_ties<T, I>(scored: I) -> Vec<T>
where
    I: IntoIterator<Item = (T, f64)>,
{
    let mut best = f64::NEG_INFINITY;
    let mut winners = Vec::new();
    for (item, score) in scored {
        if score > best {
            best = score;
            winners.clear();
            winners.push(item);
        } else if score == best {
            winners.push(item);
        }
    }
    winners
}

/// Uniformly pick one of the maximal items.
///
/// Returns `None` if there is no candidate.
pub fn choose_max<R, T, I>(rng: &mut R, scored: I) -> Option<T>
where
    R: Rng,
    T: Clone,
    I: IntoIterator<Item = (T, f64)>,
{
    max_ties(scored).choose(rng).cloned()
}
