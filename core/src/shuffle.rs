//! Fisher-Yates shuffling driven by [`random_index`].
//!
//! Used to randomize the order of recovery-phrase words before display, so a
//! user locates words by reading rather than by memorized position.

use crate::entropy::EntropySource;
use crate::sampling::{random_index, SampleError};

/// Shuffle `items` in place.
///
/// Walks from the last index down to 1, swapping each position with a
/// uniformly drawn index at or below it. Every permutation is reachable with
/// equal probability given an unbiased source.
pub fn shuffle_in_place<T>(
    source: &mut impl EntropySource,
    items: &mut [T],
) -> Result<(), SampleError> {
    for i in (1..items.len()).rev() {
        let j = random_index(source, 0, i as u64)? as usize;
        items.swap(i, j);
    }
    Ok(())
}

/// Return a shuffled copy of `items`, leaving the caller's slice untouched.
pub fn shuffle<T: Clone>(
    source: &mut impl EntropySource,
    items: &[T],
) -> Result<Vec<T>, SampleError> {
    let mut out = items.to_vec();
    shuffle_in_place(source, &mut out)?;
    Ok(out)
}
