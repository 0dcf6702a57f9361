//! Statistical checks over the sampling, shuffling, and selection paths.
//!
//! Everything runs against a seeded source so results are reproducible; the
//! chi-square bounds are generous versus the p=0.001 critical values, so a
//! pass means "not visibly biased" rather than a full statistical audit.

use crate::challenge::pick_verification_indices;
use crate::entropy::SeededEntropy;
use crate::sampling::random_index;
use crate::shuffle::shuffle;

fn chi_square(counts: &[u64], expected: f64) -> f64 {
    counts
        .iter()
        .map(|&count| {
            let diff = count as f64 - expected;
            diff * diff / expected
        })
        .sum()
}

#[test]
fn test_small_range_is_uniform() {
    const TRIALS: usize = 100_000;
    let mut source = SeededEntropy::from_u64(0x5eed_0001);
    let mut counts = [0u64; 3];
    for _ in 0..TRIALS {
        counts[random_index(&mut source, 0, 2).unwrap() as usize] += 1;
    }

    // df = 2, p = 0.001 critical value is ~13.8.
    let chi2 = chi_square(&counts, TRIALS as f64 / 3.0);
    assert!(chi2 < 20.0, "range [0, 2] looks biased, chi-square = {chi2}");
}

#[test]
fn test_awkward_ranges_are_uniform() {
    // Ranges that do not divide 256: exactly where a naive `byte % range`
    // draw shows its bias (e.g. range 3 overweights 0 and 1 by 1/256 each).
    const TRIALS: usize = 50_000;
    for (range, seed) in [(3u64, 1u64), (5, 2), (6, 3), (7, 4)] {
        let mut source = SeededEntropy::from_u64(0x5eed_1000 + seed);
        let mut counts = vec![0u64; range as usize];
        for _ in 0..TRIALS {
            counts[random_index(&mut source, 0, range - 1).unwrap() as usize] += 1;
        }

        // p = 0.001 critical values for df 2..6 top out around 22.5.
        let chi2 = chi_square(&counts, TRIALS as f64 / range as f64);
        assert!(
            chi2 < 30.0,
            "range [0, {}] looks biased, chi-square = {chi2}",
            range - 1
        );
    }
}

#[test]
fn test_offset_range_is_uniform() {
    const TRIALS: usize = 50_000;
    let mut source = SeededEntropy::from_u64(0x5eed_2000);
    let mut counts = [0u64; 7];
    for _ in 0..TRIALS {
        counts[(random_index(&mut source, 10, 16).unwrap() - 10) as usize] += 1;
    }
    let chi2 = chi_square(&counts, TRIALS as f64 / 7.0);
    assert!(
        chi2 < 30.0,
        "range [10, 16] looks biased, chi-square = {chi2}"
    );
}

#[test]
fn test_shuffle_spreads_first_word_evenly() {
    // Where the first word ends up is uniform under Fisher-Yates; pinning it
    // near position 0 is the classic sign of a broken swap bound.
    const TRIALS: usize = 20_000;
    const WORDS: usize = 8;
    let input: Vec<usize> = (0..WORDS).collect();
    let mut source = SeededEntropy::from_u64(0x5eed_3000);
    let mut landed = [0u64; WORDS];
    for _ in 0..TRIALS {
        let shuffled = shuffle(&mut source, &input).unwrap();
        let position = shuffled.iter().position(|&w| w == 0).unwrap();
        landed[position] += 1;
    }

    // df = 7, p = 0.001 critical value is ~24.3.
    let chi2 = chi_square(&landed, TRIALS as f64 / WORDS as f64);
    assert!(
        chi2 < 35.0,
        "first word placement looks biased, chi-square = {chi2}"
    );
}

#[test]
fn test_verification_indices_cover_positions_evenly() {
    // Each of the 12 positions should be prompted for with equal frequency
    // across many challenges (3 of 12 per challenge by symmetry).
    const TRIALS: usize = 20_000;
    const WORD_COUNT: usize = 12;
    let mut source = SeededEntropy::from_u64(0x5eed_4000);
    let mut counts = [0u64; WORD_COUNT];
    for _ in 0..TRIALS {
        for index in pick_verification_indices(&mut source, WORD_COUNT).unwrap() {
            counts[index] += 1;
        }
    }

    // df = 11, p = 0.001 critical value is ~31.3.
    let expected = (TRIALS * 3) as f64 / WORD_COUNT as f64;
    let chi2 = chi_square(&counts, expected);
    assert!(
        chi2 < 45.0,
        "verification positions look biased, chi-square = {chi2}"
    );
}
