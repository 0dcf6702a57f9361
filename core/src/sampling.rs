//! Unbiased index sampling via rejection over raw entropy bytes.
//!
//! The naive `byte % range` draw is biased whenever `range` does not evenly
//! divide the byte space: low residues occur once more often than high ones.
//! This module removes that bias with rejection sampling:
//!
//! ```text
//! range  = max - min + 1
//! space  = 256^k, smallest k with 256^k >= range
//! cutoff = floor(space / range) * range
//!
//! draw k bytes, fold little-endian; redraw while value >= cutoff;
//! result = min + (value % range)
//! ```
//!
//! Because `k` is minimal, `cutoff` is always more than half of `space`, so
//! the expected number of draws is below two for any range. The loop is
//! deliberately uncapped: truncating it would reintroduce bias.
//!
//! Sampling runs in variable time. That is acceptable here; the drawn index
//! is not a secret key, and the underlying CSPRNG's outputs are independent.

use crate::entropy::{EntropyError, EntropySource};
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("invalid range (min={min}, max={max})")]
    InvalidRange { min: u64, max: u64 },
    #[error(transparent)]
    Entropy(#[from] EntropyError),
}

/// Draw a uniformly distributed integer in the inclusive range `[min, max]`.
///
/// Fails fast on `max < min` rather than silently misbehaving, and propagates
/// entropy failures untouched.
pub fn random_index(
    source: &mut impl EntropySource,
    min: u64,
    max: u64,
) -> Result<u64, SampleError> {
    if max < min {
        return Err(SampleError::InvalidRange { min, max });
    }
    let range = (max - min) as u128 + 1;
    if range == 1 {
        // Single-value range: nothing to draw.
        return Ok(min);
    }

    // Smallest k with 256^k >= range. Integer arithmetic only; the float
    // log2 formulation invites precision bugs at power-of-two boundaries.
    let mut bytes_needed = 0usize;
    let mut space = 1u128;
    while space < range {
        space <<= 8;
        bytes_needed += 1;
    }

    // Largest multiple of `range` that fits in `space`. Values at or above
    // it are redrawn; accepting them would overweight the low residues.
    let cutoff = (space / range) * range;

    let mut buf = [0u8; 8];
    let buf = &mut buf[..bytes_needed];
    loop {
        source.fill(buf)?;

        // Little-endian fold: byte i contributes 256^i.
        let mut value: u128 = 0;
        for (i, byte) in buf.iter().enumerate() {
            value |= (*byte as u128) << (8 * i);
        }

        if value < cutoff {
            return Ok(min + (value % range) as u64);
        }
        trace!(value = value as u64, "draw at or above cutoff, redrawing");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::SeededEntropy;
    use crate::mocks::ScriptedEntropy;

    #[test]
    fn test_invalid_range_rejected() {
        let mut source = SeededEntropy::from_u64(0);
        assert!(matches!(
            random_index(&mut source, 5, 4),
            Err(SampleError::InvalidRange { min: 5, max: 4 })
        ));
    }

    #[test]
    fn test_single_value_range_consumes_no_entropy() {
        // An empty script would fail any fill; the degenerate range never asks.
        let mut source = ScriptedEntropy::new(&[]);
        assert_eq!(random_index(&mut source, 42, 42).unwrap(), 42);
    }

    #[test]
    fn test_range_containment() {
        let mut source = SeededEntropy::from_u64(1);
        for (min, max) in [(0, 2), (0, 11), (0, 23), (3, 9), (100, 355), (0, 255)] {
            for _ in 0..2_000 {
                let v = random_index(&mut source, min, max).unwrap();
                assert!(v >= min && v <= max, "{v} outside [{min}, {max}]");
            }
        }
    }

    #[test]
    fn test_full_u64_range() {
        let mut source = SeededEntropy::from_u64(2);
        // range = 2^64: every 8-byte draw is below the cutoff.
        random_index(&mut source, 0, u64::MAX).unwrap();
    }

    #[test]
    fn test_zero_bytes_map_to_min() {
        // A source of zeros must yield min (0 mod range = 0).
        let mut source = ScriptedEntropy::new(&[0, 0, 0, 0]);
        assert_eq!(random_index(&mut source, 0, 2).unwrap(), 0);

        let mut source = ScriptedEntropy::new(&[0, 0, 0, 0]);
        assert_eq!(random_index(&mut source, 7, 9).unwrap(), 7);
    }

    #[test]
    fn test_cutoff_draw_is_rejected() {
        // range 3 => space 256, cutoff 255. A draw of exactly 255 must be
        // discarded and the next byte used instead.
        let mut source = ScriptedEntropy::new(&[255, 4]);
        assert_eq!(random_index(&mut source, 0, 2).unwrap(), 4 % 3);
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_below_cutoff_draw_is_accepted() {
        // 254 < 255, so it is accepted even though it is "awkward": 254 % 3 = 2.
        let mut source = ScriptedEntropy::new(&[254, 99]);
        assert_eq!(random_index(&mut source, 0, 2).unwrap(), 2);
        assert_eq!(source.remaining(), 1);
    }

    #[test]
    fn test_two_byte_ranges_fold_little_endian() {
        // range 300 needs 2 bytes; [1, 1] folds to 1 + 256 = 257 < cutoff.
        let mut source = ScriptedEntropy::new(&[1, 1]);
        assert_eq!(random_index(&mut source, 0, 299).unwrap(), 257);
    }

    #[test]
    fn test_entropy_failure_propagates() {
        let mut source = ScriptedEntropy::new(&[255]); // rejected, then dry
        assert!(matches!(
            random_index(&mut source, 0, 2),
            Err(SampleError::Entropy(EntropyError::Exhausted { .. }))
        ));
    }

    #[test]
    fn test_offset_range_shifts_residue() {
        // 5 % 3 = 2, shifted by min = 10.
        let mut source = ScriptedEntropy::new(&[5]);
        assert_eq!(random_index(&mut source, 10, 12).unwrap(), 12);
    }
}
