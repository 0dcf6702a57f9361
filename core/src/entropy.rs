//! Entropy capability injected into every randomized operation.
//!
//! Callers never reach for a global RNG directly: the shuffler and the
//! challenge selector take an [`EntropySource`] so production code binds the
//! platform CSPRNG while simulations and tests bind a deterministic source.
//!
//! A source that cannot supply bytes fails loudly. There is no fallback to a
//! non-cryptographic generator anywhere in this crate: a predictable shuffle
//! would narrow an attacker's guesses, so weakening silently is worse than
//! failing the screen.

use rand::rngs::OsRng;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;

/// Seed length for [`SeededEntropy`], in bytes.
pub const SEED_LENGTH: usize = 32;

#[derive(Debug, Error)]
pub enum EntropyError {
    #[error("entropy source unavailable: {source}")]
    Unavailable {
        #[source]
        source: rand::Error,
    },
    #[error("entropy script exhausted (requested={requested}, remaining={remaining})")]
    Exhausted { requested: usize, remaining: usize },
}

/// A supplier of random bytes.
///
/// Implementations must either fill the whole buffer or return an error; a
/// partially filled buffer is never observable.
pub trait EntropySource {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), EntropyError>;
}

/// The platform CSPRNG. The only source production callers should bind.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), EntropyError> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|source| EntropyError::Unavailable { source })
    }
}

/// Deterministic ChaCha20 source for simulations and reproducible tests.
///
/// Never bind this in a real onboarding flow.
pub struct SeededEntropy {
    rng: ChaCha20Rng,
}

impl SeededEntropy {
    pub fn new(seed: [u8; SEED_LENGTH]) -> Self {
        Self {
            rng: ChaCha20Rng::from_seed(seed),
        }
    }

    pub fn from_u64(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl EntropySource for SeededEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), EntropyError> {
        self.rng.fill_bytes(buf);
        Ok(())
    }
}
