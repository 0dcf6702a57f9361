//! Randomness and challenge core for recovery-phrase backup verification.
//!
//! When a wallet walks a user through backing up their recovery phrase, two
//! things must be genuinely unpredictable: the order the words are displayed
//! for re-selection, and which positions the user is asked to prove. This
//! crate owns that logic and nothing else — phrase generation, key
//! derivation, signing, and persistence all live behind the wallet backend.
//!
//! ## Modules
//!
//! - [`entropy`] — the injected random-byte capability ([`OsEntropy`] in
//!   production, [`SeededEntropy`] for reproducible runs).
//! - [`sampling`] — unbiased inclusive-range draws via rejection sampling.
//! - [`shuffle`] — Fisher-Yates over the phrase words.
//! - [`phrase`] — the in-memory [`RecoveryPhrase`], zeroized on drop.
//! - [`challenge`] — position selection and answer checking for the
//!   "verify your backup" step.

pub mod challenge;
pub mod entropy;
pub mod phrase;
pub mod sampling;
pub mod shuffle;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

#[cfg(test)]
mod distribution_tests;

pub use challenge::{
    pick_verification_indices, shuffled_words, ChallengeError, ChallengeSummary,
    VerificationChallenge, MAX_VERIFIABLE_WORDS, VERIFICATION_WORDS,
};
pub use entropy::{EntropyError, EntropySource, OsEntropy, SeededEntropy, SEED_LENGTH};
pub use phrase::{PhraseError, RecoveryPhrase, ACCEPTED_WORD_COUNTS};
pub use sampling::{random_index, SampleError};
pub use shuffle::{shuffle, shuffle_in_place};
