//! Recovery phrase held in memory for the duration of one onboarding screen.
//!
//! The phrase itself is produced by the external keyring service; this type
//! only captures the ordered words so the backup-verification flow can shuffle
//! them and check answers. Nothing here is persisted, and the words are wiped
//! from memory when the screen's state is dropped.

use std::fmt;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Word counts the onboarding flow accepts (the BIP-39 lengths).
pub const ACCEPTED_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhraseError {
    #[error("invalid word count (got={got}, expected 12/15/18/21/24)")]
    InvalidWordCount { got: usize },
}

/// An ordered recovery phrase, as handed over by the keyring.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct RecoveryPhrase {
    words: Vec<String>,
}

impl RecoveryPhrase {
    /// Capture a phrase from a single string, normalizing whitespace.
    pub fn from_phrase(phrase: &str) -> Result<Self, PhraseError> {
        Self::from_words(phrase.split_whitespace().map(str::to_owned).collect())
    }

    /// Capture a phrase from already-split words.
    pub fn from_words(words: Vec<String>) -> Result<Self, PhraseError> {
        if !ACCEPTED_WORD_COUNTS.contains(&words.len()) {
            return Err(PhraseError::InvalidWordCount { got: words.len() });
        }
        Ok(Self { words })
    }

    /// The words in their true order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// The word at a 0-based position, if in bounds.
    pub fn word_at(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }
}

// The phrase is the wallet: it must never reach logs or crash reports.
impl fmt::Debug for RecoveryPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecoveryPhrase")
            .field("word_count", &self.words.len())
            .field("words", &"[REDACTED]")
            .finish()
    }
}
