//! Backup-verification challenge: which words to ask for, and answer checking.
//!
//! After a user claims to have written their phrase down, the flow proves it
//! by prompting for a handful of words at randomly chosen positions. The
//! challenge is created fresh each time the verification screen mounts and
//! discarded when the user passes or navigates away.

use crate::entropy::EntropySource;
use crate::phrase::RecoveryPhrase;
use crate::sampling::{random_index, SampleError};
use crate::shuffle;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Number of words the user must re-enter.
pub const VERIFICATION_WORDS: usize = 3;

/// Verification never prompts beyond the first 24 words, bounding what the
/// user is expected to have within reach even for longer phrases.
pub const MAX_VERIFIABLE_WORDS: usize = 24;

#[derive(Debug, Error)]
pub enum ChallengeError {
    #[error("phrase too short to verify (word_count={word_count}, min={min})")]
    PhraseTooShort { word_count: usize, min: usize },
    #[error(transparent)]
    Sample(#[from] SampleError),
}

/// Pick [`VERIFICATION_WORDS`] distinct word positions, ascending.
///
/// Positions are drawn from `[0, min(word_count, MAX_VERIFIABLE_WORDS) - 1]`.
/// Duplicate draws are absorbed by the set and simply redrawn; the loop holds
/// exactly three distinct positions on exit.
pub fn pick_verification_indices(
    source: &mut impl EntropySource,
    word_count: usize,
) -> Result<[usize; VERIFICATION_WORDS], ChallengeError> {
    if word_count < VERIFICATION_WORDS {
        return Err(ChallengeError::PhraseTooShort {
            word_count,
            min: VERIFICATION_WORDS,
        });
    }
    let capped = word_count.min(MAX_VERIFIABLE_WORDS);

    let mut picked = BTreeSet::new();
    while picked.len() < VERIFICATION_WORDS {
        picked.insert(random_index(source, 0, (capped - 1) as u64)? as usize);
    }

    // BTreeSet iterates in ascending order, so prompts read "in order".
    let mut indices = [0usize; VERIFICATION_WORDS];
    for (slot, index) in indices.iter_mut().zip(picked) {
        *slot = index;
    }
    Ok(indices)
}

/// The shuffled word bank shown alongside the prompts, stripped of position.
pub fn shuffled_words(
    source: &mut impl EntropySource,
    phrase: &RecoveryPhrase,
) -> Result<Vec<String>, SampleError> {
    shuffle::shuffle(source, phrase.words())
}

/// Host-facing view of a challenge: positions only, never words.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChallengeSummary {
    pub word_count: usize,
    pub positions: [usize; VERIFICATION_WORDS],
}

/// A mounted verification challenge.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct VerificationChallenge {
    word_count: usize,
    positions: [usize; VERIFICATION_WORDS],
    expected: [String; VERIFICATION_WORDS],
}

impl VerificationChallenge {
    /// Pick positions for `phrase` and snapshot the words to check against.
    pub fn new(
        source: &mut impl EntropySource,
        phrase: &RecoveryPhrase,
    ) -> Result<Self, ChallengeError> {
        let positions = pick_verification_indices(source, phrase.word_count())?;
        let expected =
            positions.map(|position| normalize(phrase.word_at(position).unwrap_or_default()));
        debug!(
            word_count = phrase.word_count(),
            positions = ?positions,
            "verification challenge created"
        );
        Ok(Self {
            word_count: phrase.word_count(),
            positions,
            expected,
        })
    }

    /// The 0-based positions to prompt for, ascending.
    pub fn positions(&self) -> [usize; VERIFICATION_WORDS] {
        self.positions
    }

    /// Check the user's answers, given in prompt order.
    ///
    /// Answers are trimmed and case-normalized before comparison: tapped word
    /// bank entries arrive clean, but typed entry should behave the same.
    pub fn check(&self, answers: &[&str]) -> bool {
        answers.len() == VERIFICATION_WORDS
            && self
                .expected
                .iter()
                .zip(answers)
                .all(|(want, got)| *want == normalize(got))
    }

    pub fn summary(&self) -> ChallengeSummary {
        ChallengeSummary {
            word_count: self.word_count,
            positions: self.positions,
        }
    }
}

// Expected words are phrase material: positions are loggable, words are not.
impl fmt::Debug for VerificationChallenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationChallenge")
            .field("word_count", &self.word_count)
            .field("positions", &self.positions)
            .field("expected", &"[REDACTED]")
            .finish()
    }
}

fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}
