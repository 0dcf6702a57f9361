//! Test doubles for the entropy capability and fixture phrases.

use crate::entropy::{EntropyError, EntropySource};
use crate::phrase::RecoveryPhrase;
use std::collections::VecDeque;

/// Replays a fixed byte script, then fails.
///
/// Exhaustion is an error rather than a wrap-around so a test exercising the
/// rejection loop cannot silently feed the same bytes twice, and so the
/// entropy-failure path is reachable on demand.
pub struct ScriptedEntropy {
    script: VecDeque<u8>,
}

impl ScriptedEntropy {
    pub fn new(script: &[u8]) -> Self {
        Self {
            script: script.iter().copied().collect(),
        }
    }

    /// Bytes left in the script.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl EntropySource for ScriptedEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), EntropyError> {
        if self.script.len() < buf.len() {
            return Err(EntropyError::Exhausted {
                requested: buf.len(),
                remaining: self.script.len(),
            });
        }
        for slot in buf.iter_mut() {
            *slot = self.script.pop_front().expect("length checked above");
        }
        Ok(())
    }
}

/// A 12-word fixture phrase with distinct words.
pub fn test_phrase_12() -> RecoveryPhrase {
    RecoveryPhrase::from_phrase(
        "abandon ability able about above absent absorb abstract absurd abuse access accident",
    )
    .expect("fixture phrase is valid")
}

/// A 24-word fixture phrase with distinct words.
pub fn test_phrase_24() -> RecoveryPhrase {
    RecoveryPhrase::from_phrase(
        "abandon ability able about above absent absorb abstract absurd abuse access accident \
         account accuse achieve acid acoustic acquire across act action actor actress actual",
    )
    .expect("fixture phrase is valid")
}
