//! WebAssembly bindings for the wordvault onboarding core.
//!
//! The browser extension's onboarding UI calls these to shuffle the word bank
//! and to run the backup-verification challenge. Words cross the boundary only
//! where the UI must render them; summaries and logs carry positions alone.

use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;
use wordvault_core::{OsEntropy, RecoveryPhrase, VerificationChallenge};

#[cfg(feature = "testing")]
use wordvault_core::SeededEntropy;

/// The recovery phrase under verification, held for one screen.
#[wasm_bindgen]
pub struct Phrase {
    inner: RecoveryPhrase,
}

#[wasm_bindgen]
impl Phrase {
    /// Capture a phrase handed over by the keyring backend.
    #[wasm_bindgen(constructor)]
    pub fn new(phrase: &str) -> Result<Phrase, JsValue> {
        let inner = RecoveryPhrase::from_phrase(phrase)
            .map_err(|e| JsValue::from_str(&format!("Invalid phrase: {e}")))?;
        Ok(Phrase { inner })
    }

    #[wasm_bindgen(getter)]
    pub fn word_count(&self) -> usize {
        self.inner.word_count()
    }

    /// A fresh shuffled copy of the words for the selectable word bank.
    pub fn shuffled_words(&self) -> Result<Vec<String>, JsValue> {
        wordvault_core::shuffled_words(&mut OsEntropy, &self.inner)
            .map_err(|e| JsValue::from_str(&format!("Failed to shuffle: {e}")))
    }
}

/// A mounted backup-verification challenge.
#[wasm_bindgen]
pub struct Challenge {
    inner: VerificationChallenge,
}

#[wasm_bindgen]
impl Challenge {
    /// Pick positions for `phrase` using the platform CSPRNG.
    #[wasm_bindgen(constructor)]
    pub fn new(phrase: &Phrase) -> Result<Challenge, JsValue> {
        let inner = VerificationChallenge::new(&mut OsEntropy, &phrase.inner)
            .map_err(|e| JsValue::from_str(&format!("Failed to create challenge: {e}")))?;
        Ok(Challenge { inner })
    }

    /// The 0-based positions to prompt for, ascending.
    #[wasm_bindgen(getter)]
    pub fn positions(&self) -> Vec<u32> {
        self.inner
            .positions()
            .iter()
            .map(|&position| position as u32)
            .collect()
    }

    /// Check the user's answers, given in prompt order.
    pub fn check(&self, answers: Vec<String>) -> bool {
        let answers: Vec<&str> = answers.iter().map(String::as_str).collect();
        self.inner.check(&answers)
    }

    /// Positions-only summary as a plain JavaScript object.
    pub fn summary(&self) -> Result<JsValue, JsValue> {
        self.inner
            .summary()
            .serialize(&Serializer::json_compatible())
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize: {e}")))
    }
}

/// Deterministic variants for UI tests: same API, seeded source.
#[cfg(feature = "testing")]
#[wasm_bindgen]
pub struct TestHarness;

#[cfg(feature = "testing")]
#[wasm_bindgen]
impl TestHarness {
    /// A fixture 12-word phrase.
    pub fn fixture_phrase() -> Phrase {
        Phrase {
            inner: wordvault_core::mocks::test_phrase_12(),
        }
    }

    /// A challenge whose positions are reproducible from `seed`.
    pub fn seeded_challenge(phrase: &Phrase, seed: u64) -> Result<Challenge, JsValue> {
        let inner = VerificationChallenge::new(&mut SeededEntropy::from_u64(seed), &phrase.inner)
            .map_err(|e| JsValue::from_str(&format!("Failed to create challenge: {e}")))?;
        Ok(Challenge { inner })
    }

    /// A word bank whose order is reproducible from `seed`.
    pub fn seeded_word_bank(phrase: &Phrase, seed: u64) -> Result<Vec<String>, JsValue> {
        wordvault_core::shuffled_words(&mut SeededEntropy::from_u64(seed), &phrase.inner)
            .map_err(|e| JsValue::from_str(&format!("Failed to shuffle: {e}")))
    }
}
