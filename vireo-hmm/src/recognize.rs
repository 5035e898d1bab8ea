//! Isolated-word recognition over a vocabulary of word models.
//!
//! One [`WordHmm`] per candidate word; an utterance is recognized as the
//! candidate whose forward score is highest. This is single-word scoring
//! only, not continuous decoding.

use vireo_core::{Result, VireoError};

use crate::emission::EmissionSequence;
use crate::model::WordHmm;

/// One candidate's forward score for an utterance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordScore {
    /// The candidate word.
    pub word: String,
    /// Log-likelihood of the utterance under that word's model.
    pub score: f64,
}

/// A set of named word models scored against one utterance at a time.
///
/// Entries keep insertion order; ties in [`best_match`](Self::best_match)
/// resolve to the earliest entry.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vocabulary {
    entries: Vec<(String, WordHmm)>,
}

impl Vocabulary {
    /// An empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate word and its model.
    pub fn add(&mut self, word: impl Into<String>, model: WordHmm) {
        self.entries.push((word.into(), model));
    }

    /// Number of candidate words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the vocabulary has no candidates.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The candidate words, in insertion order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(w, _)| w.as_str())
    }

    /// The model for a word, if present.
    pub fn model(&self, word: &str) -> Option<&WordHmm> {
        self.entries
            .iter()
            .find(|(w, _)| w == word)
            .map(|(_, m)| m)
    }

    /// Forward-score every candidate against one utterance.
    ///
    /// Scores come back in insertion order, one per candidate.
    ///
    /// # Errors
    ///
    /// Propagates the first model evaluation error ([`EmptySequence`],
    /// [`ShapeMismatch`]).
    ///
    /// [`EmptySequence`]: VireoError::EmptySequence
    /// [`ShapeMismatch`]: VireoError::ShapeMismatch
    pub fn score(&self, emissions: &EmissionSequence) -> Result<Vec<WordScore>> {
        self.entries
            .iter()
            .map(|(word, model)| {
                Ok(WordScore {
                    word: word.clone(),
                    score: model.forward(emissions)?,
                })
            })
            .collect()
    }

    /// Recognize one utterance: the candidate with the highest forward
    /// score, earliest entry on ties.
    ///
    /// # Errors
    ///
    /// [`VireoError::InvalidInput`] for an empty vocabulary, otherwise as
    /// [`score`](Self::score).
    pub fn best_match(&self, emissions: &EmissionSequence) -> Result<WordScore> {
        if self.entries.is_empty() {
            return Err(VireoError::InvalidInput(
                "cannot recognize against an empty vocabulary".into(),
            ));
        }

        let mut scores = self.score(emissions)?;
        let mut best = 0usize;
        for idx in 1..scores.len() {
            if scores[idx].score > scores[best].score {
                best = idx;
            }
        }
        Ok(scores.swap_remove(best))
    }
}
