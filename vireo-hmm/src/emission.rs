//! Per-frame emission log-likelihoods and the acoustic-front-end boundary.
//!
//! The engine never touches audio. An [`EmissionProvider`] (a neural
//! classifier over spectral frames, a lookup table in tests) turns one
//! utterance into an [`EmissionSequence`]: for every frame, a log-likelihood
//! per phonetic class in the full shared inventory. Each word model then
//! narrows that sequence to its own states via [`EmissionSequence::restrict`]
//! before running any recursion.

use vireo_core::{Result, VireoError};

/// A T×L matrix of per-frame log-likelihoods over the full phonetic-class
/// inventory, stored row-major (`data[t * n_classes + c]`).
///
/// Values are expected to be prior-corrected log-likelihoods (log
/// class-posterior minus log class-prior), suitable for direct use as HMM
/// emission terms.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmissionSequence {
    n_frames: usize,
    n_classes: usize,
    data: Vec<f64>,
}

impl EmissionSequence {
    /// Create a sequence from row-major frame data.
    ///
    /// # Errors
    ///
    /// Returns [`VireoError::InvalidShape`] if `n_classes` is zero or
    /// `data.len() != n_frames * n_classes`.
    pub fn new(n_frames: usize, n_classes: usize, data: Vec<f64>) -> Result<Self> {
        if n_classes == 0 {
            return Err(VireoError::InvalidShape(
                "emission sequence needs at least one class".into(),
            ));
        }
        if data.len() != n_frames * n_classes {
            return Err(VireoError::InvalidShape(format!(
                "emission data length {} != n_frames * n_classes = {}",
                data.len(),
                n_frames * n_classes
            )));
        }
        Ok(Self {
            n_frames,
            n_classes,
            data,
        })
    }

    /// Number of frames T.
    pub fn n_frames(&self) -> usize {
        self.n_frames
    }

    /// Size L of the phonetic-class inventory.
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Whether the utterance has zero frames.
    pub fn is_empty(&self) -> bool {
        self.n_frames == 0
    }

    /// The log-likelihood row for frame `t` (length `n_classes`).
    ///
    /// # Panics
    ///
    /// Panics if `t >= n_frames`.
    pub fn frame(&self, t: usize) -> &[f64] {
        &self.data[t * self.n_classes..(t + 1) * self.n_classes]
    }

    /// Narrow the sequence to the classes a model's states refer to.
    ///
    /// Gathers column `labels[j]` of every frame into column `j` of a T×N
    /// matrix, so that state `j`'s emission at time `t` is
    /// `self.frame(t)[labels[j]]`.
    ///
    /// # Errors
    ///
    /// Returns [`VireoError::ShapeMismatch`] if any label is out of range
    /// for this sequence's inventory.
    pub fn restrict(&self, labels: &[usize]) -> Result<StateEmissions> {
        for (j, &label) in labels.iter().enumerate() {
            if label >= self.n_classes {
                return Err(VireoError::ShapeMismatch(format!(
                    "state {j} refers to class {label}, but the inventory has {} classes",
                    self.n_classes
                )));
            }
        }

        let n_states = labels.len();
        let mut data = Vec::with_capacity(self.n_frames * n_states);
        for t in 0..self.n_frames {
            let frame = self.frame(t);
            data.extend(labels.iter().map(|&label| frame[label]));
        }

        Ok(StateEmissions {
            n_frames: self.n_frames,
            n_states,
            data,
        })
    }
}

/// A T×N matrix of per-frame log-likelihoods restricted to one model's
/// states, produced by [`EmissionSequence::restrict`].
#[derive(Debug, Clone, PartialEq)]
pub struct StateEmissions {
    n_frames: usize,
    n_states: usize,
    data: Vec<f64>,
}

impl StateEmissions {
    /// Number of frames T.
    pub fn n_frames(&self) -> usize {
        self.n_frames
    }

    /// Number of model states N.
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// The state log-likelihood row for frame `t` (length `n_states`).
    ///
    /// # Panics
    ///
    /// Panics if `t >= n_frames`.
    pub fn frame(&self, t: usize) -> &[f64] {
        &self.data[t * self.n_states..(t + 1) * self.n_states]
    }
}

/// Boundary contract with the acoustic front end.
///
/// Implementors own feature extraction and classification; the engine only
/// requires that one utterance maps to one prior-corrected
/// [`EmissionSequence`] over the full class inventory.
pub trait EmissionProvider {
    /// The utterance handle the provider understands (a path, an id, a
    /// buffered waveform).
    type Utterance: ?Sized;

    /// Produce the per-frame class log-likelihoods for one utterance.
    fn emissions(&self, utterance: &Self::Utterance) -> Result<EmissionSequence>;
}
