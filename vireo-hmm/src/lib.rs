//! Hidden Markov Model engine for isolated-word speech recognition.
//!
//! Each candidate word is a small left-to-right [`WordHmm`] over phonetic
//! classes from a shared [`PhoneInventory`]. An acoustic front end (the
//! [`EmissionProvider`] boundary) turns an utterance into per-frame class
//! log-likelihoods; the engine restricts them to each model's states and
//! runs the recursions:
//!
//! - **Forward evaluation** — log-space total likelihood of the utterance,
//!   scored at the model's terminal state
//! - **Viterbi decoding** — the single most probable state path, with
//!   backpointer reconstruction
//! - **Viterbi training** — hard-alignment re-estimation of the transition
//!   matrix from the decoded path
//!
//! All arithmetic is log-domain with an epsilon floor, so structural zeros
//! in the model never produce infinities.
//!
//! # Quick start
//!
//! ```
//! use vireo_hmm::{EmissionSequence, WordHmm};
//!
//! // Two-state model: state 0 emits class 0, state 1 emits class 1.
//! let model = WordHmm::left_to_right(vec![0, 1], 0.9).unwrap();
//!
//! // Four frames over a 2-class inventory; the second half favors class 1.
//! let seq = EmissionSequence::new(4, 2, vec![
//!     -0.1, -3.0,
//!     -0.1, -3.0,
//!     -3.0, -0.1,
//!     -3.0, -0.1,
//! ]).unwrap();
//!
//! assert_eq!(model.viterbi(&seq).unwrap(), vec![0, 0, 1, 1]);
//! assert!(model.forward(&seq).unwrap().is_finite());
//! ```

pub mod emission;
pub mod lexicon;
pub mod model;
pub mod recognize;

pub use emission::{EmissionProvider, EmissionSequence, StateEmissions};
pub use lexicon::PhoneInventory;
pub use model::WordHmm;
pub use recognize::{Vocabulary, WordScore};
