//! The per-word Hidden Markov Model and its three recursions.
//!
//! A [`WordHmm`] is a small Markov chain whose states each point at one
//! phonetic class in the shared inventory. Parameters live in the log domain
//! from construction onward; every probability is floored by the model's
//! epsilon before the logarithm so structural zeros stay finite.

use vireo_core::logspace::{ln_floored, log_sum_exp_slice, DEFAULT_EPSILON};
use vireo_core::{Result, VireoError};

use crate::emission::EmissionSequence;

/// A word-level HMM over a subset of the phonetic-class inventory.
///
/// The state order is fixed at construction; the transition matrix is the
/// only parameter that changes afterwards (via
/// [`reestimate_transitions`](Self::reestimate_transitions)). A model owns
/// its parameters outright, so independent models may be evaluated in
/// parallel; concurrent re-estimation and evaluation of one model must be
/// serialized by the caller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordHmm {
    /// `state_labels[j]` is the inventory index of the class state `j` emits.
    state_labels: Vec<usize>,
    /// `ln(pi[i] + eps)`, length N.
    initial_log: Vec<f64>,
    /// `ln(A[j][i] + eps)`, N×N row-major; `[j * n + i]` is log P(j → i).
    transition_log: Vec<f64>,
    /// Smoothing floor applied before every logarithm.
    epsilon: f64,
}

impl WordHmm {
    /// Create a model from probability-space parameters, using
    /// [`DEFAULT_EPSILON`] as the smoothing floor.
    ///
    /// `initial` must have one entry per state and `transition` must be the
    /// row-major N×N matrix whose row `j` is the distribution over
    /// successors of state `j`. Rows are not checked for stochasticity;
    /// callers supply proper distributions.
    ///
    /// # Errors
    ///
    /// Returns [`VireoError::InvalidShape`] if `state_labels` is empty or
    /// the parameter dimensions do not match.
    pub fn new(state_labels: Vec<usize>, initial: &[f64], transition: &[f64]) -> Result<Self> {
        Self::with_epsilon(state_labels, initial, transition, DEFAULT_EPSILON)
    }

    /// Like [`new`](Self::new) with an explicit smoothing floor.
    ///
    /// # Errors
    ///
    /// Returns [`VireoError::InvalidShape`] on dimension mismatch and
    /// [`VireoError::InvalidInput`] if `eps` is not positive.
    pub fn with_epsilon(
        state_labels: Vec<usize>,
        initial: &[f64],
        transition: &[f64],
        eps: f64,
    ) -> Result<Self> {
        let n = state_labels.len();
        if n == 0 {
            return Err(VireoError::InvalidShape(
                "a model needs at least one state".into(),
            ));
        }
        if initial.len() != n {
            return Err(VireoError::InvalidShape(format!(
                "initial distribution length {} != n_states {n}",
                initial.len()
            )));
        }
        if transition.len() != n * n {
            return Err(VireoError::InvalidShape(format!(
                "transition matrix length {} != n_states² = {}",
                transition.len(),
                n * n
            )));
        }
        if !(eps > 0.0) {
            return Err(VireoError::InvalidInput(format!(
                "epsilon must be positive, got {eps}"
            )));
        }

        let initial_log = initial.iter().map(|&p| ln_floored(p, eps)).collect();
        let transition_log = transition.iter().map(|&p| ln_floored(p, eps)).collect();

        Ok(Self {
            state_labels,
            initial_log,
            transition_log,
            epsilon: eps,
        })
    }

    /// Build the canonical left-to-right word model.
    ///
    /// Every state self-loops with probability `self_loop` and advances to
    /// its successor with `1 - self_loop`; the final state is absorbing. The
    /// initial distribution splits evenly between the first two states, so
    /// an utterance may skip a leading silence.
    ///
    /// # Errors
    ///
    /// Returns [`VireoError::InvalidInput`] if there are fewer than two
    /// states or `self_loop` is outside `[0, 1]`.
    pub fn left_to_right(state_labels: Vec<usize>, self_loop: f64) -> Result<Self> {
        let n = state_labels.len();
        if n < 2 {
            return Err(VireoError::InvalidInput(
                "a left-to-right model needs at least two states".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self_loop) {
            return Err(VireoError::InvalidInput(format!(
                "self-loop probability must be in [0, 1], got {self_loop}"
            )));
        }

        let mut initial = vec![0.0; n];
        initial[0] = 0.5;
        initial[1] = 0.5;

        let mut transition = vec![0.0; n * n];
        for j in 0..n - 1 {
            transition[j * n + j] = self_loop;
            transition[j * n + j + 1] = 1.0 - self_loop;
        }
        transition[(n - 1) * n + (n - 1)] = 1.0;

        Self::new(state_labels, &initial, &transition)
    }

    /// Number of states N.
    pub fn n_states(&self) -> usize {
        self.state_labels.len()
    }

    /// The inventory index each state emits.
    pub fn state_labels(&self) -> &[usize] {
        &self.state_labels
    }

    /// The smoothing floor in effect.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// The log-domain initial distribution, `ln(pi[i] + eps)`.
    pub fn initial_log(&self) -> &[f64] {
        &self.initial_log
    }

    /// The log-domain transition matrix, row-major.
    pub fn transition_log(&self) -> &[f64] {
        &self.transition_log
    }

    /// The transition matrix back in probability space (exp of each entry).
    ///
    /// Entries carry the epsilon floor, so a "zero" comes back as roughly
    /// the model's epsilon rather than exactly 0.
    pub fn transition_probs(&self) -> Vec<f64> {
        self.transition_log.iter().map(|&x| x.exp()).collect()
    }

    // -----------------------------------------------------------------------
    // Forward evaluation
    // -----------------------------------------------------------------------

    /// Score an utterance with the log-space forward recursion.
    ///
    /// Returns `alpha[T-1][N-1]`: the log-likelihood of the utterance over
    /// all state paths that end in the model's final state. Left-to-right
    /// word models end in an absorbing terminal state, and an utterance only
    /// counts as this word if its last frame is consistent with being there;
    /// the score is deliberately not marginalized over all final states.
    ///
    /// # Errors
    ///
    /// [`VireoError::EmptySequence`] for a zero-frame utterance;
    /// [`VireoError::ShapeMismatch`] if a state label is out of range for
    /// the sequence's inventory.
    pub fn forward(&self, emissions: &EmissionSequence) -> Result<f64> {
        if emissions.is_empty() {
            return Err(VireoError::EmptySequence(
                "forward needs at least one frame".into(),
            ));
        }
        let obs = emissions.restrict(&self.state_labels)?;

        let n = self.n_states();
        let t_len = obs.n_frames();
        let mut alpha = vec![vec![f64::NEG_INFINITY; n]; t_len];

        // Initialization: alpha[0][i] = ln(pi[i]) + ln(b_i(o_0))
        let frame0 = obs.frame(0);
        for i in 0..n {
            alpha[0][i] = self.initial_log[i] + frame0[i];
        }

        // Induction
        let mut scratch = vec![0.0; n];
        for t in 1..t_len {
            let frame = obs.frame(t);
            for i in 0..n {
                for j in 0..n {
                    scratch[j] = alpha[t - 1][j] + self.transition_log[j * n + i];
                }
                alpha[t][i] = log_sum_exp_slice(&scratch) + frame[i];
            }
        }

        // Termination: mass in the terminal state only.
        Ok(alpha[t_len - 1][n - 1])
    }

    // -----------------------------------------------------------------------
    // Viterbi decoding
    // -----------------------------------------------------------------------

    /// Decode the most likely state path for an utterance.
    ///
    /// Max-sum recursion with backpointer reconstruction. Ties take the
    /// smallest state index, so decoding is deterministic.
    ///
    /// # Errors
    ///
    /// [`VireoError::EmptySequence`] for a zero-frame utterance;
    /// [`VireoError::ShapeMismatch`] if a state label is out of range.
    pub fn viterbi(&self, emissions: &EmissionSequence) -> Result<Vec<usize>> {
        if emissions.is_empty() {
            return Err(VireoError::EmptySequence(
                "viterbi needs at least one frame".into(),
            ));
        }
        let obs = emissions.restrict(&self.state_labels)?;

        let n = self.n_states();
        let t_len = obs.n_frames();
        let mut delta = vec![vec![f64::NEG_INFINITY; n]; t_len];
        let mut psi = vec![vec![0usize; n]; t_len];

        // Initialization
        let frame0 = obs.frame(0);
        for i in 0..n {
            delta[0][i] = self.initial_log[i] + frame0[i];
        }

        // Recursion
        for t in 1..t_len {
            let frame = obs.frame(t);
            for i in 0..n {
                let mut best_val = f64::NEG_INFINITY;
                let mut best_prev = 0;
                for j in 0..n {
                    let v = delta[t - 1][j] + self.transition_log[j * n + i];
                    if v > best_val {
                        best_val = v;
                        best_prev = j;
                    }
                }
                delta[t][i] = best_val + frame[i];
                psi[t][i] = best_prev;
            }
        }

        // Termination: best final state, first occurrence on ties.
        let mut best_final = 0usize;
        let mut best_score = f64::NEG_INFINITY;
        for i in 0..n {
            if delta[t_len - 1][i] > best_score {
                best_score = delta[t_len - 1][i];
                best_final = i;
            }
        }

        // Backtracking
        let mut path = vec![0usize; t_len];
        path[t_len - 1] = best_final;
        for t in (0..t_len - 1).rev() {
            path[t] = psi[t + 1][path[t + 1]];
        }

        Ok(path)
    }

    // -----------------------------------------------------------------------
    // Viterbi training
    // -----------------------------------------------------------------------

    /// Re-estimate the transition matrix from one utterance's best path.
    ///
    /// Hard-alignment update: decode with [`viterbi`](Self::viterbi), count
    /// every observed transition along the path, and replace each row of the
    /// matrix with its row-normalized counts, epsilon-floored before the
    /// logarithm. The initial distribution and state labels are untouched.
    ///
    /// A state the path never leaves (at most visited at the final frame)
    /// has zero out-degree; its row degenerates to all-`ln(eps)`. That row
    /// is kept as-is, so a later evaluation can still pass through it only
    /// with vanishing probability. Repeated calls keep adapting the same
    /// matrix; once the decoded path stops changing, so does the matrix.
    ///
    /// # Errors
    ///
    /// Same preconditions as [`viterbi`](Self::viterbi).
    pub fn reestimate_transitions(&mut self, emissions: &EmissionSequence) -> Result<()> {
        let path = self.viterbi(emissions)?;

        let n = self.n_states();
        let mut counts = vec![0.0f64; n * n];
        let mut out_degree = vec![0.0f64; n];
        for pair in path.windows(2) {
            counts[pair[0] * n + pair[1]] += 1.0;
            out_degree[pair[0]] += 1.0;
        }

        for j in 0..n {
            for i in 0..n {
                let ratio = if out_degree[j] > 0.0 {
                    counts[j * n + i] / out_degree[j]
                } else {
                    0.0
                };
                self.transition_log[j * n + i] = ln_floored(ratio, self.epsilon);
            }
        }

        Ok(())
    }
}
