use crate::decoding::logmath::log_sum_exp;

/// Per-prefix probability state split by how the underlying alignments end.
///
/// Both values are natural-log probabilities in (-inf, 0]; `NEG_INFINITY`
/// means no alignment mass. The total probability of the prefix is the
/// log-sum-exp of the pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamEntry {
    /// Log probability of alignments that collapse to this prefix and end
    /// in blank.
    pub log_prob_blank: f32,
    /// Log probability of alignments that collapse to this prefix and end
    /// in a real (non-blank) symbol.
    pub log_prob_label: f32,
}

impl BeamEntry {
    /// Zero probability mass in both states. The default for a prefix the
    /// current time step has not touched yet.
    pub const NONE: BeamEntry = BeamEntry {
        log_prob_blank: f32::NEG_INFINITY,
        log_prob_label: f32::NEG_INFINITY,
    };

    /// The initial state before any time step: all mass on "nothing
    /// emitted yet", which counts as ending in blank.
    pub const INITIAL: BeamEntry = BeamEntry {
        log_prob_blank: 0.0,
        log_prob_label: f32::NEG_INFINITY,
    };

    pub fn total(&self) -> f32 {
        log_sum_exp([self.log_prob_blank, self.log_prob_label])
    }
}

/// One ranked decoding result.
#[derive(Debug, Clone, PartialEq)]
pub struct Hypothesis {
    /// Candidate label sequence (symbol indices, blank-free). Repeated
    /// indices are distinct emissions that were separated by blank in the
    /// underlying alignments; apply [`crate::remove_blank`] to merge them
    /// for display.
    pub labels: Vec<usize>,
    pub log_prob_blank: f32,
    pub log_prob_label: f32,
}

impl Hypothesis {
    /// Total log probability over all alignments that collapse to `labels`.
    pub fn score(&self) -> f32 {
        log_sum_exp([self.log_prob_blank, self.log_prob_label])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodeOutput {
    /// Hypotheses sorted by descending [`Hypothesis::score`], at most
    /// `beam_size` of them.
    pub hypotheses: Vec<Hypothesis>,
}
