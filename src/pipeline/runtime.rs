use crate::config::DecoderConfig;
use crate::error::DecodeError;
use crate::pipeline::traits::{ScoreNormalizer, SequenceDecoder};
use crate::types::{DecodeOutput, Hypothesis};

pub struct CtcDecoder {
    beam_size: usize,
    blank: usize,
    row_sum_tolerance: f32,
    normalizer: Box<dyn ScoreNormalizer>,
    sequence_decoder: Box<dyn SequenceDecoder>,
}

pub(crate) struct CtcDecoderParts {
    pub config: DecoderConfig,
    pub normalizer: Box<dyn ScoreNormalizer>,
    pub sequence_decoder: Box<dyn SequenceDecoder>,
}

impl CtcDecoder {
    pub(crate) fn from_parts(parts: CtcDecoderParts) -> Self {
        Self {
            beam_size: parts.config.beam_size,
            blank: parts.config.blank,
            row_sum_tolerance: parts.config.row_sum_tolerance,
            normalizer: parts.normalizer,
            sequence_decoder: parts.sequence_decoder,
        }
    }

    pub fn beam_size(&self) -> usize {
        self.beam_size
    }

    pub fn blank(&self) -> usize {
        self.blank
    }

    /// Decode raw classifier scores: normalize each row with the
    /// configured normalizer, then run the beam search.
    pub fn decode_scores(&self, scores: &[Vec<f32>]) -> Result<DecodeOutput, DecodeError> {
        if looks_normalized(scores, self.row_sum_tolerance) {
            tracing::warn!(
                num_steps = scores.len(),
                "score rows already sum to 1; softmax will flatten them, \
                 use decode_probs for probability input"
            );
        }
        let probs = self.normalizer.normalize(scores)?;
        self.run(&probs)
    }

    /// Decode an already-normalized probability matrix. Every row must be
    /// a categorical distribution; validation fails fast before the first
    /// time step.
    pub fn decode_probs(&self, probs: &[Vec<f32>]) -> Result<DecodeOutput, DecodeError> {
        self.validate_probability_matrix(probs)?;
        self.run(probs)
    }

    fn run(&self, probs: &[Vec<f32>]) -> Result<DecodeOutput, DecodeError> {
        tracing::debug!(
            num_steps = probs.len(),
            vocab_size = probs.first().map(Vec::len).unwrap_or(0),
            beam_size = self.beam_size,
            blank = self.blank,
            "decoding lattice"
        );

        let beam = self
            .sequence_decoder
            .decode(probs, self.beam_size, self.blank)?;

        let hypotheses: Vec<Hypothesis> = beam
            .into_iter()
            .map(|(labels, entry)| Hypothesis {
                labels,
                log_prob_blank: entry.log_prob_blank,
                log_prob_label: entry.log_prob_label,
            })
            .collect();

        // A stable search never produces NaN or positive-infinity scores
        // from a valid distribution; surface any as fatal rather than
        // returning them as data.
        for hyp in &hypotheses {
            let score = hyp.score();
            if score.is_nan() || score == f32::INFINITY {
                return Err(DecodeError::numeric(
                    "beam search",
                    format!("hypothesis {:?} scored {score}", hyp.labels),
                ));
            }
        }

        Ok(DecodeOutput { hypotheses })
    }

    fn validate_probability_matrix(&self, probs: &[Vec<f32>]) -> Result<(), DecodeError> {
        let vocab_size = probs.first().map(Vec::len).unwrap_or(0);
        if !probs.is_empty() && self.blank >= vocab_size {
            return Err(DecodeError::invalid_input(format!(
                "blank index {} outside vocabulary of size {vocab_size}",
                self.blank
            )));
        }

        for (t, row) in probs.iter().enumerate() {
            if row.len() != vocab_size || row.is_empty() {
                return Err(DecodeError::invalid_input(format!(
                    "probability row {t} has {} entries, expected {vocab_size}",
                    row.len()
                )));
            }
            if let Some(bad) = row.iter().find(|p| !p.is_finite() || **p < 0.0) {
                return Err(DecodeError::invalid_input(format!(
                    "probability row {t} contains invalid value {bad}"
                )));
            }
            let sum: f64 = row.iter().map(|&p| p as f64).sum();
            if (sum - 1.0).abs() > self.row_sum_tolerance as f64 {
                return Err(DecodeError::invalid_input(format!(
                    "probability row {t} sums to {sum}, expected 1 within {}",
                    self.row_sum_tolerance
                )));
            }
        }
        Ok(())
    }
}

fn looks_normalized(scores: &[Vec<f32>], tolerance: f32) -> bool {
    !scores.is_empty()
        && scores.iter().all(|row| {
            !row.is_empty() && {
                let sum: f64 = row.iter().map(|&v| v as f64).sum();
                row.iter().all(|v| v.is_finite() && *v >= 0.0)
                    && (sum - 1.0).abs() <= tolerance as f64
            }
        })
}
