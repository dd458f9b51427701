use crate::decoding::beam::prefix_beam_search;
use crate::decoding::softmax::softmax_rows;
use crate::error::DecodeError;
use crate::pipeline::traits::{ScoreNormalizer, SequenceDecoder};
use crate::types::BeamEntry;

pub struct SoftmaxNormalizer;

impl ScoreNormalizer for SoftmaxNormalizer {
    fn normalize(&self, scores: &[Vec<f32>]) -> Result<Vec<Vec<f32>>, DecodeError> {
        softmax_rows(scores)
    }
}

pub struct PrefixBeamSequenceDecoder;

impl SequenceDecoder for PrefixBeamSequenceDecoder {
    fn decode(
        &self,
        probs: &[Vec<f32>],
        beam_size: usize,
        blank: usize,
    ) -> Result<Vec<(Vec<usize>, BeamEntry)>, DecodeError> {
        prefix_beam_search(probs, beam_size, blank)
    }
}
