use crate::error::DecodeError;
use crate::types::BeamEntry;

pub trait ScoreNormalizer: Send + Sync {
    fn normalize(&self, scores: &[Vec<f32>]) -> Result<Vec<Vec<f32>>, DecodeError>;
}

pub trait SequenceDecoder: Send + Sync {
    fn decode(
        &self,
        probs: &[Vec<f32>],
        beam_size: usize,
        blank: usize,
    ) -> Result<Vec<(Vec<usize>, BeamEntry)>, DecodeError>;
}
