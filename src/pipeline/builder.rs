use crate::config::DecoderConfig;
use crate::error::DecodeError;
use crate::pipeline::defaults::{PrefixBeamSequenceDecoder, SoftmaxNormalizer};
use crate::pipeline::runtime::{CtcDecoder, CtcDecoderParts};
use crate::pipeline::traits::{ScoreNormalizer, SequenceDecoder};

pub struct CtcDecoderBuilder {
    config: DecoderConfig,
    normalizer: Option<Box<dyn ScoreNormalizer>>,
    sequence_decoder: Option<Box<dyn SequenceDecoder>>,
}

impl CtcDecoderBuilder {
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            normalizer: None,
            sequence_decoder: None,
        }
    }

    pub fn with_normalizer(mut self, normalizer: Box<dyn ScoreNormalizer>) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    pub fn with_sequence_decoder(mut self, sequence_decoder: Box<dyn SequenceDecoder>) -> Self {
        self.sequence_decoder = Some(sequence_decoder);
        self
    }

    pub fn build(self) -> Result<CtcDecoder, DecodeError> {
        self.config.validate()?;

        Ok(CtcDecoder::from_parts(CtcDecoderParts {
            config: self.config,
            normalizer: self
                .normalizer
                .unwrap_or_else(|| Box::new(SoftmaxNormalizer)),
            sequence_decoder: self
                .sequence_decoder
                .unwrap_or_else(|| Box::new(PrefixBeamSequenceDecoder)),
        }))
    }
}
