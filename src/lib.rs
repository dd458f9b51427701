pub mod config;
pub mod decoding;
pub mod error;
pub mod pipeline;
pub mod types;

pub use config::DecoderConfig;
pub use decoding::beam::prefix_beam_search;
pub use decoding::labels::{insert_blank, remove_blank};
pub use decoding::logmath::{log_sum_exp, log_sum_exp_pair};
pub use decoding::softmax::softmax_rows;
pub use error::DecodeError;
pub use pipeline::builder::CtcDecoderBuilder;
pub use pipeline::runtime::CtcDecoder;
pub use pipeline::traits::{ScoreNormalizer, SequenceDecoder};
pub use types::{BeamEntry, DecodeOutput, Hypothesis};
