use std::path::Path;

use crate::error::DecodeError;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct DecoderConfig {
    /// Maximum number of hypotheses retained between time steps.
    #[serde(default = "default_beam_size")]
    pub beam_size: usize,
    /// Vocabulary index of the reserved blank symbol.
    #[serde(default)]
    pub blank: usize,
    /// Allowed deviation of each probability row's sum from 1.
    #[serde(default = "default_row_sum_tolerance")]
    pub row_sum_tolerance: f32,
}

impl DecoderConfig {
    pub const DEFAULT_BEAM_SIZE: usize = 10;
    pub const DEFAULT_ROW_SUM_TOLERANCE: f32 = 1e-3;

    pub fn load(path: &Path) -> Result<Self, DecodeError> {
        let data =
            std::fs::read_to_string(path).map_err(|e| DecodeError::io("read decoder config", e))?;
        serde_json::from_str(&data).map_err(|e| DecodeError::json("parse decoder config", e))
    }

    pub(crate) fn validate(&self) -> Result<(), DecodeError> {
        if self.beam_size == 0 {
            return Err(DecodeError::invalid_input("beam_size must be >= 1"));
        }
        if !self.row_sum_tolerance.is_finite() || self.row_sum_tolerance <= 0.0 {
            return Err(DecodeError::invalid_input(format!(
                "row_sum_tolerance must be finite and positive, got {}",
                self.row_sum_tolerance
            )));
        }
        Ok(())
    }
}

fn default_beam_size() -> usize {
    DecoderConfig::DEFAULT_BEAM_SIZE
}

fn default_row_sum_tolerance() -> f32 {
    DecoderConfig::DEFAULT_ROW_SUM_TOLERANCE
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            beam_size: Self::DEFAULT_BEAM_SIZE,
            blank: 0,
            row_sum_tolerance: Self::DEFAULT_ROW_SUM_TOLERANCE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoder_config_default() {
        let config = DecoderConfig::default();
        assert_eq!(config.beam_size, DecoderConfig::DEFAULT_BEAM_SIZE);
        assert_eq!(config.blank, 0);
        assert_eq!(config.row_sum_tolerance, 1e-3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn decoder_config_from_json_with_defaults() {
        let config: DecoderConfig = serde_json::from_str(r#"{"beam_size": 25}"#).expect("valid");
        assert_eq!(config.beam_size, 25);
        assert_eq!(config.blank, 0);
        assert_eq!(
            config.row_sum_tolerance,
            DecoderConfig::DEFAULT_ROW_SUM_TOLERANCE
        );
    }

    #[test]
    fn decoder_config_load_from_file() {
        let path = std::env::temp_dir().join("ctc_beam_rs_config_load.json");
        std::fs::write(&path, r#"{"beam_size": 4, "blank": 2}"#).expect("write config");
        let config = DecoderConfig::load(&path).expect("load should succeed");
        assert_eq!(config.beam_size, 4);
        assert_eq!(config.blank, 2);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn decoder_config_load_missing_file_is_io_error() {
        let result = DecoderConfig::load(Path::new("/nonexistent/decoder.json"));
        assert!(matches!(result, Err(DecodeError::Io { .. })));
    }

    #[test]
    fn decoder_config_validate_rejects_zero_beam() {
        let config = DecoderConfig {
            beam_size: 0,
            ..DecoderConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn decoder_config_validate_rejects_bad_tolerance() {
        for tolerance in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let config = DecoderConfig {
                row_sum_tolerance: tolerance,
                ..DecoderConfig::default()
            };
            assert!(config.validate().is_err(), "tolerance {tolerance} accepted");
        }
    }
}
