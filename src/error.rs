use std::path::PathBuf;

use msx1_quantize::{LutError, QuantizeError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("PNG decode error: {0}")]
    PngDecode(#[from] png::DecodingError),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Unsupported PNG layout: {0}")]
    UnsupportedPng(String),

    #[error("LUT error: {0}")]
    Lut(#[from] LutError),

    #[error("Quantize error: {0}")]
    Quantize(#[from] QuantizeError),

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    #[error("Failed to load settings from {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("Input path does not exist: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("No PNG files to process in {}", .0.display())]
    NoInputs(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_setting_message() {
        let error = ConvertError::InvalidSetting("sc2 output requires an 8-dot mode".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid setting: sc2 output requires an 8-dot mode"
        );
    }

    #[test]
    fn test_config_message() {
        let error = ConvertError::Config {
            path: PathBuf::from("preset.yaml"),
            message: "bad key".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to load settings from preset.yaml: bad key"
        );
    }

    #[test]
    fn test_lut_error_wraps() {
        let error: ConvertError = LutError::MissingSize.into();
        assert_eq!(error.to_string(), "LUT error: LUT_3D_SIZE is missing");
    }

    #[test]
    fn test_no_inputs_message() {
        let error = ConvertError::NoInputs(PathBuf::from("frames"));
        assert_eq!(error.to_string(), "No PNG files to process in frames");
    }

    #[test]
    fn test_io_error_wraps() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error: ConvertError = io.into();
        assert_eq!(error.to_string(), "IO error: gone");
    }
}
