// Decode error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;
use std::path::PathBuf;

/// Decode error code constants
///
/// These constants provide a single source of truth for error codes shared
/// with the API layer.
///
/// Error code range: 1101-1105
pub struct DecodeErrorCodes {}

impl DecodeErrorCodes {
    /// Audio file does not exist or cannot be opened
    pub const FILE_NOT_FOUND: i32 = 1101;

    /// Container or codec is not supported
    pub const UNSUPPORTED_FORMAT: i32 = 1102;

    /// File was parsed but contains no audio track
    pub const NO_AUDIO_TRACK: i32 = 1103;

    /// Stream is corrupt and decoding cannot continue
    pub const CORRUPT_STREAM: i32 = 1104;

    /// Decoding produced no samples
    pub const EMPTY_SIGNAL: i32 = 1105;
}

/// Log a decode error with structured context
///
/// Logged at error level with the numeric code so batch drivers and the
/// service boundary can correlate log lines with returned results.
pub fn log_decode_error(err: &DecodeError, context: &str) {
    error!(
        "Decode error in {}: code={}, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Audio decoding errors
///
/// These cover the file-to-signal boundary: opening, probing, and decoding
/// a waveform file into PCM samples. A `DecodeError` is recoverable in
/// batch contexts (skip-and-continue) and surfaced as an Error-status
/// result in request contexts.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Audio file does not exist or cannot be opened
    FileNotFound { path: PathBuf },

    /// Container or codec is not supported
    UnsupportedFormat { path: PathBuf, details: String },

    /// File was parsed but contains no audio track
    NoAudioTrack { path: PathBuf },

    /// Stream is corrupt and decoding cannot continue
    CorruptStream { details: String },

    /// Decoding produced no samples
    EmptySignal { path: PathBuf },
}

impl ErrorCode for DecodeError {
    fn code(&self) -> i32 {
        match self {
            DecodeError::FileNotFound { .. } => DecodeErrorCodes::FILE_NOT_FOUND,
            DecodeError::UnsupportedFormat { .. } => DecodeErrorCodes::UNSUPPORTED_FORMAT,
            DecodeError::NoAudioTrack { .. } => DecodeErrorCodes::NO_AUDIO_TRACK,
            DecodeError::CorruptStream { .. } => DecodeErrorCodes::CORRUPT_STREAM,
            DecodeError::EmptySignal { .. } => DecodeErrorCodes::EMPTY_SIGNAL,
        }
    }

    fn message(&self) -> String {
        match self {
            DecodeError::FileNotFound { path } => {
                format!("Audio file not found: {}", path.display())
            }
            DecodeError::UnsupportedFormat { path, details } => {
                format!(
                    "Unsupported audio format for {}: {}",
                    path.display(),
                    details
                )
            }
            DecodeError::NoAudioTrack { path } => {
                format!("No audio track found in {}", path.display())
            }
            DecodeError::CorruptStream { details } => {
                format!("Corrupt audio stream: {}", details)
            }
            DecodeError::EmptySignal { path } => {
                format!("Decoded signal is empty: {}", path.display())
            }
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DecodeError (code {}): {}", self.code(), self.message())
    }
}

impl std::error::Error for DecodeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_codes() {
        assert_eq!(
            DecodeError::FileNotFound {
                path: PathBuf::from("x.wav")
            }
            .code(),
            DecodeErrorCodes::FILE_NOT_FOUND
        );
        assert_eq!(
            DecodeError::UnsupportedFormat {
                path: PathBuf::from("x.3gp"),
                details: "probe failed".to_string()
            }
            .code(),
            DecodeErrorCodes::UNSUPPORTED_FORMAT
        );
        assert_eq!(
            DecodeError::CorruptStream {
                details: "bad packet".to_string()
            }
            .code(),
            DecodeErrorCodes::CORRUPT_STREAM
        );
    }

    #[test]
    fn test_decode_error_messages() {
        let err = DecodeError::UnsupportedFormat {
            path: PathBuf::from("cry.3gp"),
            details: "unknown container".to_string(),
        };
        assert!(err.message().contains("cry.3gp"));
        assert!(err.message().contains("unknown container"));

        let err = DecodeError::EmptySignal {
            path: PathBuf::from("silent.wav"),
        };
        assert!(err.message().contains("empty"));
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::FileNotFound {
            path: PathBuf::from("missing.wav"),
        };
        let display = format!("{}", err);
        assert!(display.contains("DecodeError"));
        assert!(display.contains("1101"));
    }
}
