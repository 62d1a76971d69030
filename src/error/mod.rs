// Error types for the cry classification core
//
// This module defines custom error types for audio decoding and model
// artifact handling, providing structured error handling with error codes
// suitable for the API layer.

mod decode;
mod model;

pub use decode::{log_decode_error, DecodeError, DecodeErrorCodes};
pub use model::{log_model_error, ModelError, ModelErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent error handling at the
/// service boundary.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
