use std::path::PathBuf;

use thiserror::Error;

/// The error type for `Dehaze-Burn` operations.
///
/// This enum encapsulates all possible errors that can occur within the Dehaze-Burn library,
/// ranging from invalid tensor shapes and parameters to dataset loading failures.
#[derive(Error, Debug)]
pub enum DehazeError {
    /// Error for when an input tensor has an invalid shape.
    #[error("Invalid input: expected {expected}, got {actual}")]
    InvalidInput {
        /// The expected tensor shape.
        expected: String,
        /// The actual tensor shape.
        actual: String,
    },

    /// Error for when a numeric parameter is outside its valid range.
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// The name of the parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Error for when reading values back from a tensor fails.
    #[error("Failed to read tensor data: {reason}")]
    TensorDataFailed {
        /// The reason reported by the backend.
        reason: String,
    },

    /// Error when a dataset directory is not found.
    #[error("Directory not found: {path}")]
    DirectoryNotFound {
        /// The expected directory path.
        path: PathBuf,
    },

    /// Error when walking a dataset directory fails.
    #[cfg(feature = "dataset")]
    #[error("Failed to read directory: {path}")]
    DirectoryReadFailed {
        /// The directory path that failed to read.
        path: PathBuf,
        /// The underlying walk error.
        #[source]
        source: walkdir::Error,
    },

    /// Error when no hazy/clear pairs are found in the dataset.
    #[error("No valid hazy/clear pairs found in: {path}")]
    NoValidPairs {
        /// The directory where no pairs were found.
        path: PathBuf,
    },

    /// Error when opening or decoding an image file fails.
    #[error("Failed to open image: {path}")]
    ImageOpenFailed {
        /// The image file path that failed to open.
        path: PathBuf,
        /// The underlying image processing error.
        #[source]
        source: image::ImageError,
    },
}

/// A specialized `Result` type for `Dehaze-Burn` operations.
pub type DehazeResult<T> = Result<T, DehazeError>;

impl DehazeError {
    pub(crate) fn invalid_input(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::InvalidInput {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
