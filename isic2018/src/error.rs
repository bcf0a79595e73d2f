use std::path::PathBuf;

use thiserror::Error;

/// Error type for ISIC2018 dataset operations.
///
/// This enum covers all possible errors that can occur during dataset
/// construction, length queries, and sample access.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Error when reading a directory fails.
    #[error("Failed to read directory: {path}")]
    DirectoryReadFailed {
        /// The directory path that failed to read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Error when the input image directory is not found.
    #[error("Input directory not found: {path}")]
    InputDirectoryNotFound {
        /// The expected input directory path.
        path: PathBuf,
    },

    /// Error when the target mask directory is not found.
    #[error("Target directory not found: {path}")]
    TargetDirectoryNotFound {
        /// The expected target directory path.
        path: PathBuf,
    },

    /// Error when the input and target directories hold different numbers of
    /// entries at length-query time.
    #[error("Mismatched number of inputs and targets: {inputs} inputs, {targets} targets")]
    MismatchedCount {
        /// Number of entries in the input directory.
        inputs: usize,
        /// Number of entries in the target directory.
        targets: usize,
    },

    /// Error when a sample index lies outside the dataset bounds.
    #[error("Sample index {index} out of range for dataset of length {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The dataset length.
        len: usize,
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

    /// Error when the damage degree lies outside the open interval (0, 1).
    #[error("Damage degree should be in (0, 1), got {degree}")]
    InvalidDamageDegree {
        /// The rejected degree.
        degree: f64,
    },

    /// Error when a damage method name is not recognized.
    #[error("Unknown damage method: {method}")]
    UnknownDamageMethod {
        /// The unrecognized method name.
        method: String,
    },
}

/// A specialized `Result` type for dataset operations.
pub type DatasetResult<T> = Result<T, DatasetError>;
