use std::{num::ParseIntError, path::PathBuf};
use thiserror::Error;

pub type VcfNormResult<T> = std::result::Result<T, VcfNormError>;

#[derive(Debug, Error)]
pub enum VcfNormError {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    ParseInt(#[from] ParseIntError),
    #[error("Invalid gzip header: {}", path.display())]
    InvalidGzipHeader { path: PathBuf },
    #[error("Malformed VCF record at line {line}: {message}")]
    MalformedRecord { line: usize, message: String },
    #[error("No sequence record found in reference: {}", path.display())]
    MissingReferenceSequence { path: PathBuf },
    #[error("First sequence in reference {} is empty", path.display())]
    EmptyReferenceSequence { path: PathBuf },
    #[error("Reference {} contains a non-ASCII character at line {line}", path.display())]
    NonAsciiReference { path: PathBuf, line: usize },
    #[error("{count} record(s) fall outside the reference sequence (--strict)")]
    StrictCoordinateRange { count: usize },
    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl VcfNormError {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

/// Per-record failures raised while filling indels. These never abort a run on
/// their own; the offending record is dropped and reported.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("REF allele {declared} does not match reference {observed} at position {pos}")]
    RefMismatch {
        pos: u64,
        declared: String,
        observed: String,
    },
    #[error(
        "Coordinates [{start}, {end}) for position {pos} fall outside the reference sequence (length {len})"
    )]
    CoordinateRange {
        pos: u64,
        start: i64,
        end: i64,
        len: usize,
    },
}

impl RecordError {
    pub fn is_coordinate_range(&self) -> bool {
        matches!(self, RecordError::CoordinateRange { .. })
    }
}

#[macro_export]
macro_rules! vcfnorm_error {
    ($($arg:tt)*) => {
        $crate::error::VcfNormError::message(format!($($arg)*))
    };
}
