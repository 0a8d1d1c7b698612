pub const DEFAULT_THREADS: usize = 1;
pub const DEFAULT_STRICT: bool = false;

/// Allele placeholder used by shorthand indel notation.
pub const ALLELE_PLACEHOLDER: &str = "-";
pub const MISSING_VALUE: &str = ".";

/// Largest POS accepted, so 0-based coordinates fit in an `i64`.
pub const MAX_POS: u64 = i64::MAX as u64;

pub const MANDATORY_COLUMNS: usize = 8;
pub const COLUMN_HEADER_PREFIX: &str = "#CHROM";
pub const FASTA_RECORD_PREFIX: char = '>';
