use crate::constants::{ALLELE_PLACEHOLDER, MANDATORY_COLUMNS, MISSING_VALUE};
use std::fmt;

/// FORMAT column plus any sample columns that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenotypeColumns {
    pub format: String,
    pub samples: Vec<String>,
}

impl GenotypeColumns {
    pub fn width(&self) -> usize {
        1 + self.samples.len()
    }
}

/// Classification of a record by its use of the allele placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlleleKind {
    /// ALT is the placeholder, REF holds the deleted bases.
    Deletion,
    /// REF is the placeholder, ALT holds the inserted bases.
    Insertion,
    /// Neither allele is the placeholder.
    Plain,
}

/// A single VCF data line. `pos` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRecord {
    pub chrom: String,
    pub pos: u64,
    pub id: String,
    pub ref_allele: String,
    pub alt_allele: String,
    pub qual: String,
    pub filter: String,
    pub info: String,
    pub genotype: Option<GenotypeColumns>,
}

impl VariantRecord {
    /// Builds a record with every passthrough column set to `.`.
    pub fn new(
        chrom: impl Into<String>,
        pos: u64,
        ref_allele: impl Into<String>,
        alt_allele: impl Into<String>,
    ) -> Self {
        VariantRecord {
            chrom: chrom.into(),
            pos,
            id: MISSING_VALUE.to_string(),
            ref_allele: ref_allele.into(),
            alt_allele: alt_allele.into(),
            qual: MISSING_VALUE.to_string(),
            filter: MISSING_VALUE.to_string(),
            info: MISSING_VALUE.to_string(),
            genotype: None,
        }
    }

    pub fn with(mut self, updates: impl FnOnce(&mut Self)) -> Self {
        updates(&mut self);
        self
    }

    pub fn kind(&self) -> AlleleKind {
        if self.alt_allele == ALLELE_PLACEHOLDER {
            AlleleKind::Deletion
        } else if self.ref_allele == ALLELE_PLACEHOLDER {
            AlleleKind::Insertion
        } else {
            AlleleKind::Plain
        }
    }

    /// Equal-length REF/ALT spanning more than one base.
    pub fn is_mnp(&self) -> bool {
        self.kind() == AlleleKind::Plain
            && self.ref_allele.len() == self.alt_allele.len()
            && self.ref_allele.len() > 1
    }

    /// 0-based coordinate of the first REF base, or `None` when POS does not fit
    /// in an `i64`.
    pub fn pos0(&self) -> Option<i64> {
        i64::try_from(self.pos).ok()?.checked_sub(1)
    }

    /// Number of tab-separated columns this record serializes to.
    pub fn width(&self) -> usize {
        MANDATORY_COLUMNS + self.genotype.as_ref().map_or(0, GenotypeColumns::width)
    }
}

impl fmt::Display for VariantRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.chrom,
            self.pos,
            self.id,
            self.ref_allele,
            self.alt_allele,
            self.qual,
            self.filter,
            self.info
        )?;
        if let Some(genotype) = &self.genotype {
            write!(f, "\t{}", genotype.format)?;
            for sample in &genotype.samples {
                write!(f, "\t{sample}")?;
            }
        }
        Ok(())
    }
}
