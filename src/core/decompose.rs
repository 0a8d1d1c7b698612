use crate::{constants::MISSING_VALUE, core::record::VariantRecord};
use rayon::prelude::*;

/// Splits a record into its per-base substitutions.
///
/// Records whose REF equals ALT produce nothing. MNPs produce one record per
/// differing offset, at consecutive positions starting from the original POS.
/// Offsets whose position would overflow are dropped.
/// Anything else is returned unchanged.
pub fn decompose_record(record: &VariantRecord) -> Vec<VariantRecord> {
    if record.ref_allele == record.alt_allele {
        return Vec::new();
    }
    if !record.is_mnp() {
        return vec![record.clone()];
    }

    record
        .ref_allele
        .chars()
        .zip(record.alt_allele.chars())
        .enumerate()
        .filter(|(_, (ref_base, alt_base))| ref_base != alt_base)
        .filter_map(|(offset, (ref_base, alt_base))| {
            let Some(pos) = record.pos.checked_add(offset as u64) else {
                log::warn!(
                    "Dropping base {} of MNP at {}:{}: position overflows",
                    offset,
                    record.chrom,
                    record.pos
                );
                return None;
            };
            Some(VariantRecord {
                chrom: record.chrom.clone(),
                pos,
                id: MISSING_VALUE.to_string(),
                ref_allele: ref_base.to_string(),
                alt_allele: alt_base.to_string(),
                qual: MISSING_VALUE.to_string(),
                filter: MISSING_VALUE.to_string(),
                info: record.info.clone(),
                genotype: record.genotype.clone(),
            })
        })
        .collect()
}

/// Decomposes every record, keeping input order.
pub fn decompose(records: &[VariantRecord]) -> Vec<VariantRecord> {
    records
        .par_iter()
        .flat_map_iter(decompose_record)
        .collect()
}
