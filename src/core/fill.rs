use crate::{
    core::{
        record::{AlleleKind, VariantRecord},
        reference::ReferenceSequence,
    },
    error::RecordError,
};
use log::Level;
use rayon::prelude::*;
use std::fmt;

/// A record that was dropped while filling, with the reason it was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Level,
    pub chrom: String,
    pub pos: u64,
    pub error: RecordError,
}

impl Diagnostic {
    fn dropped(record: &VariantRecord, error: RecordError) -> Self {
        Diagnostic {
            severity: Level::Warn,
            chrom: record.chrom.clone(),
            pos: record.pos,
            error,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] Skipping record {}:{}: {}",
            self.severity, self.chrom, self.pos, self.error
        )
    }
}

#[derive(Debug, Default)]
pub struct FillOutcome {
    pub records: Vec<VariantRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

impl FillOutcome {
    pub fn skipped(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn coordinate_range_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.error.is_coordinate_range())
            .count()
    }
}

/// Reference bases for `len` positions from 0-based `start`. Coordinates that are
/// unknown or overflow are reported as `i64::MAX`.
fn fetch<'a>(
    reference: &'a ReferenceSequence,
    record: &VariantRecord,
    start: Option<i64>,
    len: usize,
) -> Result<&'a [u8], RecordError> {
    let end = start.and_then(|start| start.checked_add(i64::try_from(len).ok()?));
    start
        .zip(end)
        .and_then(|(start, end)| reference.slice(start, end))
        .ok_or(RecordError::CoordinateRange {
            pos: record.pos,
            start: start.unwrap_or(i64::MAX),
            end: end.unwrap_or(i64::MAX),
            len: reference.len(),
        })
}

fn to_allele(bases: &[u8]) -> String {
    String::from_utf8_lossy(bases).into_owned()
}

/// Rewrites a single record against the reference.
///
/// Deletions are re-anchored on the preceding base and insertions on the base at
/// POS. Plain records are returned as-is once their REF matches the reference.
pub fn fill_record(
    record: &VariantRecord,
    reference: &ReferenceSequence,
) -> Result<VariantRecord, RecordError> {
    let pos0 = record.pos0();
    match record.kind() {
        AlleleKind::Deletion => {
            let anchor0 = pos0.map(|pos0| pos0 - 1);
            let ref_allele = fetch(reference, record, anchor0, record.ref_allele.len() + 1)?;
            let alt_allele = fetch(reference, record, anchor0, 1)?;
            Ok(VariantRecord {
                // the anchor lies inside the reference, so POS is at least 2
                pos: record.pos - 1,
                ref_allele: to_allele(ref_allele),
                alt_allele: to_allele(alt_allele),
                ..record.clone()
            })
        }
        AlleleKind::Insertion => {
            let anchor = to_allele(fetch(reference, record, pos0, 1)?);
            Ok(VariantRecord {
                alt_allele: format!("{anchor}{}", record.alt_allele),
                ref_allele: anchor,
                ..record.clone()
            })
        }
        AlleleKind::Plain => {
            let observed = fetch(reference, record, pos0, record.ref_allele.len())?;
            if !record.ref_allele.as_bytes().eq_ignore_ascii_case(observed) {
                return Err(RecordError::RefMismatch {
                    pos: record.pos,
                    declared: record.ref_allele.clone(),
                    observed: to_allele(observed),
                });
            }
            Ok(record.clone())
        }
    }
}

/// Fills every record, keeping input order. Records that fail are dropped and
/// reported through [`FillOutcome::diagnostics`].
pub fn fill(records: &[VariantRecord], reference: &ReferenceSequence) -> FillOutcome {
    let results: Vec<Result<VariantRecord, RecordError>> = records
        .par_iter()
        .map(|record| fill_record(record, reference))
        .collect();

    let mut outcome = FillOutcome {
        records: Vec::with_capacity(records.len()),
        diagnostics: Vec::new(),
    };
    for (record, result) in records.iter().zip(results) {
        match result {
            Ok(filled) => outcome.records.push(filled),
            Err(error) => outcome.diagnostics.push(Diagnostic::dropped(record, error)),
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{record::GenotypeColumns, test_utils::record};

    fn reference() -> ReferenceSequence {
        ReferenceSequence::new("chr1", "TTACGGT")
    }

    #[test]
    fn deletion_is_anchored_on_preceding_base() {
        let filled = fill_record(&record(4, "CG", "-"), &reference()).unwrap();
        assert_eq!(filled.pos, 3);
        assert_eq!(filled.ref_allele, "ACG");
        assert_eq!(filled.alt_allele, "A");
    }

    #[test]
    fn deletion_span_comes_from_reference() {
        // Declared deleted bases are not checked against the reference.
        let filled = fill_record(&record(4, "TT", "-"), &reference()).unwrap();
        assert_eq!(filled.ref_allele, "ACG");
        assert_eq!(filled.alt_allele, "A");
    }

    #[test]
    fn insertion_is_anchored_on_current_base() {
        let filled = fill_record(&record(4, "-", "AA"), &reference()).unwrap();
        assert_eq!(filled.pos, 4);
        assert_eq!(filled.ref_allele, "C");
        assert_eq!(filled.alt_allele, "CAA");
    }

    #[test]
    fn matching_plain_record_is_unchanged() {
        let snp = record(4, "C", "T").with(|r| {
            r.id = "rs42".to_string();
            r.qual = "99.5".to_string();
            r.filter = "PASS".to_string();
            r.info = "AF=0.5;DP=30".to_string();
            r.genotype = Some(GenotypeColumns {
                format: "GT:DP".to_string(),
                samples: vec!["0/1:30".to_string()],
            });
        });
        assert_eq!(fill_record(&snp, &reference()), Ok(snp.clone()));

        let filled_indel = record(3, "ACG", "A");
        assert_eq!(fill_record(&filled_indel, &reference()), Ok(filled_indel.clone()));
    }

    #[test]
    fn mismatched_ref_is_rejected() {
        let err = fill_record(&record(1, "G", "T"), &reference()).unwrap_err();
        assert_eq!(
            err,
            RecordError::RefMismatch {
                pos: 1,
                declared: "G".to_string(),
                observed: "T".to_string(),
            }
        );
    }

    #[test]
    fn lowercase_reference_matches_uppercase_ref() {
        let reference = ReferenceSequence::new("chr1", "ttacggt");
        assert!(fill_record(&record(3, "A", "G"), &reference).is_ok());
        let filled = fill_record(&record(4, "-", "GG"), &reference).unwrap();
        assert_eq!(filled.alt_allele, "CGG");
    }

    #[test]
    fn out_of_range_coordinates_are_reported() {
        let reference = reference();
        let deletion_at_start = fill_record(&record(1, "T", "-"), &reference).unwrap_err();
        assert_eq!(
            deletion_at_start,
            RecordError::CoordinateRange {
                pos: 1,
                start: -1,
                end: 1,
                len: 7,
            }
        );
        assert!(fill_record(&record(7, "TA", "-"), &reference)
            .unwrap_err()
            .is_coordinate_range());
        assert!(fill_record(&record(8, "-", "A"), &reference)
            .unwrap_err()
            .is_coordinate_range());
        assert!(fill_record(&record(6, "GTA", "G"), &reference)
            .unwrap_err()
            .is_coordinate_range());
    }

    #[test]
    fn positions_near_integer_limits_are_out_of_range() {
        let reference = reference();
        let beyond_i64 = i64::MAX as u64 + 1;
        for record in [
            record(beyond_i64, "A", "C"),
            record(beyond_i64, "A", "-"),
            record(beyond_i64, "-", "A"),
            record(u64::MAX, "AC", "GT"),
        ] {
            let err = fill_record(&record, &reference).unwrap_err();
            assert_eq!(
                err,
                RecordError::CoordinateRange {
                    pos: record.pos,
                    start: i64::MAX,
                    end: i64::MAX,
                    len: 7,
                }
            );
        }

        let at_max = record(i64::MAX as u64, "AC", "GT");
        assert_eq!(
            fill_record(&at_max, &reference),
            Err(RecordError::CoordinateRange {
                pos: i64::MAX as u64,
                start: i64::MAX - 1,
                end: i64::MAX,
                len: 7,
            })
        );
        let deletion_at_max = record(i64::MAX as u64, "ACG", "-");
        assert_eq!(
            fill_record(&deletion_at_max, &reference),
            Err(RecordError::CoordinateRange {
                pos: i64::MAX as u64,
                start: i64::MAX - 2,
                end: i64::MAX,
                len: 7,
            })
        );

        let outcome = fill(&[at_max, record(4, "C", "T")], &reference);
        assert_eq!(outcome.coordinate_range_count(), 1);
        assert_eq!(outcome.records, vec![record(4, "C", "T")]);
    }

    #[test]
    fn non_ascii_reference_bytes_do_not_look_out_of_range() {
        let reference = ReferenceSequence::new("chr1", "AC\u{00e9}GT");
        let err = fill_record(&record(3, "G", "A"), &reference).unwrap_err();
        assert!(matches!(err, RecordError::RefMismatch { pos: 3, .. }));
        assert!(fill_record(&record(5, "G", "A"), &reference).is_ok());
    }

    #[test]
    fn fill_drops_invalid_records_and_reports_them() {
        let records = vec![
            record(4, "CG", "-"),
            record(1, "G", "T"),
            record(4, "-", "AA"),
            record(1, "T", "C"),
        ];
        let outcome = fill(&records, &reference());
        assert_eq!(outcome.records.len(), records.len() - 1);
        assert_eq!(outcome.skipped(), 1);
        assert_eq!(outcome.coordinate_range_count(), 0);

        let diagnostic = &outcome.diagnostics[0];
        assert_eq!(diagnostic.pos, 1);
        assert_eq!(diagnostic.severity, Level::Warn);
        assert!(diagnostic.to_string().contains("chr1:1"));

        let positions: Vec<u64> = outcome.records.iter().map(|r| r.pos).collect();
        assert_eq!(positions, vec![3, 4, 1]);
    }

    #[test]
    fn fill_preserves_column_width() {
        let with_sample = record(4, "-", "AA").with(|r| {
            r.genotype = Some(GenotypeColumns {
                format: "GT".to_string(),
                samples: vec!["1/1".to_string()],
            })
        });
        let without_sample = record(5, "G", "-");
        let outcome = fill(&[with_sample, without_sample], &reference());
        let widths: Vec<usize> = outcome.records.iter().map(VariantRecord::width).collect();
        assert_eq!(widths, vec![10, 8]);
        assert_eq!(
            outcome.records[0].genotype.as_ref().map(|g| g.samples.clone()),
            Some(vec!["1/1".to_string()])
        );
    }

    #[test]
    fn counts_coordinate_range_drops_separately() {
        let outcome = fill(
            &[record(1, "T", "-"), record(2, "G", "A"), record(3, "A", "C")],
            &reference(),
        );
        assert_eq!(outcome.skipped(), 2);
        assert_eq!(outcome.coordinate_range_count(), 1);
        assert_eq!(outcome.records, vec![record(3, "A", "C")]);
    }
}
