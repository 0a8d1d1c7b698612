use crate::{
    constants::{COLUMN_HEADER_PREFIX, MANDATORY_COLUMNS, MAX_POS},
    core::record::{GenotypeColumns, VariantRecord},
    error::VcfNormError,
    io::readers::open_text_reader,
    utils::util::Result,
};
use std::{io::BufRead, path::Path};

/// Header lines and records of a VCF file, held in memory.
#[derive(Debug, Clone, Default)]
pub struct VcfFile {
    pub header: Vec<String>,
    pub records: Vec<VariantRecord>,
}

impl VcfFile {
    /// Column count declared by the `#CHROM` line, if the header has one.
    pub fn declared_columns(&self) -> Option<usize> {
        self.header
            .iter()
            .rev()
            .find(|line| line.starts_with(COLUMN_HEADER_PREFIX))
            .map(|line| line.split('\t').count())
    }
}

fn malformed(line: usize, message: impl Into<String>) -> VcfNormError {
    VcfNormError::MalformedRecord {
        line,
        message: message.into(),
    }
}

/// Parses one tab-delimited data line. `line_number` is only used for errors.
pub fn parse_record(line: &str, line_number: usize) -> Result<VariantRecord> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < MANDATORY_COLUMNS {
        return Err(malformed(
            line_number,
            format!(
                "expected at least {} tab-separated columns, found {}",
                MANDATORY_COLUMNS,
                fields.len()
            ),
        ));
    }

    let pos: u64 = fields[1]
        .parse()
        .map_err(|e| malformed(line_number, format!("invalid POS `{}`: {}", fields[1], e)))?;
    if pos == 0 {
        return Err(malformed(line_number, "POS must be >= 1"));
    }
    if pos > MAX_POS {
        return Err(malformed(
            line_number,
            format!("POS {pos} exceeds the maximum of {MAX_POS}"),
        ));
    }

    let genotype = match &fields[MANDATORY_COLUMNS..] {
        [] => None,
        [format, samples @ ..] => Some(GenotypeColumns {
            format: format.to_string(),
            samples: samples.iter().map(|s| s.to_string()).collect(),
        }),
    };

    Ok(VariantRecord {
        chrom: fields[0].to_string(),
        pos,
        id: fields[2].to_string(),
        ref_allele: fields[3].to_string(),
        alt_allele: fields[4].to_string(),
        qual: fields[5].to_string(),
        filter: fields[6].to_string(),
        info: fields[7].to_string(),
        genotype,
    })
}

/// Reads a plain or gzipped VCF. Every `#` line is kept as header, blank lines are
/// skipped, and any other line must parse as a record.
pub fn read_vcf(path: &Path) -> Result<VcfFile> {
    log::trace!("Start loading VCF {:?}", path);
    let reader = open_text_reader(path)?;

    let mut vcf = VcfFile::default();
    for (index, result_line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = result_line.map_err(|e| {
            crate::vcfnorm_error!(
                "Error at VCF line {} of {}: {}",
                line_number,
                path.display(),
                e
            )
        })?;
        if line.starts_with('#') {
            vcf.header.push(line);
        } else if !line.trim().is_empty() {
            vcf.records
                .push(parse_record(line.trim_end_matches('\r'), line_number)?);
        }
    }

    match vcf.declared_columns() {
        Some(declared) => {
            if let Some(record) = vcf.records.iter().find(|r| r.width() != declared) {
                log::warn!(
                    "Record at {}:{} has {} columns but the header declares {}",
                    record.chrom,
                    record.pos,
                    record.width(),
                    declared
                );
            }
        }
        None => log::warn!(
            "VCF {} has no {} header line",
            path.display(),
            COLUMN_HEADER_PREFIX
        ),
    }

    log::debug!(
        "Loaded {} header lines and {} records from {}",
        vcf.header.len(),
        vcf.records.len(),
        path.display()
    );
    Ok(vcf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_utils::{make_temp_file, TEST_VCF};

    #[test]
    fn parse_record_round_trips_all_widths() {
        let lines = [
            "chr1\t100\trs1\tA\tG\t50\tPASS\tDP=10",
            "chr1\t100\trs1\tA\tG\t50\tPASS\tDP=10\tGT",
            "chr1\t100\trs1\tA\tG\t50\tPASS\tDP=10\tGT:DP\t0/1:12",
            "chr1\t100\t.\tAGT\tACT\t.\t.\t.\tGT\t0/1\t1/1",
        ];
        for (index, line) in lines.iter().enumerate() {
            let record = parse_record(line, index + 1).unwrap();
            assert_eq!(record.width(), 8 + index);
            assert_eq!(record.to_string(), *line);
        }
    }

    #[test]
    fn parse_record_keeps_genotype_optional() {
        let record = parse_record("chr2\t7\t.\t-\tTT\t.\t.\t.", 1).unwrap();
        assert_eq!(record.genotype, None);
        assert_eq!(record.pos, 7);
        assert_eq!(record.ref_allele, "-");

        let record = parse_record("chr2\t7\t.\tC\tT\t.\t.\t.\tGT\t0|1", 1).unwrap();
        let genotype = record.genotype.unwrap();
        assert_eq!(genotype.format, "GT");
        assert_eq!(genotype.samples, vec!["0|1".to_string()]);
    }

    #[test]
    fn parse_record_rejects_short_lines() {
        let err = parse_record("chr1\t100\trs1\tA\tG", 12).unwrap_err();
        assert!(matches!(err, VcfNormError::MalformedRecord { line: 12, .. }));
    }

    #[test]
    fn parse_record_rejects_bad_positions() {
        for pos in ["0", "-3", "abc", ""] {
            let line = format!("chr1\t{pos}\t.\tA\tG\t.\t.\t.");
            let err = parse_record(&line, 3).unwrap_err();
            assert!(matches!(err, VcfNormError::MalformedRecord { line: 3, .. }));
        }
    }

    #[test]
    fn parse_record_bounds_pos_to_signed_range() {
        let line = format!("chr1\t{}\t.\tA\tC\t.\t.\t.", i64::MAX);
        assert_eq!(parse_record(&line, 1).unwrap().pos, i64::MAX as u64);

        for pos in [i64::MAX as u64 + 1, u64::MAX] {
            let line = format!("chr1\t{pos}\t.\tA\tC\t.\t.\t.");
            let err = parse_record(&line, 5).unwrap_err();
            assert!(matches!(err, VcfNormError::MalformedRecord { line: 5, .. }));
        }
    }

    #[test]
    fn read_vcf_keeps_header_line_endings() {
        let contents = "##fileformat=VCFv4.2\r\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\r\nchr1\t1\t.\tA\tC\t.\t.\tDP=1\r\n";
        let path = make_temp_file(contents, "vcf");
        let vcf = read_vcf(&path).unwrap();
        assert_eq!(vcf.header[0], "##fileformat=VCFv4.2\r");
        assert_eq!(vcf.declared_columns(), Some(8));
        assert_eq!(vcf.records[0].info, "DP=1");
    }

    #[test]
    fn read_vcf_splits_header_and_records() {
        let path = make_temp_file(TEST_VCF, "vcf");
        let vcf = read_vcf(&path).unwrap();
        assert_eq!(vcf.header.len(), 3);
        assert!(vcf.header[0].starts_with("##fileformat"));
        assert_eq!(vcf.declared_columns(), Some(8));
        assert_eq!(vcf.records.len(), 4);
        assert_eq!(vcf.records[0].id, "del1");
        assert_eq!(vcf.records[3].info, "DP=13");
    }

    #[test]
    fn read_vcf_skips_blank_lines_and_reports_line_numbers() {
        let contents = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\nchr1\t1\t.\tA\tC\t.\t.\t.\nchr1\tx\t.\tA\tC\t.\t.\t.\n";
        let path = make_temp_file(contents, "vcf");
        let err = read_vcf(&path).unwrap_err();
        assert!(matches!(err, VcfNormError::MalformedRecord { line: 4, .. }));
    }

    #[test]
    fn read_vcf_without_column_header() {
        let path = make_temp_file("chr1\t1\t.\tA\tC\t.\t.\t.\n", "vcf");
        let vcf = read_vcf(&path).unwrap();
        assert!(vcf.header.is_empty());
        assert_eq!(vcf.declared_columns(), None);
        assert_eq!(vcf.records.len(), 1);
    }
}
