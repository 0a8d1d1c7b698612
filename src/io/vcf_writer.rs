use crate::{core::record::VariantRecord, io::readers::TextWriter, utils::util::Result};
use std::{io::Write, path::Path};

/// Writes header lines verbatim followed by one line per record.
pub fn write_records<W: Write>(
    writer: &mut W,
    header: &[String],
    records: &[VariantRecord],
) -> Result<()> {
    for line in header {
        writeln!(writer, "{line}")?;
    }
    for record in records {
        writeln!(writer, "{record}")?;
    }
    Ok(())
}

/// Writes a VCF to `path`, gzip-compressed when the path ends in `.gz`.
pub fn write_vcf(path: &Path, header: &[String], records: &[VariantRecord]) -> Result<()> {
    log::trace!("Writing {} records to {}", records.len(), path.display());
    let mut writer = TextWriter::create(path)?;
    write_records(&mut writer, header, records).map_err(|e| {
        crate::vcfnorm_error!("Failed to write VCF {}: {}", path.display(), e)
    })?;
    writer.finish()
}
