use super::build_thread_pool;
use crate::{
    cli::FillIndelsArgs,
    core::{fill::fill, record::VariantRecord, reference::ReferenceSequence},
    error::VcfNormError,
    io::{readers::read_reference, vcf_reader::read_vcf, vcf_writer::write_vcf},
    utils::util::{format_number_with_commas, Result},
};
use std::collections::HashSet;

fn warn_on_contig_mismatch(records: &[VariantRecord], reference: &ReferenceSequence) {
    let mut seen: HashSet<&str> = HashSet::new();
    for record in records {
        let chrom = record.chrom.as_str();
        if chrom != reference.name() && seen.insert(chrom) {
            log::warn!(
                "Records on contig {} are filled against reference sequence {}",
                chrom,
                reference.name()
            );
        }
    }
}

pub fn fill_indels(args: FillIndelsArgs) -> Result<()> {
    let reference = read_reference(&args.reference)?;
    let vcf = read_vcf(&args.input)?;
    warn_on_contig_mismatch(&vcf.records, &reference);

    let pool = build_thread_pool(args.num_threads)?;
    let outcome = pool.install(|| fill(&vcf.records, &reference));

    for diagnostic in &outcome.diagnostics {
        println!("{diagnostic}");
    }
    if outcome.skipped() > 0 {
        log::warn!(
            "Skipped {} of {} records",
            format_number_with_commas(outcome.skipped()),
            format_number_with_commas(vcf.records.len())
        );
    }

    let out_of_range = outcome.coordinate_range_count();
    if args.strict && out_of_range > 0 {
        return Err(VcfNormError::StrictCoordinateRange {
            count: out_of_range,
        });
    }

    write_vcf(&args.output, &vcf.header, &outcome.records)?;
    log::info!(
        "Wrote {} records",
        format_number_with_commas(outcome.records.len())
    );
    println!("Filled VCF has been written to {}", args.output.display());
    Ok(())
}
