use super::build_thread_pool;
use crate::{
    cli::DecomposeArgs,
    core::decompose::decompose as decompose_records,
    io::{vcf_reader::read_vcf, vcf_writer::write_vcf},
    utils::util::{format_number_with_commas, Result},
};

pub fn decompose(args: DecomposeArgs) -> Result<()> {
    let vcf = read_vcf(&args.input)?;
    let pool = build_thread_pool(args.num_threads)?;

    let records = pool.install(|| decompose_records(&vcf.records));
    log::info!(
        "Decomposed {} input records into {} output records",
        format_number_with_commas(vcf.records.len()),
        format_number_with_commas(records.len())
    );

    write_vcf(&args.output, &vcf.header, &records)?;
    println!("Decomposed VCF has been written to {}", args.output.display());
    Ok(())
}
