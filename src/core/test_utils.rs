use super::record::VariantRecord;
use std::{
    fs,
    path::PathBuf,
    sync::atomic::{AtomicU64, Ordering},
    time::SystemTime,
};

static TEMP_FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn record(pos: u64, ref_allele: &str, alt_allele: &str) -> VariantRecord {
    VariantRecord::new("chr1", pos, ref_allele, alt_allele)
}

pub fn make_temp_file(contents: &str, ext: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let counter = TEMP_FILE_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.push(format!("vcfnorm_test_{nanos}_{counter}.{ext}"));
    fs::write(&path, contents).unwrap();
    path
}

pub const TEST_VCF: &str = "##fileformat=VCFv4.2
##contig=<ID=chr1,length=7>
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
chr1\t4\tdel1\tCG\t-\t50\tPASS\tDP=10
chr1\t4\tins1\t-\tAA\t40\tPASS\tDP=11
chr1\t1\tbad1\tG\tT\t30\tPASS\tDP=12
chr1\t5\tsnp1\tG\tA\t20\tPASS\tDP=13
";

pub const TEST_FASTA: &str = ">chr1 test contig
TTAC
GGT
";
