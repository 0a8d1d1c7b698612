pub mod cli;
pub mod commands;
pub mod error;

pub mod core {
    pub mod decompose;
    pub mod fill;
    pub mod record;
    pub mod reference;

    #[cfg(test)]
    pub(crate) mod test_utils;
}

pub mod io {
    pub mod readers;
    pub mod vcf_reader;
    pub mod vcf_writer;
}

pub mod utils {
    pub mod util;
}

pub mod constants;

pub use constants::*;
