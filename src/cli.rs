use crate::constants::*;
use anyhow::{anyhow, Result};
use chrono::Datelike;
use clap::{ArgAction, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

/// Full version string including the crate version and git description.
///
/// # Examples
/// * `0.1.0-1ba958a-dirty` - while on a dirty branch
/// * `0.1.0-1ba958a` - with a fresh commit
pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    let git_describe = env!("VERGEN_GIT_DESCRIBE");
    if git_describe.is_empty() {
        env!("CARGO_PKG_VERSION").to_string()
    } else {
        format!("{}-{}", env!("CARGO_PKG_VERSION"), git_describe)
    }
});

#[derive(Parser, Debug)]
#[command(name="vcfnorm",
          version=&**FULL_VERSION,
          about="Decompose MNPs and fill shorthand indels in VCF files",
          long_about = None,
          after_help = format!("Copyright (C) {}
          This program comes with ABSOLUTELY NO WARRANTY.", chrono::Utc::now().year()),
          help_template = "{name} {version}\n{author}{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true
    )]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Split multi-nucleotide substitutions into single-base records
    Decompose(DecomposeArgs),
    /// Rewrite `-` shorthand indels into reference-anchored alleles
    FillIndels(FillIndelsArgs),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Decompose(_) => "decompose",
            Command::FillIndels(_) => "fill-indels",
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(arg_required_else_help(true))]
pub struct DecomposeArgs {
    /// Input VCF file (plain or gzip)
    #[arg(
        short = 'i',
        long = "input",
        value_name = "VCF",
        value_parser = check_file_exists
    )]
    pub input: PathBuf,

    /// Output VCF file, gzip-compressed if it ends in .gz
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        value_parser = check_prefix_path
    )]
    pub output: PathBuf,

    /// Number of threads to use
    #[arg(
        short = '@',
        value_name = "THREADS",
        default_value_t = DEFAULT_THREADS,
        value_parser = threads_in_range
    )]
    pub num_threads: usize,
}

#[derive(Parser, Debug, Clone)]
#[command(arg_required_else_help(true))]
pub struct FillIndelsArgs {
    /// Reference FASTA file; only the first sequence is used
    #[arg(
        short = 'r',
        long = "reference",
        value_name = "FASTA",
        value_parser = check_file_exists
    )]
    pub reference: PathBuf,

    /// Input VCF file (plain or gzip)
    #[arg(
        short = 'i',
        long = "input",
        value_name = "VCF",
        value_parser = check_file_exists
    )]
    pub input: PathBuf,

    /// Output VCF file, gzip-compressed if it ends in .gz
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        value_parser = check_prefix_path
    )]
    pub output: PathBuf,

    /// Number of threads to use
    #[arg(
        short = '@',
        value_name = "THREADS",
        default_value_t = DEFAULT_THREADS,
        value_parser = threads_in_range
    )]
    pub num_threads: usize,

    /// Abort without writing output if any record falls outside the reference
    #[arg(
        help_heading("Advanced"),
        long,
        default_value_t = DEFAULT_STRICT
    )]
    pub strict: bool,
}

/// Initializes the verbosity level for logging based on the command-line arguments.
///
/// The level is determined by the number of occurrences of the `-v` or `--verbose` flag.
pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.module_path().unwrap_or("unknown_module"),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

/// Validates that the provided string is a non-zero thread count.
fn threads_in_range(s: &str) -> Result<usize> {
    let thread: usize = s
        .parse::<usize>()
        .map_err(|_| anyhow!("`{}` is not a valid thread number", s))?;
    if thread == 0 {
        return Err(anyhow!("Number of threads must be >= 1"));
    }
    Ok(thread)
}

/// Checks if the provided file path exists.
fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        return Err(anyhow!("File does not exist: {}", path.display()));
    }
    Ok(path.to_path_buf())
}

fn check_prefix_path(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(anyhow!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(path.to_path_buf())
}
