use crate::{
    constants::FASTA_RECORD_PREFIX, core::reference::ReferenceSequence, error::VcfNormError,
    utils::util::{try_exists, Result},
};
use flate2::{read::MultiGzDecoder, write::GzEncoder, Compression};
use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Read as ioRead, Write},
    path::Path,
};

fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".gzip")
}

pub fn open_text_reader(path: &Path) -> Result<BufReader<Box<dyn ioRead>>> {
    try_exists(path)?;
    let file = File::open(path)
        .map_err(|error| crate::vcfnorm_error!("Failed to open file {}: {error}", path.display()))?;
    if is_gzipped(path) {
        let gz_decoder = MultiGzDecoder::new(file);
        if gz_decoder.header().is_some() {
            Ok(BufReader::new(Box::new(gz_decoder)))
        } else {
            Err(VcfNormError::InvalidGzipHeader {
                path: path.to_path_buf(),
            })
        }
    } else {
        Ok(BufReader::new(Box::new(file)))
    }
}

/// Output sink that is plain text or gzip depending on the target path.
pub enum TextWriter {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl TextWriter {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|error| {
            crate::vcfnorm_error!("Failed to create file {}: {error}", path.display())
        })?;
        let writer = BufWriter::new(file);
        if is_gzipped(path) {
            Ok(TextWriter::Gzip(GzEncoder::new(writer, Compression::default())))
        } else {
            Ok(TextWriter::Plain(writer))
        }
    }

    /// Flushes buffered output and writes the gzip trailer, if any.
    pub fn finish(self) -> Result<()> {
        match self {
            TextWriter::Plain(mut writer) => writer.flush()?,
            TextWriter::Gzip(encoder) => encoder.finish()?.flush()?,
        }
        Ok(())
    }
}

impl Write for TextWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            TextWriter::Plain(writer) => writer.write(buf),
            TextWriter::Gzip(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            TextWriter::Plain(writer) => writer.flush(),
            TextWriter::Gzip(encoder) => encoder.flush(),
        }
    }
}

/// Reads the first sequence of a FASTA file. Any further sequences are ignored.
pub fn read_reference(path: &Path) -> Result<ReferenceSequence> {
    let reader = open_text_reader(path)?;

    let mut name: Option<String> = None;
    let mut bases = String::new();
    let mut has_more_records = false;
    for (line_number, result_line) in reader.lines().enumerate() {
        let line = result_line.map_err(|e| {
            crate::vcfnorm_error!(
                "Error at FASTA line {} of {}: {}",
                line_number + 1,
                path.display(),
                e
            )
        })?;
        if let Some(header) = line.strip_prefix(FASTA_RECORD_PREFIX) {
            if name.is_some() {
                has_more_records = true;
                break;
            }
            name = Some(header.split_whitespace().next().unwrap_or_default().to_string());
            continue;
        }
        if name.is_none() {
            if !line.trim().is_empty() {
                log::debug!(
                    "Ignoring FASTA line {} before the first record",
                    line_number + 1
                );
            }
            continue;
        }
        if !line.is_ascii() {
            return Err(VcfNormError::NonAsciiReference {
                path: path.to_path_buf(),
                line: line_number + 1,
            });
        }
        bases.extend(line.split_whitespace());
    }

    let Some(name) = name else {
        return Err(VcfNormError::MissingReferenceSequence {
            path: path.to_path_buf(),
        });
    };
    if bases.is_empty() {
        return Err(VcfNormError::EmptyReferenceSequence {
            path: path.to_path_buf(),
        });
    }
    if has_more_records {
        log::warn!(
            "Reference {} contains more than one sequence, only the first ({}) is used",
            path.display(),
            name
        );
    }

    let reference = ReferenceSequence::new(name, &bases);
    log::debug!(
        "Loaded reference sequence {} ({} bp)",
        reference.name(),
        reference.len()
    );
    Ok(reference)
}
