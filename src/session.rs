//! File-level compression and decompression.
//!
//! `X.txt` compresses to `X_compressed.txt`; `Y_compressed.txt` decompresses
//! to `Y_decompressed.txt`, both next to their input.
//!
//! The compressed file has no header. [`decompress_file`] takes the tree as
//! a parameter; [`Session`] pairs a compress with later decompressions by
//! holding the codebook of its most recent successful compress.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::bitio::{BitReader, BitWriter};
use crate::error::{Error, Result};
use crate::huffman::{Codebook, HuffmanDecoder};
use crate::tree::HuffmanTree;

const TEXT_EXTENSION: &str = "txt";
const COMPRESSED_SUFFIX: &str = "_compressed";
const DECOMPRESSED_SUFFIX: &str = "_decompressed";

/// Outcome of compressing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressReport {
    /// The text file that was read.
    pub input: PathBuf,
    /// The compressed file that was written.
    pub output: PathBuf,
    /// Size of the input in bytes.
    pub input_bytes: u64,
    /// Number of symbols encoded.
    pub symbols: u64,
    /// Number of distinct symbols.
    pub distinct_symbols: usize,
    /// Number of code bits written, excluding padding and trailer.
    pub bits_written: u64,
    /// Size of the compressed file in bytes.
    pub output_bytes: u64,
}

impl CompressReport {
    /// Compressed size over input size; 0 for an empty input.
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        self.output_bytes as f64 / self.input_bytes as f64
    }
}

/// Outcome of decompressing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecompressReport {
    /// The compressed file that was read.
    pub input: PathBuf,
    /// The text file that was written.
    pub output: PathBuf,
    /// Number of symbols decoded.
    pub symbols: u64,
}

fn with_stem_suffix(path: &Path, strip: Option<&str>, append: &str) -> Result<PathBuf> {
    let unexpected = || Error::UnexpectedFileName(path.to_path_buf());
    if path.extension().and_then(|e| e.to_str()) != Some(TEXT_EXTENSION) {
        return Err(unexpected());
    }
    let stem = path.file_stem().and_then(|s| s.to_str()).ok_or_else(unexpected)?;
    let base = match strip {
        Some(suffix) => stem.strip_suffix(suffix).ok_or_else(unexpected)?,
        None => stem,
    };
    Ok(path.with_file_name(format!("{base}{append}.{TEXT_EXTENSION}")))
}

/// `dir/X.txt` -> `dir/X_compressed.txt`.
pub fn compressed_path(input: &Path) -> Result<PathBuf> {
    with_stem_suffix(input, None, COMPRESSED_SUFFIX)
}

/// `dir/Y_compressed.txt` -> `dir/Y_decompressed.txt`.
pub fn decompressed_path(input: &Path) -> Result<PathBuf> {
    with_stem_suffix(input, Some(COMPRESSED_SUFFIX), DECOMPRESSED_SUFFIX)
}

/// Compress `input` into `output`, returning the codebook needed to decode it.
///
/// The input is read twice: once for frequency analysis, once for encoding.
pub fn compress_file(input: &Path, output: &Path) -> Result<(Codebook, CompressReport)> {
    let book = Codebook::from_text(&fs::read_to_string(input)?);
    debug!(
        "{}: {} distinct symbols, {} expected bits",
        input.display(),
        book.frequencies().len(),
        book.encoded_bits()
    );

    let text = fs::read_to_string(input)?;
    let mut writer = BitWriter::new(BufWriter::new(File::create(output)?));
    let encoded = book.encoder().encode_text(&text, &mut writer)?;
    let bits_written = writer.bits_written();
    debug_assert_eq!(encoded, bits_written);
    writer.finish()?;

    let report = CompressReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        input_bytes: text.len() as u64,
        symbols: book.frequencies().total(),
        distinct_symbols: book.frequencies().len(),
        bits_written,
        output_bytes: fs::metadata(output)?.len(),
    };
    Ok((book, report))
}

/// Decode `input` with `tree` and write the text to `output`.
///
/// Without a tree the output file is created empty.
pub fn decompress_file(
    tree: Option<&HuffmanTree>,
    input: &Path,
    output: &Path,
) -> Result<DecompressReport> {
    let reader = BitReader::new(BufReader::new(File::open(input)?));
    let mut writer = BufWriter::new(File::create(output)?);
    let symbols = HuffmanDecoder::new(tree).decode_to_writer(reader, &mut writer)?;
    writer.into_inner().map_err(|e| e.into_error())?;

    Ok(DecompressReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        symbols,
    })
}

/// Pairs compress calls with the decompress calls that follow them.
#[derive(Debug, Default)]
pub struct Session {
    codebook: Option<Codebook>,
}

impl Session {
    /// Create a session with no codebook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Codebook of the last successful compress.
    pub fn codebook(&self) -> Option<&Codebook> {
        self.codebook.as_ref()
    }

    /// Tree of the last successful compress, absent for an empty input.
    pub fn tree(&self) -> Option<&HuffmanTree> {
        self.codebook.as_ref().and_then(Codebook::tree)
    }

    /// Compress `X.txt` into `X_compressed.txt` and keep its codebook.
    ///
    /// On failure the previous codebook is kept.
    pub fn compress(&mut self, input: &Path) -> Result<CompressReport> {
        let output = compressed_path(input)?;
        let (book, report) = compress_file(input, &output)?;
        info!(
            "compressed {} -> {} ({} -> {} bytes, ratio {:.3})",
            report.input.display(),
            report.output.display(),
            report.input_bytes,
            report.output_bytes,
            report.ratio()
        );
        self.codebook = Some(book);
        Ok(report)
    }

    /// Decompress `Y_compressed.txt` into `Y_decompressed.txt` using the held tree.
    pub fn decompress(&self, input: &Path) -> Result<DecompressReport> {
        let output = decompressed_path(input)?;
        let report = decompress_file(self.tree(), input, &output)?;
        info!(
            "decompressed {} -> {} ({} symbols)",
            report.input.display(),
            report.output.display(),
            report.symbols
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compressed_path() {
        assert_eq!(
            compressed_path(Path::new("files/Hello_World.txt")).unwrap(),
            PathBuf::from("files/Hello_World_compressed.txt")
        );
    }

    #[test]
    fn test_decompressed_path() {
        assert_eq!(
            decompressed_path(Path::new("files/empty_compressed.txt")).unwrap(),
            PathBuf::from("files/empty_decompressed.txt")
        );
    }

    #[test]
    fn test_unexpected_names() {
        assert!(matches!(
            compressed_path(Path::new("notes.md")),
            Err(Error::UnexpectedFileName(_))
        ));
        assert!(matches!(
            decompressed_path(Path::new("notes.txt")),
            Err(Error::UnexpectedFileName(_))
        ));
    }

    #[test]
    fn test_fresh_session_has_no_tree() {
        assert!(Session::new().tree().is_none());
    }
}
