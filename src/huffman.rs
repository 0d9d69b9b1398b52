//! Huffman encoding and decoding.
//!
//! [`Codebook`] runs the compress-side analysis (frequencies, tree, code
//! table). [`HuffmanEncoder`] writes codewords into a [`BitSink`];
//! [`HuffmanDecoder`] walks the tree over a [`BitSource`].
//!
//! The bit stream carries no header, so a decoder must be given the very
//! tree the encoder's table was derived from.

use std::io::Write;

use log::{debug, trace};

use crate::bitio::{BitSink, BitSource};
use crate::code_table::CodeTable;
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, Node};
use crate::Symbol;

/// Everything one compress pass derives from its input.
#[derive(Debug, Clone, Default)]
pub struct Codebook {
    frequencies: FrequencyTable,
    tree: Option<HuffmanTree>,
    table: CodeTable,
}

impl Codebook {
    /// Build the tree and code table for the given frequencies.
    pub fn new(frequencies: FrequencyTable) -> Self {
        let tree = HuffmanTree::build(&frequencies);
        let table = tree.as_ref().map(CodeTable::from_tree).unwrap_or_default();
        Self {
            frequencies,
            tree,
            table,
        }
    }

    /// Analyze `text` and build its codebook.
    pub fn from_text(text: &str) -> Self {
        Self::new(FrequencyTable::from_text(text))
    }

    /// Symbol counts of the analyzed input.
    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    /// The tree, absent for an empty input.
    pub fn tree(&self) -> Option<&HuffmanTree> {
        self.tree.as_ref()
    }

    /// Codeword of every symbol of the input.
    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    /// Length in bits of the analyzed input once encoded.
    pub fn encoded_bits(&self) -> u64 {
        self.table.encoded_bits(&self.frequencies)
    }

    /// Encoded size over `original_bits`; 0 for an empty input.
    pub fn compression_ratio(&self, original_bits: u64) -> f64 {
        if original_bits == 0 {
            return 0.0;
        }
        self.encoded_bits() as f64 / original_bits as f64
    }

    /// Encoder over this codebook's table.
    pub fn encoder(&self) -> HuffmanEncoder<'_> {
        HuffmanEncoder::new(&self.table)
    }

    /// Decoder over this codebook's tree.
    pub fn decoder(&self) -> HuffmanDecoder<'_> {
        HuffmanDecoder::new(self.tree())
    }
}

/// Huffman encoder.
pub struct HuffmanEncoder<'a> {
    table: &'a CodeTable,
}

impl<'a> HuffmanEncoder<'a> {
    /// Create a new Huffman encoder from a code table.
    pub fn new(table: &'a CodeTable) -> Self {
        Self { table }
    }

    /// Write the codeword of every symbol, in order, to `sink`.
    ///
    /// Returns the number of bits written.
    ///
    /// # Errors
    /// Returns `Error::MissingCodeword` for a symbol outside the table, and
    /// propagates sink errors.
    pub fn encode<I, S>(&self, symbols: I, mut sink: S) -> Result<u64>
    where
        I: IntoIterator<Item = Symbol>,
        S: BitSink,
    {
        let mut written = 0u64;
        for s in symbols {
            let code = self.table.get(s).ok_or(Error::MissingCodeword(s))?;
            for &bit in code.bits() {
                sink.write_bit(bit)?;
            }
            written += code.len() as u64;
        }
        debug!("encoded {} bits", written);
        Ok(written)
    }

    /// Encode the characters of `text`.
    pub fn encode_text<S: BitSink>(&self, text: &str, sink: S) -> Result<u64> {
        self.encode(text.chars(), sink)
    }
}

/// Huffman decoder.
pub struct HuffmanDecoder<'a> {
    tree: Option<&'a HuffmanTree>,
}

impl<'a> HuffmanDecoder<'a> {
    /// Create a new Huffman decoder.
    ///
    /// Without a tree, every source decodes to nothing.
    pub fn new(tree: Option<&'a HuffmanTree>) -> Self {
        Self { tree }
    }

    /// Walk the tree over `source`, calling `emit` for every decoded symbol.
    ///
    /// Returns the number of symbols emitted. A source ending in the middle
    /// of a codeword drops that partial codeword.
    pub fn decode<S, F>(&self, mut source: S, mut emit: F) -> Result<u64>
    where
        S: BitSource,
        F: FnMut(Symbol) -> Result<()>,
    {
        let Some(tree) = self.tree else {
            return Ok(0);
        };
        let root = tree.root();
        let mut emitted = 0u64;

        if let Node::Leaf { symbol, .. } = tree.node(root) {
            // One bit per occurrence; its value carries nothing.
            while source.has_next()? {
                source.read_bit()?;
                emit(*symbol)?;
                emitted += 1;
            }
            return Ok(emitted);
        }

        let mut current = root;
        while source.has_next()? {
            match tree.node(current) {
                Node::Internal { left, right, .. } => {
                    current = if source.read_bit()? { *right } else { *left };
                }
                Node::Leaf { symbol, .. } => {
                    emit(*symbol)?;
                    emitted += 1;
                    current = root;
                }
            }
        }
        // The last bit reached a leaf without a further iteration to emit it.
        if let Node::Leaf { symbol, .. } = tree.node(current) {
            emit(*symbol)?;
            emitted += 1;
        } else if current != root {
            trace!("bit stream ended inside a codeword");
        }

        debug!("decoded {} symbols", emitted);
        Ok(emitted)
    }

    /// Decode `source` into a `String`.
    pub fn decode_to_string<S: BitSource>(&self, source: S) -> Result<String> {
        let mut out = String::new();
        self.decode(source, |s| {
            out.push(s);
            Ok(())
        })?;
        Ok(out)
    }

    /// Decode `source`, writing every symbol to `writer` as UTF-8.
    pub fn decode_to_writer<S: BitSource, W: Write>(
        &self,
        source: S,
        mut writer: W,
    ) -> Result<u64> {
        let mut buf = [0u8; 4];
        self.decode(source, |s| {
            writer.write_all(s.encode_utf8(&mut buf).as_bytes())?;
            Ok(())
        })
    }
}
