//! # Huffman text compression
//!
//! *Variable-length prefix codes built from the characters a text actually uses.*
//!
//! ## Intuition First
//!
//! A fixed-width encoding spends the same number of bits on `e` as on `z`.
//! Huffman coding gives frequent symbols short codes and rare symbols long
//! ones. The codes are read off a binary tree: every symbol is a leaf, and
//! its code is the path from the root (0 = left, 1 = right). Because symbols
//! only live at leaves, no code is a prefix of another, and a bit stream can
//! be split back into symbols without separators.
//!
//! ## The Algorithm
//!
//! ```text
//! text ──► FrequencyTable ──► HuffmanTree ──► CodeTable ──► HuffmanEncoder ──► bits
//!                                  │
//!                                  └──────────────────────► HuffmanDecoder ──► text
//! ```
//!
//! 1. Count every symbol.
//! 2. Put one leaf per symbol in a min-priority queue keyed by count.
//! 3. Pop the two lightest subtrees, join them under a node whose weight is
//!    their sum, push it back. Stop when one tree remains.
//! 4. Walk the tree to collect each leaf's path.
//!
//! A text with a single distinct symbol gives a tree with no edges; that
//! symbol is coded as the single bit `1`.
//!
//! ## Historical Context
//!
//! ```text
//! 1948  Shannon     Entropy as the fundamental limit
//! 1949  Fano        Shannon–Fano coding: top-down splitting
//! 1952  Huffman     Bottom-up merging: optimal prefix codes
//! 1978  Gallager    Adaptive (dynamic) Huffman coding
//! 1993  Deflate     Huffman over LZ77 output (zip, gzip, png)
//! ```
//!
//! ## Complexity Analysis
//!
//! - **Tree construction**: $O(n \log n)$ for $n$ distinct symbols.
//! - **Encoding / decoding**: $O(1)$ per bit.
//!
//! ## Failure Modes
//!
//! 1. **No header**: the compressed stream does not describe its tree. A
//!    decoder given a different tree silently produces different text.
//! 2. **Truncation**: a stream cut inside a codeword loses that symbol
//!    without an error; a truncated and a complete stream look alike.
//!
//! ## Example
//!
//! ```
//! use std::collections::VecDeque;
//! use huffpack::Codebook;
//!
//! let text = "AAAAAAAAAAAAAABBBCCCCCCCCDDEEEEEE";
//! let book = Codebook::from_text(text);
//!
//! let mut bits: Vec<bool> = Vec::new();
//! let written = book.encoder().encode_text(text, &mut bits)?;
//! assert!(written < 8 * text.len() as u64);
//!
//! let decoded = book.decoder().decode_to_string(VecDeque::from(bits))?;
//! assert_eq!(decoded, text);
//! # Ok::<(), huffpack::Error>(())
//! ```
//!
//! ## References
//!
//! - Huffman, D. A. (1952). "A Method for the Construction of Minimum-Redundancy Codes."
//! - Cover, T. M., Thomas, J. A. (2006). "Elements of Information Theory", ch. 5.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bitio;
pub mod code_table;
pub mod error;
pub mod frequency;
pub mod huffman;
pub mod session;
pub mod tree;

/// One unit of the input alphabet.
pub type Symbol = char;

pub use bitio::{BitReader, BitSink, BitSource, BitWriter};
pub use code_table::{CodeTable, Codeword};
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use huffman::{Codebook, HuffmanDecoder, HuffmanEncoder};
pub use session::{CompressReport, DecompressReport, Session};
pub use tree::{HuffmanTree, Node, NodeId};
