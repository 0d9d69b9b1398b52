//! Bit-level I/O.
//!
//! The codec only talks to the [`BitSink`] and [`BitSource`] traits. Two
//! families of implementations are provided:
//!
//! - [`BitWriter`] / [`BitReader`] pack bits MSB-first into any
//!   [`Write`] / [`Read`]. Since a stream of bits rarely fills its last
//!   byte, the writer appends one trailer byte holding the number of
//!   meaningful bits (1 to 8) in the preceding data byte. A stream with no
//!   bits at all is the single byte `0`.
//! - `Vec<bool>` and `VecDeque<bool>` for in-memory use.
//!
//! ```text
//! bits:   1 0 1 1 0 0 1 0 1 1
//! bytes:  [1011_0010] [1100_0000] [0000_0010]
//!          data        data+pad    trailer = 2
//! ```

use std::collections::VecDeque;
use std::io::{Bytes, Read, Write};

use crate::error::{Error, Result};

/// Accepts one bit at a time.
pub trait BitSink {
    /// Append one bit.
    fn write_bit(&mut self, bit: bool) -> Result<()>;
}

/// Yields one bit at a time.
pub trait BitSource {
    /// Whether at least one more bit is available.
    fn has_next(&mut self) -> Result<bool>;

    /// Consume and return the next bit.
    ///
    /// # Errors
    /// Returns `Error::UnexpectedEndOfBits` if the source is exhausted.
    fn read_bit(&mut self) -> Result<bool>;
}

impl<S: BitSink + ?Sized> BitSink for &mut S {
    fn write_bit(&mut self, bit: bool) -> Result<()> {
        (**self).write_bit(bit)
    }
}

impl<S: BitSource + ?Sized> BitSource for &mut S {
    fn has_next(&mut self) -> Result<bool> {
        (**self).has_next()
    }

    fn read_bit(&mut self) -> Result<bool> {
        (**self).read_bit()
    }
}

impl BitSink for Vec<bool> {
    fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.push(bit);
        Ok(())
    }
}

impl BitSource for VecDeque<bool> {
    fn has_next(&mut self) -> Result<bool> {
        Ok(!self.is_empty())
    }

    fn read_bit(&mut self) -> Result<bool> {
        self.pop_front().ok_or(Error::UnexpectedEndOfBits)
    }
}

/// Packs bits into bytes written to `W`.
///
/// Call [`finish`](Self::finish) to emit the last partial byte and the
/// trailer; dropping the writer without finishing loses them.
pub struct BitWriter<W: Write> {
    writer: W,
    current_byte: u8,
    bits_in_current: u8,
    bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new BitWriter.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            current_byte: 0,
            bits_in_current: 0,
            bits_written: 0,
        }
    }

    /// Number of bits written so far.
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Pad the final byte, write the trailer, flush, and return the inner writer.
    pub fn finish(mut self) -> Result<W> {
        let trailer = if self.bits_in_current > 0 {
            self.writer.write_all(&[self.current_byte])?;
            self.bits_in_current
        } else if self.bits_written > 0 {
            8
        } else {
            0
        };
        self.writer.write_all(&[trailer])?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> BitSink for BitWriter<W> {
    fn write_bit(&mut self, bit: bool) -> Result<()> {
        if bit {
            self.current_byte |= 1 << (7 - self.bits_in_current);
        }
        self.bits_in_current += 1;
        self.bits_written += 1;

        if self.bits_in_current == 8 {
            self.writer.write_all(&[self.current_byte])?;
            self.current_byte = 0;
            self.bits_in_current = 0;
        }
        Ok(())
    }
}

/// Reads bits written by [`BitWriter`] from `R`.
///
/// Buffers up to three bytes: the data byte about to be read plus two bytes
/// of lookahead, so that the last data byte and its trailer are recognized
/// before any of their bits is handed out.
pub struct BitReader<R: Read> {
    bytes: Bytes<R>,
    lookahead: VecDeque<u8>,
    eof: bool,
    current_byte: u8,
    bits_remaining: u8,
}

impl<R: Read> BitReader<R> {
    /// Create a new BitReader.
    pub fn new(reader: R) -> Self {
        Self {
            bytes: reader.bytes(),
            lookahead: VecDeque::with_capacity(3),
            eof: false,
            current_byte: 0,
            bits_remaining: 0,
        }
    }

    fn fill(&mut self) -> Result<()> {
        while !self.eof && self.lookahead.len() < 3 {
            match self.bytes.next() {
                Some(byte) => self.lookahead.push_back(byte?),
                None => self.eof = true,
            }
        }
        Ok(())
    }

    /// Load the next data byte. Returns false once only the trailer is left.
    fn next_byte(&mut self) -> Result<bool> {
        self.fill()?;
        match self.lookahead.len() {
            0 => Ok(false),
            1 => {
                // A lone byte is the trailer of an empty stream.
                let trailer = self.lookahead[0];
                if trailer != 0 {
                    return Err(Error::InvalidTrailer(trailer));
                }
                self.lookahead.clear();
                Ok(false)
            }
            2 => {
                let trailer = self.lookahead[1];
                if !(1..=8).contains(&trailer) {
                    return Err(Error::InvalidTrailer(trailer));
                }
                self.current_byte = self.lookahead[0];
                self.bits_remaining = trailer;
                self.lookahead.clear();
                Ok(true)
            }
            _ => {
                self.current_byte = self.lookahead.pop_front().unwrap_or_default();
                self.bits_remaining = 8;
                Ok(true)
            }
        }
    }
}

impl<R: Read> BitSource for BitReader<R> {
    fn has_next(&mut self) -> Result<bool> {
        if self.bits_remaining > 0 {
            return Ok(true);
        }
        self.next_byte()
    }

    fn read_bit(&mut self) -> Result<bool> {
        if !self.has_next()? {
            return Err(Error::UnexpectedEndOfBits);
        }
        let bit = self.current_byte & 0x80 != 0;
        self.current_byte <<= 1;
        self.bits_remaining -= 1;
        Ok(bit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pack(bits: &[bool]) -> Vec<u8> {
        let mut writer = BitWriter::new(Vec::new());
        for &b in bits {
            writer.write_bit(b).unwrap();
        }
        writer.finish().unwrap()
    }

    fn unpack(bytes: &[u8]) -> Result<Vec<bool>> {
        let mut reader = BitReader::new(bytes);
        let mut bits: Vec<bool> = Vec::new();
        while reader.has_next()? {
            bits.push(reader.read_bit()?);
        }
        Ok(bits)
    }

    #[test]
    fn test_layout_with_partial_byte() {
        let bits = [true, false, true, true, false, false, true, false, true, true];
        assert_eq!(pack(&bits), vec![0b1011_0010, 0b1100_0000, 2]);
    }

    #[test]
    fn test_bits_written_excludes_padding() {
        let mut writer = BitWriter::new(Vec::new());
        for b in [true, false, true] {
            writer.write_bit(b).unwrap();
        }
        assert_eq!(writer.bits_written(), 3);
        assert_eq!(writer.finish().unwrap(), vec![0b1010_0000, 3]);
    }

    #[test]
    fn test_layout_full_byte() {
        let bits = [true; 8];
        assert_eq!(pack(&bits), vec![0xFF, 8]);
        assert_eq!(unpack(&[0xFF, 8]).unwrap(), bits.to_vec());
    }

    #[test]
    fn test_empty_stream() {
        assert_eq!(pack(&[]), vec![0]);
        assert!(unpack(&[0]).unwrap().is_empty());
        assert!(unpack(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_trailer() {
        assert!(matches!(unpack(&[0xAB, 9]), Err(Error::InvalidTrailer(9))));
        assert!(matches!(unpack(&[0xAB, 0]), Err(Error::InvalidTrailer(0))));
        assert!(matches!(unpack(&[3]), Err(Error::InvalidTrailer(3))));
    }

    #[test]
    fn test_read_past_end() {
        let mut reader = BitReader::new(&[0b1000_0000u8, 1][..]);
        assert!(reader.read_bit().unwrap());
        assert!(!reader.has_next().unwrap());
        assert!(matches!(reader.read_bit(), Err(Error::UnexpectedEndOfBits)));
    }

    #[test]
    fn test_in_memory_source() {
        let mut source: VecDeque<bool> = vec![true, false].into();
        assert!(source.read_bit().unwrap());
        assert!(!source.read_bit().unwrap());
        assert!(matches!(source.read_bit(), Err(Error::UnexpectedEndOfBits)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_writer_reader_agree(bits in prop::collection::vec(any::<bool>(), 0..100)) {
            let bytes = pack(&bits);
            prop_assert_eq!(bytes.len(), (bits.len() + 7) / 8 + 1);
            prop_assert_eq!(unpack(&bytes).unwrap(), bits);
        }
    }
}
