use std::collections::VecDeque;

use huffpack::{BitReader, BitWriter, Codebook, HuffmanDecoder};
use proptest::prelude::*;

fn through_bytes(book: &Codebook, text: &str) -> (u64, String) {
    let mut writer = BitWriter::new(Vec::new());
    let written = book.encoder().encode_text(text, &mut writer).unwrap();
    let bytes = writer.finish().unwrap();

    let decoded = book
        .decoder()
        .decode_to_string(BitReader::new(bytes.as_slice()))
        .unwrap();
    (written, decoded)
}

#[test]
fn test_roundtrip_through_bytes_every_length() {
    // Covers every position of the last data byte and the full-byte trailer.
    let alphabet = "abcdefgh";
    for len in 0..40 {
        let text: String = alphabet.chars().cycle().take(len).collect();
        let book = Codebook::from_text(&text);
        let (written, decoded) = through_bytes(&book, &text);
        assert_eq!(written, book.encoded_bits());
        assert_eq!(decoded, text);
    }
}

#[test]
fn test_arbitrary_byte_triples_never_panic() {
    let book = Codebook::from_text("hello world");
    for a in 0..=255u8 {
        for b in 0..=255u8 {
            let bytes = [a, b, a];
            let result = book.decoder().decode(BitReader::new(&bytes[..]), |s| {
                assert!(book.table().get(s).is_some());
                Ok(())
            });
            // Only the trailer byte decides whether the framing is valid.
            assert_eq!(result.is_ok(), (1..=8).contains(&a));
        }
    }
}

proptest! {
    #[test]
    fn test_huffman_roundtrip_through_bytes(text in "\\PC{0,500}") {
        let book = Codebook::from_text(&text);
        let (written, decoded) = through_bytes(&book, &text);
        prop_assert_eq!(written, book.encoded_bits());
        prop_assert_eq!(decoded, text);
    }

    #[test]
    fn test_singleton_alphabet(c in any::<char>(), n in 1usize..200) {
        let text: String = std::iter::repeat(c).take(n).collect();
        let book = Codebook::from_text(&text);
        let (written, decoded) = through_bytes(&book, &text);
        prop_assert_eq!(written, n as u64);
        prop_assert_eq!(decoded, text);
    }

    #[test]
    fn test_no_tree_decodes_nothing(bits in prop::collection::vec(any::<bool>(), 0..64)) {
        let decoded = HuffmanDecoder::new(None)
            .decode_to_string(VecDeque::from(bits))
            .unwrap();
        prop_assert!(decoded.is_empty());
    }

    #[test]
    fn test_arbitrary_bits_decode_only_known_symbols(
        bits in prop::collection::vec(any::<bool>(), 0..256),
    ) {
        let book = Codebook::from_text("AAAAAAAAAAAAAABBBCCCCCCCCDDEEEEEE");
        let mut emitted = Vec::new();
        book.decoder()
            .decode(VecDeque::from(bits), |s| {
                emitted.push(s);
                Ok(())
            })
            .unwrap();
        for s in emitted {
            prop_assert!(book.table().get(s).is_some());
        }
    }
}
