#![no_main]
use huffpack::{BitReader, BitWriter, Codebook};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (String, Vec<u8>)| {
    let (text, noise) = data;

    let book = Codebook::from_text(&text);
    let mut writer = BitWriter::new(Vec::new());
    if book.encoder().encode_text(&text, &mut writer).is_err() {
        panic!("text must encode with its own codebook");
    }
    let bytes = writer.finish().unwrap();

    let decoded = book
        .decoder()
        .decode_to_string(BitReader::new(bytes.as_slice()))
        .unwrap();
    assert_eq!(text, decoded);

    // Arbitrary bytes may be rejected but must never panic, and never
    // produce a symbol outside the tree.
    let mut out = String::new();
    let _ = book.decoder().decode(BitReader::new(noise.as_slice()), |s| {
        assert!(book.table().get(s).is_some());
        out.push(s);
        Ok(())
    });
});
