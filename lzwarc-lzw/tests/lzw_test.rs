//! Comprehensive LZW integration tests.

use lzwarc_core::{BitReader, StreamKind};
use lzwarc_lzw::{
    CodecEvent, LzwConfig, LzwDecoder, LzwEncoder, compress, decompress, encode,
};
use std::io::Cursor;

/// Fixed-seed linear congruential generator: incompressible but reproducible.
fn random_bytes(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut seed: u64 = 0x123456789ABCDEF0;
    for _ in 0..size {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        data.push((seed >> 32) as u8);
    }
    data
}

fn text_like(size: usize) -> Vec<u8> {
    let text = b"The quick brown fox jumps over the lazy dog. \
                 Pack my box with five dozen liquor jugs. \
                 How vexingly quick daft zebras jump! ";
    text.iter().copied().cycle().take(size).collect()
}

fn roundtrip(original: &[u8], config: LzwConfig) {
    let compressed = compress(original, config).expect("compression failed");
    let decompressed =
        decompress(&compressed, original.len(), config).expect("decompression failed");
    assert_eq!(decompressed.len(), original.len(), "length mismatch");
    assert_eq!(decompressed, original, "data mismatch");
}

#[test]
fn test_lzw_roundtrip_simple() {
    roundtrip(b"TOBEORNOTTOBEORTOBEORNOT", LzwConfig::DEFAULT);
}

#[test]
fn test_lzw_roundtrip_310_bytes() {
    let original = b"This is a test of compression! ".repeat(10);
    assert_eq!(original.len(), 310);
    roundtrip(&original, LzwConfig::DEFAULT);
}

#[test]
fn test_lzw_roundtrip_every_config() {
    let inputs = [
        text_like(20_000),
        random_bytes(5_000),
        vec![0u8; 20_000],
        (0..20_000u32).map(|i| (i % 7) as u8).collect(),
    ];
    let configs = [
        LzwConfig::DEFAULT,
        LzwConfig::WIDE,
        LzwConfig::COMPACT,
        LzwConfig::new(9, 9),
        LzwConfig::new(9, 10),
        LzwConfig::new(9, 12).with_prune_threshold(3),
    ];
    for config in configs {
        for input in &inputs {
            roundtrip(input, config);
        }
    }
}

#[test]
fn test_lzw_empty_input() {
    // The LZW stream of an empty input is just its prefix.
    let encoded = encode(b"", LzwConfig::DEFAULT).unwrap();
    assert_eq!(encoded.data, vec![StreamKind::LZW_PREFIX]);
    assert!(!encoded.outcome.beneficial);

    // Decoding zero bytes never reaches for a code.
    let decoder = LzwDecoder::new(LzwConfig::DEFAULT).unwrap();
    let mut output = Vec::new();
    let outcome = decoder
        .decode_stream(encoded.data.as_slice(), &mut output, 0)
        .unwrap();
    assert_eq!(outcome.kind, StreamKind::Lzw);
    assert_eq!(outcome.bytes_written, 0);
    assert!(output.is_empty());

    roundtrip(b"", LzwConfig::DEFAULT);
}

#[test]
fn test_lzw_run_of_ten_a() {
    let original = b"AAAAAAAAAA";
    let encoded = encode(original, LzwConfig::DEFAULT).unwrap();

    let mut reader = BitReader::new(Cursor::new(&encoded.data));
    assert_eq!(
        StreamKind::read_from(&mut reader).unwrap(),
        StreamKind::Lzw
    );
    let mut codes = Vec::new();
    while let Some(code) = reader.get_bits(9).unwrap() {
        codes.push(code);
    }
    // "A", then the new entries "AA", "AAA", "AAAA" from 257 upwards; the
    // last one is the match still in progress when the input ends.
    assert_eq!(codes, vec![u32::from(b'A') + 1, 257, 258, 259]);

    let decompressed = decompress(&encoded.data, original.len(), LzwConfig::DEFAULT).unwrap();
    assert_eq!(decompressed, original);
}

#[test]
fn test_lzw_raw_path_roundtrips() {
    let original = random_bytes(4096);
    let encoded = encode(&original, LzwConfig::DEFAULT).unwrap();
    assert!(!encoded.outcome.beneficial);
    assert!(encoded.outcome.bytes_written > encoded.outcome.bytes_read);

    // The discarded LZW stream still decodes.
    let decompressed = decompress(&encoded.data, original.len(), LzwConfig::DEFAULT).unwrap();
    assert_eq!(decompressed, original);

    // compress() picks the raw stream instead.
    let compressed = compress(&original, LzwConfig::DEFAULT).unwrap();
    assert_eq!(compressed[0], StreamKind::RAW_PREFIX);
    assert_eq!(compressed.len(), original.len() + 1);
    assert_eq!(&compressed[1..], &original[..]);
    roundtrip(&original, LzwConfig::DEFAULT);
}

#[test]
fn test_lzw_bytes_written_matches_stream() {
    for input in [text_like(3_000), random_bytes(3_000), vec![b'z'; 3_000]] {
        let encoded = encode(&input, LzwConfig::DEFAULT).unwrap();
        assert_eq!(encoded.outcome.bytes_written, encoded.data.len() as u64);
        assert_eq!(encoded.outcome.bytes_read, input.len() as u64);
        assert_eq!(
            encoded.outcome.beneficial,
            encoded.data.len() <= input.len()
        );
    }
}

#[test]
fn test_lzw_width_change_in_lockstep() {
    let original = text_like(8_000);
    let config = LzwConfig::DEFAULT;

    let encoder = LzwEncoder::new(config).unwrap();
    let encoded = encoder.encode(&original).unwrap();
    let first_growth = encoded
        .outcome
        .events
        .iter()
        .find_map(|event| match *event {
            CodecEvent::Grew { offset, bits } => Some((offset, bits)),
            CodecEvent::Pruned { .. } => None,
        })
        .expect("input should outgrow 9-bit codes");
    assert_eq!(first_growth.1, 10);
    assert!(first_growth.0 > 0 && first_growth.0 < original.len() as u64);

    let decoder = LzwDecoder::new(config).unwrap();
    let mut output = Vec::new();
    let decoded = decoder
        .decode_stream(encoded.data.as_slice(), &mut output, original.len() as u64)
        .unwrap();
    assert_eq!(output, original);
    assert_eq!(decoded.events, encoded.outcome.events);
    assert_eq!(decoded.bytes_read, encoded.data.len() as u64);
}

#[test]
fn test_lzw_width_grows_monotonically_without_pruning() {
    let encoded = encode(&random_bytes(30_000), LzwConfig::WIDE).unwrap();
    let mut last = 9;
    for event in &encoded.outcome.events {
        match *event {
            CodecEvent::Grew { bits, .. } => {
                assert_eq!(bits, last + 1);
                last = bits;
            }
            CodecEvent::Pruned { .. } => panic!("WIDE should not prune on 30 KB"),
        }
    }
    assert!(last >= 14);
}

#[test]
fn test_lzw_reused_codec_instances() {
    let config = LzwConfig::COMPACT;
    let encoder = LzwEncoder::new(config).unwrap();
    let decoder = LzwDecoder::new(config).unwrap();
    for size in [0usize, 1, 17, 4_000, 12_000] {
        let original = text_like(size);
        let encoded = encoder.encode(&original).unwrap();
        let decompressed = decoder.decode(&encoded.data, original.len()).unwrap();
        assert_eq!(decompressed, original);
    }
}

#[test]
fn test_lzw_concurrent_streams_are_independent() {
    let handles: Vec<_> = (0..4u8)
        .map(|n| {
            std::thread::spawn(move || {
                let original: Vec<u8> = text_like(10_000)
                    .into_iter()
                    .map(|b| b.wrapping_add(n))
                    .collect();
                let compressed = compress(&original, LzwConfig::COMPACT).unwrap();
                let decompressed =
                    decompress(&compressed, original.len(), LzwConfig::COMPACT).unwrap();
                decompressed == original
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn test_lzw_compresses_text() {
    let original = text_like(50_000);
    let compressed = compress(&original, LzwConfig::DEFAULT).unwrap();
    assert_eq!(compressed[0], StreamKind::LZW_PREFIX);
    assert!(
        compressed.len() < original.len() / 4,
        "text should compress to under 25%, got {} bytes",
        compressed.len()
    );
}
