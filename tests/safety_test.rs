//! Safety tests - malformed streams must fail cleanly
//!
//! Every corrupt input ends in `Error::CorruptInput`, never a panic and
//! never a partial output buffer. Deeper coverage comes from fuzzing
//! (`fuzz/fuzz_normalize`).

use uncrush::test_utils::*;
use uncrush::{normalize, Error, MAX_CHUNK_LEN, MAX_PIXEL_BUFFER, PNG_SIGNATURE};

fn assert_corrupt(data: &[u8]) {
    match normalize(data) {
        Err(Error::CorruptInput(_)) => {}
        Err(other) => panic!("expected CorruptInput, got: {other}"),
        Ok(_) => panic!("malformed input converted successfully"),
    }
}

#[test]
fn test_rejects_wrong_signature() {
    assert_corrupt(b"GIF89a not a png");
    assert_corrupt(&[0xFF; 64]);

    let mut png = apple_png(1, 1, &[0, 1, 2, 3, 4]);
    png[7] = 0x0B;
    assert_corrupt(&png);
}

#[test]
fn test_rejects_empty_and_signature_only_input() {
    assert_corrupt(&[]);
    assert_corrupt(&PNG_SIGNATURE[..5]);
    // A bare signature has no IEND chunk
    assert_corrupt(&PNG_SIGNATURE);
}

#[test]
fn test_rejects_every_truncation_point() {
    let whole = apple_png_split_idat(2, 2, &[0, 1, 2, 3, 4, 5, 6, 7, 8, 0, 9, 8, 7, 6, 5, 4, 3, 2], 2);

    // Cuts mid-length, mid-type, mid-payload, and mid-crc all land here
    for end in 0..whole.len() {
        assert_corrupt(&whole[..end]);
    }
}

#[test]
fn test_rejects_missing_trailer() {
    let mut png = PNG_SIGNATURE.to_vec();
    png.extend_from_slice(&chunk(b"IHDR", &header_payload(1, 1)));
    png.extend_from_slice(&chunk(b"IDAT", &deflate_raw(&[0, 1, 2, 3, 4])));
    assert_corrupt(&png);
}

#[test]
fn test_rejects_declared_length_over_the_cap() {
    let mut png = PNG_SIGNATURE.to_vec();
    png.extend_from_slice(&(MAX_CHUNK_LEN + 1).to_be_bytes());
    png.extend_from_slice(b"IDAT");
    png.extend_from_slice(&[0; 16]);
    assert_corrupt(&png);
}

#[test]
fn test_rejects_declared_length_past_the_buffer() {
    let mut png = PNG_SIGNATURE.to_vec();
    png.extend_from_slice(&1000u32.to_be_bytes());
    png.extend_from_slice(b"tEXt");
    png.extend_from_slice(&[0; 20]);
    assert_corrupt(&png);
}

#[test]
fn test_rejects_pixel_data_before_any_header() {
    let mut png = PNG_SIGNATURE.to_vec();
    png.extend_from_slice(&chunk(b"IDAT", &deflate_raw(&[0, 1, 2, 3, 4])));
    png.extend_from_slice(&chunk(b"IEND", &[]));
    assert_corrupt(&png);
}

#[test]
fn test_rejects_zero_dimensions() {
    assert_corrupt(&apple_png(0, 1, &[]));
    assert_corrupt(&apple_png(1, 0, &[]));
}

#[test]
fn test_rejects_forged_huge_dimensions() {
    // Would be a 16 TB scanline buffer; must fail before allocating
    assert_corrupt(&apple_png(u32::MAX, u32::MAX, &[0; 32]));
    assert_corrupt(&apple_png(1 << 20, 1 << 20, &[0; 32]));
}

#[test]
fn test_rejects_garbage_pixel_stream() {
    let mut png = PNG_SIGNATURE.to_vec();
    png.extend_from_slice(&chunk(b"IHDR", &header_payload(1, 1)));
    png.extend_from_slice(&chunk(b"IDAT", &[0xFF; 24]));
    png.extend_from_slice(&chunk(b"IEND", &[]));
    assert_corrupt(&png);
}

#[test]
fn test_rejects_short_decompressed_pixel_stream() {
    // 2x2 needs 18 scanline bytes, the stream only holds 4
    let mut png = PNG_SIGNATURE.to_vec();
    png.extend_from_slice(&chunk(b"IHDR", &header_payload(2, 2)));
    png.extend_from_slice(&chunk(b"IDAT", &deflate_raw(&[0, 1, 2, 3])));
    png.extend_from_slice(&chunk(b"IEND", &[]));
    assert_corrupt(&png);
}

#[test]
fn test_rejects_empty_pixel_chunk_for_nonempty_image() {
    let mut png = PNG_SIGNATURE.to_vec();
    png.extend_from_slice(&chunk(b"IHDR", &header_payload(1, 1)));
    png.extend_from_slice(&chunk(b"IDAT", &[]));
    png.extend_from_slice(&chunk(b"IEND", &[]));
    assert_corrupt(&png);
}

#[test]
fn test_limit_constants() {
    // The PNG chunk length limit of 2^31 - 1
    assert_eq!(MAX_CHUNK_LEN, 0x7FFF_FFFF);

    // Large enough for real artwork, small enough to stop forged headers
    assert!(MAX_PIXEL_BUFFER >= 256 * 1024 * 1024);
    assert!(MAX_PIXEL_BUFFER <= 2 * 1024 * 1024 * 1024);
}
