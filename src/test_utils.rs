//! Test utilities: synthetic PNG streams
//!
//! Every test builds its input in memory from these helpers; no fixture
//! binaries are committed. The builders produce the exact layout Apple's
//! optimizer emits: a `CgBI` chunk ahead of `IHDR` and pixel data
//! compressed as a bare deflate stream.
//!
//! # Usage
//!
//! ```
//! use uncrush::test_utils::*;
//!
//! let png = apple_png(2, 1, &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
//! assert!(uncrush::is_apple_png(&png));
//! ```

use crate::chunk::PNG_SIGNATURE;
use flate2::{read::ZlibDecoder, write::DeflateEncoder, Compression};
use std::io::{Read, Write};

/// Payload of the `CgBI` chunk as produced by Apple's optimizer
pub const CGBI_PAYLOAD: [u8; 4] = [0x50, 0x00, 0x20, 0x02];

/// Frame one chunk: length, type, payload, and a correct crc
pub fn chunk(code: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(code);
    hasher.update(payload);
    let crc = hasher.finalize();

    let mut out = Vec::with_capacity(12 + payload.len());
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(code);
    out.extend_from_slice(payload);
    out.extend_from_slice(&crc.to_be_bytes());
    out
}

/// A 13-byte IHDR payload: 8-bit depth, truecolor with alpha, no interlace
pub fn header_payload(width: u32, height: u32) -> Vec<u8> {
    let mut payload = Vec::with_capacity(13);
    payload.extend_from_slice(&width.to_be_bytes());
    payload.extend_from_slice(&height.to_be_bytes());
    payload.extend_from_slice(&[8, 6, 0, 0, 0]);
    payload
}

/// Compress as a bare deflate stream, no zlib wrapper
pub fn deflate_raw(data: &[u8]) -> Vec<u8> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).expect("deflate into memory");
    encoder.finish().expect("deflate into memory")
}

/// Decode a zlib-framed stream, panicking on malformed input
pub fn inflate_zlib(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    ZlibDecoder::new(data)
        .read_to_end(&mut out)
        .expect("zlib-framed stream");
    out
}

/// Concatenated payload bytes of every `IDAT` chunk in a framed stream
///
/// Walks the raw framing directly; `png` must be well formed.
pub fn idat_payload(png: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut at = PNG_SIGNATURE.len();
    while at + 12 <= png.len() {
        let len = u32::from_be_bytes(png[at..at + 4].try_into().expect("chunk length")) as usize;
        if &png[at + 4..at + 8] == b"IDAT" {
            out.extend_from_slice(&png[at + 8..at + 8 + len]);
        }
        at += 12 + len;
    }
    out
}

/// A complete Apple-optimized stream: signature, `CgBI`, `IHDR`, one
/// `IDAT` holding the raw-deflated scanlines, `IEND`
pub fn apple_png(width: u32, height: u32, scanlines: &[u8]) -> Vec<u8> {
    apple_png_split_idat(width, height, scanlines, 1)
}

/// Same stream with the compressed pixel data split across `pieces`
/// consecutive `IDAT` chunks
pub fn apple_png_split_idat(width: u32, height: u32, scanlines: &[u8], pieces: usize) -> Vec<u8> {
    let compressed = deflate_raw(scanlines);
    let piece_len = compressed.len().div_ceil(pieces.max(1)).max(1);

    let mut out = PNG_SIGNATURE.to_vec();
    out.extend_from_slice(&chunk(b"CgBI", &CGBI_PAYLOAD));
    out.extend_from_slice(&chunk(b"IHDR", &header_payload(width, height)));
    for piece in compressed.chunks(piece_len) {
        out.extend_from_slice(&chunk(b"IDAT", piece));
    }
    out.extend_from_slice(&chunk(b"IEND", &[]));
    out
}

/// The same layout without the `CgBI` marker
pub fn apple_png_without_marker(width: u32, height: u32, scanlines: &[u8]) -> Vec<u8> {
    let mut out = PNG_SIGNATURE.to_vec();
    out.extend_from_slice(&chunk(b"IHDR", &header_payload(width, height)));
    out.extend_from_slice(&chunk(b"IDAT", &deflate_raw(scanlines)));
    out.extend_from_slice(&chunk(b"IEND", &[]));
    out
}
