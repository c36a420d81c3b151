//! Chunk stream reconstruction
//!
//! Serializes parsed records back into PNG framing. Pixel data is rebuilt
//! on the way out: the raw-deflate payload Apple ships is decompressed,
//! every pixel's blue and red bytes trade places, and the result is
//! recompressed behind the standard zlib framing a conformant decoder
//! expects. All other chunks are written back exactly as read.

use crate::{
    chunk::{Chunk, ChunkKind, Dimensions},
    error::{Error, Result},
};
use byteorder::{BigEndian, WriteBytesExt};
use flate2::{read::DeflateDecoder, write::ZlibEncoder, Compression};
use std::io::{Read, Write};

/// Serialize chunk records into `out`, which already holds the signature
///
/// Pixel-data records are rebuilt and get a freshly computed checksum;
/// every other record keeps the checksum that was read from the source,
/// valid or not.
pub fn write_chunks(out: &mut Vec<u8>, chunks: &[Chunk]) -> Result<()> {
    for chunk in chunks {
        match chunk.kind {
            ChunkKind::PixelData => {
                let dims = chunk.dims.ok_or_else(|| {
                    Error::CorruptInput("Pixel data without a preceding IHDR".into())
                })?;
                let payload = rebuild_pixel_data(&chunk.payload, dims)?;
                log::debug!(
                    "pixel data rebuilt: {} -> {} bytes",
                    chunk.payload.len(),
                    payload.len()
                );
                let crc = chunk_crc(&chunk.kind.code(), &payload);
                write_chunk(out, &chunk.kind.code(), &payload, crc)?;
            }
            _ => write_chunk(out, &chunk.kind.code(), &chunk.payload, chunk.crc)?,
        }
    }
    Ok(())
}

/// Write one chunk's framing: length, type, payload, crc
fn write_chunk(out: &mut Vec<u8>, code: &[u8; 4], payload: &[u8], crc: u32) -> Result<()> {
    out.write_u32::<BigEndian>(payload.len() as u32)?;
    out.write_all(code)?;
    out.write_all(payload)?;
    out.write_u32::<BigEndian>(crc)?;
    Ok(())
}

/// Decompress, reorder, and recompress a merged pixel-data payload
fn rebuild_pixel_data(payload: &[u8], dims: Dimensions) -> Result<Vec<u8>> {
    let expected = dims.scanline_buffer_len()?;

    // Apple strips the zlib wrapper, leaving a bare deflate stream. Only
    // `expected` decompressed bytes matter even if the stream holds more.
    let mut scanlines = Vec::with_capacity(expected);
    DeflateDecoder::new(payload)
        .take(expected as u64)
        .read_to_end(&mut scanlines)
        .map_err(|e| Error::CorruptInput(format!("Bad deflate stream in pixel data: {e}")))?;
    if scanlines.len() < expected {
        return Err(Error::CorruptInput(format!(
            "Pixel data too short: {} of {} bytes for {dims}",
            scanlines.len(),
            expected
        )));
    }

    let fixed = swap_channels(&scanlines, dims);

    let mut encoder = ZlibEncoder::new(Vec::with_capacity(payload.len()), Compression::default());
    encoder.write_all(&fixed)?;
    Ok(encoder.finish()?)
}

/// Swap each pixel's blue and red bytes, leaving filter bytes untouched
///
/// Builds a fresh buffer: all four source bytes of a pixel are read
/// before any are written.
fn swap_channels(scanlines: &[u8], dims: Dimensions) -> Vec<u8> {
    let stride = 1 + dims.width as usize * 4;
    let mut fixed = Vec::with_capacity(scanlines.len());
    for row in scanlines.chunks_exact(stride) {
        fixed.push(row[0]); // filter byte
        for px in row[1..].chunks_exact(4) {
            let (b, g, r, a) = (px[0], px[1], px[2], px[3]);
            fixed.extend_from_slice(&[r, g, b, a]);
        }
    }
    fixed
}

/// Checksum over the chunk type code followed by the payload
fn chunk_crc(code: &[u8; 4], payload: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(code);
    hasher.update(payload);
    hasher.finalize()
}
