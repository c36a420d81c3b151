//! Chunk stream parser
//!
//! Walks the chunk framing of an Apple-optimized PNG and produces the
//! record sequence the writer rebuilds from: the `CgBI` marker is dropped,
//! consecutive `IDAT` chunks collapse into a single record, and the most
//! recent header dimensions ride along on each pixel-data record.

use crate::{
    chunk::{Chunk, ChunkKind, Dimensions, MAX_CHUNK_LEN, PNG_SIGNATURE},
    error::{Error, Result},
};
use byteorder::{BigEndian, ByteOrder};

/// Parse a complete PNG byte buffer into chunk records
///
/// `data` is the whole source stream including the 8-byte signature.
/// Parsing stops at and includes the `IEND` chunk; bytes after it are
/// ignored. Any framing that runs past the end of the buffer, and a
/// stream that ends without `IEND`, fail with [`Error::CorruptInput`].
pub fn parse_chunks(data: &[u8]) -> Result<Vec<Chunk>> {
    if !data.starts_with(&PNG_SIGNATURE) {
        return Err(Error::CorruptInput("Not a PNG file".into()));
    }

    let mut chunks = Vec::new();
    let mut dims: Option<Dimensions> = None;
    // Accumulates a run of consecutive IDAT chunks into one record
    let mut pixel_run: Option<Chunk> = None;
    let mut cursor = PNG_SIGNATURE.len();

    loop {
        if cursor == data.len() {
            return Err(Error::CorruptInput("Missing IEND chunk".into()));
        }

        let chunk_len = BigEndian::read_u32(take(data, &mut cursor, 4, "chunk length")?);
        if chunk_len > MAX_CHUNK_LEN {
            return Err(Error::CorruptInput(format!(
                "Chunk length too large: {chunk_len}"
            )));
        }

        let mut code = [0u8; 4];
        code.copy_from_slice(take(data, &mut cursor, 4, "chunk type")?);

        let payload = take(data, &mut cursor, chunk_len as usize, "chunk payload")?;
        let crc = BigEndian::read_u32(take(data, &mut cursor, 4, "chunk crc")?);

        let kind = ChunkKind::from_code(code);
        log::trace!("chunk {kind}, {chunk_len} bytes");

        match kind {
            ChunkKind::Vendor => {
                // Apple's marker never reaches the record sequence
                log::debug!("dropping {kind} chunk ({chunk_len} bytes)");
            }
            ChunkKind::Header => {
                flush_pixel_run(&mut chunks, &mut pixel_run);
                dims = Some(decode_header(payload)?);
                chunks.push(Chunk::new(kind, payload.to_vec(), crc));
            }
            ChunkKind::PixelData => match pixel_run.as_mut() {
                Some(run) => run.payload.extend_from_slice(payload),
                // A new run keeps its first chunk's crc and the current dims
                None => pixel_run = Some(Chunk::new(kind, payload.to_vec(), crc).with_dims(dims)),
            },
            ChunkKind::Trailer => {
                flush_pixel_run(&mut chunks, &mut pixel_run);
                chunks.push(Chunk::new(kind, payload.to_vec(), crc));
                break;
            }
            ChunkKind::Other(_) => {
                flush_pixel_run(&mut chunks, &mut pixel_run);
                chunks.push(Chunk::new(kind, payload.to_vec(), crc));
            }
        }
    }

    Ok(chunks)
}

/// Materialize the pending merged pixel-data record, if any
fn flush_pixel_run(chunks: &mut Vec<Chunk>, pixel_run: &mut Option<Chunk>) {
    if let Some(run) = pixel_run.take() {
        log::debug!("merged pixel data: {} bytes", run.payload.len());
        chunks.push(run);
    }
}

/// Decode width and height from an IHDR payload
fn decode_header(payload: &[u8]) -> Result<Dimensions> {
    if payload.len() < 8 {
        return Err(Error::CorruptInput(format!(
            "IHDR payload too short: {} bytes",
            payload.len()
        )));
    }
    let width = BigEndian::read_u32(&payload[0..4]);
    let height = BigEndian::read_u32(&payload[4..8]);
    if width == 0 || height == 0 {
        return Err(Error::CorruptInput(format!(
            "Zero image dimension: {width}x{height}"
        )));
    }
    Ok(Dimensions { width, height })
}

/// Advance the cursor over `len` bytes, failing on a read past the end
fn take<'a>(data: &'a [u8], cursor: &mut usize, len: usize, what: &str) -> Result<&'a [u8]> {
    let start = *cursor;
    let end = start
        .checked_add(len)
        .filter(|&end| end <= data.len())
        .ok_or_else(|| {
            Error::CorruptInput(format!("Truncated stream reading {what} at offset {start}"))
        })?;
    *cursor = end;
    Ok(&data[start..end])
}
