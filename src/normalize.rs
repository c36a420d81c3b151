//! Top-level buffer-to-buffer conversion

use crate::{chunk::PNG_SIGNATURE, error::Result, parser::parse_chunks, writer::write_chunks};

/// Convert an Apple-optimized PNG buffer into a standards-conformant one
///
/// The `CgBI` marker chunk is removed, split `IDAT` chunks are merged,
/// and the pixel data is decompressed from its bare deflate stream,
/// reordered from BGRA to RGBA, and recompressed with zlib framing.
/// Every other chunk passes through byte for byte.
///
/// On any failure nothing is produced; the source buffer is never
/// modified.
///
/// # Example
///
/// ```
/// let src = uncrush::test_utils::apple_png(1, 1, &[0, 10, 20, 30, 40]);
/// let out = uncrush::normalize(&src).unwrap();
/// assert!(out.starts_with(&uncrush::PNG_SIGNATURE));
/// assert!(!uncrush::is_apple_png(&out));
/// ```
pub fn normalize(data: &[u8]) -> Result<Vec<u8>> {
    let chunks = parse_chunks(data)?;
    let mut out = Vec::with_capacity(data.len());
    out.extend_from_slice(&PNG_SIGNATURE);
    write_chunks(&mut out, &chunks)?;
    Ok(out)
}

/// Quick check for the Apple-optimized layout
///
/// True when the PNG signature is present and the first chunk is Apple's
/// `CgBI` marker, the layout Apple's optimizer emits. [`normalize`] does
/// not require this; the check exists for callers deciding whether a
/// file needs converting at all.
pub fn is_apple_png(data: &[u8]) -> bool {
    data.len() >= 16 && data.starts_with(&PNG_SIGNATURE) && &data[12..16] == b"CgBI"
}
