//! Chunk types and the parsed-stream model

use crate::error::{Error, Result};

/// The 8-byte signature every PNG stream starts with
pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Maximum declared chunk length (the PNG limit of 2^31 - 1)
///
/// Lengths above this cannot appear in a conformant stream; treating them
/// as corrupt also prevents malicious files from requesting multi-GB
/// allocations before the payload bounds check runs.
pub const MAX_CHUNK_LEN: u32 = 0x7FFF_FFFF;

/// Maximum decompressed pixel buffer size (1 GB)
///
/// Apple-optimized images are app artwork and screenshots, far below this.
/// The cap keeps a forged header from turning into a huge allocation.
pub const MAX_PIXEL_BUFFER: usize = 1024 * 1024 * 1024;

/// Image dimensions decoded from the header chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Dimensions {
    /// Size of the decompressed scanline buffer: one filter byte plus
    /// four bytes per pixel for each row
    ///
    /// Fails if the product overflows or exceeds [`MAX_PIXEL_BUFFER`].
    pub fn scanline_buffer_len(&self) -> Result<usize> {
        let row = (self.width as usize)
            .checked_mul(4)
            .and_then(|n| n.checked_add(1));
        let total = row.and_then(|row| row.checked_mul(self.height as usize));
        match total {
            Some(total) if total <= MAX_PIXEL_BUFFER => Ok(total),
            _ => Err(Error::CorruptInput(format!(
                "Image dimensions too large: {}x{}",
                self.width, self.height
            ))),
        }
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Classification of a chunk by its 4-byte type code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkKind {
    /// `IHDR`: image dimensions and pixel layout
    Header,
    /// `IDAT`: the compressed scanline data
    PixelData,
    /// `CgBI`: Apple's proprietary marker chunk
    Vendor,
    /// `IEND`: end of stream
    Trailer,
    /// Any chunk this tool does not interpret, carried through untouched
    Other([u8; 4]),
}

impl ChunkKind {
    /// Classify a 4-byte type code
    pub fn from_code(code: [u8; 4]) -> Self {
        match &code {
            b"IHDR" => Self::Header,
            b"IDAT" => Self::PixelData,
            b"CgBI" => Self::Vendor,
            b"IEND" => Self::Trailer,
            _ => Self::Other(code),
        }
    }

    /// The 4-byte type code written into the stream
    pub fn code(&self) -> [u8; 4] {
        match self {
            Self::Header => *b"IHDR",
            Self::PixelData => *b"IDAT",
            Self::Vendor => *b"CgBI",
            Self::Trailer => *b"IEND",
            Self::Other(code) => *code,
        }
    }
}

impl std::fmt::Display for ChunkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for &b in self.code().iter() {
            let c = if b.is_ascii_graphic() { b as char } else { '?' };
            std::fmt::Write::write_char(f, c)?;
        }
        Ok(())
    }
}

/// One parsed chunk
///
/// The framed length is `payload.len()`; merged pixel-data records own the
/// concatenated payload of every chunk in their run. `crc` is the checksum
/// read from the stream (the first chunk's value for a merged record) and
/// is recomputed only for pixel data when the stream is rebuilt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Chunk classification
    pub kind: ChunkKind,
    /// Payload bytes, without the length/type/crc framing
    pub payload: Vec<u8>,
    /// Checksum as read from the stream
    pub crc: u32,
    /// Header dimensions carried forward onto pixel-data records
    pub dims: Option<Dimensions>,
}

impl Chunk {
    /// Create a chunk record
    pub fn new(kind: ChunkKind, payload: Vec<u8>, crc: u32) -> Self {
        Self {
            kind,
            payload,
            crc,
            dims: None,
        }
    }

    /// Attach header dimensions (pixel-data records only)
    pub fn with_dims(mut self, dims: Option<Dimensions>) -> Self {
        self.dims = dims;
        self
    }
}
