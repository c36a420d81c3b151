//! Convert Apple-optimized PNGs back into standards-conformant PNGs.
//!
//! The iOS build pipeline rewrites every PNG in an app bundle. A
//! proprietary `CgBI` chunk appears ahead of `IHDR`, the `IDAT` payload
//! loses its zlib framing so only a bare deflate stream remains, and
//! pixels are stored in BGRA byte order with premultiplied alpha. Stock
//! decoders reject these files.
//!
//! [`normalize`] rewrites such a buffer at the chunk level:
//!
//! - drops the `CgBI` marker
//! - merges consecutive `IDAT` chunks into one
//! - decompresses the bare deflate stream, swaps each pixel's blue and
//!   red bytes, and recompresses with standard zlib framing
//! - recomputes the `IDAT` checksum; every other chunk passes through
//!   byte for byte, stored checksum included
//!
//! The alpha channel stays premultiplied and filtered scanlines stay
//! filtered; the rewrite never decodes the image.
//!
//! # Quick Start
//!
//! ```
//! use uncrush::normalize;
//!
//! # fn main() -> uncrush::Result<()> {
//! let source = uncrush::test_utils::apple_png(1, 1, &[0, 1, 2, 3, 4]);
//! let standard = normalize(&source)?;
//! assert!(standard.starts_with(&uncrush::PNG_SIGNATURE));
//! assert!(!uncrush::is_apple_png(&standard));
//! # Ok(())
//! # }
//! ```
//!
//! # Working with files
//!
//! [`convert_file`] converts one path to another; [`convert_tree`] walks
//! a directory, converting every `.png` it finds next to its source. The
//! `uncrush` binary (feature `cli`, on by default) wraps both.

mod chunk;
mod error;
pub mod files;
mod normalize;
mod parser;
mod writer;

pub use chunk::{Chunk, ChunkKind, Dimensions, MAX_CHUNK_LEN, MAX_PIXEL_BUFFER, PNG_SIGNATURE};
pub use error::{Error, Result};
pub use files::{convert_file, convert_tree, TreeSummary};
pub use normalize::{is_apple_png, normalize};
pub use parser::parse_chunks;
pub use writer::write_chunks;

// Test utilities - only compiled for tests or when explicitly enabled
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
