//! Oxizlib: whole-buffer zlib compression and decompression.
//!
//! The crate compresses or decompresses an entire in-memory byte buffer in
//! one call, taking care of what zlib leaves to the caller: output-buffer
//! sizing and growth, plus the translation of numeric status codes into
//! stable diagnostic strings.
//!
//! The crate provides:
//! - Single-call entry points (`compress`, `compress_adaptive`, `decompress`)
//! - The codec stream boundary (`stream`)
//! - Output-buffer sizing policy (`sizing`) and growth (`buffer`)
//! - Status-code diagnostics (`error`)
//!
//! # Quick Start
//!
//! ```
//! let data = b"hello hello hello hello";
//! let packed = oxizlib::compress(data).unwrap();
//! let unpacked = oxizlib::decompress(&packed).unwrap();
//! assert_eq!(unpacked, data);
//! ```
//!
//! Every call is independent: stream state and output buffer are owned by
//! the call, so concurrent calls from multiple threads need no coordination.

pub mod buffer;
pub mod deflate;
pub mod error;
pub mod inflate;
pub mod sizing;
pub mod stream;

pub use deflate::{compress, compress_adaptive, compress_with_level};
pub use error::CodecError;
pub use inflate::decompress;
