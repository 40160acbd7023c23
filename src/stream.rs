// Stream-state boundary toward the deflate codec.
//
// The codec is consumed as an opaque capability: a per-call handle that is
// advanced with finish-mode steps and closed exactly once with `end()`.
// The growth loops are generic over the `Stream` trait so they can be
// driven by scripted stand-ins that force specific status codes.

use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};

use crate::error::CodecError;

use self::StreamStatus::{BufError, DataError, Ok as StatusOk, StreamEnd, StreamError};

/// Window size exponent for both directions: 32 KiB window, zlib wrapper.
/// 16 would select gzip framing instead.
pub const MAX_WINDOW_BITS: u8 = 15;

/// Default compression level. zlib's `Z_DEFAULT_COMPRESSION` resolves to 6.
pub const DEFAULT_LEVEL: u32 = 6;

// ---------------------------------------------------------------------------
// Status codes
// ---------------------------------------------------------------------------

/// Raw status reported by a deflate-family codec.
///
/// The numeric codes mirror zlib's, so diagnostics stay greppable against
/// the codec's own documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamStatus {
    /// Progress was made; more output space may be needed.
    Ok,
    /// The stream completed.
    StreamEnd,
    /// Inconsistent stream state or invalid parameters.
    StreamError,
    /// The input violates the deflate format.
    DataError,
    /// The codec could not allocate internal state.
    MemError,
    /// No forward progress was possible with the buffers provided.
    BufError,
    /// The codec library's version does not match its headers.
    VersionError,
    /// A library-defined code outside the common set.
    Other(i32),
}

impl StreamStatus {
    /// The numeric code embedded in diagnostics.
    pub fn code(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::StreamEnd => 1,
            Self::StreamError => -2,
            Self::DataError => -3,
            Self::MemError => -4,
            Self::BufError => -5,
            Self::VersionError => -6,
            Self::Other(code) => code,
        }
    }
}

// ---------------------------------------------------------------------------
// Stream trait
// ---------------------------------------------------------------------------

/// One pass of compression or decompression stream state.
///
/// A stream is created fresh per call, never pooled or reused. `step`
/// consumes from `input` and appends into `out`'s spare capacity; the
/// caller owns `out` and may grow (and thereby relocate) it between steps.
/// `end` must be invoked exactly once on every exit path, success or
/// failure; implementations backed by RAII handles release their real
/// resources on drop and use `end` to report the codec's final status.
pub trait Stream {
    /// Advance the stream in finish mode.
    fn step(&mut self, input: &[u8], out: &mut Vec<u8>) -> StreamStatus;

    /// Cumulative input bytes consumed across all steps.
    fn bytes_consumed(&self) -> u64;

    /// Cumulative output bytes produced across all steps.
    fn bytes_produced(&self) -> u64;

    /// The codec's own diagnostic for the most recent failing step, if any.
    fn message(&self) -> Option<&str>;

    /// Close the stream and report the codec's final status.
    fn end(&mut self) -> StreamStatus;
}

// ---------------------------------------------------------------------------
// Inflate stream
// ---------------------------------------------------------------------------

/// Decompression stream state over a zlib-wrapped deflate payload.
pub struct ZlibInflate {
    inner: Decompress,
    message: Option<String>,
}

impl ZlibInflate {
    /// Open a decompression stream with a full 32 KiB window.
    ///
    /// Setup cannot fail here: the codec allocates its state through the
    /// global allocator, so no stream handle ever half-exists.
    pub fn new() -> Self {
        Self {
            inner: Decompress::new_with_window_bits(true, MAX_WINDOW_BITS),
            message: None,
        }
    }
}

impl Default for ZlibInflate {
    fn default() -> Self {
        Self::new()
    }
}

impl Stream for ZlibInflate {
    fn step(&mut self, input: &[u8], out: &mut Vec<u8>) -> StreamStatus {
        match self.inner.decompress_vec(input, out, FlushDecompress::Finish) {
            Ok(Status::Ok) => StatusOk,
            Ok(Status::BufError) => BufError,
            Ok(Status::StreamEnd) => StreamEnd,
            Err(err) => {
                self.message = Some(err.to_string());
                DataError
            }
        }
    }

    fn bytes_consumed(&self) -> u64 {
        self.inner.total_in()
    }

    fn bytes_produced(&self) -> u64 {
        self.inner.total_out()
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn end(&mut self) -> StreamStatus {
        // Internal state is released when the handle drops.
        StatusOk
    }
}

// ---------------------------------------------------------------------------
// Deflate stream
// ---------------------------------------------------------------------------

/// Compression stream state producing a zlib-wrapped deflate payload.
#[derive(Debug)]
pub struct ZlibDeflate {
    inner: Compress,
    message: Option<String>,
}

impl ZlibDeflate {
    /// Open a compression stream with the codec's default parameters.
    ///
    /// Levels outside `0..=9` are rejected up front; the fixed-level entry
    /// points can never hit that branch, but parametrized callers can.
    pub fn new(level: u32) -> Result<Self, CodecError> {
        Ok(Self {
            inner: Compress::new(validate_level(level)?, true),
            message: None,
        })
    }

    /// Open a compression stream with explicit format parameters: zlib
    /// wrapper (not gzip), 32 KiB window, the codec's default memory level
    /// and strategy.
    pub fn new_extended(level: u32) -> Result<Self, CodecError> {
        Ok(Self {
            inner: Compress::new_with_window_bits(validate_level(level)?, true, MAX_WINDOW_BITS),
            message: None,
        })
    }
}

fn validate_level(level: u32) -> Result<Compression, CodecError> {
    if level > 9 {
        return Err(CodecError::init(
            StreamError,
            None,
            "bad compression level",
        ));
    }
    Ok(Compression::new(level))
}

impl Stream for ZlibDeflate {
    fn step(&mut self, input: &[u8], out: &mut Vec<u8>) -> StreamStatus {
        match self.inner.compress_vec(input, out, FlushCompress::Finish) {
            Ok(Status::Ok) => StatusOk,
            Ok(Status::BufError) => BufError,
            Ok(Status::StreamEnd) => StreamEnd,
            Err(err) => {
                self.message = Some(err.to_string());
                StreamError
            }
        }
    }

    fn bytes_consumed(&self) -> u64 {
        self.inner.total_in()
    }

    fn bytes_produced(&self) -> u64 {
        self.inner.total_out()
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn end(&mut self) -> StreamStatus {
        StatusOk
    }
}

// ---------------------------------------------------------------------------
// Scripted stand-in for driver tests
// ---------------------------------------------------------------------------


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
