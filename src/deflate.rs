// Whole-buffer compression.
//
// Two strategies over the same finish-mode deflate stream:
//   - `compress` allocates the worst-case bound once and finishes in a
//     single step; the bound holds for any input, so no growth loop exists.
//   - `compress_adaptive` starts from a size-class guess and grows by a
//     fixed input-proportional increment when the codec runs out of room.
// Both shrink the result to the bytes actually produced, trading one
// extra reallocation per call for not holding worst-case capacity.

use log::debug;

use crate::buffer::OutputBuf;
use crate::error::CodecError;
use crate::sizing;
use crate::stream::{DEFAULT_LEVEL, Stream, StreamStatus, ZlibDeflate};

const STEP_CONTEXT: &str = "while compressing data";
const FINISH_CONTEXT: &str = "while finishing compression";

/// Compress an entire buffer at the default level in a single codec step.
///
/// The output buffer is allocated at the worst-case expansion bound and
/// shrunk to the produced size on success.
///
/// # Example
/// ```
/// let packed = oxizlib::compress(b"aaaaaaaaaaaaaaaa").unwrap();
/// assert_eq!(oxizlib::decompress(&packed).unwrap(), b"aaaaaaaaaaaaaaaa");
/// ```
pub fn compress(input: &[u8]) -> Result<Vec<u8>, CodecError> {
    compress_with_level(input, DEFAULT_LEVEL)
}

/// Single-step compression at an explicit level (0..=9).
///
/// An out-of-range level is rejected as a stream-setup failure.
pub fn compress_with_level(input: &[u8], level: u32) -> Result<Vec<u8>, CodecError> {
    let stream = ZlibDeflate::new(level)?;
    compress_with(stream, input, sizing::worst_case(input.len()))
}

/// Compress an entire buffer with a size-class initial allocation.
///
/// Small inputs get the worst-case bound, medium inputs 16 KiB, large
/// inputs one-eighth of their size; the buffer then grows by an
/// input-proportional increment whenever the codec needs more room.
pub fn compress_adaptive(input: &[u8]) -> Result<Vec<u8>, CodecError> {
    let initial = sizing::adaptive_initial(input.len());
    debug!(
        "adaptive compress: {} input bytes, {} byte initial buffer",
        input.len(),
        initial
    );
    let stream = ZlibDeflate::new_extended(DEFAULT_LEVEL)?;
    compress_adaptive_with(stream, input, initial)
}

/// Drive any compression stream over `input` in exactly one step.
///
/// `capacity` must cover the stream's whole output; any status other than
/// stream-end is terminal. `stream.end()` runs exactly once on every path.
pub fn compress_with<S: Stream>(
    mut stream: S,
    input: &[u8],
    capacity: usize,
) -> Result<Vec<u8>, CodecError> {
    let mut out = match OutputBuf::with_capacity(capacity, STEP_CONTEXT) {
        Ok(out) => out,
        Err(err) => {
            stream.end();
            return Err(err);
        }
    };

    let status = stream.step(input, out.vec_mut());
    if status != StreamStatus::StreamEnd {
        let err = CodecError::step_failure(status, stream.message(), STEP_CONTEXT);
        stream.end();
        return Err(err);
    }
    finish(stream, out)
}

/// Drive any compression stream to completion with incremental growth.
///
/// Mirrors the decompression loop, but grows by `input_len / 8` per round
/// instead of doubling: one deflate step cannot produce more output than
/// roughly its input, so a proportional increment converges quickly.
pub fn compress_adaptive_with<S: Stream>(
    mut stream: S,
    input: &[u8],
    initial_capacity: usize,
) -> Result<Vec<u8>, CodecError> {
    let mut out = match OutputBuf::with_capacity(initial_capacity, STEP_CONTEXT) {
        Ok(out) => out,
        Err(err) => {
            stream.end();
            return Err(err);
        }
    };

    loop {
        let consumed = stream.bytes_consumed() as usize;
        match stream.step(&input[consumed..], out.vec_mut()) {
            StreamStatus::StreamEnd => break,
            StreamStatus::BufError if out.remaining() > 0 => {
                let err = CodecError::data(StreamStatus::BufError, stream.message(), STEP_CONTEXT);
                stream.end();
                return Err(err);
            }
            StreamStatus::Ok | StreamStatus::BufError => {
                if let Err(err) = out.grow(sizing::growth_increment(input.len())) {
                    stream.end();
                    return Err(err);
                }
            }
            status => {
                let err = CodecError::step_failure(status, stream.message(), STEP_CONTEXT);
                stream.end();
                return Err(err);
            }
        }
    }
    finish(stream, out)
}

/// Close the stream, then hand over the buffer shrunk to the produced size.
fn finish<S: Stream>(mut stream: S, out: OutputBuf) -> Result<Vec<u8>, CodecError> {
    let produced = stream.bytes_produced();
    let status = stream.end();
    if status != StreamStatus::Ok {
        return Err(CodecError::finalize(status, stream.message(), FINISH_CONTEXT));
    }
    Ok(out.into_trimmed(produced))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
