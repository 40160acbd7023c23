// Whole-buffer decompression.
//
// One inflate pass over the entire input, doubling the output buffer
// whenever the codec exhausts it.  Doubling keeps the reallocation count
// logarithmic in the final output size no matter how far the 16 KiB
// initial guess undershoots.

use crate::buffer::OutputBuf;
use crate::error::CodecError;
use crate::sizing;
use crate::stream::{Stream, StreamStatus, ZlibInflate};

const CONTEXT: &str = "while decompressing data";

/// Decompress an entire zlib-wrapped deflate buffer.
///
/// Starts from a 16 KiB output buffer and doubles it as needed. The
/// returned Vec's length is the number of bytes the codec produced; its
/// capacity may be larger.
///
/// # Example
/// ```
/// let packed = oxizlib::compress(b"some payload").unwrap();
/// assert_eq!(oxizlib::decompress(&packed).unwrap(), b"some payload");
/// ```
pub fn decompress(input: &[u8]) -> Result<Vec<u8>, CodecError> {
    decompress_with(ZlibInflate::new(), input, sizing::DEFAULT_CHUNK)
}

/// Drive any decompression stream to completion over `input`.
///
/// Generic over the codec handle; `initial_capacity` seeds the doubling
/// growth loop. `stream.end()` is invoked exactly once on every exit path.
pub fn decompress_with<S: Stream>(
    mut stream: S,
    input: &[u8],
    initial_capacity: usize,
) -> Result<Vec<u8>, CodecError> {
    let mut out = match OutputBuf::with_capacity(initial_capacity, CONTEXT) {
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
                // Output room was left over, so the codec is not asking for
                // space: the stream itself cannot make progress.
                let err = CodecError::data(StreamStatus::BufError, stream.message(), CONTEXT);
                stream.end();
                return Err(err);
            }
            StreamStatus::Ok | StreamStatus::BufError => {
                if let Err(err) = out.grow_double() {
                    stream.end();
                    return Err(err);
                }
            }
            status => {
                let err = CodecError::step_failure(status, stream.message(), CONTEXT);
                stream.end();
                return Err(err);
            }
        }
    }

    // A failing close is terminal even though the payload inflated fully.
    let produced = stream.bytes_produced();
    let status = stream.end();
    if status != StreamStatus::Ok {
        return Err(CodecError::finalize(status, stream.message(), CONTEXT));
    }
    Ok(out.into_vec(produced))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::StreamStatus::{
        BufError, DataError, MemError, Ok as StatusOk, StreamEnd, StreamError, VersionError,
    };
    use crate::stream::scripted::ScriptedStream;

    const FILL: usize = usize::MAX;

    #[test]
    fn doubles_until_the_stream_ends() {
        // Fill 4, grow to 8, fill the remaining 4, grow to 16, finish with 2.
        let stream = ScriptedStream::new(
            vec![(FILL, StatusOk), (FILL, StatusOk), (2, StreamEnd)],
            StatusOk,
        );
        let ends = stream.end_counter();
        let out = decompress_with(stream, b"input", 4).unwrap();
        assert_eq!(out.len(), 10);
        assert_eq!(ends.get(), 1);
    }

    #[test]
    fn buf_error_with_room_left_is_corruption() {
        let stream = ScriptedStream::new(vec![(0, BufError)], StatusOk);
        let ends = stream.end_counter();
        let err = decompress_with(stream, b"input", 8).unwrap_err();
        assert!(matches!(err, CodecError::Data(_)));
        assert_eq!(
            err.to_string(),
            "Error -5 while decompressing data: incomplete or truncated stream"
        );
        assert_eq!(ends.get(), 1);
    }

    #[test]
    fn codec_message_wins_over_the_table() {
        let stream =
            ScriptedStream::new(vec![(0, DataError)], StatusOk).with_message("scripted corruption");
        let err = decompress_with(stream, b"input", 8).unwrap_err();
        assert!(matches!(err, CodecError::Data(_)));
        assert_eq!(
            err.to_string(),
            "Error -3 while decompressing data: scripted corruption"
        );
    }

    #[test]
    fn unclassified_status_is_terminal() {
        let stream = ScriptedStream::new(vec![(0, MemError)], StatusOk);
        let ends = stream.end_counter();
        let err = decompress_with(stream, b"input", 8).unwrap_err();
        assert!(matches!(err, CodecError::Codec(_)));
        assert_eq!(err.to_string(), "Error: -4 while decompressing data");
        assert_eq!(ends.get(), 1);
    }

    #[test]
    fn version_mismatch_has_the_fixed_message() {
        let stream = ScriptedStream::new(vec![(0, VersionError)], StatusOk);
        let err = decompress_with(stream, b"input", 8).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error -6 while decompressing data: library version mismatch"
        );
    }

    #[test]
    fn failing_close_overrides_success() {
        let stream = ScriptedStream::new(vec![(3, StreamEnd)], StreamError);
        let ends = stream.end_counter();
        let err = decompress_with(stream, b"input", 8).unwrap_err();
        assert!(matches!(err, CodecError::Finalize(_)));
        assert!(err.to_string().contains("inconsistent stream state"));
        assert_eq!(ends.get(), 1);
    }

    #[test]
    fn initial_allocation_failure_still_closes_the_stream() {
        let stream = ScriptedStream::new(vec![], StatusOk);
        let ends = stream.end_counter();
        let err = decompress_with(stream, b"input", usize::MAX).unwrap_err();
        assert!(matches!(err, CodecError::Alloc(_)));
        assert_eq!(err.to_string(), "Error: -4 while decompressing data");
        assert_eq!(ends.get(), 1);
    }
}
