// Output-buffer sizing policy.
//
// All allocation tuning lives here as named constants and pure functions.
// The values are behavior-preserving: the 16 KiB chunk, the /8 divisor and
// the worst-case expansion bound are kept as-is rather than re-derived.

/// Default output allocation: initial decompression buffer and the
/// medium-size class for adaptive compression (16 KiB).
pub const DEFAULT_CHUNK: usize = 16 * 1024;

/// Divisor for the adaptive initial guess and the growth increment.
///
/// One-eighth of the input is a reasonable starting size for large inputs,
/// which compress well enough in practice that the worst-case bound would
/// badly over-allocate.
pub const ADAPTIVE_DIVISOR: usize = 8;

/// Maximum possible deflate output for `len` input bytes.
///
/// zlib guarantees this bound for any input at any compression level, so a
/// buffer of this size never needs a growth loop.
pub fn worst_case(len: usize) -> usize {
    len + len / 1000 + 13
}

/// Initial allocation for an adaptive compression pass.
///
/// Small inputs take the worst-case bound outright (cheap, and rules out
/// any growth loop), large inputs start at one-eighth of the input, and
/// everything in between starts at [`DEFAULT_CHUNK`].
pub fn adaptive_initial(len: usize) -> usize {
    if len < DEFAULT_CHUNK {
        worst_case(len)
    } else if len / ADAPTIVE_DIVISOR > DEFAULT_CHUNK {
        len / ADAPTIVE_DIVISOR
    } else {
        DEFAULT_CHUNK
    }
}

/// Growth increment for the adaptive compression loop.
///
/// Compression output per step is bounded by the input size, so a fixed
/// input-proportional increment suffices; decompression instead doubles,
/// since its output can expand without bound relative to the input.
pub fn growth_increment(input_len: usize) -> usize {
    input_len / ADAPTIVE_DIVISOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worst_case_covers_empty_input() {
        // An empty zlib stream is 8 bytes (2-byte header, empty final
        // block, 4-byte checksum).
        assert!(worst_case(0) >= 8);
    }

    #[test]
    fn worst_case_is_monotonic() {
        let mut prev = 0;
        for len in [0, 1, 999, 1000, 1001, DEFAULT_CHUNK, 1 << 20] {
            let bound = worst_case(len);
            assert!(bound > len);
            assert!(bound >= prev);
            prev = bound;
        }
    }

    #[test]
    fn size_class_boundaries() {
        // Just below the chunk size: worst-case class.
        assert_eq!(adaptive_initial(DEFAULT_CHUNK - 1), worst_case(DEFAULT_CHUNK - 1));
        // At and just above: medium class.
        assert_eq!(adaptive_initial(DEFAULT_CHUNK), DEFAULT_CHUNK);
        assert_eq!(adaptive_initial(DEFAULT_CHUNK + 1), DEFAULT_CHUNK);
    }

    #[test]
    fn large_class_threshold() {
        let threshold = DEFAULT_CHUNK * ADAPTIVE_DIVISOR;
        // len/8 must strictly exceed DEFAULT_CHUNK to switch classes.
        assert_eq!(adaptive_initial(threshold), DEFAULT_CHUNK);
        assert_eq!(adaptive_initial(threshold + ADAPTIVE_DIVISOR), DEFAULT_CHUNK + 1);
    }

    #[test]
    fn growth_increment_tracks_input() {
        assert_eq!(growth_increment(0), 0);
        assert_eq!(growth_increment(DEFAULT_CHUNK), DEFAULT_CHUNK / 8);
        assert_eq!(growth_increment(1 << 20), 1 << 17);
    }
}
