use oxizlib::{compress, compress_adaptive, decompress, sizing};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_compress_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
        let packed = compress(&data).unwrap();
        prop_assert_eq!(decompress(&packed).unwrap(), data);
    }

    #[test]
    fn prop_adaptive_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
        let packed = compress_adaptive(&data).unwrap();
        prop_assert_eq!(decompress(&packed).unwrap(), data);
    }

    #[test]
    fn prop_output_never_exceeds_the_worst_case_bound(
        data in proptest::collection::vec(any::<u8>(), 0..4096)
    ) {
        let packed = compress(&data).unwrap();
        prop_assert!(packed.len() <= sizing::worst_case(data.len()));
    }

    #[test]
    fn prop_invalid_leader_always_errors(
        mut data in proptest::collection::vec(any::<u8>(), 1..512)
    ) {
        // A zlib stream must start with compression method 8; method 0
        // guarantees rejection whatever the rest of the bytes say.
        data[0] = 0x00;
        prop_assert!(decompress(&data).is_err());
    }
}
