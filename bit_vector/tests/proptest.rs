// tests/proptest.rs

use bit_vector::{BitVector, ErrorKind, Mode};
use proptest::prelude::*;

//
// -----------------------------------------------------------------------------
// Helper Functions
// -----------------------------------------------------------------------------

fn bit_string(max_len: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![Just('0'), Just('1')], 0..max_len)
        .prop_map(|chars| chars.into_iter().collect())
}

fn stream_from(bits: &[bool]) -> BitVector {
    let mut stream = BitVector::stream();
    for &b in bits {
        stream.append_bit(b).unwrap();
    }
    stream
}

//
// -----------------------------------------------------------------------------
// Array Properties
// -----------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_set_then_get(len in 1usize..512, seed in any::<usize>()) {
        let mut bits = BitVector::array(len).unwrap();
        let idx = seed % len;

        bits.set(idx).unwrap();
        prop_assert!(bits.get(idx).unwrap());
        for i in (0..len).filter(|&i| i != idx) {
            prop_assert!(!bits.get(i).unwrap());
        }

        bits.clear(idx).unwrap();
        prop_assert!(bits.iter().all(|b| !b));
    }
}

proptest! {
    #[test]
    fn prop_single_clear_leaves_others(ref pattern in prop::collection::vec(any::<bool>(), 1..300), seed in any::<usize>()) {
        let mut bits = BitVector::array(pattern.len()).unwrap();
        for (i, &b) in pattern.iter().enumerate() {
            if b {
                bits.set(i).unwrap();
            }
        }

        let idx = seed % pattern.len();
        bits.clear(idx).unwrap();

        for (i, &b) in pattern.iter().enumerate() {
            let expected = if i == idx { false } else { b };
            prop_assert_eq!(bits.get(i).unwrap(), expected);
        }
    }
}

proptest! {
    #[test]
    fn prop_out_of_range_fails(len in 1usize..256, past in 0usize..64) {
        let mut bits = BitVector::array(len).unwrap();
        let idx = len + past;
        prop_assert_eq!(bits.set(idx).unwrap_err().kind(), ErrorKind::InvalidArgument);
        prop_assert_eq!(bits.clear(idx).unwrap_err().kind(), ErrorKind::InvalidArgument);
        prop_assert_eq!(bits.get(idx).unwrap_err().kind(), ErrorKind::InvalidArgument);
    }
}

//
// -----------------------------------------------------------------------------
// Stream Properties
// -----------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_append_length_and_content(ref pattern in prop::collection::vec(any::<bool>(), 0..1000)) {
        let stream = stream_from(pattern);
        prop_assert_eq!(stream.len(), pattern.len());
        prop_assert!(stream.capacity_bits() >= stream.len());
        prop_assert_eq!(stream.iter().collect::<Vec<_>>(), pattern.clone());
    }
}

proptest! {
    #[test]
    fn prop_growth_preserves_bits(ref pattern in prop::collection::vec(any::<bool>(), 1..200), next in any::<bool>()) {
        let mut stream = stream_from(pattern);

        // fill exactly to capacity so the next append must grow
        while stream.len() < stream.capacity_bits() {
            stream.append_bit(stream.len() % 2 == 0).unwrap();
        }
        let before: Vec<bool> = stream.iter().collect();
        let capacity = stream.capacity_bits();

        stream.append_bit(next).unwrap();
        prop_assert_eq!(stream.capacity_bits(), capacity * 2);
        prop_assert_eq!(&stream.iter().take(before.len()).collect::<Vec<_>>(), &before);
        prop_assert_eq!(stream.get(before.len()).unwrap(), next);
    }
}

proptest! {
    #[test]
    fn prop_detach_inverts_append(ref pattern in prop::collection::vec(any::<bool>(), 0..200), bit in any::<bool>()) {
        let mut stream = stream_from(pattern);
        let cursor = stream.cursor();

        stream.append_bit(bit).unwrap();
        prop_assert_eq!(stream.detach_bit().unwrap(), bit);
        prop_assert_eq!(stream.cursor(), cursor);
        prop_assert_eq!(stream.iter().collect::<Vec<_>>(), pattern.clone());
    }
}

proptest! {
    #[test]
    fn prop_self_append_doubles(ref pattern in prop::collection::vec(any::<bool>(), 0..300)) {
        let mut stream = stream_from(pattern);
        stream.append_self(0).unwrap();

        prop_assert_eq!(stream.len(), 2 * pattern.len());
        let expected: Vec<bool> = pattern.iter().chain(pattern.iter()).copied().collect();
        prop_assert_eq!(stream.iter().collect::<Vec<_>>(), expected);
    }
}

proptest! {
    #[test]
    fn prop_append_vector_copies_prefix(
        ref src_bits in prop::collection::vec(any::<bool>(), 0..200),
        max_bits in 0usize..300
    ) {
        let src = stream_from(src_bits);
        let mut dest = BitVector::stream();
        dest.append_vector(&src, max_bits).unwrap();

        let n = if max_bits > 0 { max_bits.min(src_bits.len()) } else { src_bits.len() };
        prop_assert_eq!(dest.iter().collect::<Vec<_>>(), src_bits[..n].to_vec());
    }
}

//
// -----------------------------------------------------------------------------
// Conversion Properties
// -----------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_string_roundtrip(ref s in bit_string(500)) {
        let bits = BitVector::from_bit_str(s).unwrap();
        prop_assert_eq!(bits.mode(), Mode::Stream);
        prop_assert_eq!(&bits.to_bit_string(), s);
    }
}

//
// -----------------------------------------------------------------------------
// Serialization Properties
// -----------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_stream_serialization_roundtrip(
        ref pattern in prop::collection::vec(any::<bool>(), 0..500),
        offset in 0u64..64
    ) {
        let stream = stream_from(pattern);
        let mut sink: Vec<u8> = Vec::new();
        let end = stream.serialize(&mut sink, offset).unwrap();
        prop_assert_eq!(end, offset + 17 + pattern.len().div_ceil(8) as u64);

        let (restored, next) = BitVector::deserialize(&sink, offset).unwrap();
        prop_assert_eq!(next, end);
        prop_assert_eq!(restored.mode(), Mode::Stream);
        prop_assert_eq!(restored.capacity_bits(), stream.capacity_bits());
        prop_assert_eq!(restored.cursor(), stream.cursor());
        prop_assert_eq!(restored, stream);
    }
}

proptest! {
    #[test]
    fn prop_array_serialization_roundtrip(ref pattern in prop::collection::vec(any::<bool>(), 1..500)) {
        let mut bits = BitVector::array(pattern.len()).unwrap();
        for (i, &b) in pattern.iter().enumerate() {
            if b {
                bits.set(i).unwrap();
            }
        }

        let restored = BitVector::from_bytes(&bits.to_bytes().unwrap()).unwrap();
        prop_assert_eq!(restored.mode(), Mode::Array);
        prop_assert_eq!(restored.len(), pattern.len());
        prop_assert_eq!(restored, bits);
    }
}
