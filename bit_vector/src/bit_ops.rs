use crate::index::BitIndex;

/// Number of bytes needed to back `bits` bits.
#[inline]
pub fn bytes_for_bits(bits: usize) -> usize {
    bits.div_ceil(8)
}

#[inline]
pub fn set_bit(slice: &mut [u8], at: BitIndex) {
    slice[at.byte()] |= at.mask();
}

#[inline]
pub fn clear_bit(slice: &mut [u8], at: BitIndex) {
    slice[at.byte()] &= !at.mask();
}

#[inline]
pub fn get_bit(slice: &[u8], at: BitIndex) -> bool {
    slice[at.byte()] & at.mask() != 0
}

#[inline]
pub fn write_bit(slice: &mut [u8], at: BitIndex, bit: bool) {
    if bit {
        set_bit(slice, at);
    } else {
        clear_bit(slice, at);
    }
}

/// Zeroes the bits at and above `from` that share a byte with it.
pub fn clear_tail(slice: &mut [u8], from: BitIndex) {
    if from.bit() == 0 {
        return;
    }
    if let Some(byte) = slice.get_mut(from.byte()) {
        *byte &= from.mask() - 1;
    }
}
