/// Position of a single bit inside a packed byte buffer.
///
/// Bit `i` lives in byte `i / 8`, at bit position `i & 7` counted from the
/// least significant end.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BitIndex(pub usize);

impl BitIndex {
    #[inline]
    pub const fn byte(self) -> usize {
        self.0 / 8
    }

    #[inline]
    pub const fn bit(self) -> u32 {
        (self.0 & 7) as u32
    }

    #[inline]
    pub const fn mask(self) -> u8 {
        1 << self.bit()
    }
}
