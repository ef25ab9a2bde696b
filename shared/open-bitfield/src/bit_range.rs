use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;

use crate::{BitSpan, Storage};

/// A contiguous run of bits in a storage word of type `S`, fixed at compile time.
///
/// The range covers `LEN` bits beginning at bit `START`, counted from the least significant bit.
/// `BitRange` is zero-sized and carries no state; every operation takes a storage word and
/// returns a new one.
///
/// The only way to obtain a `BitRange` is [`BitRange::new`], which refuses to compile for an empty
/// range or one that does not fit in `S`. `BitRange` is deliberately neither [`Clone`] nor
/// [`Copy`]; call `new` again wherever one is needed.
///
/// # Examples
///
/// ```
/// # use open_bitfield::prelude::*;
/// let range = BitRange::<u8, 2, 3>::new();
/// assert_eq!(range.mask(), 0x1c);
/// assert_eq!(range.get(0b1110_1100), 0b011);
/// // Bits of the value that do not fit are discarded.
/// assert_eq!(range.set(0x00, 0xff), 0x1c);
/// ```
///
/// ```compile_fail
/// # use open_bitfield::prelude::*;
/// // Bits 6..9 do not fit in a `u8`.
/// let range = BitRange::<u8, 6, 3>::new();
/// ```
///
/// ```compile_fail
/// # use open_bitfield::prelude::*;
/// // A range must cover at least one bit.
/// let range = BitRange::<u32, 4, 0>::new();
/// ```
pub struct BitRange<S: Storage, const START: u32, const LEN: u32> {
    _storage: PhantomData<fn() -> S>,
}

impl<S: Storage, const START: u32, const LEN: u32> BitRange<S, START, LEN> {
    const LAYOUT_CHECK: () = {
        assert!(LEN > 0, "bit range must be at least one bit long");
        assert!(
            START as u64 + LEN as u64 <= S::BITS as u64,
            "bit range does not fit in the storage word",
        );
    };

    /// The equivalent runtime span.
    pub const SPAN: BitSpan<S> = {
        let () = Self::LAYOUT_CHECK;
        BitSpan::new_unvalidated(START, LEN)
    };

    /// Creates the range descriptor.
    ///
    /// Fails to compile if `LEN` is zero or `START + LEN` exceeds the width of `S`.
    #[inline(always)]
    #[must_use]
    pub const fn new() -> Self {
        let () = Self::LAYOUT_CHECK;
        Self {
            _storage: PhantomData,
        }
    }

    /// The width of the storage word in bits.
    #[inline(always)]
    pub const fn storage_width(&self) -> u32 {
        S::BITS
    }

    /// The first (least significant) bit of the range.
    #[inline(always)]
    pub const fn start(&self) -> u32 {
        START
    }

    /// The length of the range in bits.
    #[inline(always)]
    pub const fn length(&self) -> u32 {
        LEN
    }

    /// One past the last (most significant) bit of the range.
    #[inline(always)]
    pub const fn end(&self) -> u32 {
        START + LEN
    }

    /// Returns the range as a [`BitSpan`].
    #[inline(always)]
    pub const fn span(&self) -> BitSpan<S> {
        Self::SPAN
    }

    /// Returns whether `bit` lies within the range.
    pub const fn contains_bit(&self, bit: u32) -> bool {
        Self::SPAN.contains_bit(bit)
    }

    /// Returns whether this range shares at least one bit with `other`.
    pub const fn overlaps<const OTHER_START: u32, const OTHER_LEN: u32>(
        &self,
        other: &BitRange<S, OTHER_START, OTHER_LEN>,
    ) -> bool {
        Self::SPAN.overlaps(other.span())
    }

    /// Returns a word with exactly `LEN` bits set, beginning at bit `START`.
    #[inline(always)]
    pub fn mask(&self) -> S {
        Self::SPAN.mask()
    }

    /// Returns the largest value the range can hold.
    #[inline(always)]
    pub fn max_value(&self) -> S {
        Self::SPAN.max_value()
    }

    /// Keeps the range's bits of `word` in place and clears every other bit.
    #[inline(always)]
    pub fn extract(&self, word: S) -> S {
        Self::SPAN.extract(word)
    }

    /// Clears the range's bits of `word` and keeps every other bit.
    #[inline(always)]
    pub fn clear(&self, word: S) -> S {
        Self::SPAN.clear(word)
    }

    /// Returns the range's bits of `word`, shifted down to bit 0.
    #[inline(always)]
    pub fn get(&self, word: S) -> S {
        Self::SPAN.get(word)
    }

    /// Returns `word` with the range's bits replaced by `value`.
    ///
    /// Bits of `value` above `LEN` are silently discarded; this never fails.
    #[inline(always)]
    pub fn set(&self, word: S, value: S) -> S {
        Self::SPAN.set(word, value)
    }
}

impl<S: Storage, const START: u32, const LEN: u32> Debug for BitRange<S, START, LEN> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "BitRange<u{}>({}..{})", S::BITS, START, START + LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::BitRange;

    #[test]
    fn test_mask() {
        assert_eq!(BitRange::<u16, 2, 2>::new().mask(), 0x0c);
        assert_eq!(BitRange::<u32, 0, 1>::new().mask(), 0x1);
        assert_eq!(BitRange::<u32, 0, 5>::new().mask(), 0x1f);
        assert_eq!(BitRange::<u32, 31, 1>::new().mask(), 0x8000_0000);
        assert_eq!(BitRange::<u64, 0, 64>::new().mask(), u64::MAX);
        assert_eq!(BitRange::<u128, 64, 64>::new().mask(), u128::MAX << 64);
    }

    #[test]
    fn test_extract_and_clear() {
        let range = BitRange::<u8, 0, 4>::new();
        assert_eq!(range.extract(0x55), 0x5);
        assert_eq!(range.clear(0x55), 0x50);
    }

    #[test]
    fn test_get() {
        assert_eq!(BitRange::<u8, 4, 4>::new().get(0xab), 0xa);
    }

    #[test]
    fn test_set() {
        let range = BitRange::<u32, 16, 8>::new();
        assert_eq!(range.set(0xaabb_ccdd, 0x11), 0xaa11_ccdd);
    }

    #[test]
    fn test_set_truncates() {
        let range = BitRange::<u8, 2, 3>::new();
        assert_eq!(range.mask(), 0x1c);
        assert_eq!(range.set(0x00, 0xff), 0x1c);
        assert_eq!(range.set(0xff, 0x00), 0xe3);
        assert_eq!(range.get(range.set(0x00, 0b1101)), 0b101);
    }

    #[test]
    fn test_geometry() {
        let range = BitRange::<u16, 3, 5>::new();
        assert_eq!(range.storage_width(), 16);
        assert_eq!(range.start(), 3);
        assert_eq!(range.length(), 5);
        assert_eq!(range.end(), 8);
        assert_eq!(range.max_value(), 0x1f);
        assert!(range.contains_bit(3));
        assert!(range.contains_bit(7));
        assert!(!range.contains_bit(8));
    }

    #[test]
    fn test_overlaps() {
        let flag = BitRange::<u32, 0, 1>::new();
        let mode = BitRange::<u32, 0, 5>::new();
        let thumb = BitRange::<u32, 5, 1>::new();
        assert!(flag.overlaps(&mode));
        assert!(mode.overlaps(&flag));
        assert!(!mode.overlaps(&thumb));
    }

    #[test]
    fn test_debug() {
        assert_eq!(
            format!("{:?}", BitRange::<u32, 28, 4>::new()),
            "BitRange<u32>(28..32)",
        );
    }
}
