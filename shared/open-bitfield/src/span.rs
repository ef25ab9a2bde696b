use core::fmt::{self, Debug, Display, Formatter};
use core::marker::PhantomData;

use crate::Storage;

/// The error type returned when a [`BitSpan`] does not describe a valid field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum LayoutError {
    /// The span has a length of zero.
    ZeroLength,
    /// The span extends past the most significant bit of the storage word.
    OutOfBounds {
        /// The first bit of the span.
        start: u32,
        /// The length of the span in bits.
        len: u32,
        /// The width of the storage word in bits.
        width: u32,
    },
}

impl Display for LayoutError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::ZeroLength => write!(f, "bit range must be at least one bit long"),
            Self::OutOfBounds { start, len, width } => write!(
                f,
                "bit range {start}..{} does not fit in {width}-bit storage",
                u64::from(*start) + u64::from(*len),
            ),
        }
    }
}

impl core::error::Error for LayoutError {}

/// A contiguous run of bits in a storage word, validated when it is created.
///
/// This is the runtime counterpart of [`BitRange`](crate::BitRange), for layouts that are not
/// known until the program runs. The arithmetic is identical; `BitRange` delegates to it.
///
/// # Examples
///
/// ```
/// # use open_bitfield::prelude::*;
/// let span = BitSpan::<u8>::new(2, 3).unwrap();
/// assert_eq!(span.mask(), 0x1c);
/// assert_eq!(span.set(0x00, 0xff), 0x1c);
///
/// assert_eq!(BitSpan::<u8>::new(6, 3), Err(LayoutError::OutOfBounds { start: 6, len: 3, width: 8 }));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitSpan<S> {
    start: u32,
    len: u32,
    _storage: PhantomData<fn() -> S>,
}

impl<S: Storage> BitSpan<S> {
    /// Creates a span of `len` bits beginning at bit `start`, counted from the least significant
    /// bit.
    pub const fn new(start: u32, len: u32) -> Result<Self, LayoutError> {
        if len == 0 {
            return Err(LayoutError::ZeroLength);
        }
        match start.checked_add(len) {
            Some(end) if end <= S::BITS => Ok(Self::new_unvalidated(start, len)),
            _ => Err(LayoutError::OutOfBounds {
                start,
                len,
                width: S::BITS,
            }),
        }
    }

    /// The caller upholds `0 < len` and `start + len <= S::BITS`.
    pub(crate) const fn new_unvalidated(start: u32, len: u32) -> Self {
        Self {
            start,
            len,
            _storage: PhantomData,
        }
    }

    /// The first (least significant) bit of the span.
    #[inline(always)]
    pub const fn start(self) -> u32 {
        self.start
    }

    /// The length of the span in bits.
    #[inline(always)]
    pub const fn length(self) -> u32 {
        self.len
    }

    /// One past the last (most significant) bit of the span.
    #[inline(always)]
    pub const fn end(self) -> u32 {
        self.start + self.len
    }

    /// Returns whether `bit` lies within the span.
    pub const fn contains_bit(self, bit: u32) -> bool {
        self.start <= bit && bit < self.end()
    }

    /// Returns whether the two spans share at least one bit.
    pub const fn overlaps(self, other: BitSpan<S>) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    /// Returns a word with exactly the span's bits set.
    #[inline(always)]
    pub fn mask(self) -> S {
        S::field_mask(self.start, self.len)
    }

    /// Returns the largest value the span can hold.
    #[inline(always)]
    pub fn max_value(self) -> S {
        S::low_mask(self.len)
    }

    /// Keeps the span's bits of `word` in place and clears every other bit.
    #[inline(always)]
    pub fn extract(self, word: S) -> S {
        word & self.mask()
    }

    /// Clears the span's bits of `word` and keeps every other bit.
    #[inline(always)]
    pub fn clear(self, word: S) -> S {
        word & !self.mask()
    }

    /// Returns the span's bits of `word`, shifted down to bit 0.
    #[inline(always)]
    pub fn get(self, word: S) -> S {
        self.extract(word).shr_or_zero(self.start)
    }

    /// Returns `word` with the span's bits replaced by `value`.
    ///
    /// Bits of `value` above the span's length are discarded.
    #[inline(always)]
    pub fn set(self, word: S, value: S) -> S {
        self.clear(word) | (value.shl_or_zero(self.start) & self.mask())
    }
}

impl<S: Storage> Debug for BitSpan<S> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "BitSpan<u{}>({}..{})", S::BITS, self.start, self.end())
    }
}
