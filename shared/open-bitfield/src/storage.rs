//! The unsigned integer types that can back a register.

use core::fmt::{Binary, Debug, Display, LowerHex, UpperHex};
use core::hash::Hash;

use num_traits::{PrimInt, Unsigned, WrappingAdd, WrappingMul, WrappingSub};

use crate::sealed::Sealed;

/// Storage word types.
///
/// This trait is sealed and implemented for [`u8`], [`u16`], [`u32`], [`u64`], and [`u128`] only.
/// Naming any other type as a register's storage is rejected at compile time.
pub trait Storage:
    PrimInt
    + Unsigned
    + WrappingAdd
    + WrappingMul
    + WrappingSub
    + Binary
    + Debug
    + Display
    + LowerHex
    + UpperHex
    + Hash
    + Default
    + Sealed
{
    /// The width of the storage word in bits.
    const BITS: u32;

    /// The value with no bits set.
    const ZERO: Self;

    /// The value with every bit set.
    const MAX: Self;

    /// Returns a value with the `len` least significant bits set.
    ///
    /// Any `len` of at least [`BITS`](Self::BITS) yields [`MAX`](Self::MAX).
    fn low_mask(len: u32) -> Self;

    /// Returns a value with `len` bits set, beginning at bit `start`.
    ///
    /// Bits shifted past the most significant bit are discarded.
    #[inline(always)]
    fn field_mask(start: u32, len: u32) -> Self {
        Self::low_mask(len).shl_or_zero(start)
    }

    /// Shifts left, producing zero when `amount` is at least [`BITS`](Self::BITS).
    fn shl_or_zero(self, amount: u32) -> Self;

    /// Shifts right, producing zero when `amount` is at least [`BITS`](Self::BITS).
    fn shr_or_zero(self, amount: u32) -> Self;

    /// Widens the value to a [`u128`].
    fn to_u128(self) -> u128;

    /// Narrows a [`u128`] by discarding the bits that do not fit.
    fn from_u128_truncating(value: u128) -> Self;
}

macro_rules! impl_storage {
    ($($ty:ident),* $(,)?) => {$(
        impl Sealed for $ty {}

        impl Storage for $ty {
            const BITS: u32 = $ty::BITS;
            const ZERO: Self = 0;
            const MAX: Self = $ty::MAX;

            #[inline(always)]
            fn low_mask(len: u32) -> Self {
                if len >= $ty::BITS {
                    $ty::MAX
                } else {
                    (1 << len) - 1
                }
            }

            #[inline(always)]
            fn shl_or_zero(self, amount: u32) -> Self {
                self.checked_shl(amount).unwrap_or(0)
            }

            #[inline(always)]
            fn shr_or_zero(self, amount: u32) -> Self {
                self.checked_shr(amount).unwrap_or(0)
            }

            #[inline(always)]
            #[allow(clippy::unnecessary_cast)]
            fn to_u128(self) -> u128 {
                self as u128
            }

            #[inline(always)]
            #[allow(clippy::unnecessary_cast)]
            fn from_u128_truncating(value: u128) -> Self {
                value as $ty
            }
        }
    )*};
}
impl_storage!(u8, u16, u32, u64, u128);

#[cfg(test)]
mod tests {
    use super::Storage;

    #[test]
    fn test_low_mask() {
        assert_eq!(<u8 as Storage>::low_mask(0), 0);
        assert_eq!(<u8 as Storage>::low_mask(3), 0b111);
        assert_eq!(<u8 as Storage>::low_mask(8), 0xff);
        assert_eq!(<u32 as Storage>::low_mask(32), u32::MAX);
        assert_eq!(<u128 as Storage>::low_mask(127), u128::MAX >> 1);
        assert_eq!(<u128 as Storage>::low_mask(128), u128::MAX);
    }

    #[test]
    fn test_field_mask() {
        assert_eq!(<u16 as Storage>::field_mask(2, 2), 0x0c);
        assert_eq!(<u8 as Storage>::field_mask(2, 3), 0x1c);
        assert_eq!(<u64 as Storage>::field_mask(63, 1), 1 << 63);
        assert_eq!(<u64 as Storage>::field_mask(0, 64), u64::MAX);
    }

    #[test]
    fn test_shifts_past_width() {
        assert_eq!(0xffu8.shl_or_zero(8), 0);
        assert_eq!(0xffu8.shr_or_zero(9), 0);
        assert_eq!(0x0fu8.shl_or_zero(4), 0xf0);
        assert_eq!(0xf0u8.shr_or_zero(4), 0x0f);
    }

    #[test]
    fn test_u128_conversions() {
        assert_eq!(<u16 as Storage>::from_u128_truncating(0x1_2345), 0x2345);
        assert_eq!(0xabu8.to_u128(), 0xab);
    }
}
