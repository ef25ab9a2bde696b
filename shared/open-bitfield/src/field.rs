use core::cell::Cell;
use core::fmt::{self, Debug, Display, Formatter};
use core::ops::{
    AddAssign, BitAndAssign, BitOrAssign, BitXorAssign, DivAssign, MulAssign, Not, RemAssign,
    ShlAssign, ShrAssign, SubAssign,
};

use paste::paste;

use crate::{BitRange, Storage};

/// A named view of bits `START..START + LEN` of a shared storage word.
///
/// A `Field` does not own its word. It borrows it as a [`Cell`], so any number of fields,
/// including fields whose ranges overlap, can alias one register at the same time. A write through
/// one field is visible through every other field on its next read. Bits outside the field's
/// range are never modified.
///
/// Every write goes through [`BitRange::set`] and is truncated to `LEN` bits. Compound
/// operators are read-modify-write operations on the right-aligned value: arithmetic wraps at the
/// width of `S` and the result is then truncated, which makes it modular in the field's width.
///
/// # Examples
///
/// ```
/// # use core::cell::Cell;
/// # use open_bitfield::prelude::*;
/// let word = Cell::new(0u32);
/// let flag = Field::<u32, 0, 1>::new(&word);
/// let mut mode = Field::<u32, 0, 5>::new(&word);
///
/// flag.set(1);
/// assert_eq!(mode.get() & 1, 1);
///
/// mode += 0x1f;
/// assert_eq!(mode, 0x00);
/// assert_eq!(flag, 0);
/// ```
pub struct Field<'a, S: Storage, const START: u32, const LEN: u32> {
    word: &'a Cell<S>,
}

impl<'a, S: Storage, const START: u32, const LEN: u32> Field<'a, S, START, LEN> {
    /// Creates a field viewing `word`.
    ///
    /// Fails to compile under the same conditions as [`BitRange::new`].
    #[inline(always)]
    pub fn new(word: &'a Cell<S>) -> Self {
        let _ = BitRange::<S, START, LEN>::new();
        Self { word }
    }

    /// Creates a field viewing a uniquely borrowed word.
    #[inline(always)]
    pub fn from_mut(word: &'a mut S) -> Self {
        Self::new(Cell::from_mut(word))
    }

    /// Returns the field's range descriptor.
    #[inline(always)]
    pub fn bit_range(&self) -> BitRange<S, START, LEN> {
        BitRange::new()
    }

    /// Returns the whole storage word this field views.
    #[inline(always)]
    pub fn word(&self) -> S {
        self.word.get()
    }

    /// Returns the field's value, shifted down to bit 0.
    #[inline(always)]
    pub fn get(&self) -> S {
        self.bit_range().get(self.word.get())
    }

    /// Writes the field, truncating `value` to `LEN` bits and leaving every other bit untouched.
    #[inline(always)]
    pub fn set(&self, value: S) {
        self.word.set(self.bit_range().set(self.word.get(), value));
    }

    /// Writes the field and returns its old value.
    #[inline(always)]
    pub fn replace(&self, value: S) -> S {
        let old_value = self.get();
        self.set(value);
        old_value
    }

    /// Writes the result of `f` applied to the current value and returns the old value.
    #[inline(always)]
    pub fn update(&self, f: impl FnOnce(S) -> S) -> S {
        self.replace(f(self.get()))
    }

    /// Adds one, wrapping to zero past the field's largest value.
    #[inline(always)]
    pub fn increment(&self) {
        self.update(|value| value.wrapping_add(&S::one()));
    }

    /// Subtracts one, wrapping to the field's largest value below zero.
    #[inline(always)]
    pub fn decrement(&self) {
        self.update(|value| value.wrapping_sub(&S::one()));
    }
}

impl<S: Storage, const START: u32, const LEN: u32> Clone for Field<'_, S, START, LEN> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Storage, const START: u32, const LEN: u32> Copy for Field<'_, S, START, LEN> {}

impl<S: Storage, const START: u32, const LEN: u32> Debug for Field<'_, S, START, LEN> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Field")
            .field("bits", &(START..START + LEN))
            .field("value", &self.get())
            .finish()
    }
}

impl<S: Storage, const START: u32, const LEN: u32> Display for Field<'_, S, START, LEN> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Display::fmt(&self.get(), f)
    }
}

impl<S: Storage, const START: u32, const LEN: u32> PartialEq<S> for Field<'_, S, START, LEN> {
    fn eq(&self, other: &S) -> bool {
        self.get() == *other
    }
}

/// The complement of the right-aligned field value, at the full width of `S`. Does not write.
impl<S: Storage, const START: u32, const LEN: u32> Not for Field<'_, S, START, LEN> {
    type Output = S;

    fn not(self) -> S {
        !self.get()
    }
}

impl<S: Storage, const START: u32, const LEN: u32> Not for &Field<'_, S, START, LEN> {
    type Output = S;

    fn not(self) -> S {
        !self.get()
    }
}

fn shift_amount<S: Storage>(rhs: S) -> u32 {
    rhs.to_u32().unwrap_or(u32::MAX)
}

macro_rules! impl_compound_assign {
    ($($trait:ident::$method:ident => |$value:ident, $rhs:ident| $op:expr;)*) => {$(
        paste! {
            impl<S: Storage, const START: u32, const LEN: u32> [<$trait Assign>]<S>
                for Field<'_, S, START, LEN>
            {
                #[inline(always)]
                fn [<$method _assign>](&mut self, $rhs: S) {
                    self.update(|$value| $op);
                }
            }
        }
    )*};
}

impl_compound_assign! {
    Add::add => |value, rhs| value.wrapping_add(&rhs);
    Sub::sub => |value, rhs| value.wrapping_sub(&rhs);
    Mul::mul => |value, rhs| value.wrapping_mul(&rhs);
    Div::div => |value, rhs| value / rhs;
    Rem::rem => |value, rhs| value % rhs;
    Shl::shl => |value, rhs| value.shl_or_zero(shift_amount(rhs));
    Shr::shr => |value, rhs| value.shr_or_zero(shift_amount(rhs));
    BitOr::bitor => |value, rhs| value | rhs;
    BitAnd::bitand => |value, rhs| value & rhs;
    BitXor::bitxor => |value, rhs| value ^ rhs;
}

macro_rules! impl_from_field {
    ($($ty:ident),*) => {$(
        impl<const START: u32, const LEN: u32> From<Field<'_, $ty, START, LEN>> for $ty {
            #[inline(always)]
            fn from(field: Field<'_, $ty, START, LEN>) -> Self {
                field.get()
            }
        }
    )*};
}
impl_from_field!(u8, u16, u32, u64, u128);
