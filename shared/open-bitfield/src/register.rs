use core::cell::Cell;

use crate::{BitRange, BitSpan, Field, LayoutError, Storage};

/// Describes one declared field of a register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldInfo {
    /// The field's name as written in the declaration.
    pub name: &'static str,
    /// The first (least significant) bit of the field.
    pub start: u32,
    /// The length of the field in bits.
    pub len: u32,
}

impl FieldInfo {
    /// Returns the field's bits as a span of a storage word of type `S`.
    pub const fn span<S: Storage>(&self) -> Result<BitSpan<S>, LayoutError> {
        BitSpan::new(self.start, self.len)
    }
}

/// Register types: a single storage word viewed through named fields.
///
/// Registers provide zero-cost conversions to and from their [`Storage`](Self::Storage) type.
/// Types generated by [`register!`](crate::register) implement this trait, as do the storage
/// types themselves, which act as registers with no named fields.
pub trait Register: Copy + From<<Self as Register>::Storage> {
    /// The storage word type, freely convertible to and from [`Self`].
    type Storage: Storage + From<Self>;

    /// The register with every bit clear.
    const ZERO: Self;

    /// The declared fields, in declaration order.
    const LAYOUT: &'static [FieldInfo];

    /// Returns the register with every bit clear.
    fn zero() -> Self {
        Self::ZERO
    }

    /// Creates a register value holding `value` verbatim.
    ///
    /// This is a zero-cost conversion.
    fn from_storage(value: Self::Storage) -> Self;

    /// Returns the register's storage word.
    ///
    /// This is a zero-cost conversion.
    fn to_storage(self) -> Self::Storage;

    /// Borrows the register's storage word.
    fn storage_mut(&mut self) -> &mut Self::Storage;

    /// Borrows the register's storage word as a [`Cell`] that field views can share.
    fn as_cell(&mut self) -> &Cell<Self::Storage> {
        Cell::from_mut(self.storage_mut())
    }

    /// Returns a view of bits `START..START + LEN`.
    fn field<const START: u32, const LEN: u32>(&mut self) -> Field<'_, Self::Storage, START, LEN> {
        Field::from_mut(self.storage_mut())
    }

    /// Reads bits `START..START + LEN`, shifted down to bit 0.
    fn get_bits<const START: u32, const LEN: u32>(self) -> Self::Storage {
        BitRange::<Self::Storage, START, LEN>::new().get(self.to_storage())
    }

    /// Writes bits `START..START + LEN`, truncating `value` to `LEN` bits.
    fn set_bits<const START: u32, const LEN: u32>(&mut self, value: Self::Storage) {
        let word = self.storage_mut();
        *word = BitRange::<Self::Storage, START, LEN>::new().set(*word, value);
    }
}

macro_rules! impl_register_for_storage {
    ($($ty:ident),*) => {$(
        impl Register for $ty {
            type Storage = Self;

            const ZERO: Self = 0;

            const LAYOUT: &'static [FieldInfo] = &[];

            fn from_storage(value: Self) -> Self {
                value
            }

            fn to_storage(self) -> Self {
                self
            }

            fn storage_mut(&mut self) -> &mut Self {
                self
            }
        }
    )*};
}
impl_register_for_storage!(u8, u16, u32, u64, u128);

#[cfg(test)]
mod tests {
    use super::{FieldInfo, Register};

    #[test]
    fn test_storage_as_register() {
        let mut word = 0u16;
        word.set_bits::<4, 4>(0x1a);
        assert_eq!(word, 0x00a0);
        assert_eq!(word.get_bits::<4, 4>(), 0xa);
        assert_eq!(word.get_bits::<0, 8>(), 0xa0);

        let mut low = word.field::<0, 8>();
        low += 0x10;
        assert_eq!(word, 0x00b0);
        assert_eq!(<u16 as Register>::zero(), 0);
    }

    #[test]
    fn test_field_info_span() {
        let info = FieldInfo {
            name: "mode",
            start: 0,
            len: 5,
        };
        assert_eq!(info.span::<u32>().unwrap().mask(), 0x1f);
        assert!(info.span::<u8>().is_ok());
        let wide = FieldInfo {
            name: "wide",
            start: 6,
            len: 3,
        };
        assert!(wide.span::<u8>().is_err());
    }

    #[test]
    fn test_shared_cell() {
        let mut word = 0u32;
        let cell = word.as_cell();
        cell.set(0xdead_beef);
        assert_eq!(word, 0xdead_beef);
    }
}
