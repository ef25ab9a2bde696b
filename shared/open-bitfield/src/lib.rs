#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

mod bit_range;
pub mod example;
mod field;
pub mod prelude;
mod register;
mod span;
mod storage;

pub use crate::bit_range::BitRange;
pub use crate::field::Field;
pub use crate::register::{FieldInfo, Register};
pub use crate::span::{BitSpan, LayoutError};
pub use crate::storage::Storage;

// For macro access via `$crate`.
#[doc(hidden)]
pub mod __private {
    pub use open_bitfield_macros::register;
}

mod sealed {
    pub trait Sealed {}
}

/// Generates register types.
///
/// Each register wraps one storage word (`u8`, `u16`, `u32`, `u64`, or `u128`) and declares
/// fields as `name: start, length`, where `start` counts from the least significant bit. Fields
/// may overlap; overlapping fields are different names for the same bits.
///
/// For a field `mode`, the register gains:
///
/// - `mode(&self)`, which reads the field;
/// - `set_mode(&mut self, value)`, which writes the field, discarding bits of `value` that do not
///   fit;
/// - `with_mode(self, value)`, which returns a copy with the field written;
/// - `mode_mut(&mut self)`, which returns a [`Field`] view supporting compound assignment.
///
/// `fields(&mut self)` returns one [`Field`] per declared field, all viewing the same word at once.
/// Fields whose names begin with `_` are reserved: they are checked but generate no accessors.
///
/// Every register also gets `new`, `to_raw`, `ZERO`, conversions to and from its storage type,
/// equality against raw values, a [`Register`] implementation, and a `Debug` implementation
/// listing every field. `#[no_debug]` on the register suppresses the `Debug` implementation.
///
/// See [`example`] for a generated register.
///
/// # Examples
///
/// ```
/// # use open_bitfield::prelude::*;
/// register! {
///     /// A status register.
///     pub struct Status: u16 {
///         pub ready: 15, 1,
///         pub count: 0, 4,
///         pub low_bit: 0, 1,
///     }
/// }
///
/// let mut status = Status::new(0x8003);
/// assert_eq!(status.ready(), 1);
/// assert_eq!(status.count(), 3);
///
/// status.set_count(0x1e);
/// assert_eq!(status.to_raw(), 0x800e);
/// assert_eq!(status.low_bit(), 0);
///
/// let mut count = status.count_mut();
/// count += 3;
/// assert_eq!(status.count(), 1);
/// assert_eq!(status.low_bit(), 1);
/// ```
///
/// ```compile_fail
/// # use open_bitfield::prelude::*;
/// register! {
///     struct TooNarrow: u8 {
///         wide: 6, 3,
///     }
/// }
/// ```
#[macro_export]
macro_rules! register {
    ($($tt:tt)*) => {
        $crate::__private::register! { ($crate, $($tt)*) }
    };
}
