//! Convenience re-exports.

#[doc(no_inline)]
pub use crate::{register, BitRange, BitSpan, Field, FieldInfo, LayoutError, Register, Storage};
