//! An example register and the items generated for it.
//!
//! [`ProgramStatusRegister`] models the ARM program status register. Most flags are declared twice,
//! once with a descriptive name and once with the architectural one-letter name, and the processor
//! mode is available both as a five-bit field and bit by bit. The declaration is:
//!
//! ```
//! # use open_bitfield::prelude::*;
//! register! {
//!     pub struct ProgramStatusRegister: u32 {
//!         pub negative: 31, 1,
//!         pub n: 31, 1,
//!         pub zero: 30, 1,
//!         pub z: 30, 1,
//!         pub carry: 29, 1,
//!         pub c: 29, 1,
//!         pub overflow: 28, 1,
//!         pub v: 28, 1,
//!         pub irq_disable: 7, 1,
//!         pub i: 7, 1,
//!         pub fiq_disable: 6, 1,
//!         pub f: 6, 1,
//!         pub thumb: 5, 1,
//!         pub t: 5, 1,
//!         pub mode: 0, 5,
//!         pub m0: 0, 1,
//!         pub m1: 1, 1,
//!         pub m2: 2, 1,
//!         pub m3: 3, 1,
//!         pub m4: 4, 1,
//!     }
//! }
//! ```
//!
//! # Usage
//!
//! ```
//! use open_bitfield::example::{ProgramStatusRegister, MODE_SUPERVISOR, MODE_USER};
//!
//! let mut psr = ProgramStatusRegister::new(0x6000_0010);
//! assert_eq!(psr.zero(), 1);
//! assert_eq!(psr.c(), 1);
//! assert_eq!(psr.mode(), MODE_USER);
//!
//! // Aliases observe each other's writes.
//! psr.set_mode(MODE_SUPERVISOR);
//! assert_eq!(psr.m0(), 1);
//! assert_eq!(psr.m1(), 1);
//! assert_eq!(psr.m4(), 1);
//!
//! let fields = psr.fields();
//! fields.n.set(1);
//! fields.m4.set(0);
//! assert_eq!(fields.negative.get(), 1);
//! assert_eq!(fields.mode.get(), 0x03);
//! ```

use crate::prelude::*;

register! {
    /// The ARM program status register (CPSR/SPSR).
    pub struct ProgramStatusRegister: u32 {
        /// Negative condition flag.
        pub negative: 31, 1,
        /// Alias of [`negative`](Self::negative).
        pub n: 31, 1,
        /// Zero condition flag.
        pub zero: 30, 1,
        /// Alias of [`zero`](Self::zero).
        pub z: 30, 1,
        /// Carry condition flag.
        pub carry: 29, 1,
        /// Alias of [`carry`](Self::carry).
        pub c: 29, 1,
        /// Overflow condition flag.
        pub overflow: 28, 1,
        /// Alias of [`overflow`](Self::overflow).
        pub v: 28, 1,
        /// IRQ interrupts are disabled when set.
        pub irq_disable: 7, 1,
        /// Alias of [`irq_disable`](Self::irq_disable).
        pub i: 7, 1,
        /// FIQ interrupts are disabled when set.
        pub fiq_disable: 6, 1,
        /// Alias of [`fiq_disable`](Self::fiq_disable).
        pub f: 6, 1,
        /// The processor is executing Thumb instructions when set.
        pub thumb: 5, 1,
        /// Alias of [`thumb`](Self::thumb).
        pub t: 5, 1,
        /// Processor mode; see the `MODE_*` constants.
        pub mode: 0, 5,
        /// Bit 0 of [`mode`](Self::mode).
        pub m0: 0, 1,
        /// Bit 1 of [`mode`](Self::mode).
        pub m1: 1, 1,
        /// Bit 2 of [`mode`](Self::mode).
        pub m2: 2, 1,
        /// Bit 3 of [`mode`](Self::mode).
        pub m3: 3, 1,
        /// Bit 4 of [`mode`](Self::mode).
        pub m4: 4, 1,
    }
}

/// User mode.
pub const MODE_USER: u32 = 0b10000;
/// FIQ mode.
pub const MODE_FIQ: u32 = 0b10001;
/// IRQ mode.
pub const MODE_IRQ: u32 = 0b10010;
/// Supervisor mode.
pub const MODE_SUPERVISOR: u32 = 0b10011;
/// Abort mode.
pub const MODE_ABORT: u32 = 0b10111;
/// Undefined mode.
pub const MODE_UNDEFINED: u32 = 0b11011;
/// System mode.
pub const MODE_SYSTEM: u32 = 0b11111;
