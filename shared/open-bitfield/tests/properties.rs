use core::ops::Deref;

use open_bitfield::prelude::*;
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

/// A valid span of a `u32`.
#[derive(Clone, Copy, Debug)]
struct Span32(BitSpan<u32>);

impl Arbitrary for Span32 {
    fn arbitrary(g: &mut Gen) -> Self {
        let start = u32::arbitrary(g) % 32;
        let len = 1 + u32::arbitrary(g) % (32 - start);
        Self(BitSpan::new(start, len).unwrap())
    }
}

impl Deref for Span32 {
    type Target = BitSpan<u32>;

    fn deref(&self) -> &BitSpan<u32> {
        &self.0
    }
}

/// A valid span of a `u64`.
#[derive(Clone, Copy, Debug)]
struct Span64(BitSpan<u64>);

impl Arbitrary for Span64 {
    fn arbitrary(g: &mut Gen) -> Self {
        let start = u32::arbitrary(g) % 64;
        let len = 1 + u32::arbitrary(g) % (64 - start);
        Self(BitSpan::new(start, len).unwrap())
    }
}

impl Deref for Span64 {
    type Target = BitSpan<u64>;

    fn deref(&self) -> &BitSpan<u64> {
        &self.0
    }
}

#[quickcheck]
fn mask_has_len_bits_at_start(span: Span32) -> bool {
    let mask = span.mask();
    mask.count_ones() == span.length()
        && mask.trailing_zeros() == span.start()
        && 32 - mask.leading_zeros() == span.end()
}

#[quickcheck]
fn mask_has_len_bits_at_start_u64(span: Span64) -> bool {
    let mask = span.mask();
    mask.count_ones() == span.length() && mask.trailing_zeros() == span.start()
}

#[quickcheck]
fn extract_and_clear_partition_the_word(span: Span32, word: u32) -> bool {
    let extracted = span.extract(word);
    let cleared = span.clear(word);
    extracted | cleared == word && extracted & cleared == 0
}

#[quickcheck]
fn extract_and_clear_partition_the_word_u64(span: Span64, word: u64) -> bool {
    let extracted = span.extract(word);
    let cleared = span.clear(word);
    extracted | cleared == word && extracted & cleared == 0
}

#[quickcheck]
fn set_then_get_round_trips_truncated(span: Span32, word: u32, value: u32) -> bool {
    span.get(span.set(word, value)) == value & span.max_value()
}

#[quickcheck]
fn set_then_get_round_trips_truncated_u64(span: Span64, word: u64, value: u64) -> bool {
    span.get(span.set(word, value)) == value & span.max_value()
}

#[quickcheck]
fn set_leaves_other_bits(span: Span64, word: u64, value: u64) -> bool {
    span.clear(span.set(word, value)) == span.clear(word)
}

#[quickcheck]
fn writing_the_current_value_is_a_no_op(span: Span32, word: u32) -> bool {
    span.set(word, span.get(word)) == word
}

#[quickcheck]
fn writes_are_idempotent(span: Span64, word: u64, value: u64) -> bool {
    let once = span.set(word, value);
    span.set(once, value) == once
}

#[quickcheck]
fn overlapping_fields_share_bits(word: u32, value: u32) -> bool {
    let a = BitRange::<u32, 0, 1>::new();
    let b = BitRange::<u32, 0, 5>::new();
    let after_b = b.set(word, value);
    a.get(after_b) == value & 1
}

#[quickcheck]
fn compile_time_and_runtime_ranges_agree(word: u32, value: u32) -> bool {
    let range = BitRange::<u32, 7, 13>::new();
    let span = BitSpan::<u32>::new(7, 13).unwrap();
    range.mask() == span.mask()
        && range.get(word) == span.get(word)
        && range.set(word, value) == span.set(word, value)
        && range.span() == span
}

#[quickcheck]
fn add_assign_is_modular(word: u16, value: u16, rhs: u16) -> bool {
    let mut raw = word;
    let mut field = Field::<u16, 3, 6>::from_mut(&mut raw);
    field.set(value);
    field += rhs;
    let expected = (u32::from(value & 0x3f) + u32::from(rhs)) % 64;
    u32::from(field.get()) == expected && raw & !0x01f8 == word & !0x01f8
}

#[quickcheck]
fn complement_does_not_write(word: u64) -> bool {
    let mut raw = word;
    let field = Field::<u64, 40, 12>::from_mut(&mut raw);
    let complement = !field;
    complement == !field.get() && raw == word
}
