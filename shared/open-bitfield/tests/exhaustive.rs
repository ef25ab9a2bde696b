use core::cell::Cell;

use open_bitfield::prelude::*;
use seq_macro::seq;

/// Checks a `u8` range against a bit-by-bit reference for every word and every value.
fn check<const START: u32, const LEN: u32>() {
    let range = BitRange::<u8, START, LEN>::new();
    let reference_mask = (0..8u32)
        .filter(|bit| (START..START + LEN).contains(bit))
        .fold(0u8, |mask, bit| mask | 1 << bit);
    assert_eq!(range.mask(), reference_mask);
    assert_eq!(range.mask().count_ones(), LEN);

    for word in 0..=u8::MAX {
        assert_eq!(range.extract(word) | range.clear(word), word);
        assert_eq!(range.extract(word) & range.clear(word), 0);
        assert_eq!(range.get(word), (word & reference_mask) >> START);

        for value in 0..=u8::MAX {
            let written = range.set(word, value);
            assert_eq!(range.get(written), value & range.max_value());
            assert_eq!(written & !reference_mask, word & !reference_mask);
            assert_eq!(range.set(written, value), written);

            let cell = Cell::new(word);
            let mut field = Field::<u8, START, LEN>::new(&cell);
            field.set(range.get(word));
            field += value;
            let expected = ((u32::from(range.get(word)) + u32::from(value))
                % (1u32 << LEN)) as u8;
            assert_eq!(field.get(), expected);
            assert_eq!(cell.get() & !reference_mask, word & !reference_mask);
        }
    }
}

seq!(START in 0..8 {
    #[test]
    fn single_bit_at_~START() {
        check::<START, 1>();
    }

    #[test]
    fn through_top_from_~START() {
        check::<START, { 8 - START }>();
    }
});

#[test]
fn middle_ranges() {
    check::<1, 3>();
    check::<2, 3>();
    check::<3, 4>();
    check::<0, 7>();
}
