open_bitfield::register! {
    struct Narrow: u8 {
        low: 0, 4,
        wide: 6, 3,
    }
}

fn main() {}
