open_bitfield::register! {
    struct Signed: i32 {
        value: 0, 8,
    }
}

fn main() {}
