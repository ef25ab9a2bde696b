open_bitfield::register! {
    struct Dup: u32 {
        flag: 0, 1,
        flag: 1, 1,
    }
}

fn main() {}
