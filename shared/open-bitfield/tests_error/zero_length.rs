open_bitfield::register! {
    struct Empty: u16 {
        nothing: 3, 0,
    }
}

fn main() {}
