use syn::parse_macro_input;

use crate::gen::register_impl;

mod ast;
mod gen;
mod layout;

#[proc_macro]
pub fn register(tokens: proc_macro::TokenStream) -> proc_macro::TokenStream {
    register_impl(parse_macro_input!(tokens)).into()
}

#[cfg(test)]
mod tests {
    use quote::quote;

    use super::register_impl;

    #[test]
    fn success_zero_registers() {
        let tokens = quote! { (some::path,) };

        let output = register_impl(syn::parse2(tokens).unwrap());
        assert!(output.is_empty());
    }

    #[test]
    fn success_multiple_registers() {
        let tokens = quote! {(
            ::open_bitfield,

            /// Program status.
            pub struct Psr: u32 {
                pub mode: 0, 5,
                pub m0: 0, 1,
                _reserved: 8, 20,
                pub negative: 31, 1,
            }

            #[no_debug]
            struct Small: u8 {
                low: 0, 4,
                high: 4, 4,
            }
        )};

        let output = register_impl(syn::parse2(tokens).unwrap()).to_string();
        assert!(!output.contains("compile_error"));
        assert!(output.contains("struct PsrFields"));
        assert!(output.contains("fn set_mode"));
        assert!(output.contains("fn with_negative"));
        assert!(output.contains("fn m0_mut"));
        assert!(!output.contains("fn _reserved"));
        assert!(output.contains("name : \"_reserved\""));
        assert_eq!(output.matches("impl :: core :: fmt :: Debug for").count(), 1);
    }

    #[test]
    fn failure_is_reported_per_register() {
        let tokens = quote! {(
            ::open_bitfield,

            struct Good: u16 { x: 0, 16 }
            struct Bad: u8 { y: 4, 5 }
        )};

        let output = register_impl(syn::parse2(tokens).unwrap()).to_string();
        assert_eq!(output.matches("compile_error").count(), 1);
        assert!(output.contains("struct GoodFields"));
        assert!(output.contains("struct Bad { }"));
    }

    #[test]
    fn bad_no_debug_attribute() {
        let tokens = quote! {(
            ::open_bitfield,

            #[no_debug(always)]
            struct A: u8 { x: 0, 1 }
        )};

        let output = register_impl(syn::parse2(tokens).unwrap()).to_string();
        assert!(output.contains("compile_error"));
    }
}
