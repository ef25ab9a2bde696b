use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Error, Ident, Path, Result};

use crate::ast::{self, Input};
use crate::layout::{check_fields, CheckedField, StorageType};

struct Config {
    crate_path: Path,
}

pub fn register_impl(input: Input) -> TokenStream {
    let cfg = Config {
        crate_path: input.crate_path,
    };
    let results: Vec<_> = input
        .registers
        .into_iter()
        .map(|register| generate_register(&cfg, register))
        .collect();
    quote! { #(#results)* }
}

fn generate_register(cfg: &Config, input: ast::Register) -> TokenStream {
    let cloned_name = input.name.clone();
    match generate_register_impl(cfg, input) {
        Ok(result) => result,
        Err(e) => {
            let compile_error = e.into_compile_error();
            quote! {
                #compile_error
                #[allow(dead_code)]
                struct #cloned_name {}
            }
        }
    }
}

fn generate_register_impl(cfg: &Config, input: ast::Register) -> Result<TokenStream> {
    let mut no_debug = false;
    let mut other_attrs = Vec::new();

    for attr in &input.attrs {
        if attr.path().is_ident("no_debug") {
            attr.meta.require_path_only()?;
            if no_debug {
                return Err(Error::new(attr.span(), "duplicate `#[no_debug]` attribute"));
            }
            no_debug = true;
        } else {
            other_attrs.push(attr);
        }
    }

    let storage = StorageType::from_type(&input.storage)?;
    let fields = check_fields(&storage, &input.fields)?;

    let crate_path = &cfg.crate_path;
    let name = &input.name;
    let visibility = &input.visibility;
    let storage_ty = &storage.ident;
    let fields_name = format_ident!("{}Fields", name);

    let public_fields: Vec<&CheckedField> =
        fields.iter().filter(|f| !f.field.is_reserved()).collect();
    let accessors = public_fields
        .iter()
        .map(|field| generate_accessors(cfg, storage_ty, field));

    let layout_entries = fields.iter().map(|field| {
        let field_name = field.field.name.unraw().to_string();
        let start = Literal::u32_unsuffixed(field.start);
        let len = Literal::u32_unsuffixed(field.len);
        quote! {
            #crate_path::FieldInfo { name: #field_name, start: #start, len: #len }
        }
    });

    let fields_struct = generate_fields_struct(cfg, name, visibility, storage_ty, &public_fields);

    let debug_impl = if no_debug {
        None
    } else {
        let debug_fields = public_fields.iter().map(|field| {
            let field_ident = &field.field.name;
            let field_name = field_ident.unraw().to_string();
            quote! { .field(#field_name, &self.#field_ident()) }
        });
        let name_str = name.to_string();
        Some(quote! {
            impl ::core::fmt::Debug for #name {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    f.debug_struct(#name_str)
                        .field("raw", &::core::format_args!("{:#x}", self.word))
                        #(#debug_fields)*
                        .finish()
                }
            }
        })
    };

    let fields_doc = format!(
        "Returns a view of every field of the register, all sharing the same storage word. \
         See [`{fields_name}`]."
    );

    Ok(quote! {
        #[derive(
            ::core::clone::Clone,
            ::core::marker::Copy,
            ::core::cmp::PartialEq,
            ::core::cmp::Eq,
            ::core::hash::Hash,
            ::core::default::Default,
        )]
        #[repr(transparent)]
        #(#other_attrs)*
        #visibility struct #name {
            word: #storage_ty,
        }

        const _: () = ::core::assert!(
            ::core::mem::size_of::<#name>() == ::core::mem::size_of::<#storage_ty>(),
        );

        #[allow(dead_code)]
        impl #name {
            /// The register with every bit clear.
            pub const ZERO: Self = Self { word: 0 };

            /// Creates a register holding `raw` verbatim.
            #[inline(always)]
            #[must_use]
            pub const fn new(raw: #storage_ty) -> Self {
                Self { word: raw }
            }

            /// Returns the register's storage word.
            #[inline(always)]
            #[must_use]
            pub const fn to_raw(self) -> #storage_ty {
                self.word
            }

            #[doc = #fields_doc]
            #[inline(always)]
            pub fn fields(&mut self) -> #fields_name<'_> {
                #fields_name::new(::core::cell::Cell::from_mut(&mut self.word))
            }

            #(#accessors)*
        }

        #fields_struct

        impl #crate_path::Register for #name {
            type Storage = #storage_ty;

            const ZERO: Self = Self { word: 0 };

            const LAYOUT: &'static [#crate_path::FieldInfo] = &[#(#layout_entries),*];

            fn from_storage(value: #storage_ty) -> Self {
                Self { word: value }
            }

            fn to_storage(self) -> #storage_ty {
                self.word
            }

            fn storage_mut(&mut self) -> &mut #storage_ty {
                &mut self.word
            }
        }

        impl ::core::convert::From<#storage_ty> for #name {
            fn from(value: #storage_ty) -> Self {
                Self { word: value }
            }
        }

        impl ::core::convert::From<#name> for #storage_ty {
            fn from(value: #name) -> Self {
                value.word
            }
        }

        impl ::core::cmp::PartialEq<#storage_ty> for #name {
            fn eq(&self, other: &#storage_ty) -> bool {
                self.word == *other
            }
        }

        impl ::core::cmp::PartialEq<#name> for #storage_ty {
            fn eq(&self, other: &#name) -> bool {
                *self == other.word
            }
        }

        #debug_impl
    })
}

fn generate_fields_struct(
    cfg: &Config,
    name: &Ident,
    visibility: &syn::Visibility,
    storage_ty: &Ident,
    fields: &[&CheckedField],
) -> TokenStream {
    let crate_path = &cfg.crate_path;
    let fields_name = format_ident!("{}Fields", name);
    let doc = format!(
        "Views of every field of [`{name}`], all sharing one storage word.\n\n\
         Returned by [`{name}::fields`]. A write through any member is visible through every \
         member whose bits overlap it."
    );

    let members = fields.iter().map(|field| {
        let attrs = &field.field.attrs;
        let field_visibility = &field.field.visibility;
        let field_ident = &field.field.name;
        let start = Literal::u32_unsuffixed(field.start);
        let len = Literal::u32_unsuffixed(field.len);
        quote! {
            #(#attrs)*
            #field_visibility #field_ident: #crate_path::Field<'a, #storage_ty, #start, #len>,
        }
    });
    let initializers = fields.iter().map(|field| {
        let field_ident = &field.field.name;
        quote! { #field_ident: #crate_path::Field::new(word), }
    });

    quote! {
        #[doc = #doc]
        #[allow(dead_code)]
        #[derive(::core::clone::Clone, ::core::marker::Copy, ::core::fmt::Debug)]
        #visibility struct #fields_name<'a> {
            #(#members)*
            _word: &'a ::core::cell::Cell<#storage_ty>,
        }

        impl<'a> #fields_name<'a> {
            fn new(word: &'a ::core::cell::Cell<#storage_ty>) -> Self {
                Self {
                    #(#initializers)*
                    _word: word,
                }
            }
        }
    }
}

fn generate_accessors(cfg: &Config, storage_ty: &Ident, field: &CheckedField) -> TokenStream {
    let crate_path = &cfg.crate_path;
    let attrs = &field.field.attrs;
    let visibility = &field.field.visibility;
    let name = field.field.name.unraw().to_string();
    let name_span = field.name_span;
    let start = Literal::u32_unsuffixed(field.start);
    let len = Literal::u32_unsuffixed(field.len);
    let end = field.end();
    let bit_range = quote! { #crate_path::BitRange::<#storage_ty, #start, #len>::new() };

    let get_method_name = &field.field.name;
    let set_method_name = format_ident!("set_{}", name, span = name_span);
    let with_method_name = format_ident!("with_{}", name, span = name_span);
    let mut_method_name = format_ident!("{}_mut", name, span = name_span);

    let get_method = {
        let doc = format!("Reads the `{name}` field (bits {}..{end}).", field.start);
        quote! {
            #(#attrs)*
            #[doc = ""]
            #[doc = #doc]
            #[inline(always)]
            #[must_use]
            #visibility fn #get_method_name(&self) -> #storage_ty {
                #bit_range.get(self.word)
            }
        }
    };

    let set_method = {
        let doc = format!(
            "Writes the `{name}` field, discarding bits of `value` above the field's {} bit(s).",
            field.len,
        );
        quote! {
            #[doc = #doc]
            #[inline(always)]
            #visibility fn #set_method_name(&mut self, value: #storage_ty) {
                self.word = #bit_range.set(self.word, value);
            }
        }
    };

    let with_method = {
        let doc = format!("Returns a copy of the register with the `{name}` field written.");
        quote! {
            #[doc = #doc]
            #[inline(always)]
            #[must_use]
            #visibility fn #with_method_name(mut self, value: #storage_ty) -> Self {
                self.#set_method_name(value);
                self
            }
        }
    };

    let mut_method = {
        let doc = format!(
            "Returns a view of the `{name}` field that supports assignment and compound operators."
        );
        quote! {
            #[doc = #doc]
            #[inline(always)]
            #visibility fn #mut_method_name(
                &mut self,
            ) -> #crate_path::Field<'_, #storage_ty, #start, #len> {
                #crate_path::Field::from_mut(&mut self.word)
            }
        }
    };

    quote! {
        #get_method
        #set_method
        #with_method
        #mut_method
    }
}
