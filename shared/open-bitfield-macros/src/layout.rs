use std::collections::HashSet;

use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Error, Ident, Result, Type};

use crate::ast::Field;

/// Names the generated register already uses for its own methods.
const RESERVED_NAMES: &[&str] = &["new", "to_raw", "fields"];

/// A storage type accepted for registers.
pub struct StorageType {
    pub ident: Ident,
    pub bits: u32,
}

impl StorageType {
    pub fn from_type(ty: &Type) -> Result<Self> {
        if let Type::Path(type_path) = ty {
            if type_path.qself.is_none() {
                if let Some(ident) = type_path.path.get_ident() {
                    let bits = match ident.to_string().as_str() {
                        "u8" => Some(8),
                        "u16" => Some(16),
                        "u32" => Some(32),
                        "u64" => Some(64),
                        "u128" => Some(128),
                        _ => None,
                    };
                    if let Some(bits) = bits {
                        return Ok(Self {
                            ident: ident.clone(),
                            bits,
                        });
                    }
                }
            }
        }
        Err(Error::new(
            ty.span(),
            "register storage must be one of `u8`, `u16`, `u32`, `u64`, or `u128`",
        ))
    }
}

/// A field whose range is known to fit its register's storage.
pub struct CheckedField<'a> {
    pub field: &'a Field,
    pub start: u32,
    pub len: u32,
    pub name_span: Span,
}

impl CheckedField<'_> {
    pub fn end(&self) -> u32 {
        self.start + self.len
    }
}

/// Checks every field against the storage width. Overlapping ranges are permitted.
///
/// All problems are reported together.
pub fn check_fields<'a>(
    storage: &StorageType,
    fields: impl IntoIterator<Item = &'a Field>,
) -> Result<Vec<CheckedField<'a>>> {
    let mut checked = Vec::new();
    let mut errors: Option<Error> = None;
    let mut push_error = |e: Error| {
        errors = Some(match errors.take() {
            Some(mut existing) => {
                existing.combine(e);
                existing
            }
            None => e,
        });
    };
    let mut seen = HashSet::new();

    for field in fields {
        let name = field.name.to_string();
        if !field.is_reserved() {
            if RESERVED_NAMES.contains(&name.as_str()) {
                push_error(Error::new(
                    field.name.span(),
                    format!("`{name}` is reserved for a generated method; choose another field name"),
                ));
                continue;
            }
            if !seen.insert(name.clone()) {
                push_error(Error::new(
                    field.name.span(),
                    format!("duplicate field name `{name}`"),
                ));
                continue;
            }
        }

        let (start, len) = match (
            field.start.base10_parse::<u32>(),
            field.len.base10_parse::<u32>(),
        ) {
            (Ok(start), Ok(len)) => (start, len),
            (Err(e), _) | (_, Err(e)) => {
                push_error(e);
                continue;
            }
        };
        if len == 0 {
            push_error(Error::new(
                field.len.span(),
                format!("field `{name}` must be at least one bit wide"),
            ));
            continue;
        }
        match start.checked_add(len) {
            Some(end) if end <= storage.bits => (),
            _ => {
                push_error(Error::new(
                    field.name.span(),
                    format!(
                        "field `{name}` covers bits {start}..{}, which do not fit in {}-bit storage",
                        u64::from(start) + u64::from(len),
                        storage.bits,
                    ),
                ));
                continue;
            }
        }

        checked.push(CheckedField {
            field,
            start,
            len,
            name_span: field.name.span(),
        });
    }

    match errors {
        Some(errors) => Err(errors),
        None => Ok(checked),
    }
}
