use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{braced, parenthesized, token, Attribute, Ident, LitInt, Path, Result, Token, Type, Visibility};

pub struct Input {
    _paren_token: token::Paren,
    pub crate_path: Path,
    _comma_token: Token![,],
    pub registers: Vec<Register>,
}

impl Parse for Input {
    fn parse(input: ParseStream) -> Result<Self> {
        let content;
        Ok(Input {
            _paren_token: parenthesized!(content in input),
            crate_path: content.parse()?,
            _comma_token: content.parse()?,
            registers: {
                let mut registers = Vec::new();
                while !content.is_empty() {
                    registers.push(content.parse()?);
                }
                registers
            },
        })
    }
}

pub struct Register {
    pub attrs: Vec<Attribute>,
    pub visibility: Visibility,
    _struct_token: Token![struct],
    pub name: Ident,
    _colon_token: Token![:],
    pub storage: Type,
    _brace_token: token::Brace,
    pub fields: Punctuated<Field, Token![,]>,
}

impl Parse for Register {
    fn parse(input: ParseStream) -> Result<Self> {
        let body;
        Ok(Self {
            attrs: input.call(Attribute::parse_outer)?,
            visibility: input.parse()?,
            _struct_token: input.parse()?,
            name: input.parse()?,
            _colon_token: input.parse()?,
            storage: input.parse()?,
            _brace_token: braced!(body in input),
            fields: body.parse_terminated(Field::parse, Token![,])?,
        })
    }
}

/// `name: start, length`
pub struct Field {
    pub attrs: Vec<Attribute>,
    pub visibility: Visibility,
    pub name: Ident,
    _colon_token: Token![:],
    pub start: LitInt,
    _comma_token: Token![,],
    pub len: LitInt,
}

impl Field {
    pub fn is_reserved(&self) -> bool {
        self.name.to_string().starts_with('_')
    }
}

impl Parse for Field {
    fn parse(input: ParseStream) -> Result<Self> {
        Ok(Self {
            attrs: input.call(Attribute::parse_outer)?,
            visibility: input.parse()?,
            name: input.parse()?,
            _colon_token: input.parse()?,
            start: input.parse()?,
            _comma_token: input.parse()?,
            len: input.parse()?,
        })
    }
}
