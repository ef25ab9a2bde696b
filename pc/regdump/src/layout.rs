use std::io::{self, Write};
use std::num::ParseIntError;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use open_bitfield::{BitSpan, Register, Storage};
use tracing::{debug, warn};

/// Parses an unsigned integer in decimal, or in hex, binary, or octal with a `0x`, `0b`, or `0o`
/// prefix. Underscores are ignored.
pub fn parse_int(s: &str) -> Result<u128, ParseIntError> {
    let s = s.replace('_', "");
    let (digits, radix) = if let Some(rest) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        (rest, 16)
    } else if let Some(rest) = s.strip_prefix("0b").or_else(|| s.strip_prefix("0B")) {
        (rest, 2)
    } else if let Some(rest) = s.strip_prefix("0o").or_else(|| s.strip_prefix("0O")) {
        (rest, 8)
    } else {
        (s.as_str(), 10)
    };
    u128::from_str_radix(digits, radix)
}

/// A field given on the command line as `name=start:len`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub start: u32,
    pub len: u32,
}

impl FromStr for FieldSpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (name, range) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("expected `name=start:len`, got `{s}`"))?;
        if name.is_empty() {
            bail!("missing field name in `{s}`");
        }
        let (start, len) = range
            .split_once(':')
            .ok_or_else(|| anyhow!("expected `start:len` after `{name}=`, got `{range}`"))?;
        Ok(Self {
            name: name.to_string(),
            start: start
                .parse()
                .with_context(|| format!("invalid start bit `{start}` for field `{name}`"))?,
            len: len
                .parse()
                .with_context(|| format!("invalid length `{len}` for field `{name}`"))?,
        })
    }
}

/// A field write given on the command line as `name=value`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub name: String,
    pub value: u128,
}

impl FromStr for Assignment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (name, value) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("expected `name=value`, got `{s}`"))?;
        Ok(Self {
            name: name.to_string(),
            value: parse_int(value)
                .with_context(|| format!("invalid value `{value}` for field `{name}`"))?,
        })
    }
}

struct NamedSpan<S> {
    name: String,
    span: BitSpan<S>,
}

/// A register layout known only at run time.
pub struct Layout<S: Storage> {
    fields: Vec<NamedSpan<S>>,
}

impl<S: Storage> Layout<S> {
    /// The layout of a register type declared with `register!`, without its reserved fields.
    pub fn of_register<R: Register<Storage = S>>() -> Result<Self> {
        let fields = R::LAYOUT
            .iter()
            .filter(|info| !info.name.starts_with('_'))
            .map(|info| {
                let span = info
                    .span::<S>()
                    .with_context(|| format!("invalid field `{}`", info.name))?;
                Ok(NamedSpan {
                    name: info.name.to_string(),
                    span,
                })
            })
            .collect::<Result<_>>()?;
        Ok(Self { fields })
    }

    /// Builds a layout from command line field specs. Overlapping fields are allowed.
    pub fn from_specs(specs: &[FieldSpec]) -> Result<Self> {
        let mut fields: Vec<NamedSpan<S>> = Vec::with_capacity(specs.len());
        for spec in specs {
            if fields.iter().any(|field| field.name == spec.name) {
                bail!("duplicate field name `{}`", spec.name);
            }
            let span = BitSpan::new(spec.start, spec.len)
                .with_context(|| format!("invalid field `{}`", spec.name))?;
            for other in fields.iter().filter(|other| other.span.overlaps(span)) {
                debug!(field = %spec.name, other = %other.name, "fields overlap");
            }
            fields.push(NamedSpan {
                name: spec.name.clone(),
                span,
            });
        }
        Ok(Self { fields })
    }

    /// Writes each assignment in order, noting any value that had to be truncated.
    pub fn apply(&self, mut word: S, assignments: &[Assignment], out: &mut impl Write) -> Result<S> {
        for assignment in assignments {
            let field = self
                .fields
                .iter()
                .find(|field| field.name == assignment.name)
                .ok_or_else(|| anyhow!("no field named `{}`", assignment.name))?;
            word = field
                .span
                .set(word, S::from_u128_truncating(assignment.value));
            let stored = field.span.get(word);
            debug!(field = %field.name, requested = %assignment.value, %stored, "set field");
            if stored.to_u128() != assignment.value {
                warn!(field = %field.name, "value truncated");
                writeln!(
                    out,
                    "note: {} = {:#x} truncated to {:#x}",
                    field.name, assignment.value, stored,
                )?;
            }
        }
        Ok(word)
    }

    /// Prints every field of `word`, then the whole word in hex and binary.
    pub fn dump(&self, word: S, out: &mut impl Write) -> io::Result<()> {
        for field in &self.fields {
            let value = field.span.get(word);
            writeln!(
                out,
                "{} [{}..{}) = {} ({:#x})",
                field.name,
                field.span.start(),
                field.span.end(),
                value,
                value,
            )?;
        }
        let hex_width = (S::BITS / 4) as usize + 2;
        let bin_width = S::BITS as usize + 2;
        writeln!(out, "raw = {word:#0hex_width$x}")?;
        writeln!(out, "bin = {word:#0bin_width$b}")?;
        Ok(())
    }
}

/// Narrows `value` to a storage word, failing if any bits would be lost.
pub fn to_word<S: Storage>(value: u128) -> Result<S> {
    let word = S::from_u128_truncating(value);
    if word.to_u128() != value {
        bail!("{value:#x} does not fit in a {}-bit register", S::BITS);
    }
    Ok(word)
}
