use std::io::{self, Write};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use open_bitfield::example::{
    ProgramStatusRegister, MODE_ABORT, MODE_FIQ, MODE_IRQ, MODE_SUPERVISOR, MODE_SYSTEM,
    MODE_UNDEFINED, MODE_USER,
};
use open_bitfield::Storage;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::layout::{parse_int, to_word, Assignment, FieldSpec, Layout};

mod layout;

#[derive(Parser)]
#[command(name = "regdump", about = "Decodes raw register values into named bit fields.")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decodes an ARM program status register.
    ArmPsr {
        /// Fields to write before decoding, as `name=value`.
        #[arg(long = "set", value_name = "NAME=VALUE")]
        set: Vec<Assignment>,

        /// The raw register value.
        #[arg(value_parser = parse_int)]
        value: u128,
    },

    /// Decodes a value against fields given on the command line.
    Custom {
        /// Width of the register in bits: 8, 16, 32, 64, or 128.
        #[arg(long, default_value_t = 32)]
        width: u32,

        /// A field, as `name=start:len`. Fields may overlap.
        #[arg(long = "field", value_name = "NAME=START:LEN", required = true)]
        fields: Vec<FieldSpec>,

        /// Fields to write before decoding, as `name=value`.
        #[arg(long = "set", value_name = "NAME=VALUE")]
        set: Vec<Assignment>,

        /// The raw register value.
        #[arg(value_parser = parse_int)]
        value: u128,
    },
}

fn main() -> Result<()> {
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(io::stderr)
            .finish(),
    )?;

    let args = Args::parse();
    let stdout = io::stdout();
    run(args.command, &mut stdout.lock())
}

fn run(command: Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::ArmPsr { set, value } => {
            let layout = Layout::of_register::<ProgramStatusRegister>()?;
            let word = decode(&layout, value, &set, out)?;
            let psr = ProgramStatusRegister::new(word);
            writeln!(out, "mode: {}", mode_name(psr.mode()))?;
            if psr.thumb() != 0 {
                writeln!(out, "state: thumb")?;
            }
            Ok(())
        }
        Command::Custom {
            width,
            fields,
            set,
            value,
        } => {
            debug!(width, fields = fields.len(), "custom layout");
            match width {
                8 => decode(&Layout::<u8>::from_specs(&fields)?, value, &set, out).map(drop),
                16 => decode(&Layout::<u16>::from_specs(&fields)?, value, &set, out).map(drop),
                32 => decode(&Layout::<u32>::from_specs(&fields)?, value, &set, out).map(drop),
                64 => decode(&Layout::<u64>::from_specs(&fields)?, value, &set, out).map(drop),
                128 => decode(&Layout::<u128>::from_specs(&fields)?, value, &set, out).map(drop),
                _ => bail!("unsupported register width {width}; expected 8, 16, 32, 64, or 128"),
            }
        }
    }
}

fn decode<S: Storage>(
    layout: &Layout<S>,
    value: u128,
    set: &[Assignment],
    out: &mut impl Write,
) -> Result<S> {
    let word = layout.apply(to_word(value)?, set, out)?;
    layout.dump(word, out)?;
    Ok(word)
}

fn mode_name(mode: u32) -> &'static str {
    match mode {
        MODE_USER => "user",
        MODE_FIQ => "fiq",
        MODE_IRQ => "irq",
        MODE_SUPERVISOR => "supervisor",
        MODE_ABORT => "abort",
        MODE_UNDEFINED => "undefined",
        MODE_SYSTEM => "system",
        _ => "invalid",
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{run, Args};

    fn run_args(args: &[&str]) -> anyhow::Result<String> {
        let args = Args::try_parse_from(args)?;
        let mut out = Vec::new();
        run(args.command, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_arm_psr() {
        let output =
            run_args(&["regdump", "arm-psr", "--set", "mode=0x13", "0x6000_0030"]).unwrap();
        assert!(output.contains("carry [29..30) = 1 (0x1)\n"), "{output}");
        assert!(output.contains("thumb [5..6) = 1 (0x1)\n"), "{output}");
        assert!(
            output.ends_with(
                "raw = 0x60000033\n\
                 bin = 0b01100000000000000000000000110011\n\
                 mode: supervisor\n\
                 state: thumb\n",
            ),
            "{output}",
        );
    }

    #[test]
    fn test_arm_psr_value_too_wide() {
        assert!(run_args(&["regdump", "arm-psr", "0x1_0000_0000"]).is_err());
    }

    #[test]
    fn test_custom() {
        let output = run_args(&[
            "regdump",
            "custom",
            "--width",
            "16",
            "--field",
            "count=0:4",
            "--field",
            "rest=4:12",
            "--set",
            "count=0x13",
            "0xabc5",
        ])
        .unwrap();
        assert_eq!(
            output,
            "note: count = 0x13 truncated to 0x3\n\
             count [0..4) = 3 (0x3)\n\
             rest [4..16) = 2748 (0xabc)\n\
             raw = 0xabc3\n\
             bin = 0b1010101111000011\n",
        );
    }

    #[test]
    fn test_custom_requires_fields() {
        assert!(Args::try_parse_from(["regdump", "custom", "0"]).is_err());
    }

    #[test]
    fn test_custom_bad_width() {
        let args = ["regdump", "custom", "--width", "12", "--field", "a=0:1", "0"];
        assert!(run_args(&args).is_err());
    }
}
