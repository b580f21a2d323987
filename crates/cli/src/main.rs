//! QCodec CLI
//!
//! Encode and decode Q-format fixed-point values from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Float to bit pattern
//! qcodec encode S2Q2 -1.75
//!
//! # Saturate instead of failing on out-of-range input
//! qcodec encode S2Q2 2.25 --strategy skip --radix hex
//!
//! # Bit pattern to float
//! qcodec decode S2Q2 0b1000
//!
//! # Layout summary
//! qcodec describe S4Q4 --json
//! ```

mod pattern;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use qcodec_fixed_point::{Codec, CodecConfig, ErrorStrategy, QFormat};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::pattern::RawPattern;

#[derive(Parser)]
#[command(name = "qcodec")]
#[command(version)]
#[command(about = "Convert between floats and Q-format fixed-point bit patterns")]
#[command(long_about = r#"
Convert between floats and Q-format fixed-point bit patterns.

A layout is written S<significand>Q<exponent> (signed, sign bit counted in
the significand) or U<significand>Q<exponent> (unsigned). Signed patterns
are sign-magnitude encoded.

Environment:
  QCODEC_ERROR_STRATEGY   default strategy for encode (raise | skip)
  RUST_LOG                log filter, e.g. qcodec_fixed_point=debug
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a float into a bit pattern
    Encode {
        /// Layout specifier, e.g. S4Q2
        format: String,

        /// Value to encode
        #[arg(allow_hyphen_values = true)]
        value: f64,

        /// Out-of-range handling (raise | skip), overrides QCODEC_ERROR_STRATEGY
        #[arg(short, long)]
        strategy: Option<ErrorStrategy>,

        /// Output radix
        #[arg(short, long, value_enum, default_value = "bin")]
        radix: Radix,
    },

    /// Convert a bit pattern into a float
    Decode {
        /// Layout specifier, e.g. S4Q2
        format: String,

        /// Bit pattern: decimal, 0b..., 0o... or 0x...
        #[arg(allow_hyphen_values = true)]
        pattern: String,
    },

    /// Show a layout's widths and range
    Describe {
        /// Layout specifier, e.g. S4Q2
        format: String,

        /// Print JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Radix {
    Bin,
    Hex,
    Dec,
}

/// Layout summary printed by `describe`
#[derive(Debug, Serialize)]
struct Description {
    format: QFormat,
    signed: bool,
    significand_bits: u32,
    magnitude_bits: u32,
    exponent_bits: u32,
    total_bits: u32,
    min_value: f64,
    max_value: f64,
    resolution: f64,
}

impl From<QFormat> for Description {
    fn from(format: QFormat) -> Self {
        Self {
            format,
            signed: format.is_signed(),
            significand_bits: format.significand_bits(),
            magnitude_bits: format.magnitude_bits(),
            exponent_bits: format.exponent_bits(),
            total_bits: format.total_bits(),
            min_value: format.min_value(),
            max_value: format.max_value(),
            resolution: 1.0 / format.scale(),
        }
    }
}

/// Log directives used when `RUST_LOG` is unset
const DEFAULT_LOG_FILTER: &str = "qcodec=warn,qcodec_fixed_point=warn";

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let codec = Codec::new(CodecConfig::from_env());

    match cli.command {
        Commands::Encode {
            format,
            value,
            strategy,
            radix,
        } => {
            let strategy = strategy.unwrap_or(codec.config().error_strategy);
            println!("{}", run_encode(&codec, &format, value, strategy, radix)?);
        }
        Commands::Decode { format, pattern } => {
            println!("{}", run_decode(&codec, &format, &pattern)?);
        }
        Commands::Describe { format, json } => {
            println!("{}", run_describe(&codec, &format, json)?);
        }
    }

    Ok(())
}

fn run_encode(
    codec: &Codec,
    format: &str,
    value: f64,
    strategy: ErrorStrategy,
    radix: Radix,
) -> Result<String> {
    tracing::debug!(format, value, %strategy, "encode");
    let layout = codec.format(format)?;
    let bits = codec
        .encode_with(format, value, strategy)
        .with_context(|| format!("Failed to encode {value} as {layout}"))?;

    Ok(match radix {
        Radix::Bin => format!("{:#0width$b}", bits, width = layout.total_bits() as usize + 2),
        Radix::Hex => format!("{bits:#x}"),
        Radix::Dec => bits.to_string(),
    })
}

fn run_decode(codec: &Codec, format: &str, pattern: &str) -> Result<String> {
    tracing::debug!(format, pattern, "decode");
    let raw: RawPattern = pattern.parse()?;
    let value = match raw {
        RawPattern::Unsigned(bits) => codec.decode(format, bits),
        RawPattern::Signed(bits) => codec.decode(format, bits),
    }
    .with_context(|| format!("Failed to decode {pattern} as {format}"))?;

    Ok(value.to_string())
}

fn run_describe(codec: &Codec, format: &str, json: bool) -> Result<String> {
    let description = Description::from(codec.format(format)?);

    if json {
        return Ok(serde_json::to_string_pretty(&description)?);
    }

    Ok([
        format!("Format:         {}", description.format),
        format!("Signed:         {}", if description.signed { "yes" } else { "no" }),
        format!("Magnitude bits: {}", description.magnitude_bits),
        format!("Exponent bits:  {}", description.exponent_bits),
        format!("Total bits:     {}", description.total_bits),
        format!("Range:          [{}, {}]", description.min_value, description.max_value),
        format!("Resolution:     {}", description.resolution),
    ]
    .join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_log_filter() {
        let filter = tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER).unwrap();
        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::sink));
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("layered subscriber accepts events");
        });
    }

    #[test]
    fn test_encode_output() {
        let codec = Codec::default();
        assert_eq!(
            run_encode(&codec, "S2Q2", -1.75, ErrorStrategy::Raise, Radix::Bin).unwrap(),
            "0b1111"
        );
        assert_eq!(
            run_encode(&codec, "S4Q4", 0.0625, ErrorStrategy::Raise, Radix::Bin).unwrap(),
            "0b00000001"
        );
        assert_eq!(
            run_encode(&codec, "S2Q2", 2.25, ErrorStrategy::Skip, Radix::Hex).unwrap(),
            "0x7"
        );
        assert_eq!(
            run_encode(&codec, "U2Q2", 1.0, ErrorStrategy::Raise, Radix::Dec).unwrap(),
            "4"
        );
    }

    #[test]
    fn test_encode_out_of_range() {
        let codec = Codec::default();
        assert!(run_encode(&codec, "U2Q2", 4.0, ErrorStrategy::Raise, Radix::Bin).is_err());
    }

    #[test]
    fn test_negative_value_argument() {
        let cli = Cli::try_parse_from(["qcodec", "encode", "S2Q2", "-1.5"]).unwrap();
        assert!(matches!(cli.command, Commands::Encode { value, .. } if value == -1.5));
    }

    #[test]
    fn test_strategy_argument() {
        let cli =
            Cli::try_parse_from(["qcodec", "encode", "S2Q2", "3", "--strategy", "skip"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Encode { strategy: Some(ErrorStrategy::Skip), .. }
        ));
        assert!(Cli::try_parse_from(["qcodec", "encode", "S2Q2", "3", "-s", "pass"]).is_err());
    }

    #[test]
    fn test_decode_output() {
        let codec = Codec::default();
        assert_eq!(run_decode(&codec, "S2Q2", "0b1000").unwrap(), "-2");
        assert_eq!(run_decode(&codec, "S2Q2", "0x5").unwrap(), "1.25");
        assert_eq!(run_decode(&codec, "U2Q2", "15").unwrap(), "3.75");
        assert!(run_decode(&codec, "S2Q2", "-1").is_err());
        assert!(run_decode(&codec, "S2Q2", "0b10000").is_err());
    }

    #[test]
    fn test_describe() {
        let codec = Codec::default();
        let text = run_describe(&codec, "S4Q2", false).unwrap();
        assert!(text.contains("Range:          [-8, 7.75]"));

        let json: serde_json::Value =
            serde_json::from_str(&run_describe(&codec, "S4Q2", true).unwrap()).unwrap();
        assert_eq!(json["format"], "S4Q2");
        assert_eq!(json["total_bits"], 6);
        assert_eq!(json["resolution"], 0.25);
    }
}
