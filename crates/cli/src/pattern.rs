//! Bit pattern arguments

use std::str::FromStr;

use anyhow::{bail, Context};

/// A pattern as typed by the user
///
/// Negative input is kept signed so the codec can reject it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawPattern {
    Unsigned(u128),
    Signed(i128),
}

impl FromStr for RawPattern {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let (negative, rest) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (radix, digits) = split_radix(rest);
        let digits = digits.replace('_', "");
        if digits.is_empty() {
            bail!("Empty bit pattern: {s:?}");
        }
        // `from_str_radix` would take a sign of its own here
        if digits.starts_with(['+', '-']) {
            bail!("Invalid bit pattern: {s:?}");
        }

        if negative {
            let value = i128::from_str_radix(&format!("-{digits}"), radix)
                .with_context(|| format!("Invalid bit pattern: {s:?}"))?;
            if value == 0 {
                bail!("Negative zero is not a bit pattern: {s:?}");
            }
            Ok(RawPattern::Signed(value))
        } else {
            let value = u128::from_str_radix(&digits, radix)
                .with_context(|| format!("Invalid bit pattern: {s:?}"))?;
            Ok(RawPattern::Unsigned(value))
        }
    }
}

fn split_radix(s: &str) -> (u32, &str) {
    let prefixes = [("0b", 2), ("0B", 2), ("0o", 8), ("0O", 8), ("0x", 16), ("0X", 16)];
    prefixes
        .iter()
        .find_map(|&(prefix, radix)| s.strip_prefix(prefix).map(|rest| (radix, rest)))
        .unwrap_or((10, s))
}
