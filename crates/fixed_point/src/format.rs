//! Q-format layout descriptor
//!
//! A layout is written as `S<significand>Q<exponent>` or
//! `U<significand>Q<exponent>`. For signed layouts the significand count
//! includes the sign bit, so `S4Q2` is 1 sign bit, 3 integer bits and
//! 2 fractional bits.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FixedPointError, Result};

/// Widest layout the codec supports (patterns are carried in `u128`)
pub const MAX_TOTAL_BITS: u32 = u128::BITS;

/// Fixed-point layout: signedness, integer bits and fractional bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QFormat {
    signed: bool,
    significand_bits: u32,
    exponent_bits: u32,
}

impl QFormat {
    /// Build a layout from its parts, applying the same checks as [`QFormat::parse`]
    pub fn new(signed: bool, significand_bits: u32, exponent_bits: u32) -> Result<Self> {
        let specifier = format!(
            "{}{}Q{}",
            sign_letter(signed),
            significand_bits,
            exponent_bits
        );
        Self::validated(&specifier, signed, significand_bits, exponent_bits)
    }

    /// Parse a specifier matching `[SU][0-9]+Q[0-9]+`
    pub fn parse(specifier: &str) -> Result<Self> {
        let signed = match specifier.as_bytes().first() {
            Some(b'S') => true,
            Some(b'U') => false,
            _ => {
                return Err(FixedPointError::invalid_format(
                    specifier,
                    "must start with 'S' or 'U'",
                ))
            }
        };

        let (significand, exponent) = specifier[1..].split_once('Q').ok_or_else(|| {
            FixedPointError::invalid_format(specifier, "is missing the 'Q' separator")
        })?;

        let significand_bits = parse_bit_count(specifier, significand, "significand")?;
        let exponent_bits = parse_bit_count(specifier, exponent, "exponent")?;

        Self::validated(specifier, signed, significand_bits, exponent_bits)
    }

    fn validated(
        specifier: &str,
        signed: bool,
        significand_bits: u32,
        exponent_bits: u32,
    ) -> Result<Self> {
        if signed && significand_bits == 0 {
            return Err(FixedPointError::invalid_format(
                specifier,
                "needs at least one significand bit to hold the sign",
            ));
        }

        let magnitude_bits = significand_bits - u32::from(signed);
        if magnitude_bits == 0 && exponent_bits == 0 {
            return Err(FixedPointError::invalid_format(
                specifier,
                "has no magnitude or fractional bits",
            ));
        }

        let total = u64::from(significand_bits) + u64::from(exponent_bits);
        if total > u64::from(MAX_TOTAL_BITS) {
            return Err(FixedPointError::invalid_format(
                specifier,
                format!("is {total} bits wide, at most {MAX_TOTAL_BITS} are supported"),
            ));
        }

        Ok(Self {
            signed,
            significand_bits,
            exponent_bits,
        })
    }

    pub fn is_signed(&self) -> bool {
        self.signed
    }

    /// Integer-part bits as written in the specifier (sign bit included)
    pub fn significand_bits(&self) -> u32 {
        self.significand_bits
    }

    /// Fractional bits
    pub fn exponent_bits(&self) -> u32 {
        self.exponent_bits
    }

    /// Integer-part bits left once the sign bit is carved out
    pub fn magnitude_bits(&self) -> u32 {
        self.significand_bits - u32::from(self.signed)
    }

    /// Width of the magnitude field: integer plus fractional bits, no sign
    pub fn value_bits(&self) -> u32 {
        self.magnitude_bits() + self.exponent_bits
    }

    /// Width of a full bit pattern
    pub fn total_bits(&self) -> u32 {
        self.significand_bits + self.exponent_bits
    }

    /// Scale factor `2^exponent_bits`
    pub fn scale(&self) -> f64 {
        pow2(self.exponent_bits as i32)
    }

    /// Smallest representable value
    pub fn min_value(&self) -> f64 {
        if self.signed {
            -pow2(self.magnitude_bits() as i32)
        } else {
            0.0
        }
    }

    /// Largest representable value, one step below the next power of two
    pub fn max_value(&self) -> f64 {
        pow2(self.magnitude_bits() as i32) - pow2(-(self.exponent_bits as i32))
    }

    /// Mask covering every bit of the pattern
    pub fn full_mask(&self) -> u128 {
        low_mask(self.total_bits())
    }

    /// Mask covering the magnitude field
    pub fn magnitude_mask(&self) -> u128 {
        low_mask(self.value_bits())
    }

    /// The sign bit, for signed layouts
    pub fn sign_bit(&self) -> Option<u128> {
        self.signed.then(|| 1u128 << self.value_bits())
    }

    /// Whether `bits` has nothing set above the layout's width
    pub fn fits(&self, bits: u128) -> bool {
        bits & !self.full_mask() == 0
    }
}

/// Parse a format specifier into a [`QFormat`]
pub fn parse_format(specifier: &str) -> Result<QFormat> {
    QFormat::parse(specifier)
}

fn sign_letter(signed: bool) -> char {
    if signed {
        'S'
    } else {
        'U'
    }
}

fn parse_bit_count(specifier: &str, digits: &str, field: &str) -> Result<u32> {
    if digits.is_empty() {
        return Err(FixedPointError::invalid_format(
            specifier,
            format!("is missing the {field} bit count"),
        ));
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FixedPointError::invalid_format(
            specifier,
            format!("has a non-decimal {field} bit count {digits:?}"),
        ));
    }
    digits.parse().map_err(|_| {
        FixedPointError::invalid_format(specifier, format!("has a {field} bit count that is too large"))
    })
}

fn pow2(exp: i32) -> f64 {
    2f64.powi(exp)
}

fn low_mask(bits: u32) -> u128 {
    if bits >= u128::BITS {
        u128::MAX
    } else {
        (1u128 << bits) - 1
    }
}

impl fmt::Display for QFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}Q{}",
            sign_letter(self.signed),
            self.significand_bits,
            self.exponent_bits
        )
    }
}

impl FromStr for QFormat {
    type Err = FixedPointError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for QFormat {
    type Error = FixedPointError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<QFormat> for String {
    fn from(format: QFormat) -> Self {
        format.to_string()
    }
}
