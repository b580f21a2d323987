//! Float ⇄ fixed-point conversion
//!
//! Signed layouts use sign-magnitude encoding: the top bit is the sign and
//! the remaining bits hold the absolute value. The pattern with only the
//! sign bit set is the most negative value, not `-0`.

use std::fmt;

use crate::error::{FixedPointError, Result};
use crate::format::QFormat;
use crate::strategy::ErrorStrategy;

/// Host integer accepted as a raw bit pattern
///
/// Negative values have no pattern and are rejected by the decoder.
pub trait BitPattern: Copy + fmt::Display {
    fn to_pattern(self) -> Option<u128>;
}

macro_rules! impl_bit_pattern {
    ($($t:ty),*) => {
        $(
            impl BitPattern for $t {
                fn to_pattern(self) -> Option<u128> {
                    u128::try_from(self).ok()
                }
            }
        )*
    };
}

impl_bit_pattern!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl QFormat {
    /// Encode `value` into this layout's bit pattern
    ///
    /// Rounds half away from zero. The range check runs on `value` before
    /// rounding, so under [`ErrorStrategy::Skip`] the exact bounds take the
    /// saturation path.
    pub fn encode(&self, value: f64, strategy: ErrorStrategy) -> Result<u128> {
        if value.is_nan() {
            return Err(FixedPointError::InvalidValueType(value));
        }

        let min = self.min_value();
        let max = self.max_value();

        match strategy {
            ErrorStrategy::Raise => {
                if !(min..=max).contains(&value) {
                    return Err(FixedPointError::OutOfRange { value, min, max });
                }
            }
            ErrorStrategy::Skip => {
                if value <= min {
                    if value < min {
                        tracing::debug!(format = %self, value, min, "saturating to minimum");
                    }
                    return Ok(self.min_pattern());
                }
                if value >= max {
                    if value > max {
                        tracing::debug!(format = %self, value, max, "saturating to maximum");
                    }
                    return Ok(self.max_pattern());
                }
            }
        }

        // Scaling by a power of two is exact; `round` breaks ties away from zero
        let magnitude = (value.abs() * self.scale()).round() as u128;

        let pattern = match self.sign_bit() {
            Some(sign_bit) if value < 0.0 && magnitude != 0 => magnitude.min(sign_bit) | sign_bit,
            _ => magnitude.min(self.magnitude_mask()),
        };

        tracing::trace!(format = %self, value, pattern = ?pattern, "encoded");
        Ok(pattern)
    }

    /// Decode a bit pattern of this layout
    pub fn decode<P: BitPattern>(&self, bits: P) -> Result<f64> {
        let pattern = bits.to_pattern().ok_or_else(|| {
            FixedPointError::InvalidValue(format!(
                "{bits} is negative, expected an unsigned bit pattern"
            ))
        })?;

        if !self.fits(pattern) {
            return Err(FixedPointError::InvalidValue(format!(
                "{pattern:#b} does not fit in {self} ({} bits)",
                self.total_bits()
            )));
        }

        if pattern == 0 {
            return Ok(0.0);
        }

        let value = match self.sign_bit() {
            Some(sign_bit) if pattern & sign_bit != 0 => {
                if pattern == sign_bit {
                    self.min_value()
                } else {
                    -((pattern & self.magnitude_mask()) as f64) / self.scale()
                }
            }
            _ => pattern as f64 / self.scale(),
        };

        tracing::trace!(format = %self, pattern = ?pattern, value, "decoded");
        Ok(value)
    }

    /// Pattern of the most negative value (zero for unsigned layouts)
    pub fn min_pattern(&self) -> u128 {
        self.sign_bit().unwrap_or(0)
    }

    /// Pattern of the most positive value
    pub fn max_pattern(&self) -> u128 {
        self.magnitude_mask()
    }
}

/// Convert a float into the bit pattern of the layout named by `specifier`
pub fn float_to_fixed(specifier: &str, value: f64, strategy: ErrorStrategy) -> Result<u128> {
    QFormat::parse(specifier)?.encode(value, strategy)
}

/// Convert a bit pattern of the layout named by `specifier` back into a float
pub fn fixed_to_float<P: BitPattern>(specifier: &str, bits: P) -> Result<f64> {
    QFormat::parse(specifier)?.decode(bits)
}
