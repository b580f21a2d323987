//! QCodec Fixed-Point Encoding
//!
//! Converts between `f64` and Q-format bit patterns whose layout is chosen at
//! runtime with a specifier such as `S4Q2` or `U0Q8`. Signed layouts are
//! sign-magnitude encoded, rounding is half away from zero, and out-of-range
//! values either fail or saturate depending on the [`ErrorStrategy`].
//!
//! ```
//! use qcodec_fixed_point::{fixed_to_float, float_to_fixed, ErrorStrategy};
//!
//! assert_eq!(float_to_fixed("S2Q2", -1.75, ErrorStrategy::Raise).unwrap(), 0b1111);
//! assert_eq!(fixed_to_float("S2Q2", 0b1000u8).unwrap(), -2.0);
//! ```

mod codec;
mod config;
mod error;
mod fixed;
mod format;
mod strategy;

pub use codec::Codec;
pub use config::CodecConfig;
pub use error::{FixedPointError, Result};
pub use fixed::{fixed_to_float, float_to_fixed, BitPattern};
pub use format::{parse_format, QFormat, MAX_TOTAL_BITS};
pub use strategy::ErrorStrategy;
