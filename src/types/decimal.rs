// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! 128-bit decimal in the four-word layout used on the wire.
//!
//! A decimal is a 96-bit unsigned mantissa (`lo`, `mid`, `hi`), a sign bit
//! and a power-of-ten scale packed into `flags`:
//!
//! ```text
//! flags bits 0-15   must be zero
//! flags bits 16-23  scale (0..=28)
//! flags bits 24-30  must be zero
//! flags bit 31      sign (1 = negative)
//! ```
//!
//! Values are compared bit-for-bit: `1.0` and `1.00` are different decimals.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{CodecError, Result};

const SIGN_MASK: u32 = 0x8000_0000;
const SCALE_MASK: u32 = 0x00FF_0000;
const SCALE_SHIFT: u32 = 16;
const RESERVED_MASK: u32 = !(SIGN_MASK | SCALE_MASK);

/// Largest scale a decimal may carry.
pub const MAX_SCALE: u8 = 28;

/// Largest mantissa magnitude (2^96 - 1).
const MAX_MANTISSA: u128 = (1u128 << 96) - 1;

/// A 128-bit decimal stored as four little-endian 32-bit words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Decimal {
    /// Low 32 bits of the mantissa
    pub lo: u32,
    /// Middle 32 bits of the mantissa
    pub mid: u32,
    /// High 32 bits of the mantissa
    pub hi: u32,
    /// Sign and scale
    pub flags: u32,
}

impl Decimal {
    /// The zero decimal (positive, scale 0).
    pub const ZERO: Decimal = Decimal {
        lo: 0,
        mid: 0,
        hi: 0,
        flags: 0,
    };

    /// Build a decimal from a signed mantissa and a scale.
    ///
    /// The represented value is `mantissa / 10^scale`.
    pub fn new(mantissa: i128, scale: u8) -> Result<Self> {
        if scale > MAX_SCALE {
            return Err(CodecError::invalid_value(
                "decimal",
                format!("scale {scale} exceeds {MAX_SCALE}"),
            ));
        }
        let magnitude = mantissa.unsigned_abs();
        if magnitude > MAX_MANTISSA {
            return Err(CodecError::invalid_value(
                "decimal",
                "mantissa does not fit in 96 bits",
            ));
        }
        let mut flags = (scale as u32) << SCALE_SHIFT;
        if mantissa < 0 {
            flags |= SIGN_MASK;
        }
        Ok(Self {
            lo: magnitude as u32,
            mid: (magnitude >> 32) as u32,
            hi: (magnitude >> 64) as u32,
            flags,
        })
    }

    /// Build a decimal from its four words, validating the flags word.
    pub fn from_words(words: [u32; 4]) -> Result<Self> {
        let [lo, mid, hi, flags] = words;
        if flags & RESERVED_MASK != 0 {
            return Err(CodecError::invalid_value(
                "decimal",
                format!("reserved flag bits set in {flags:#010x}"),
            ));
        }
        let scale = ((flags & SCALE_MASK) >> SCALE_SHIFT) as u8;
        if scale > MAX_SCALE {
            return Err(CodecError::invalid_value(
                "decimal",
                format!("scale {scale} exceeds {MAX_SCALE}"),
            ));
        }
        Ok(Self { lo, mid, hi, flags })
    }

    /// The four words in wire order (lo, mid, hi, flags).
    pub fn to_words(&self) -> [u32; 4] {
        [self.lo, self.mid, self.hi, self.flags]
    }

    /// Power-of-ten scale (digits after the decimal point).
    pub fn scale(&self) -> u8 {
        ((self.flags & SCALE_MASK) >> SCALE_SHIFT) as u8
    }

    /// Check the sign bit.
    pub fn is_negative(&self) -> bool {
        self.flags & SIGN_MASK != 0
    }

    /// Unsigned 96-bit mantissa.
    pub fn magnitude(&self) -> u128 {
        (self.lo as u128) | ((self.mid as u128) << 32) | ((self.hi as u128) << 64)
    }

    /// Signed mantissa.
    pub fn mantissa(&self) -> i128 {
        let magnitude = self.magnitude() as i128;
        if self.is_negative() {
            -magnitude
        } else {
            magnitude
        }
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.magnitude().to_string();
        let scale = self.scale() as usize;
        if self.is_negative() {
            f.write_str("-")?;
        }
        if scale == 0 {
            return f.write_str(&digits);
        }
        if digits.len() <= scale {
            write!(f, "0.{}{}", "0".repeat(scale - digits.len()), digits)
        } else {
            let (int, frac) = digits.split_at(digits.len() - scale);
            write!(f, "{int}.{frac}")
        }
    }
}

impl FromStr for Decimal {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CodecError::invalid_value("decimal", format!("cannot parse '{s}'"));
        let trimmed = s.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let (int, frac) = body.split_once('.').unwrap_or((body, ""));
        if int.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if !int.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let scale = u8::try_from(frac.len()).map_err(|_| invalid())?;
        let digits = format!("{int}{frac}");
        let magnitude: u128 = if digits.is_empty() {
            0
        } else {
            digits.parse().map_err(|_| invalid())?
        };
        if magnitude > MAX_MANTISSA {
            return Err(invalid());
        }
        let mantissa = magnitude as i128;
        Decimal::new(if negative { -mantissa } else { mantissa }, scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(Decimal::default(), Decimal::ZERO);
        assert_eq!(Decimal::ZERO.to_string(), "0");
        assert!(!Decimal::ZERO.is_negative());
    }

    #[test]
    fn test_new_packs_sign_and_scale() {
        let d = Decimal::new(-12345, 3).unwrap();
        assert_eq!(d.lo, 12345);
        assert_eq!(d.flags, 0x8003_0000);
        assert_eq!(d.scale(), 3);
        assert!(d.is_negative());
        assert_eq!(d.mantissa(), -12345);
        assert_eq!(d.to_string(), "-12.345");
    }

    #[test]
    fn test_display_leading_zeros() {
        assert_eq!(Decimal::new(5, 3).unwrap().to_string(), "0.005");
        assert_eq!(Decimal::new(100, 0).unwrap().to_string(), "100");
    }

    #[test]
    fn test_max_mantissa_spans_all_words() {
        let d = Decimal::new((1i128 << 96) - 1, 0).unwrap();
        assert_eq!(d.to_words(), [u32::MAX, u32::MAX, u32::MAX, 0]);
        assert!(Decimal::new(1i128 << 96, 0).is_err());
    }

    #[test]
    fn test_from_words_rejects_bad_flags() {
        assert!(Decimal::from_words([1, 0, 0, 0x0000_0001]).is_err());
        assert!(Decimal::from_words([1, 0, 0, 0x0100_0000]).is_err());
        assert!(Decimal::from_words([1, 0, 0, 29 << 16]).is_err());
        assert!(Decimal::from_words([1, 0, 0, 0x801C_0000]).is_ok());
    }

    #[test]
    fn test_parse() {
        let d: Decimal = "-12.345".parse().unwrap();
        assert_eq!(d, Decimal::new(-12345, 3).unwrap());
        let d: Decimal = "42".parse().unwrap();
        assert_eq!(d, Decimal::new(42, 0).unwrap());
        assert!("1.2.3".parse::<Decimal>().is_err());
        assert!("abc".parse::<Decimal>().is_err());
        assert!("".parse::<Decimal>().is_err());
    }
}
