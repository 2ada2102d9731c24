//! Arbitrary-precision decimal numbers for quantity amounts.
//!
//! A decimal is stored as `unscaled * 10^-scale`, with the unscaled part kept
//! as a string of ASCII digits. The scale is part of the value: `+1.0` and
//! `+1.00` are different decimals, which keeps the wire text stable across a
//! decode/encode round trip.

use std::fmt;
use std::str::FromStr;

use crate::error::ConstructionError;

/// Largest exponent accepted in scientific notation input.
const MAX_EXPONENT: i64 = 10_000;

/// Arbitrary-precision signed decimal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal {
    negative: bool,
    /// Unscaled magnitude without leading zeros ("0" for zero).
    digits: String,
    scale: u32,
}

impl Decimal {
    /// Parses decimal text: optional sign, digits with an optional fraction,
    /// optional `e`/`E` exponent.
    pub fn parse(input: &str) -> Result<Decimal, ConstructionError> {
        let invalid = || ConstructionError::InvalidDecimal { input: input.to_string() };

        let (negative, rest) = match input.as_bytes().first() {
            Some(b'+') => (false, &input[1..]),
            Some(b'-') => (true, &input[1..]),
            _ => (false, input),
        };

        let (mantissa, exponent) = match rest.find(['e', 'E']) {
            Some(pos) => {
                let exp: i64 = rest[pos + 1..].parse().map_err(|_| invalid())?;
                if exp.abs() > MAX_EXPONENT {
                    return Err(invalid());
                }
                (&rest[..pos], exp)
            }
            None => (rest, 0),
        };

        let (int_part, frac_part) = match mantissa.split_once('.') {
            Some((i, f)) => (i, f),
            None => (mantissa, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let mut digits = String::with_capacity(int_part.len() + frac_part.len());
        digits.push_str(int_part);
        digits.push_str(frac_part);
        let mut scale = frac_part.len() as i64 - exponent;
        if scale < 0 {
            digits.extend(std::iter::repeat_n('0', (-scale) as usize));
            scale = 0;
        }

        let trimmed = digits.trim_start_matches('0');
        let digits = if trimmed.is_empty() { "0".to_string() } else { trimmed.to_string() };
        let negative = negative && digits != "0";

        Ok(Decimal {
            negative,
            digits,
            scale: u32::try_from(scale).map_err(|_| invalid())?,
        })
    }

    /// Returns true if the value is zero (at any scale).
    pub fn is_zero(&self) -> bool {
        self.digits == "0"
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Number of digits after the decimal point.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// The unscaled magnitude as decimal digits.
    pub fn unscaled_digits(&self) -> &str {
        &self.digits
    }

    /// Formats with an explicit leading sign, as the wire format requires.
    pub fn to_wire_string(&self) -> String {
        let sign = if self.negative { '-' } else { '+' };
        format!("{}{}", sign, self.magnitude())
    }

    fn magnitude(&self) -> String {
        let scale = self.scale as usize;
        if scale == 0 {
            return self.digits.clone();
        }
        let mut padded = String::with_capacity(scale + 2);
        if self.digits.len() <= scale {
            padded.extend(std::iter::repeat_n('0', scale + 1 - self.digits.len()));
        }
        padded.push_str(&self.digits);
        let point = padded.len() - scale;
        format!("{}.{}", &padded[..point], &padded[point..])
    }
}

impl FromStr for Decimal {
    type Err = ConstructionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::parse(s)
    }
}

impl From<i64> for Decimal {
    fn from(v: i64) -> Self {
        Decimal {
            negative: v < 0,
            digits: v.unsigned_abs().to_string(),
            scale: 0,
        }
    }
}

/// Formats without a leading `+` (negative values keep their `-`).
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "{}", self.magnitude())
    }
}
