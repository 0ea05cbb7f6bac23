//! Fixed-point money for catalog prices and order totals.
//!
//! # Scale
//!
//! 1 currency unit = `Micros(1_000_000)`. Prices arrive from the catalog
//! service either as JSON numbers (`12.5`) or as decimal strings
//! (`"12.50"`); both are converted to integer micros without going through
//! floating point. Digits finer than a micro are rounded on the way in;
//! after that `cost * quantity` is exact and the only other rounding is
//! when a total is rendered to two decimal places.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Fractional digits held exactly.
const SCALE_DIGITS: usize = 6;

/// More integer digits than this cannot fit in `i64` micros.
const MAX_INT_DIGITS: i64 = 19;

// ---------------------------------------------------------------------------
// Micros newtype
// ---------------------------------------------------------------------------

/// A fixed-point monetary amount at 1e-6 scale (micros).
///
/// There is no `From<i64>` implementation; use [`Micros::new`] when a raw
/// integer is known to be a micros amount.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Micros(i64);

impl Micros {
    /// Zero monetary amount.
    pub const ZERO: Micros = Micros(0);

    /// Micros per whole currency unit.
    pub const SCALE: i64 = 1_000_000;

    #[inline]
    pub const fn new(raw: i64) -> Self {
        Micros(raw)
    }

    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Multiply a per-unit price by an integer quantity.
    ///
    /// Returns `None` on `i64` overflow; callers decide how to surface it.
    #[inline]
    pub fn checked_mul_qty(self, qty: i64) -> Option<Micros> {
        self.0.checked_mul(qty).map(Micros)
    }

    /// Parse a decimal string (`"12"`, `"12.5"`, `".75"`, `"-3.10"`, `"1.5e3"`).
    ///
    /// Rules:
    /// - optional leading `+` or `-`
    /// - ASCII digits with an optional `.` and an optional `e`/`E` exponent
    /// - digits past the sixth decimal place round half away from zero
    ///   (`"0.30000000000000004"` is `0.3`, `"1e-7"` is zero)
    pub fn parse_decimal(s: &str) -> Result<Micros, MoneyError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MoneyError::Empty);
        }

        let invalid = || MoneyError::Invalid { raw: s.to_string() };
        let overflow = || MoneyError::Overflow { raw: s.to_string() };

        let (negative, unsigned) = if let Some(rest) = s.strip_prefix('-') {
            (true, rest)
        } else if let Some(rest) = s.strip_prefix('+') {
            (false, rest)
        } else {
            (false, s)
        };

        let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
            Some((m, e)) => (m, e.parse::<i32>().map_err(|_| invalid())?),
            None => (unsigned, 0),
        };

        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

        let all_digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !all_digits(int_part) || !all_digits(frac_part) {
            return Err(invalid());
        }

        let digits = format!("{int_part}{frac_part}");
        let digits = digits.trim_start_matches('0');
        if digits.is_empty() {
            return Ok(Micros::ZERO);
        }

        // Position of the decimal point within `digits`, counted from the left.
        let point = i64::from(exponent) + int_part.len() as i64
            - (int_part.len() + frac_part.len() - digits.len()) as i64;
        if point > MAX_INT_DIGITS {
            return Err(overflow());
        }
        if point < -(SCALE_DIGITS as i64) {
            // Below half a micro.
            return Ok(Micros::ZERO);
        }

        let (whole, frac) = if point <= 0 {
            (String::new(), format!("{}{digits}", "0".repeat((-point) as usize)))
        } else if point as usize >= digits.len() {
            (format!("{digits:0<width$}", width = point as usize), String::new())
        } else {
            let (w, f) = digits.split_at(point as usize);
            (w.to_string(), f.to_string())
        };

        let int_val: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse::<i64>().map_err(|_| overflow())?
        };

        let kept = frac.get(..SCALE_DIGITS).unwrap_or(frac.as_str());
        let frac_val: i64 = format!("{kept:0<width$}", width = SCALE_DIGITS)
            .parse::<i64>()
            .map_err(|_| invalid())?;
        let round_up = frac
            .as_bytes()
            .get(SCALE_DIGITS)
            .is_some_and(|d| *d >= b'5');

        let micros = int_val
            .checked_mul(Self::SCALE)
            .and_then(|v| v.checked_add(frac_val + i64::from(round_up)))
            .ok_or_else(overflow)?;

        Ok(Micros(if negative { -micros } else { micros }))
    }

    /// Render rounded to two decimal places, half away from zero.
    ///
    /// `Micros::new(12_345_000)` renders as `"12.35"`.
    pub fn to_fixed_2(self) -> String {
        let abs = self.0.unsigned_abs();
        let cents = (abs + 5_000) / 10_000;
        let sign = if self.0 < 0 && cents != 0 { "-" } else { "" };
        format!("{sign}{}.{:02}", cents / 100, cents % 100)
    }

    /// Shortest decimal string that round-trips through [`Micros::parse_decimal`],
    /// keeping at least two fractional digits (`"12.50"`, `"0.125"`).
    pub fn to_decimal_string(self) -> String {
        let abs = self.0.unsigned_abs();
        let units = abs / Self::SCALE as u64;
        let frac = format!("{:06}", abs % Self::SCALE as u64);
        let trimmed = frac.trim_end_matches('0');
        let frac = if trimmed.len() < 2 {
            &frac[..2]
        } else {
            trimmed
        };
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{sign}{units}.{frac}")
    }
}

impl fmt::Display for Micros {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors produced while converting a decimal amount to [`Micros`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    Empty,
    Invalid { raw: String },
    Overflow { raw: String },
    Negative { raw: String },
}

impl fmt::Display for MoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyError::Empty => write!(f, "amount is empty"),
            MoneyError::Invalid { raw } => write!(f, "amount could not be parsed: '{raw}'"),
            MoneyError::Overflow { raw } => write!(f, "amount out of range: '{raw}'"),
            MoneyError::Negative { raw } => write!(f, "amount must be >= 0: '{raw}'"),
        }
    }
}

impl std::error::Error for MoneyError {}

// ---------------------------------------------------------------------------
// Serde (wire boundary)
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum WireDecimal {
    Number(serde_json::Number),
    Text(String),
}

/// Deserialize a non-negative price given either as a JSON number or a
/// decimal string.
pub fn deserialize_price<'de, D>(deserializer: D) -> Result<Micros, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match WireDecimal::deserialize(deserializer)? {
        WireDecimal::Number(n) => n.to_string(),
        WireDecimal::Text(s) => s,
    };
    let micros = Micros::parse_decimal(&raw).map_err(serde::de::Error::custom)?;
    if micros.is_negative() {
        return Err(serde::de::Error::custom(MoneyError::Negative { raw }));
    }
    Ok(micros)
}

/// Serialize as a decimal string, the same shape the catalog service uses.
pub fn serialize_price<S>(value: &Micros, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_decimal_string())
}

impl Serialize for Micros {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_price(self, serializer)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
