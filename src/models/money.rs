//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point drift when
//! summing many transactions. On the wire (backend JSON, snapshots, `--json`
//! output) amounts are decimal currency units such as `1500.25`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use super::lenient::LenientNumber;

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use budget_pulse::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from dollars and cents
    pub const fn from_dollars_cents(dollars: i64, cents: i64) -> Self {
        Self(dollars * 100 + cents)
    }

    /// Create a Money amount from a decimal value, rounding to the nearest cent
    ///
    /// Non-finite input (NaN, infinities) becomes zero.
    ///
    /// # Examples
    /// ```
    /// use budget_pulse::models::Money;
    /// assert_eq!(Money::from_decimal(12.345).cents(), 1235);
    /// ```
    pub fn from_decimal(value: f64) -> Self {
        if !value.is_finite() {
            return Self::zero();
        }
        Self((value * 100.0).round() as i64)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the amount as decimal currency units
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Get the whole dollars portion (truncated toward zero)
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// `percent`% of this amount, rounded to the cent
    pub fn percent(&self, percent: f64) -> Self {
        Self::round_cents(self.0 as f64 * percent / 100.0)
    }

    /// Multiply by a factor, rounding to the cent
    pub fn scale(&self, factor: f64) -> Self {
        Self::round_cents(self.0 as f64 * factor)
    }

    /// Divide by a count, rounding to the cent; zero for a zero divisor
    pub fn div_round(&self, divisor: u32) -> Self {
        if divisor == 0 {
            return Self::zero();
        }
        Self::round_cents(self.0 as f64 / divisor as f64)
    }

    fn round_cents(cents: f64) -> Self {
        if cents.is_finite() {
            Self(cents.round() as i64)
        } else {
            Self::zero()
        }
    }

    /// This amount as a percentage of `whole`; zero when `whole` is not positive
    pub fn percentage_of(&self, whole: Money) -> f64 {
        if whole.is_positive() {
            self.0 as f64 * 100.0 / whole.0 as f64
        } else {
            0.0
        }
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "10", "1,250.00".
    /// Digits past the second decimal place are dropped. Amounts that do
    /// not fit in i64 cents are rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let input = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(input.to_string());

        let (negative, rest) = match input.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, input),
        };

        // Currency symbol and thousands separators
        let rest = rest.strip_prefix('$').unwrap_or(rest);
        let cleaned: String = rest.chars().filter(|c| *c != ',').collect();

        let (whole, frac) = cleaned.split_once('.').unwrap_or((cleaned.as_str(), ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(whole) || !all_digits(frac) {
            return Err(invalid());
        }

        let dollars: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        // Only ASCII digits remain, so byte positions are char positions
        let cents_digits = &frac[..frac.len().min(2)];
        let cents: i64 = match cents_digits.len() {
            0 => 0,
            1 => cents_digits.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => cents_digits.parse().map_err(|_| invalid())?,
        };

        let total = dollars
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -total } else { total }))
    }

    /// Format with a currency symbol and thousands separators
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            group_thousands(self.dollars().abs()),
            self.cents_part()
        )
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol("$"))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

/// Lenient: numbers and numeric strings are accepted, anything else is zero
impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = LenientNumber::deserialize(deserializer)?;
        Ok(Money::from_decimal(raw.value()))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
