//! Exact rational arithmetic.
//!
//! Every quantity in the calculator (recipe amounts, execution times, rates,
//! tableau cells) is a [`Rational`]. Values are immutable and always held in
//! canonical form: the denominator is strictly positive, numerator and
//! denominator are coprime, and zero is `0/1`. Structural equality and
//! hashing therefore coincide with numeric equality.
//!
//! Floating point only appears at the edges: [`Rational::from_f64`] for
//! ingesting approximate dataset values and [`Rational::to_f64`] for display.

use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{FromPrimitive, One, Signed, ToPrimitive, Zero};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised by rational construction, division, and parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RationalError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("malformed fraction: {input:?}")]
    Parse { input: String },
    #[error("cannot convert non-finite float {0} to a rational")]
    NotFinite(f64),
}

// ---------------------------------------------------------------------------
// Rational
// ---------------------------------------------------------------------------

/// An exact fraction in canonical reduced form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rational {
    numer: BigInt,
    denom: BigInt,
}

impl Rational {
    /// Build `numer / denom`, normalizing sign and reducing by the gcd.
    pub fn new(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Result<Self, RationalError> {
        let denom = denom.into();
        if denom.is_zero() {
            return Err(RationalError::DivisionByZero);
        }
        Ok(Self::reduced(numer.into(), denom))
    }

    /// Canonicalize a pair whose denominator is known to be nonzero.
    fn reduced(mut numer: BigInt, mut denom: BigInt) -> Self {
        debug_assert!(!denom.is_zero());
        if denom.is_negative() {
            numer = -numer;
            denom = -denom;
        }
        if numer.is_zero() {
            return Self {
                numer,
                denom: BigInt::one(),
            };
        }
        let gcd = numer.gcd(&denom);
        if !gcd.is_one() {
            numer /= &gcd;
            denom /= &gcd;
        }
        Self { numer, denom }
    }

    /// An integer-valued rational.
    pub fn from_integer(n: impl Into<BigInt>) -> Self {
        Self {
            numer: n.into(),
            denom: BigInt::one(),
        }
    }

    pub fn zero() -> Self {
        Self::from_integer(0)
    }

    pub fn one() -> Self {
        Self::from_integer(1)
    }

    pub fn one_half() -> Self {
        Self::reduced(BigInt::from(1), BigInt::from(2))
    }

    pub fn one_fifth() -> Self {
        Self::reduced(BigInt::from(1), BigInt::from(5))
    }

    pub fn one_third() -> Self {
        Self::reduced(BigInt::from(1), BigInt::from(3))
    }

    pub fn two_thirds() -> Self {
        Self::reduced(BigInt::from(2), BigInt::from(3))
    }

    pub fn numer(&self) -> &BigInt {
        &self.numer
    }

    pub fn denom(&self) -> &BigInt {
        &self.denom
    }

    pub fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.numer.is_one() && self.denom.is_one()
    }

    pub fn is_integer(&self) -> bool {
        self.denom.is_one()
    }

    pub fn is_negative(&self) -> bool {
        self.numer.is_negative()
    }

    pub fn is_positive(&self) -> bool {
        self.numer.is_positive()
    }

    pub fn abs(&self) -> Self {
        Self {
            numer: self.numer.abs(),
            denom: self.denom.clone(),
        }
    }

    // -----------------------------------------------------------------------
    // Division
    // -----------------------------------------------------------------------

    /// Exact division. Fails if `other` is zero.
    pub fn checked_div(&self, other: &Rational) -> Result<Self, RationalError> {
        if other.is_zero() {
            return Err(RationalError::DivisionByZero);
        }
        Ok(Self::reduced(
            &self.numer * &other.denom,
            &self.denom * &other.numer,
        ))
    }

    /// Reciprocal. Fails on zero.
    pub fn invert(&self) -> Result<Self, RationalError> {
        if self.is_zero() {
            return Err(RationalError::DivisionByZero);
        }
        Ok(Self::reduced(self.denom.clone(), self.numer.clone()))
    }

    /// Largest integer not greater than `self`.
    pub fn floor(&self) -> Self {
        Self::from_integer(self.numer.div_floor(&self.denom))
    }

    /// Smallest integer not less than `self`.
    pub fn ceil(&self) -> Self {
        let neg = -&self.numer;
        Self::from_integer(-neg.div_floor(&self.denom))
    }

    /// Floored division: `(floor(self / other), self - other * quotient)`.
    ///
    /// The remainder takes the sign of `other`.
    pub fn divmod(&self, other: &Rational) -> Result<(Self, Self), RationalError> {
        let quotient = self.checked_div(other)?.floor();
        let remainder = self - &(other * &quotient);
        Ok((quotient, remainder))
    }

    // -----------------------------------------------------------------------
    // Float conversion
    // -----------------------------------------------------------------------

    /// Lossy conversion for display and telemetry.
    pub fn to_f64(&self) -> f64 {
        match (self.numer.to_f64(), self.denom.to_f64()) {
            (Some(n), Some(d)) => n / d,
            _ => f64::NAN,
        }
    }

    /// Convert an approximate float into an exact value.
    ///
    /// Non-integers are rounded to four decimal places. A fractional part of
    /// exactly `0.3333` or `0.6666` after rounding is read as `1/3` or `2/3`,
    /// since dataset values only carry repeating decimals to that precision.
    /// The check applies to the magnitude, so `-0.3333` reads as `-1/3`.
    pub fn from_f64(x: f64) -> Result<Self, RationalError> {
        if !x.is_finite() {
            return Err(RationalError::NotFinite(x));
        }
        if x.fract() == 0.0 {
            let n = BigInt::from_f64(x).ok_or(RationalError::NotFinite(x))?;
            return Ok(Self::from_integer(n));
        }
        let scaled =
            BigInt::from_f64((x.abs() * 10_000.0).round()).ok_or(RationalError::NotFinite(x))?;
        let r = Self::reduced(scaled, BigInt::from(10_000));
        let whole = r.floor();
        let fraction = &r - &whole;
        let magnitude = if fraction == Self::reduced(BigInt::from(3333), BigInt::from(10_000)) {
            whole + Self::one_third()
        } else if fraction == Self::reduced(BigInt::from(3333), BigInt::from(5000)) {
            whole + Self::two_thirds()
        } else {
            r
        };
        Ok(if x < 0.0 { -magnitude } else { magnitude })
    }

    // -----------------------------------------------------------------------
    // Decimal rendering
    // -----------------------------------------------------------------------

    /// Render with at most `max_digits` fractional digits, rounding half up.
    pub fn to_decimal(&self, max_digits: usize) -> String {
        let half_ulp = Self::reduced(BigInt::from(5), num_traits::pow(BigInt::from(10), max_digits + 1));
        self.to_decimal_with(max_digits, &half_ulp)
    }

    /// Render with at most `max_digits` fractional digits after adding
    /// `rounding` to the magnitude. A zero offset truncates.
    ///
    /// Trailing zeros are trimmed once the expansion terminates, and the
    /// decimal point is dropped when no fractional digits remain.
    pub fn to_decimal_with(&self, max_digits: usize, rounding: &Rational) -> String {
        let x = &self.abs() + rounding;
        let (integer_part, rem) = x.numer.div_mod_floor(&x.denom);
        let mut fraction = Self::reduced(rem, x.denom.clone());
        let mut rounding = rounding.clone();
        let ten = Self::from_integer(10);

        let mut digits = String::new();
        let mut remaining = max_digits;
        while remaining > 0 && fraction != rounding {
            fraction = &fraction * &ten;
            rounding = &rounding * &ten;
            let (digit, rem) = fraction.numer.div_mod_floor(&fraction.denom);
            digits.push_str(&digit.to_string());
            fraction = Self::reduced(rem, fraction.denom.clone());
            remaining -= 1;
        }
        if fraction == rounding {
            let trimmed = digits.trim_end_matches('0').len();
            digits.truncate(trimmed);
        }

        let rendered_zero = integer_part.is_zero() && digits.bytes().all(|b| b == b'0');
        let sign = if self.is_negative() && !rendered_zero { "-" } else { "" };
        if digits.is_empty() {
            format!("{sign}{integer_part}")
        } else {
            format!("{sign}{integer_part}.{digits}")
        }
    }

    /// Like [`to_decimal`](Self::to_decimal) but rounds toward positive
    /// infinity, so the rendered value is never less than `self`.
    pub fn to_up_decimal(&self, max_digits: usize) -> String {
        let scale = num_traits::pow(BigInt::from(10), max_digits);
        let scaled = -(-(&self.numer * &scale)).div_floor(&self.denom);
        Self::reduced(scaled, scale).to_decimal_with(max_digits, &Self::zero())
    }

    /// Divide by `10^exp`. Never fails since the divisor is nonzero.
    pub fn div_pow10(&self, exp: usize) -> Self {
        Self::reduced(
            self.numer.clone(),
            &self.denom * num_traits::pow(BigInt::from(10), exp),
        )
    }

    /// Render as `"<whole> + <rem>/<denom>"`, or plain form when either part
    /// is zero.
    pub fn to_mixed(&self) -> String {
        let (whole, rem) = self.numer.div_mod_floor(&self.denom);
        if whole.is_zero() || rem.is_zero() {
            return self.to_string();
        }
        format!("{whole} + {rem}/{}", self.denom)
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_integer(n)
    }
}

impl From<BigInt> for Rational {
    fn from(n: BigInt) -> Self {
        Self::from_integer(n)
    }
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.numer * &other.denom).cmp(&(&other.numer * &self.denom))
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

impl Add<&Rational> for &Rational {
    type Output = Rational;

    fn add(self, other: &Rational) -> Rational {
        Rational::reduced(
            &self.numer * &other.denom + &other.numer * &self.denom,
            &self.denom * &other.denom,
        )
    }
}

impl Sub<&Rational> for &Rational {
    type Output = Rational;

    fn sub(self, other: &Rational) -> Rational {
        Rational::reduced(
            &self.numer * &other.denom - &other.numer * &self.denom,
            &self.denom * &other.denom,
        )
    }
}

impl Mul<&Rational> for &Rational {
    type Output = Rational;

    fn mul(self, other: &Rational) -> Rational {
        Rational::reduced(&self.numer * &other.numer, &self.denom * &other.denom)
    }
}

macro_rules! forward_binop {
    ($imp:ident, $method:ident) => {
        impl $imp<Rational> for Rational {
            type Output = Rational;
            fn $method(self, other: Rational) -> Rational {
                (&self).$method(&other)
            }
        }

        impl $imp<&Rational> for Rational {
            type Output = Rational;
            fn $method(self, other: &Rational) -> Rational {
                (&self).$method(other)
            }
        }

        impl $imp<Rational> for &Rational {
            type Output = Rational;
            fn $method(self, other: Rational) -> Rational {
                self.$method(&other)
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational {
            numer: -self.numer,
            denom: self.denom,
        }
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        -self.clone()
    }
}

impl Sum for Rational {
    fn sum<I: Iterator<Item = Rational>>(iter: I) -> Self {
        iter.fold(Rational::zero(), |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Rational> for Rational {
    fn sum<I: Iterator<Item = &'a Rational>>(iter: I) -> Self {
        iter.fold(Rational::zero(), |acc, x| acc + x)
    }
}

// ---------------------------------------------------------------------------
// Text form
// ---------------------------------------------------------------------------

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom.is_one() {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}

/// Parses `INT`, `INT/INT`, or the mixed form `INT+INT/INT`.
impl FromStr for Rational {
    type Err = RationalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let int = |part: &str| {
            part.trim()
                .parse::<BigInt>()
                .map_err(|_| RationalError::Parse {
                    input: s.to_string(),
                })
        };
        match s.split_once('/') {
            None => Ok(Self::from_integer(int(s)?)),
            Some((head, denom)) => {
                let denom = int(denom)?;
                let numer = match head.split_once('+') {
                    Some((whole, frac)) => int(frac)? + int(whole)? * &denom,
                    None => int(head)?,
                };
                Self::new(numer, denom)
            }
        }
    }
}

impl Serialize for Rational {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rational {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RationalVisitor)
    }
}

struct RationalVisitor;

impl Visitor<'_> for RationalVisitor {
    type Value = Rational;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a fraction string or a number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Rational, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Rational, E> {
        Ok(Rational::from_integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Rational, E> {
        Ok(Rational::from_integer(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Rational, E> {
        Rational::from_f64(v).map_err(E::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rat(p: i64, q: i64) -> Rational {
        Rational::new(p, q).unwrap()
    }

    #[test]
    fn normalizes_inputs() {
        assert_eq!(rat(0, 10), rat(0, 1));
        assert_eq!(rat(0, -7).denom(), &BigInt::one());
        assert_eq!(rat(5, 10), rat(1, 2));
        assert_eq!(rat(-5, -10), rat(1, 2));
        assert_eq!(rat(-5, 10), rat(-1, 2));
        assert_eq!(rat(5, -10), rat(-1, 2));
        assert_eq!(rat(5, -10).denom(), &BigInt::from(2));
    }

    #[test]
    fn zero_denominator_rejected() {
        assert_eq!(Rational::new(1, 0), Err(RationalError::DivisionByZero));
    }

    #[test]
    fn addition_and_subtraction() {
        assert_eq!(rat(1, 1) + rat(1, 1), rat(2, 1));
        assert_eq!(rat(1, 1) + rat(3, 2), rat(5, 2));
        assert_eq!(rat(1, 3) + rat(1, 6), rat(1, 2));
        assert_eq!(rat(1, 1) - rat(1, 1), rat(0, 1));
        assert_eq!(rat(1, 1) - rat(3, 2), rat(-1, 2));
    }

    #[test]
    fn multiplication() {
        assert_eq!(rat(8, 1) * rat(2, 1), rat(16, 1));
        assert_eq!(rat(1, 1) * rat(1, 2), rat(1, 2));
        assert_eq!(rat(8, 1) * rat(-2, 1), rat(-16, 1));
    }

    #[test]
    fn division() {
        assert_eq!(rat(8, 1).checked_div(&rat(2, 1)), Ok(rat(4, 1)));
        assert_eq!(rat(1, 1).checked_div(&rat(1, 2)), Ok(rat(2, 1)));
        assert_eq!(rat(8, 1).checked_div(&rat(-2, 1)), Ok(rat(-4, 1)));
        assert_eq!(
            rat(8, 1).checked_div(&Rational::zero()),
            Err(RationalError::DivisionByZero)
        );
    }

    #[test]
    fn invert() {
        assert_eq!(rat(-2, 3).invert(), Ok(rat(-3, 2)));
        assert_eq!(Rational::zero().invert(), Err(RationalError::DivisionByZero));
    }

    #[test]
    fn divmod_floors() {
        assert_eq!(rat(4, 1).divmod(&rat(2, 1)), Ok((rat(2, 1), rat(0, 1))));
        assert_eq!(rat(5, 1).divmod(&rat(2, 1)), Ok((rat(2, 1), rat(1, 1))));
        assert_eq!(rat(1, 2).divmod(&rat(2, 1)), Ok((rat(0, 1), rat(1, 2))));
        // Remainder follows the divisor's sign.
        assert_eq!(rat(5, 1).divmod(&rat(-2, 1)), Ok((rat(-3, 1), rat(-1, 1))));
        assert_eq!(rat(-5, 1).divmod(&rat(2, 1)), Ok((rat(-3, 1), rat(1, 1))));
        assert!(rat(1, 1).divmod(&Rational::zero()).is_err());
    }

    #[test]
    fn floor_and_ceil() {
        assert_eq!(rat(0, 2).floor(), rat(0, 1));
        assert_eq!(rat(1, 2).floor(), rat(0, 1));
        assert_eq!(rat(2, 2).floor(), rat(1, 1));
        assert_eq!(rat(-1, 2).floor(), rat(-1, 1));
        assert_eq!(rat(0, 2).ceil(), rat(0, 1));
        assert_eq!(rat(1, 2).ceil(), rat(1, 1));
        assert_eq!(rat(2, 2).ceil(), rat(1, 1));
        assert_eq!(rat(-1, 2).ceil(), rat(0, 1));
        assert_eq!(rat(-3, 2).ceil(), rat(-1, 1));
    }

    #[test]
    fn abs() {
        assert_eq!(rat(0, 1).abs(), rat(0, 1));
        assert_eq!(rat(0, -1).abs(), rat(0, 1));
        assert_eq!(rat(-1, 1).abs(), rat(1, 1));
        assert_eq!(rat(1, -1).abs(), rat(1, 1));
    }

    #[test]
    fn ordering_is_exact() {
        assert!(rat(1, 3) < rat(1, 2));
        assert!(rat(-1, 2) < rat(-1, 3));
        assert!(rat(333_333_333, 1_000_000_000) < rat(1, 3));
        assert_eq!(rat(2, 4).cmp(&rat(1, 2)), Ordering::Equal);
    }

    #[test]
    fn to_f64() {
        assert_eq!(rat(0, 2).to_f64(), 0.0);
        assert_eq!(rat(1, 2).to_f64(), 0.5);
        assert_eq!(rat(3, 10).to_f64(), 0.3);
    }

    #[test]
    fn from_f64_recognizes_thirds() {
        assert_eq!(Rational::from_f64(0.3333), Ok(rat(1, 3)));
        assert_eq!(Rational::from_f64(0.6666), Ok(rat(2, 3)));
        assert_eq!(Rational::from_f64(2.3333), Ok(rat(7, 3)));
        assert_eq!(Rational::from_f64(0.5), Ok(rat(1, 2)));
        assert_eq!(Rational::from_f64(1.23456), Ok(rat(12346, 10000)));
        assert_eq!(Rational::from_f64(1200.0), Ok(rat(1200, 1)));
        assert_eq!(Rational::from_f64(-3.0), Ok(rat(-3, 1)));
        assert_eq!(Rational::from_f64(-0.3333), Ok(rat(-1, 3)));
        assert_eq!(Rational::from_f64(-0.6666), Ok(rat(-2, 3)));
        assert_eq!(Rational::from_f64(-2.3333), Ok(rat(-7, 3)));
        assert_eq!(Rational::from_f64(0.6667), Ok(rat(6667, 10000)));
        assert_eq!(Rational::from_f64(-0.6667), Ok(rat(-6667, 10000)));
        assert_eq!(Rational::from_f64(-1.25), Ok(rat(-5, 4)));
        assert!(matches!(Rational::from_f64(f64::NAN), Err(RationalError::NotFinite(_))));
        assert!(Rational::from_f64(f64::INFINITY).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(rat(0, 2).to_string(), "0");
        assert_eq!(rat(1, 2).to_string(), "1/2");
        assert_eq!(rat(1, 1).to_string(), "1");
        assert_eq!(rat(-3, 10).to_string(), "-3/10");
    }

    #[test]
    fn parse_forms() {
        assert_eq!("7".parse::<Rational>(), Ok(rat(7, 1)));
        assert_eq!("-7".parse::<Rational>(), Ok(rat(-7, 1)));
        assert_eq!("6/4".parse::<Rational>(), Ok(rat(3, 2)));
        assert_eq!("1+1/3".parse::<Rational>(), Ok(rat(4, 3)));
        assert_eq!("2 + 1/2".parse::<Rational>(), Ok(rat(5, 2)));
    }

    #[test]
    fn parse_rejects_garbage() {
        for bad in ["", "abc", "1.5", "1/", "/2", "1/2/3", "1+2", "x+1/2", "1+1/y"] {
            assert!(
                matches!(bad.parse::<Rational>(), Err(RationalError::Parse { .. })),
                "accepted {bad:?}"
            );
        }
        assert_eq!("1/0".parse::<Rational>(), Err(RationalError::DivisionByZero));
    }

    #[test]
    fn to_decimal_default_rounding() {
        assert_eq!(rat(0, 2).to_decimal(3), "0");
        assert_eq!(rat(1, 2).to_decimal(3), "0.5");
        assert_eq!(rat(1, 1).to_decimal(3), "1");
        assert_eq!(rat(3, 10).to_decimal(3), "0.3");
        assert_eq!(rat(1, 3).to_decimal(3), "0.333");
        assert_eq!(rat(2, 3).to_decimal(3), "0.667");
        assert_eq!(rat(-2, 3).to_decimal(3), "-0.667");
        assert_eq!(rat(-1, 10_000).to_decimal(3), "0.000");
    }

    #[test]
    fn to_decimal_custom_rounding() {
        let truncate = rat(0, 1);
        assert_eq!(rat(1, 3).to_decimal_with(0, &truncate), "0");
        assert_eq!(rat(1, 3).to_decimal_with(1, &truncate), "0.3");
        assert_eq!(rat(1, 3).to_decimal_with(2, &truncate), "0.33");

        let one = rat(1, 1);
        assert_eq!(rat(1, 3).to_decimal_with(0, &one), "1");
        assert_eq!(rat(1, 3).to_decimal_with(1, &one), "1.3");
        assert_eq!(rat(1, 3).to_decimal_with(2, &one), "1.33");

        let half = rat(1, 2);
        assert_eq!(rat(1, 3).to_decimal_with(0, &half), "0");
        assert_eq!(rat(1, 3).to_decimal_with(1, &half), "0.8");
        assert_eq!(rat(1, 3).to_decimal_with(2, &half), "0.83");
    }

    #[test]
    fn to_up_decimal() {
        assert_eq!(rat(0, 2).to_up_decimal(3), "0");
        assert_eq!(rat(1, 2).to_up_decimal(3), "0.5");
        assert_eq!(rat(1, 1).to_up_decimal(3), "1");
        assert_eq!(rat(3, 10).to_up_decimal(3), "0.3");
        assert_eq!(rat(1, 3).to_up_decimal(3), "0.334");
        assert_eq!(rat(1, 3).to_up_decimal(2), "0.34");
        assert_eq!(rat(1, 3).to_up_decimal(1), "0.4");
        assert_eq!(rat(1, 3).to_up_decimal(0), "1");
        assert_eq!(rat(2, 3).to_up_decimal(3), "0.667");
        // Negative values round toward zero, which is up.
        assert_eq!(rat(-1, 3).to_up_decimal(3), "-0.333");
        assert_eq!(rat(-2, 3).to_up_decimal(2), "-0.66");
        assert_eq!(rat(-5, 2).to_up_decimal(0), "-2");
        assert_eq!(rat(-1, 2).to_up_decimal(3), "-0.5");
        assert_eq!(rat(-1, 10_000).to_up_decimal(3), "0");
    }

    #[test]
    fn to_mixed() {
        assert_eq!(rat(7, 3).to_mixed(), "2 + 1/3");
        assert_eq!(rat(1, 3).to_mixed(), "1/3");
        assert_eq!(rat(6, 3).to_mixed(), "2");
        assert_eq!(rat(-7, 3).to_mixed(), "-3 + 2/3");
    }

    #[test]
    fn serde_string_form() {
        let json = serde_json::to_string(&rat(4, 6)).unwrap();
        assert_eq!(json, "\"2/3\"");
        let back: Rational = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rat(2, 3));
        let from_number: Rational = serde_json::from_str("0.3333").unwrap();
        assert_eq!(from_number, rat(1, 3));
        let from_int: Rational = serde_json::from_str("12").unwrap();
        assert_eq!(from_int, rat(12, 1));
    }

    #[test]
    fn sums() {
        let parts = [rat(1, 2), rat(1, 3), rat(1, 6)];
        assert_eq!(parts.iter().sum::<Rational>(), rat(1, 1));
        assert_eq!(Vec::<Rational>::new().into_iter().sum::<Rational>(), Rational::zero());
    }

    #[test]
    fn div_pow10_reduces() {
        assert_eq!(rat(1500, 1).div_pow10(3), rat(3, 2));
        assert_eq!(rat(-7, 3).div_pow10(0), rat(-7, 3));
        assert_eq!(Rational::zero().div_pow10(4), Rational::zero());
    }
}
