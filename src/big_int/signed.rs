// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0
use crate::{
    big_int::{
        codec::offset_position,
        digits::Digit,
        primitve::{INum, Primitive},
    },
    BigUInt, Error, Result,
};

use itertools::Either;
use std::{
    cmp::Ordering,
    fmt::{self, Debug},
    ops::{
        Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
    },
    str::FromStr,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sign {
    Negative,
    Positive,
}
impl From<Sign> for SigNum {
    fn from(value: Sign) -> Self {
        match value {
            Sign::Negative => Self::Negative,
            Sign::Positive => Self::Positive,
        }
    }
}
impl From<SigNum> for Sign {
    fn from(value: SigNum) -> Self {
        match value {
            SigNum::Negative => Self::Negative,
            SigNum::Zero | SigNum::Positive => Self::Positive,
        }
    }
}
impl Neg for Sign {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Negative => Self::Positive,
            Self::Positive => Self::Negative,
        }
    }
}

/// the sign of a number, with a seperate state for zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(i8)]
pub enum SigNum {
    Negative = -1,
    #[default]
    Zero = 0,
    Positive = 1,
}
impl From<SigNum> for i8 {
    fn from(value: SigNum) -> Self {
        value as Self
    }
}
impl SigNum {
    pub const fn is_negative(self) -> bool {
        matches!(self, Self::Negative)
    }
    pub const fn is_positive(self) -> bool {
        matches!(self, Self::Positive)
    }
    pub const fn is_zero(self) -> bool {
        matches!(self, Self::Zero)
    }
    #[must_use]
    pub const fn negate(self) -> Self {
        match self {
            Self::Negative => Self::Positive,
            Self::Zero => Self::Zero,
            Self::Positive => Self::Negative,
        }
    }
    #[must_use]
    pub const fn abs(self) -> Self {
        match self {
            Self::Negative | Self::Positive => Self::Positive,
            Self::Zero => Self::Zero,
        }
    }
    #[must_use]
    pub const fn const_mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Zero, _) | (_, Self::Zero) => Self::Zero,
            (Self::Negative, Self::Negative) | (Self::Positive, Self::Positive) => Self::Positive,
            (Self::Negative, Self::Positive) | (Self::Positive, Self::Negative) => Self::Negative,
        }
    }
}
impl Neg for SigNum {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}
impl Mul for SigNum {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.const_mul(rhs)
    }
}
impl MulAssign for SigNum {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

/// an unbounded number with a sign
///
/// zero is never negative
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BigInt<D: Digit> {
    /// only `SigNum::Zero` if `unsigned` is zero
    signum: SigNum,
    unsigned: BigUInt<D>,
}

impl<D: Digit> Debug for BigInt<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Number {{ {}",
            match self.signum {
                SigNum::Negative => "- ",
                SigNum::Zero => "",
                SigNum::Positive => "+ ",
            }
        )?;
        self.unsigned.inner_debug(f)?;
        write!(f, " }}")
    }
}
impl<D: Digit> fmt::Display for BigInt<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(
            !self.is_negative(),
            "",
            &self.unsigned.decimal_string(f.alternate()),
        )
    }
}
impl<D: Digit> fmt::LowerHex for BigInt<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.is_negative(), "0x", &format!("{:x}", self.unsigned))
    }
}
impl<D: Digit> fmt::UpperHex for BigInt<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.is_negative(), "0x", &format!("{:X}", self.unsigned))
    }
}
impl<D: Digit> Default for BigInt<D> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<D: Digit> Ord for BigInt<D> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.signum
            .cmp(&other.signum)
            .then_with(|| match self.signum {
                SigNum::Negative => other.unsigned.cmp(&self.unsigned),
                SigNum::Zero | SigNum::Positive => self.unsigned.cmp(&other.unsigned),
            })
    }
}
impl<D: Digit> PartialOrd for BigInt<D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<PRIMITIVE: Primitive, D: Digit> From<PRIMITIVE> for BigInt<D> {
    fn from(value: PRIMITIVE) -> Self {
        match value.select_sign() {
            Either::Left(pos) => BigUInt::<D>::from(pos).into(),
            Either::Right(neg) => BigUInt::<D>::from(neg.magnitude()).with_sign(if neg.is_negative() {
                Sign::Negative
            } else {
                Sign::Positive
            }),
        }
    }
}
impl<D: Digit> From<BigUInt<D>> for BigInt<D> {
    fn from(value: BigUInt<D>) -> Self {
        value.with_sign(Sign::Positive)
    }
}
impl<D: Digit> FromStr for BigInt<D> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s, false)
    }
}

impl<D: Digit> TryFrom<&BigInt<D>> for i64 {
    type Error = Error;

    fn try_from(value: &BigInt<D>) -> Result<Self> {
        let magnitude = u64::try_from(&value.unsigned)?;
        if value.is_negative() {
            if magnitude > Self::MIN.unsigned_abs() {
                return Err(Error::Overflow);
            }
            Ok((magnitude as Self).wrapping_neg())
        } else {
            Self::try_from(magnitude).map_err(|_| Error::Overflow)
        }
    }
}

fn strip_sign(s: &str) -> (Sign, &str) {
    match s.chars().next() {
        Some('-') => (Sign::Negative, &s[1..]),
        Some('+') => (Sign::Positive, &s[1..]),
        None | Some(_) => (Sign::Positive, s),
    }
}

impl<D: Digit> BigInt<D> {
    pub fn zero() -> Self {
        Self::new_unchecked(SigNum::Zero, BigUInt::zero())
    }
    pub fn one() -> Self {
        Self::new_unchecked(SigNum::Positive, BigUInt::one())
    }
    /// builds a number from `sign` and `unsigned`, zero always ends up non negative
    pub fn new(sign: impl Into<Sign>, unsigned: impl Into<BigUInt<D>>) -> Self {
        let unsigned = unsigned.into();
        let sign: Sign = sign.into();
        let signum = if unsigned.is_zero() {
            SigNum::Zero
        } else {
            sign.into()
        };
        Self::new_unchecked(signum, unsigned)
    }
    /// `signum` has to be `Zero` exactly when `unsigned` is zero
    fn new_unchecked(signum: SigNum, unsigned: BigUInt<D>) -> Self {
        debug_assert_eq!(
            signum.is_zero(),
            unsigned.is_zero(),
            "{signum:?} doesn't match {unsigned:?}"
        );
        Self { signum, unsigned }
    }

    /// parses an optional `+` or `-` followed by the same formats as `BigUInt::parse`
    pub fn parse(text: &str, use_octal: bool) -> Result<Self> {
        let (sign, rest) = strip_sign(text);
        BigUInt::<D>::parse(rest, use_octal)
            .map(|it| Self::new(sign, it))
            .map_err(|err| offset_position(err, text.len() - rest.len()))
    }
    /// parses an optional `+` or `-` followed by digits in `radix`
    pub fn from_str_radix(text: &str, radix: u32) -> Result<Self> {
        let (sign, rest) = strip_sign(text);
        BigUInt::<D>::from_str_radix(rest, radix)
            .map(|it| Self::new(sign, it))
            .map_err(|err| offset_position(err, text.len() - rest.len()))
    }
    /// renders `self` with a leading `-` if negative
    ///
    /// # Panics
    /// if `radix` isn't in `2..=36`
    pub fn to_string_radix(&self, radix: u32) -> String {
        let digits = self.unsigned.to_string_radix(radix);
        if self.is_negative() {
            format!("-{digits}")
        } else {
            digits
        }
    }

    pub const fn signum(&self) -> SigNum {
        self.signum
    }
    pub const fn is_negative(&self) -> bool {
        self.signum.is_negative()
    }
    pub const fn is_positive(&self) -> bool {
        self.signum.is_positive()
    }
    pub const fn is_zero(&self) -> bool {
        self.signum.is_zero()
    }
    pub fn is_even(&self) -> bool {
        self.unsigned.is_even()
    }
    /// the absolute value as an unsigned number
    pub const fn magnitude(&self) -> &BigUInt<D> {
        &self.unsigned
    }
    pub fn into_parts(self) -> (SigNum, BigUInt<D>) {
        (self.signum, self.unsigned)
    }
    #[must_use]
    pub fn abs(&self) -> Self {
        Self::new_unchecked(self.signum.abs(), self.unsigned.clone())
    }
    pub fn negate(&mut self) {
        self.signum = -self.signum;
    }

    /// the lowest 64 bits of the two's complement, dropping everything above
    pub fn to_i64_wrapping(&self) -> i64 {
        let low = self.unsigned.to_u64_wrapping() as i64;
        if self.is_negative() {
            low.wrapping_neg()
        } else {
            low
        }
    }

    /// adds `signum` * `rhs` to `self`
    fn add_signed(&mut self, signum: SigNum, rhs: &BigUInt<D>) {
        match (self.signum, signum) {
            (_, SigNum::Zero) => {}
            (SigNum::Zero, _) => *self = Self::new_unchecked(signum, rhs.clone()),
            (lhs, rhs_signum) if lhs == rhs_signum => self.unsigned += rhs,
            _ => match self.unsigned.cmp(rhs) {
                Ordering::Greater => self.unsigned -= rhs,
                Ordering::Equal => *self = Self::zero(),
                Ordering::Less => *self = Self::new_unchecked(signum, rhs - &self.unsigned),
            },
        }
    }
    fn add_big(&mut self, rhs: &Self) {
        self.add_signed(rhs.signum, &rhs.unsigned);
    }
    fn sub_big(&mut self, rhs: &Self) {
        self.add_signed(-rhs.signum, &rhs.unsigned);
    }
    fn mul_big(&mut self, rhs: &Self) {
        self.unsigned *= &rhs.unsigned;
        self.signum *= rhs.signum;
    }

    /// computes the truncated (`self` / `rhs`, `self` % `rhs`), the remainder takes the sign of `self`
    pub fn div_mod(&self, rhs: &Self) -> Result<(Self, Self)> {
        let (quotient, remainder) = self.unsigned.div_mod(&rhs.unsigned)?;
        Ok((
            Self::new(self.signum * rhs.signum, quotient),
            Self::new(self.signum, remainder),
        ))
    }
    pub fn checked_div(&self, rhs: &Self) -> Result<Self> {
        self.div_mod(rhs).map(|(quotient, _)| quotient)
    }
    pub fn checked_rem(&self, rhs: &Self) -> Result<Self> {
        self.div_mod(rhs).map(|(_, remainder)| remainder)
    }
    fn div_big(&mut self, rhs: &Self) {
        match self.checked_div(rhs) {
            Ok(quotient) => *self = quotient,
            Err(err) => panic!("{err}"),
        }
    }
    fn rem_big(&mut self, rhs: &Self) {
        match self.checked_rem(rhs) {
            Ok(remainder) => *self = remainder,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn inc(&mut self) {
        self.add_signed(SigNum::Positive, &BigUInt::one());
    }
    pub fn dec(&mut self) {
        self.add_signed(SigNum::Negative, &BigUInt::one());
    }
    /// increments `self` and returns the old value
    #[must_use = "use `inc` if the old value isn't needed"]
    pub fn post_inc(&mut self) -> Self {
        let old = self.clone();
        self.inc();
        old
    }
    /// decrements `self` and returns the old value
    #[must_use = "use `dec` if the old value isn't needed"]
    pub fn post_dec(&mut self) -> Self {
        let old = self.clone();
        self.dec();
        old
    }

    /// the sign of the result is negative iff `self` is negative and `exponent` is odd
    fn pow_signum(&self, exponent: &Self) -> Result<SigNum> {
        if exponent.is_negative() {
            return Err(Error::NegativeExponent);
        }
        Ok(if self.is_negative() && !exponent.is_even() {
            SigNum::Negative
        } else {
            SigNum::Positive
        })
    }
    pub fn pow(&self, exponent: &Self) -> Result<Self> {
        let signum = self.pow_signum(exponent)?;
        Ok(Self::new(
            signum,
            self.unsigned.pow(&exponent.unsigned),
        ))
    }
    /// computes `self`^`exponent` on the magnitudes modulo |`modulus`|, the sign follows `pow`
    pub fn pow_mod(&self, exponent: &Self, modulus: &Self) -> Result<Self> {
        let signum = self.pow_signum(exponent)?;
        let magnitude = self
            .unsigned
            .pow_mod(&exponent.unsigned, &modulus.unsigned)?;
        Ok(Self::new(signum, magnitude))
    }
    /// the non negative greatest common divisor of both magnitudes
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        self.unsigned.gcd(&other.unsigned).into()
    }
}

impl<D: Digit> Neg for BigInt<D> {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        self.negate();
        self
    }
}
impl<D: Digit> Neg for &BigInt<D> {
    type Output = BigInt<D>;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

macro_rules! implSignedMath {
	($assign_trait:ident, $assign_func:ident, $trait:ident, $func:ident, $inner:ident) => {
		impl<D: Digit> $trait<BigInt<D>> for BigInt<D> {
			type Output = BigInt<D>;
			fn $func(mut self, rhs: BigInt<D>) -> Self::Output {
				self.$inner(&rhs);
				self
			}
		}
		impl<D: Digit> $trait<&BigInt<D>> for BigInt<D> {
			type Output = BigInt<D>;
			fn $func(mut self, rhs: &BigInt<D>) -> Self::Output {
				self.$inner(rhs);
				self
			}
		}
		impl<D: Digit> $trait<BigInt<D>> for &BigInt<D> {
			type Output = BigInt<D>;
			fn $func(self, rhs: BigInt<D>) -> Self::Output {
				let mut out = self.clone();
				out.$inner(&rhs);
				out
			}
		}
		impl<D: Digit> $trait<&BigInt<D>> for &BigInt<D> {
			type Output = BigInt<D>;
			fn $func(self, rhs: &BigInt<D>) -> Self::Output {
				let mut out = self.clone();
				out.$inner(rhs);
				out
			}
		}
		impl<D: Digit> $assign_trait<BigInt<D>> for BigInt<D> {
			fn $assign_func(&mut self, rhs: BigInt<D>) {
				self.$inner(&rhs);
			}
		}
		impl<D: Digit> $assign_trait<&BigInt<D>> for BigInt<D> {
			fn $assign_func(&mut self, rhs: &BigInt<D>) {
				self.$inner(rhs);
			}
		}
	};
}
implSignedMath!(AddAssign, add_assign, Add, add, add_big);
implSignedMath!(SubAssign, sub_assign, Sub, sub, sub_big);
implSignedMath!(MulAssign, mul_assign, Mul, mul, mul_big);
implSignedMath!(DivAssign, div_assign, Div, div, div_big);
implSignedMath!(RemAssign, rem_assign, Rem, rem, rem_big);
