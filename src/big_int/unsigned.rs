// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0
use crate::{
    big_int::{
        digits::Digit,
        math_algos::{self, add, bit_math, div, mul, shift, sub},
        primitve::UNum,
        word_buffer::WordBuffer,
    },
    modular_potentiation, BigIInt, Error, Result, SigNum, Sign,
};

use itertools::Itertools;
use std::{
    cmp::Ordering,
    fmt::Debug,
    hash::{Hash, Hasher},
    iter,
    ops::{
        Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
        DivAssign, Mul, MulAssign, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub, SubAssign,
    },
    sync::Arc,
};

/// an unbounded non-negative number
///
/// clones share the word buffer, which only gets copied once one of the holders writes to it
#[derive(Clone)]
pub struct BigInt<D: Digit> {
    /// holds the digits in LE order, always normalized
    words: Arc<WordBuffer<D>>,
}

impl<D: Digit> Debug for BigInt<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Number {{ ")?;
        self.inner_debug(f)?;
        write!(f, " }}")
    }
}
impl<D: Digit> Default for BigInt<D> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<D: Digit> Hash for BigInt<D> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_words().hash(state);
    }
}

impl<D: Digit> Eq for BigInt<D> {}
impl<D: Digit> PartialEq for BigInt<D> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}
impl<D: Digit> Ord for BigInt<D> {
    fn cmp(&self, other: &Self) -> Ordering {
        if Arc::ptr_eq(&self.words, &other.words) {
            return Ordering::Equal;
        }
        math_algos::cmp_slices(self.as_words(), other.as_words())
    }
}
impl<D: Digit> PartialOrd for BigInt<D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<D: Digit> PartialEq<D> for BigInt<D> {
    fn eq(&self, other: &D) -> bool {
        self.words.len() == 1 && self.words[0] == *other
    }
}
impl<D: Digit> PartialOrd<D> for BigInt<D> {
    fn partial_cmp(&self, other: &D) -> Option<Ordering> {
        Some(if self.words.len() > 1 {
            Ordering::Greater
        } else {
            self.words[0].cmp(other)
        })
    }
}

// From traits
impl<D: Digit> TryFrom<BigIInt<D>> for BigInt<D> {
    type Error = Error;

    fn try_from(value: BigIInt<D>) -> Result<Self> {
        let (sign, unsigned) = value.into_parts();
        match sign {
            SigNum::Negative => Err(Error::SignConversion),
            SigNum::Zero | SigNum::Positive => Ok(unsigned),
        }
    }
}
impl<POSITIVE: UNum, D: Digit> FromIterator<POSITIVE> for BigInt<D> {
    /// the iter should contain the digits in little endian order
    fn from_iter<T: IntoIterator<Item = POSITIVE>>(iter: T) -> Self {
        let mut bytes = Vec::with_capacity(POSITIVE::BYTES);
        for it in iter {
            it.push_le_bytes(&mut bytes);
        }
        bytes.reverse();
        Self::from_be_bytes(&bytes)
    }
}
cfg_if::cfg_if! {
    if #[cfg(all(
        feature = "uintFromAbsIPrimitive",
        feature = "uintFromAssertIPrimitive"
    ))] {
        compile_error!("feature \"uintFromAbsIPrimitive\" and feature \"uintFromAssertIPrimitive\" cannot be enabled at the same time");
    } else if #[cfg(any(
        feature = "uintFromAbsIPrimitive",
        feature = "uintFromAssertIPrimitive"
    ))] {
        use crate::big_int::primitve::{INum, Primitive};
        use itertools::Either;
        impl<PRIMITIVE: Primitive, D: Digit> From<PRIMITIVE> for BigInt<D> {
            fn from(value: PRIMITIVE) -> Self {
                iter::once(
                    match value.select_sign() {
                        Either::Left(pos) => pos,
                        Either::Right(neg) => {
                            #[cfg(feature = "uintFromAssertIPrimitive")]
                            assert!(!neg.is_negative(), "tried to get BigUInt from {value} < 0");
                            neg.magnitude()
                        },
                    }
                ).collect()
            }
        }
    } else {
        impl<POSITIVE: UNum, D: Digit> From<POSITIVE> for BigInt<D> {
            fn from(pos: POSITIVE) -> Self {
                iter::once(pos).collect()
            }
        }
    }
}

// Into traits
impl<D: Digit> TryFrom<&BigInt<D>> for u64 {
    type Error = Error;

    fn try_from(value: &BigInt<D>) -> Result<Self> {
        if value.bits() > Self::BITS as usize {
            return Err(Error::Overflow);
        }
        Ok(value.to_u64_wrapping())
    }
}
impl<D: Digit> TryFrom<&BigInt<D>> for usize {
    type Error = Error;

    fn try_from(value: &BigInt<D>) -> Result<Self> {
        u64::try_from(value).and_then(|it| Self::try_from(it).map_err(|_| Error::Overflow))
    }
}

impl<D: Digit> BigInt<D> {
    // construction
    pub fn zero() -> Self {
        Self::from_digit(D::ZERO)
    }
    pub fn one() -> Self {
        Self::from_digit(D::ONE)
    }
    pub fn from_digit(value: D) -> Self {
        match value.small_index() {
            Some(i) => Self {
                words: Arc::clone(&D::small_values()[i]),
            },
            None => Self {
                words: Arc::new(WordBuffer::new(value, 1)),
            },
        }
    }
    /// `iter` has to hold the digits in LE order, leading zeros are allowed
    pub fn from_digits(iter: impl IntoIterator<Item = D>) -> Self {
        Self::from_buffer(WordBuffer::from_vec(iter.into_iter().collect_vec()))
    }
    pub(super) fn from_buffer(buffer: WordBuffer<D>) -> Self {
        debug_assert!(buffer.is_normalized(), "{buffer:?} wasn't normalized");
        if buffer.len() == 1 {
            return Self::from_digit(buffer[0]);
        }
        Self {
            words: Arc::new(buffer),
        }
    }
    pub fn with_sign(self, sign: Sign) -> BigIInt<D> {
        BigIInt::new(sign, self)
    }

    // inner utils
    /// the only way to write to the buffer, copies it first if it is shared
    fn words_mut(&mut self) -> &mut WordBuffer<D> {
        if Arc::get_mut(&mut self.words).is_none() {
            tracing::trace!(words = self.words.len(), "copying shared word buffer");
        }
        Arc::make_mut(&mut self.words)
    }
    pub(super) fn inner_debug(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x[")?;
        for (pos, elem) in self.words.iter().rev().with_position() {
            write!(f, "{elem:0size$x}", size = D::BYTES * 2)?;
            if matches!(
                pos,
                itertools::Position::First | itertools::Position::Middle
            ) {
                f.write_str(", ")?;
            }
        }
        write!(f, "]")
    }

    // getter
    /// the words in LE order
    pub fn as_words(&self) -> &[D] {
        self.words.as_slice()
    }
    pub fn word_count(&self) -> usize {
        self.words.len()
    }
    /// true if both numbers currently use the same word buffer
    pub fn shares_buffer(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.words, &other.words)
    }
    pub fn is_zero(&self) -> bool {
        *self == D::ZERO
    }
    pub fn is_nonzero(&self) -> bool {
        !self.is_zero()
    }
    pub fn is_one(&self) -> bool {
        *self == D::ONE
    }
    pub fn is_even(&self) -> bool {
        !self.words[0].get_bit(0)
    }
    pub fn signum(&self) -> SigNum {
        if self.is_zero() {
            SigNum::Zero
        } else {
            SigNum::Positive
        }
    }
    /// number of significant bits, zero for zero
    pub fn bits(&self) -> usize {
        math_algos::bit_len(self.as_words())
    }
    pub fn bit(&self, i: usize) -> bool {
        math_algos::get_bit(self.as_words(), i)
    }

    /// the lowest word, dropping everything above
    pub fn low_digit(&self) -> D {
        self.words[0]
    }
    pub fn try_to_digit(&self) -> Result<D> {
        if self.words.len() > 1 {
            return Err(Error::Overflow);
        }
        Ok(self.low_digit())
    }
    /// the lowest 64 bits, dropping everything above
    pub fn to_u64_wrapping(&self) -> u64 {
        self.words
            .iter()
            .take(8 / D::BYTES)
            .enumerate()
            .fold(0, |acc, (i, word)| acc | (word.to_u64() << (i * D::BASIS_POW)))
    }

    // math
    pub fn add_digit(&mut self, rhs: D) {
        if rhs.is_zero() {
            return;
        }
        add::assign(self.words_mut(), &[rhs]);
    }
    fn add_big(&mut self, rhs: &Self) {
        if rhs.is_zero() {
            return;
        }
        if self.is_zero() {
            *self = rhs.clone();
            return;
        }
        add::assign(self.words_mut(), rhs.as_words());
    }

    pub fn checked_sub(&self, rhs: &Self) -> Result<Self> {
        let mut out = self.clone();
        out.checked_sub_assign(rhs)?;
        Ok(out)
    }
    pub fn checked_sub_assign(&mut self, rhs: &Self) -> Result<()> {
        if rhs.is_zero() {
            return Ok(());
        }
        if *self < *rhs {
            return Err(Error::Underflow);
        }
        sub::assign(self.words_mut(), rhs.as_words())
    }
    pub fn checked_sub_digit(&mut self, rhs: D) -> Result<()> {
        if rhs.is_zero() {
            return Ok(());
        }
        if *self < rhs {
            return Err(Error::Underflow);
        }
        sub::assign(self.words_mut(), &[rhs])
    }
    fn sub_big(&mut self, rhs: &Self) {
        if let Err(err) = self.checked_sub_assign(rhs) {
            panic!("{err}");
        }
    }
    fn sub_digit(&mut self, rhs: D) {
        if let Err(err) = self.checked_sub_digit(rhs) {
            panic!("{err}");
        }
    }

    pub fn mul_digit(&mut self, rhs: D) {
        if self.is_zero() || rhs == D::ONE {
            return;
        }
        if rhs.is_zero() {
            *self = Self::zero();
            return;
        }
        mul::assign_digit(self.words_mut(), rhs);
    }
    fn mul_big(&mut self, rhs: &Self) {
        if rhs.words.len() == 1 {
            self.mul_digit(rhs.low_digit());
            return;
        }
        if self.is_zero() {
            return;
        }
        if self.is_one() {
            *self = rhs.clone();
            return;
        }
        *self = Self::from_buffer(mul::naive(self.as_words(), rhs.as_words()));
    }

    /// computes (`self` / `rhs`, `self` % `rhs`)
    pub fn div_mod(&self, rhs: &Self) -> Result<(Self, Self)> {
        if rhs.is_zero() {
            return Err(Error::DivideByZero);
        }
        match self.cmp(rhs) {
            Ordering::Less => return Ok((Self::zero(), self.clone())),
            Ordering::Equal => return Ok((Self::one(), Self::zero())),
            Ordering::Greater => {}
        }
        if rhs.words.len() == 1 {
            let (quotient, remainder) = self.div_mod_digit(rhs.low_digit())?;
            return Ok((quotient, Self::from_digit(remainder)));
        }
        let (quotient, remainder) = div::long_division(self.as_words(), rhs.as_words());
        Ok((Self::from_buffer(quotient), Self::from_buffer(remainder)))
    }
    pub fn div_mod_digit(&self, rhs: D) -> Result<(Self, D)> {
        if rhs.is_zero() {
            return Err(Error::DivideByZero);
        }
        if rhs == D::ONE {
            return Ok((self.clone(), D::ZERO));
        }
        let (quotient, remainder) = div::div_mod_digit(self.as_words(), rhs);
        Ok((Self::from_buffer(quotient), remainder))
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
    fn div_digit(&mut self, rhs: D) {
        match self.div_mod_digit(rhs) {
            Ok((quotient, _)) => *self = quotient,
            Err(err) => panic!("{err}"),
        }
    }
    fn rem_digit(&mut self, rhs: D) {
        match self.div_mod_digit(rhs) {
            Ok((_, remainder)) => *self = Self::from_digit(remainder),
            Err(err) => panic!("{err}"),
        }
    }

    fn bitand_big(&mut self, rhs: &Self) {
        bit_math::bit_and_assign(self.words_mut(), rhs.as_words());
    }
    fn bitor_big(&mut self, rhs: &Self) {
        if rhs.is_zero() {
            return;
        }
        bit_math::bit_or_assign(self.words_mut(), rhs.as_words());
    }
    fn bitxor_big(&mut self, rhs: &Self) {
        if rhs.is_zero() {
            return;
        }
        bit_math::bit_xor_assign(self.words_mut(), rhs.as_words());
    }
    fn bitand_digit(&mut self, rhs: D) {
        *self = Self::from_digit(self.low_digit() & rhs);
    }
    fn bitor_digit(&mut self, rhs: D) {
        if rhs.is_zero() {
            return;
        }
        bit_math::bit_or_assign(self.words_mut(), &[rhs]);
    }
    fn bitxor_digit(&mut self, rhs: D) {
        if rhs.is_zero() {
            return;
        }
        bit_math::bit_xor_assign(self.words_mut(), &[rhs]);
    }
    fn shl_bits(&mut self, rhs: usize) {
        if rhs == 0 || self.is_zero() {
            return;
        }
        shift::shl_assign(self.words_mut(), rhs);
    }
    fn shr_bits(&mut self, rhs: usize) {
        if rhs == 0 || self.is_zero() {
            return;
        }
        if rhs >= self.bits() {
            *self = Self::zero();
            return;
        }
        shift::shr_assign(self.words_mut(), rhs);
    }

    pub fn inc(&mut self) {
        self.add_digit(D::ONE);
    }
    pub fn dec(&mut self) -> Result<()> {
        self.checked_sub_digit(D::ONE)
    }
    /// increments `self` and returns the old value
    #[must_use = "use `inc` if the old value isn't needed"]
    pub fn post_inc(&mut self) -> Self {
        let old = self.clone();
        self.inc();
        old
    }
    /// decrements `self` and returns the old value
    pub fn post_dec(&mut self) -> Result<Self> {
        let old = self.clone();
        self.dec()?;
        Ok(old)
    }

    #[must_use]
    pub fn pow(&self, exponent: &Self) -> Self {
        modular_potentiation::pow(self, exponent)
    }
    pub fn pow_mod(&self, exponent: &Self, modulus: &Self) -> Result<Self> {
        modular_potentiation::pow_mod(self, exponent, modulus)
    }
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        modular_potentiation::gcd(self, other)
    }
}

macro_rules! implBigMath {
	(ref $assign_trait:ident, $assign_func:ident, $trait:ident, $func:ident, $inner:ident) => {
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
	(val $assign_trait:ident, $assign_func:ident, $trait:ident, $func:ident, $inner:ident, $rhs:ty) => {
		impl<D: Digit> $trait<$rhs> for BigInt<D> {
			type Output = BigInt<D>;
			fn $func(mut self, rhs: $rhs) -> Self::Output {
				self.$inner(rhs);
				self
			}
		}
		impl<D: Digit> $trait<&$rhs> for BigInt<D> {
			type Output = BigInt<D>;
			fn $func(mut self, rhs: &$rhs) -> Self::Output {
				self.$inner(*rhs);
				self
			}
		}
		impl<D: Digit> $trait<$rhs> for &BigInt<D> {
			type Output = BigInt<D>;
			fn $func(self, rhs: $rhs) -> Self::Output {
				let mut out = self.clone();
				out.$inner(rhs);
				out
			}
		}
		impl<D: Digit> $trait<&$rhs> for &BigInt<D> {
			type Output = BigInt<D>;
			fn $func(self, rhs: &$rhs) -> Self::Output {
				let mut out = self.clone();
				out.$inner(*rhs);
				out
			}
		}
		impl<D: Digit> $assign_trait<$rhs> for BigInt<D> {
			fn $assign_func(&mut self, rhs: $rhs) {
				self.$inner(rhs);
			}
		}
		impl<D: Digit> $assign_trait<&$rhs> for BigInt<D> {
			fn $assign_func(&mut self, rhs: &$rhs) {
				self.$inner(*rhs);
			}
		}
	};
}
implBigMath!(ref AddAssign, add_assign, Add, add, add_big);
implBigMath!(ref SubAssign, sub_assign, Sub, sub, sub_big);
implBigMath!(ref MulAssign, mul_assign, Mul, mul, mul_big);
implBigMath!(ref DivAssign, div_assign, Div, div, div_big);
implBigMath!(ref RemAssign, rem_assign, Rem, rem, rem_big);
implBigMath!(ref BitAndAssign, bitand_assign, BitAnd, bitand, bitand_big);
implBigMath!(ref BitOrAssign, bitor_assign, BitOr, bitor, bitor_big);
implBigMath!(ref BitXorAssign, bitxor_assign, BitXor, bitxor, bitxor_big);
implBigMath!(val AddAssign, add_assign, Add, add, add_digit, D);
implBigMath!(val SubAssign, sub_assign, Sub, sub, sub_digit, D);
implBigMath!(val MulAssign, mul_assign, Mul, mul, mul_digit, D);
implBigMath!(val DivAssign, div_assign, Div, div, div_digit, D);
implBigMath!(val RemAssign, rem_assign, Rem, rem, rem_digit, D);
implBigMath!(val BitAndAssign, bitand_assign, BitAnd, bitand, bitand_digit, D);
implBigMath!(val BitOrAssign, bitor_assign, BitOr, bitor, bitor_digit, D);
implBigMath!(val BitXorAssign, bitxor_assign, BitXor, bitxor, bitxor_digit, D);
implBigMath!(val ShlAssign, shl_assign, Shl, shl, shl_bits, usize);
implBigMath!(val ShrAssign, shr_assign, Shr, shr, shr_bits, usize);

/// `word op number`, the word gets promoted to a number for non commutative operations
macro_rules! implDigitLhs {
	(inner $digit:ident, $trait:ident, $func:ident, $op:expr) => {
		impl $trait<BigInt<$digit>> for $digit {
			type Output = BigInt<$digit>;
			fn $func(self, rhs: BigInt<$digit>) -> Self::Output {
				($op)(self, &rhs)
			}
		}
		impl $trait<&BigInt<$digit>> for $digit {
			type Output = BigInt<$digit>;
			fn $func(self, rhs: &BigInt<$digit>) -> Self::Output {
				($op)(self, rhs)
			}
		}
	};
	($($digit:ident),*) => {$(
		implDigitLhs!(inner $digit, Add, add, |lhs: $digit, rhs: &BigInt<$digit>| rhs + lhs);
		implDigitLhs!(inner $digit, Mul, mul, |lhs: $digit, rhs: &BigInt<$digit>| rhs * lhs);
		implDigitLhs!(inner $digit, Sub, sub, |lhs: $digit, rhs: &BigInt<$digit>| BigInt::from_digit(lhs) - rhs);
		implDigitLhs!(inner $digit, Div, div, |lhs: $digit, rhs: &BigInt<$digit>| BigInt::from_digit(lhs) / rhs);
		implDigitLhs!(inner $digit, Rem, rem, |lhs: $digit, rhs: &BigInt<$digit>| BigInt::from_digit(lhs) % rhs);
	)*};
}
implDigitLhs!(u8, u16, u32, u64);
