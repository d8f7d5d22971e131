// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0
//! exponentiation and gcd, built on the operators of `BigUInt`
use crate::{big_int::digits::Digit, BigUInt, Error, Result};

/// square and multiply over the bits of `exponent`, starting at the lowest one
pub fn pow<D: Digit>(base: &BigUInt<D>, exponent: &BigUInt<D>) -> BigUInt<D> {
    let _span = tracing::trace_span!(
        "pow",
        base_bits = base.bits(),
        exponent_bits = exponent.bits()
    )
    .entered();

    let mut result = if exponent.bit(0) {
        base.clone()
    } else {
        BigUInt::one()
    };
    let mut square = base.clone();
    for i in 1..exponent.bits() {
        square = &square * &square;
        if exponent.bit(i) {
            result *= &square;
        }
    }
    result
}

/// like `pow`, but reduces by `modulus` after every multiplication
pub fn pow_mod<D: Digit>(
    base: &BigUInt<D>,
    exponent: &BigUInt<D>,
    modulus: &BigUInt<D>,
) -> Result<BigUInt<D>> {
    let _span = tracing::trace_span!(
        "pow_mod",
        base_bits = base.bits(),
        exponent_bits = exponent.bits(),
        modulus_bits = modulus.bits()
    )
    .entered();

    if modulus.is_zero() {
        return Err(Error::DivideByZero);
    }
    if modulus.is_one() {
        return Ok(BigUInt::zero());
    }
    let base = base.checked_rem(modulus)?;
    let mut result = if exponent.bit(0) {
        base.clone()
    } else {
        BigUInt::one()
    };
    let mut square = base;
    for i in 1..exponent.bits() {
        square = &(&square * &square) % modulus;
        if exponent.bit(i) {
            result *= &square;
            result %= modulus;
        }
    }
    Ok(result)
}

/// euclids algorithm, zero if any operand is zero
pub fn gcd<D: Digit>(a: &BigUInt<D>, b: &BigUInt<D>) -> BigUInt<D> {
    let _span = tracing::trace_span!("gcd", a_bits = a.bits(), b_bits = b.bits()).entered();

    if a.is_zero() || b.is_zero() {
        return BigUInt::zero();
    }
    if a.is_one() || b.is_one() {
        return BigUInt::one();
    }
    let (mut a, mut b) = (a.clone(), b.clone());
    while b.is_nonzero() {
        let remainder = &a % &b;
        a = b;
        b = remainder;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    type Num = BigUInt<u32>;

    #[test]
    fn small_pow() {
        assert_eq!(pow(&Num::from(2u8), &Num::from(10u8)), 1024u32);
        assert_eq!(pow(&Num::from(3u8), &Num::zero()), 1u32);
        assert_eq!(pow(&Num::zero(), &Num::zero()), 1u32);
        assert_eq!(pow(&Num::zero(), &Num::from(5u8)), 0u32);
        assert_eq!(
            pow(&Num::from(2u8), &Num::from(100u8)),
            Num::from(1u128 << 100)
        );
    }

    #[test]
    fn pow_multi_word() {
        let base = BigUInt::<u8>::from(0xffu8);
        assert_eq!(
            pow(&base, &BigUInt::from(5u8)),
            BigUInt::from(0xfb_09f6_04ffu64)
        );
    }

    #[test]
    fn small_pow_mod() {
        let modulus = Num::from(497u16);
        assert_eq!(
            pow_mod(&Num::from(4u8), &Num::from(13u8), &modulus),
            Ok(Num::from(445u16))
        );
        assert_eq!(
            pow_mod(&Num::from(4u8), &Num::zero(), &modulus),
            Ok(Num::one())
        );
        assert_eq!(
            pow_mod(&Num::from(4u8), &Num::from(13u8), &Num::one()),
            Ok(Num::zero())
        );
        assert_eq!(
            pow_mod(&Num::from(4u8), &Num::from(13u8), &Num::zero()),
            Err(Error::DivideByZero)
        );
    }

    #[test]
    fn pow_mod_reduces_base() {
        let base: Num = "12345678901234567890123".parse().unwrap();
        assert_eq!(
            pow_mod(&base, &Num::from(3u8), &Num::from(1_000_000_007u32)),
            Ok(Num::from(511_847_092u32))
        );
        assert_eq!(
            pow_mod(&base, &Num::from(3u8), &Num::from(1_000_000_007u32)),
            Ok(&pow(&base, &Num::from(3u8)) % &Num::from(1_000_000_007u32))
        );
    }

    #[test]
    fn gcd_values() {
        assert_eq!(gcd(&Num::from(48u8), &Num::from(18u8)), 6u32);
        assert_eq!(gcd(&Num::from(18u8), &Num::from(48u8)), 6u32);
        assert_eq!(gcd(&Num::from(17u8), &Num::from(5u8)), 1u32);
        assert_eq!(gcd(&Num::zero(), &Num::from(5u8)), 0u32);
        assert_eq!(gcd(&Num::one(), &Num::from(u128::MAX)), 1u32);
        assert_eq!(
            gcd(&Num::from(1u128 << 100), &Num::from(3u128 << 70)),
            Num::from(1u128 << 70)
        );
    }
}
