// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0
//! word level algorithms, all slices are in LE order and normalized unless noted otherwise

use std::cmp::Ordering;

use super::{digits::Digit, word_buffer::WordBuffer};

/// compares two normalized numbers
pub fn cmp_slices<D: Digit>(lhs: &[D], rhs: &[D]) -> Ordering {
    lhs.len()
        .cmp(&rhs.len())
        .then_with(|| lhs.iter().rev().cmp(rhs.iter().rev()))
}

/// number of significant bits, zero for the number zero
pub fn bit_len<D: Digit>(words: &[D]) -> usize {
    words.last().map_or(0, |last| {
        (words.len() - 1) * D::BASIS_POW + (D::BASIS_POW - last.leading_zeros() as usize)
    })
}

pub fn get_bit<D: Digit>(words: &[D], i: usize) -> bool {
    words
        .get(i / D::BASIS_POW)
        .is_some_and(|it| it.get_bit(i % D::BASIS_POW))
}

pub mod bit_math {
    use super::{Digit, WordBuffer};

    fn op_assign_zipped<D: Digit>(lhs: &mut WordBuffer<D>, rhs: &[D], op: impl Fn(&mut D, D)) {
        for (digit, &rhs) in lhs.as_mut_slice().iter_mut().zip(rhs) {
            op(digit, rhs);
        }
    }

    pub fn bit_or_assign<D: Digit>(lhs: &mut WordBuffer<D>, rhs: &[D]) {
        lhs.grow(rhs.len());
        op_assign_zipped(lhs, rhs, std::ops::BitOrAssign::bitor_assign);
        lhs.normalize();
    }
    pub fn bit_xor_assign<D: Digit>(lhs: &mut WordBuffer<D>, rhs: &[D]) {
        lhs.grow(rhs.len());
        op_assign_zipped(lhs, rhs, std::ops::BitXorAssign::bitxor_assign);
        lhs.normalize();
    }
    pub fn bit_and_assign<D: Digit>(lhs: &mut WordBuffer<D>, rhs: &[D]) {
        lhs.resize(lhs.len().min(rhs.len()));
        op_assign_zipped(lhs, rhs, std::ops::BitAndAssign::bitand_assign);
        lhs.normalize();
    }
}

pub mod add {
    use super::{Digit, WordBuffer};

    /// calculates `lhs` += `rhs` * `basis`^`offset`
    ///
    /// `rhs` doesn't need to be normalized
    pub fn assign_at_offset<D: Digit>(lhs: &mut WordBuffer<D>, rhs: &[D], offset: usize) {
        lhs.grow(rhs.len() + offset);

        let mut carry = false;
        let mut i = offset;
        for &rhs_digit in rhs {
            (lhs[i], carry) = lhs[i].carring_add(rhs_digit, carry);
            i += 1;
        }
        while carry {
            if i == lhs.len() {
                lhs.push(D::ONE);
                break;
            }
            (lhs[i], carry) = lhs[i].carring_add(D::ZERO, carry);
            i += 1;
        }
        lhs.normalize();
    }
    pub fn assign<D: Digit>(lhs: &mut WordBuffer<D>, rhs: &[D]) {
        assign_at_offset(lhs, rhs, 0);
    }
}

pub mod sub {
    use super::{cmp_slices, Digit, WordBuffer};
    use crate::{Error, Result};

    /// calculates `lhs` -= `rhs`, fails without touching `lhs` if `rhs` is bigger
    pub fn assign<D: Digit>(lhs: &mut WordBuffer<D>, rhs: &[D]) -> Result<()> {
        if cmp_slices(lhs.as_slice(), rhs).is_lt() {
            return Err(Error::Underflow);
        }
        assign_smaller(lhs, rhs);
        Ok(())
    }

    /// calculates `lhs` -= `rhs`, `lhs` needs to be at least `rhs`
    pub(crate) fn assign_smaller<D: Digit>(lhs: &mut WordBuffer<D>, rhs: &[D]) {
        debug_assert!(
            cmp_slices(lhs.as_slice(), rhs).is_ge(),
            "{lhs:?} is smaller than {rhs:?}"
        );
        let mut carry = false;
        let mut i = 0;
        for &rhs_digit in rhs {
            (lhs[i], carry) = lhs[i].carring_sub(rhs_digit, carry);
            i += 1;
        }
        while carry {
            (lhs[i], carry) = lhs[i].carring_sub(D::ZERO, carry);
            i += 1;
        }
        lhs.normalize();
    }
}

pub mod mul {
    use super::{add, Digit, WordBuffer};
    use crate::big_int::digits::Wide;

    pub fn assign_digit<D: Digit>(lhs: &mut WordBuffer<D>, rhs: D) {
        if rhs.is_zero() {
            lhs.set_single(D::ZERO);
            return;
        }
        let mut carry = D::ZERO;
        for digit in lhs.as_mut_slice() {
            (*digit, carry) = digit.widening_mul(rhs, carry).split_le();
        }
        if !carry.is_zero() {
            lhs.push(carry);
        }
    }

    /// schoolbook multiplication, one row per word of the shorter operand
    pub fn naive<D: Digit>(lhs: &[D], rhs: &[D]) -> WordBuffer<D> {
        // try to minimize outer loops
        if lhs.len() < rhs.len() {
            return naive(rhs, lhs);
        }
        let mut out = WordBuffer::new(D::ZERO, lhs.len() + rhs.len());
        let mut row = WordBuffer::new(D::ZERO, lhs.len() + 1);
        for (i, &rhs_digit) in rhs.iter().enumerate() {
            if rhs_digit.is_zero() {
                continue;
            }
            row.resize(lhs.len());
            row.as_mut_slice().copy_from_slice(lhs);
            assign_digit(&mut row, rhs_digit);
            add::assign_at_offset(&mut out, row.as_slice(), i);
        }
        out.normalize();
        out
    }
}

pub mod div {
    use super::{bit_len, cmp_slices, get_bit, shift, sub, Digit, WordBuffer};

    /// computes (`lhs` / `rhs`, `lhs` % `rhs`), `rhs` needs to be non-zero
    pub fn div_mod_digit<D: Digit>(lhs: &[D], rhs: D) -> (WordBuffer<D>, D) {
        debug_assert!(!rhs.is_zero(), "can't divide by zero");
        let mut quotient = WordBuffer::new(D::ZERO, lhs.len());
        let mut remainder = D::ZERO;
        for (i, &digit) in lhs.iter().enumerate().rev() {
            (quotient[i], remainder) = digit.widening_div_rem(remainder, rhs);
        }
        quotient.normalize();
        (quotient, remainder)
    }

    /// computes (`lhs` / `rhs`, `lhs` % `rhs`) one bit at a time
    ///
    /// `rhs` needs to be non-zero
    pub fn long_division<D: Digit>(lhs: &[D], rhs: &[D]) -> (WordBuffer<D>, WordBuffer<D>) {
        let lhs_bits = bit_len(lhs);
        let _span = tracing::trace_span!("long_division", lhs_bits, rhs_bits = bit_len(rhs))
            .entered();
        debug_assert!(bit_len(rhs) > 0, "can't divide by zero");

        let mut quotient = WordBuffer::new(D::ZERO, lhs.len());
        let mut remainder = WordBuffer::new(D::ZERO, 1);
        for i in (0..lhs_bits).rev() {
            shift::shl1_assign(&mut remainder, get_bit(lhs, i));
            if cmp_slices(remainder.as_slice(), rhs).is_ge() {
                sub::assign_smaller(&mut remainder, rhs);
                quotient[i / D::BASIS_POW] |= D::ONE << (i % D::BASIS_POW);
            }
        }
        quotient.normalize();
        (quotient, remainder)
    }
}

pub mod shift {
    use super::{Digit, WordBuffer};

    /// shifts `lhs` left by one and puts `bit` into the lowest position
    pub fn shl1_assign<D: Digit>(lhs: &mut WordBuffer<D>, bit: bool) {
        let mut carry = bit;
        for digit in lhs.as_mut_slice() {
            let next_carry = digit.get_bit(D::BASIS_POW - 1);
            *digit = (*digit << 1) | D::from(carry);
            carry = next_carry;
        }
        if carry {
            lhs.push(D::ONE);
        }
    }

    pub fn shl_assign<D: Digit>(lhs: &mut WordBuffer<D>, rhs: usize) {
        if lhs.len() == 1 && lhs[0].is_zero() {
            return;
        }
        let full = rhs / D::BASIS_POW;
        let partial = rhs % D::BASIS_POW;

        let old_len = lhs.len();
        lhs.grow(old_len + full + 1);
        for i in (0..old_len).rev() {
            let digit = lhs[i];
            if partial == 0 {
                lhs[i + full] = digit;
            } else {
                lhs[i + full + 1] |= digit >> (D::BASIS_POW - partial);
                lhs[i + full] = digit << partial;
            }
        }
        for digit in &mut lhs.as_mut_slice()[..full] {
            *digit = D::ZERO;
        }
        lhs.normalize();
    }

    pub fn shr_assign<D: Digit>(lhs: &mut WordBuffer<D>, rhs: usize) {
        let full = rhs / D::BASIS_POW;
        let partial = rhs % D::BASIS_POW;
        if full >= lhs.len() {
            lhs.set_single(D::ZERO);
            return;
        }

        let len = lhs.len();
        for i in 0..len - full {
            let lower = lhs[i + full];
            lhs[i] = if partial == 0 {
                lower
            } else {
                let upper = if i + full + 1 < len {
                    lhs[i + full + 1]
                } else {
                    D::ZERO
                };
                (lower >> partial) | (upper << (D::BASIS_POW - partial))
            };
        }
        lhs.resize(len - full);
        lhs.normalize();
    }
}
