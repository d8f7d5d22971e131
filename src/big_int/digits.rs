// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0
use std::{
    fmt::{Debug, LowerHex, UpperHex},
    hash::Hash,
    ops::{Add, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div, Mul, Rem, Shl, Shr},
    sync::{Arc, OnceLock},
};

use super::word_buffer::WordBuffer;

/// number of values starting at zero, which share one preallocated buffer per `Digit` type
pub const SMALL_VALUE_COUNT: usize = 32;

/// A 'Digit' for a Bigint
/// is assumed to be exactly stored as a number of bytes (its basis is 2^8n for some Interger n)
pub trait Digit:
    Copy
    + Default
    + Debug
    + Eq
    + Ord
    + Hash
    + LowerHex
    + UpperHex
    + From<u8>
    + From<bool>
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + BitAndAssign
    + BitOrAssign
    + BitXorAssign
    + Shl<usize, Output = Self>
    + Shr<usize, Output = Self>
    + Send
    + Sync
    + 'static
{
    const BYTES: usize;
    const BASIS_POW: usize = Self::BYTES * 8;
    const ZERO: Self;
    const ONE: Self;
    const MAX: Self;
    type Wide: Wide<Self>;

    fn to_u64(self) -> u64;
    /// keeps only the lowest `Self::BASIS_POW` bits
    fn from_u64_wrapping(value: u64) -> Self;
    fn leading_zeros(self) -> u32;

    /// `bytes` holds at most `Self::BYTES` bytes in big endian order
    fn from_be_slice(bytes: &[u8]) -> Self;
    fn push_be_bytes(self, buf: &mut Vec<u8>);

    /// the shared buffers for the values `0..SMALL_VALUE_COUNT`, initialized on first use
    fn small_values() -> &'static [Arc<WordBuffer<Self>>; SMALL_VALUE_COUNT];

    fn get_bit(self, i: usize) -> bool {
        (self >> i) & Self::ONE != Self::ZERO
    }
    fn is_zero(self) -> bool {
        self == Self::ZERO
    }
    /// index into `small_values` if `self` is cached
    fn small_index(self) -> Option<usize> {
        usize::try_from(self.to_u64())
            .ok()
            .filter(|&it| it < SMALL_VALUE_COUNT)
    }

    fn overflowing_add(self, rhs: Self) -> (Self, bool);
    fn carring_add(self, rhs: Self, in_carry: bool) -> (Self, bool) {
        let (res, carry_1) = self.overflowing_add(rhs);
        let (res, carry_2) = res.overflowing_add(Self::from(in_carry));
        (res, carry_1 | carry_2)
    }
    fn overflowing_sub(self, rhs: Self) -> (Self, bool);
    fn carring_sub(self, rhs: Self, in_carry: bool) -> (Self, bool) {
        let (res, carry_1) = self.overflowing_sub(rhs);
        let (res, carry_2) = res.overflowing_sub(Self::from(in_carry));
        (res, carry_1 | carry_2)
    }
    /// ((0, `self`) * (0, `rhs`)) + (0, `carry_in`) = (`carry_out`, `result`)
    fn widening_mul(self, rhs: Self, carry: Self) -> Self::Wide {
        Self::Wide::widen(self) * Self::Wide::widen(rhs) + Self::Wide::widen(carry)
    }
    /// (`remainder`, `self`) / `rhs` = (`quotient`, `new_remainder`)
    /// `remainder` needs to be smaller than `rhs`, so that the quotient fits into one digit
    fn widening_div_rem(self, remainder: Self, rhs: Self) -> (Self, Self) {
        debug_assert!(remainder < rhs, "quotient of {remainder:?}:{self:?} / {rhs:?} overflows");
        let full = Self::Wide::new(self, remainder);
        let rhs = Self::Wide::widen(rhs);
        ((full / rhs).split_le().0, (full % rhs).split_le().0)
    }
}

pub trait Wide<Half>:
    Copy
    + Ord
    + Debug
    + Add<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Rem<Output = Self>
    + Shl<usize, Output = Self>
    + Shr<usize, Output = Self>
    + BitOr<Output = Self>
{
    fn new(lower: Half, upper: Half) -> Self;
    fn widen(value: Half) -> Self;
    fn split_le(self) -> (Half, Half);
}

macro_rules! implDigit {
    ($digit:ident, $wide: ident) => {
        impl Digit for $digit {
            const BYTES: usize = Self::BITS as usize / 8;
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const MAX: Self = Self::MAX;
            type Wide = $wide;

            fn to_u64(self) -> u64 {
                self as u64
            }
            fn from_u64_wrapping(value: u64) -> Self {
                value as Self
            }
            fn leading_zeros(self) -> u32 {
                self.leading_zeros()
            }

            fn from_be_slice(bytes: &[u8]) -> Self {
                debug_assert!(bytes.len() <= Self::BYTES, "{bytes:?} won't fit");
                let mut buf = [0; Self::BYTES];
                buf[Self::BYTES - bytes.len()..].copy_from_slice(bytes);
                Self::from_be_bytes(buf)
            }
            fn push_be_bytes(self, buf: &mut Vec<u8>) {
                buf.extend(self.to_be_bytes());
            }

            fn small_values() -> &'static [Arc<WordBuffer<Self>>; SMALL_VALUE_COUNT] {
                static CACHE: OnceLock<[Arc<WordBuffer<$digit>>; SMALL_VALUE_COUNT]> =
                    OnceLock::new();
                CACHE.get_or_init(|| {
                    std::array::from_fn(|i| Arc::new(WordBuffer::new(i as $digit, 1)))
                })
            }

            fn overflowing_add(self, rhs: Self) -> (Self, bool) {
                self.overflowing_add(rhs)
            }
            fn overflowing_sub(self, rhs: Self) -> (Self, bool) {
                self.overflowing_sub(rhs)
            }
        }

        impl Wide<$digit> for $wide {
            fn widen(value: $digit) -> Self {
                value as Self
            }
            fn new(lower: $digit, upper: $digit) -> Self {
                ((upper as Self) << <$digit>::BITS) | lower as Self
            }
            fn split_le(self) -> ($digit, $digit) {
                (self as $digit, (self >> <$digit>::BITS) as $digit)
            }
        }
    };
}
implDigit!(u8, u16);
implDigit!(u16, u32);
implDigit!(u32, u64);
implDigit!(u64, u128);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widening_mul() {
        // the std inherent `widening_mul` would shadow a method call
        assert_eq!(
            Digit::widening_mul(0xffff_ffffu32, 0xffff_ffff, 0xffff_ffff),
            0xffff_ffff_0000_0000u64
        );
        assert_eq!(Digit::widening_mul(0x12u8, 0x10, 0x3), 0x0123u16);
        assert_eq!(
            Digit::widening_mul(u64::MAX, 2, 1),
            (u128::from(u64::MAX) << 1) + 1
        );
    }
    #[test]
    fn widening_div_rem() {
        assert_eq!(
            Digit::widening_div_rem(0x3322_1100u32, 0x7, 0x10),
            (0x7332_2110, 0x0)
        );
        assert_eq!(Digit::widening_div_rem(0xffu8, 0x2, 0x3), (0xff, 0x2));
        assert_eq!(Digit::widening_div_rem(0x05u8, 0x1, 0x10), (0x10, 0x5));
    }
    #[test]
    fn carring() {
        assert_eq!(u32::MAX.carring_add(0, true), (0, true));
        assert_eq!(0x10u8.carring_add(0x20, true), (0x31, false));
        assert_eq!(0u16.carring_sub(0, true), (u16::MAX, true));
        assert_eq!(5u64.carring_sub(3, true), (1, false));
    }
    #[test]
    fn bytes() {
        assert_eq!(u32::from_be_slice(&[0x41, 0x42]), 0x4142);
        let mut buf = Vec::new();
        0x0102_0304u32.push_be_bytes(&mut buf);
        assert_eq!(buf, [1, 2, 3, 4]);
    }

    mod wide {
        use super::*;

        #[test]
        fn load() {
            assert_eq!(
                0x7766_5544_3322_1100u64,
                u64::new(0x3322_1100u32, 0x7766_5544u32)
            );
        }

        #[test]
        fn read() {
            assert_eq!(
                Wide::<u32>::split_le(0x7766_5544_3322_1100u64),
                (0x3322_1100, 0x7766_5544)
            );
        }
    }

    #[test]
    fn small_values_are_initialized_once() {
        let first = u32::small_values();
        let second = u32::small_values();
        for (i, (a, b)) in first.iter().zip(second).enumerate() {
            assert!(Arc::ptr_eq(a, b));
            assert_eq!(a.as_slice(), [i as u32]);
        }
        assert_eq!(31u8.small_index(), Some(31));
        assert_eq!(32u8.small_index(), None);
    }
}
