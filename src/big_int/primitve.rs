// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0
//! the builtin integer types, which can be turned into big numbers
use std::fmt::Display;

use itertools::Either;

/// any builtin integer, split into its unsigned and signed twin
pub trait Primitive: Copy + Display {
    type Pos: UNum;
    type Neg: INum<Pos = Self::Pos>;

    fn select_sign(self) -> Either<Self::Pos, Self::Neg>;
}

/// builtin unsigned integers, the only ones a magnitude is built from directly
pub trait UNum: Primitive {
    const BYTES: usize;

    fn push_le_bytes(self, buf: &mut Vec<u8>);
}

pub trait INum: Primitive {
    fn is_negative(self) -> bool;
    /// the absolute value in the unsigned twin, so `MIN` doesn't overflow
    fn magnitude(self) -> Self::Pos;
}

macro_rules! implPrim {
    ($($pos_type: ty => $neg_type: ty),+ $(,)?) => {$(
        impl Primitive for $pos_type {
            type Pos = $pos_type;
            type Neg = $neg_type;

            fn select_sign(self) -> Either<Self::Pos, Self::Neg> {
                Either::Left(self)
            }
        }
        impl UNum for $pos_type {
            const BYTES: usize = std::mem::size_of::<Self>();

            fn push_le_bytes(self, buf: &mut Vec<u8>) {
                buf.extend_from_slice(&self.to_le_bytes());
            }
        }

        impl Primitive for $neg_type {
            type Pos = $pos_type;
            type Neg = $neg_type;

            fn select_sign(self) -> Either<Self::Pos, Self::Neg> {
                Either::Right(self)
            }
        }
        impl INum for $neg_type {
            fn is_negative(self) -> bool {
                <$neg_type>::is_negative(self)
            }
            fn magnitude(self) -> Self::Pos {
                self.unsigned_abs()
            }
        }
    )+};
}

implPrim!(
    u8 => i8,
    u16 => i16,
    u32 => i32,
    u64 => i64,
    u128 => i128,
    usize => isize,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes() {
        assert_eq!(u16::BYTES, 2);
        assert_eq!(u128::BYTES, 16);
        let mut buf = vec![0xff];
        0x0102u16.push_le_bytes(&mut buf);
        0x03u8.push_le_bytes(&mut buf);
        assert_eq!(buf, [0xff, 0x02, 0x01, 0x03]);
    }

    #[test]
    fn sign() {
        assert_eq!((-5i32).select_sign(), Either::Right(-5));
        assert_eq!(5i64.select_sign(), Either::Right(5));
        assert_eq!(5u32.select_sign(), Either::Left(5));
        assert!(INum::is_negative(-1i16));
        assert!(!INum::is_negative(0i16));
    }

    #[test]
    fn magnitude() {
        assert_eq!((-5i32).magnitude(), 5u32);
        assert_eq!(7isize.magnitude(), 7usize);
        assert_eq!(i8::MIN.magnitude(), 128u8);
        assert_eq!(i128::MIN.magnitude(), 1u128 << 127);
    }
}
