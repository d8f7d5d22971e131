// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0
//! text and byte representations of `BigUInt`
use std::{fmt, str::FromStr};

use itertools::Itertools;

use super::{digits::Digit, math_algos::div, unsigned::BigInt};
use crate::{Error, Result};

const DIGIT_CHARS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const SEPERATOR: char = '_';

#[cfg(feature = "base64")]
const BASE64: base64::engine::GeneralPurpose = base64::engine::GeneralPurpose::new(
    &base64::alphabet::STANDARD,
    base64::engine::GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(base64::engine::DecodePaddingMode::Indifferent),
);

/// moves the position of a digit error, when a prefix got stripped before parsing
pub(super) fn offset_position(err: Error, offset: usize) -> Error {
    match err {
        Error::InvalidDigit { digit, position } => Error::InvalidDigit {
            digit,
            position: position + offset,
        },
        err => err,
    }
}

fn group_digits(digits: &str, size: usize) -> String {
    digits
        .chars()
        .collect_vec()
        .rchunks(size)
        .rev()
        .map(|chunk| chunk.iter().collect::<String>())
        .join(&SEPERATOR.to_string())
}

impl<D: Digit> FromStr for BigInt<D> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s, false)
    }
}

impl<D: Digit> BigInt<D> {
    /// parses `text` with the given `radix`, letters are case insensitive and `_` may be used as a seperator
    pub fn from_str_radix(text: &str, radix: u32) -> Result<Self> {
        if !(2..=36).contains(&radix) {
            return Err(Error::InvalidRadix(radix));
        }
        let values = text
            .chars()
            .enumerate()
            .filter(|(_, digit)| *digit != SEPERATOR)
            .map(|(position, digit)| {
                digit
                    .to_digit(radix)
                    .ok_or(Error::InvalidDigit { digit, position })
            })
            .collect::<Result<Vec<_>>>()?;
        if values.is_empty() {
            return Err(Error::Empty);
        }

        if radix.is_power_of_two() {
            // every digit fills a fixed number of bits, so they can be placed directly
            let shift = radix.trailing_zeros() as usize;
            let mut words = vec![D::ZERO; (values.len() * shift).div_ceil(D::BASIS_POW)];
            for (i, value) in values.iter().rev().enumerate() {
                for bit in (0..shift).filter(|bit| (value >> bit) & 1 == 1) {
                    let pos = i * shift + bit;
                    words[pos / D::BASIS_POW] |= D::ONE << (pos % D::BASIS_POW);
                }
            }
            return Ok(Self::from_digits(words));
        }

        let mut num = Self::zero();
        for value in values {
            num.mul_digit(D::from(radix as u8));
            num.add_digit(D::from(value as u8));
        }
        Ok(num)
    }

    /// parses `text` as hex with a `0x` prefix, as octal with a leading `0` if `use_octal` is set and as decimal otherwise
    pub fn parse(text: &str, use_octal: bool) -> Result<Self> {
        let (radix, rest) = if let Some(rest) = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
        {
            (16, rest)
        } else if use_octal && text.len() > 1 && text.starts_with('0') {
            (8, &text[1..])
        } else {
            (10, text)
        };
        Self::from_str_radix(rest, radix).map_err(|err| offset_position(err, text.len() - rest.len()))
    }

    /// parses pairs of hex digits as big endian bytes
    pub fn from_hex_bytes(text: &str) -> Result<Self> {
        if text.is_empty() {
            return Err(Error::Empty);
        }
        let bytes = hex::decode(text).map_err(|err| match err {
            hex::FromHexError::InvalidHexCharacter { c, index } => Error::InvalidDigit {
                digit: c,
                position: index,
            },
            hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => {
                Error::OddLength
            }
        })?;
        Ok(Self::from_be_bytes(&bytes))
    }
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        Self::from_digits(bytes.rchunks(D::BYTES).map(D::from_be_slice))
    }

    #[cfg(feature = "base64")]
    pub fn from_base64(text: impl AsRef<[u8]>) -> Result<Self> {
        Self::from_base64_with(text, &BASE64)
    }
    #[cfg(feature = "base64")]
    pub fn from_base64_with(text: impl AsRef<[u8]>, engine: &impl base64::Engine) -> Result<Self> {
        let text = text.as_ref();
        if text.is_empty() {
            return Err(Error::Empty);
        }
        engine
            .decode(text)
            .map(|bytes| Self::from_be_bytes(&bytes))
            .map_err(|err| match err {
                base64::DecodeError::InvalidByte(position, byte) => Error::InvalidDigit {
                    digit: char::from(byte),
                    position,
                },
                err => Error::Base64(err),
            })
    }

    /// the minimal big endian bytes, zero is a single zero byte
    pub fn to_be_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.word_count() * D::BYTES);
        for word in self.as_words().iter().rev() {
            word.push_be_bytes(&mut bytes);
        }
        let leading_zeros = bytes
            .iter()
            .take_while(|&&it| it == 0)
            .count()
            .min(bytes.len() - 1);
        bytes.drain(..leading_zeros);
        bytes
    }
    /// upper case hex of `to_be_bytes`
    pub fn to_hex_bytes(&self) -> String {
        hex::encode_upper(self.to_be_bytes())
    }
    #[cfg(feature = "base64")]
    pub fn to_base64(&self) -> String {
        self.to_base64_with(&BASE64)
    }
    #[cfg(feature = "base64")]
    pub fn to_base64_with(&self, engine: &impl base64::Engine) -> String {
        engine.encode(self.to_be_bytes())
    }

    /// renders `self` with digits `0-9A-Z`
    ///
    /// # Panics
    /// if `radix` isn't in `2..=36`
    pub fn to_string_radix(&self, radix: u32) -> String {
        assert!((2..=36).contains(&radix), "{}", Error::InvalidRadix(radix));
        if self.is_zero() {
            return "0".to_owned();
        }
        let radix = u64::from(radix);
        // the biggest power of radix, which still fits into one word
        let mut chunk_divisor = radix;
        let mut chunk_len = 1;
        while let Some(next) = chunk_divisor
            .checked_mul(radix)
            .filter(|&it| it <= D::MAX.to_u64())
        {
            chunk_divisor = next;
            chunk_len += 1;
        }
        let chunk_divisor = D::from_u64_wrapping(chunk_divisor);

        let mut digits = Vec::new();
        let mut rest = self.clone();
        while !rest.is_zero() {
            let (quotient, chunk) = div::div_mod_digit(rest.as_words(), chunk_divisor);
            rest = Self::from_buffer(quotient);
            let mut chunk = chunk.to_u64();
            for _ in 0..chunk_len {
                if rest.is_zero() && chunk == 0 {
                    break;
                }
                digits.push(DIGIT_CHARS[(chunk % radix) as usize]);
                chunk /= radix;
            }
        }
        digits.iter().rev().map(|&it| char::from(it)).collect()
    }

    /// decimal digits, grouped by three if `grouped`
    pub(super) fn decimal_string(&self, grouped: bool) -> String {
        let digits = self.to_string_radix(10);
        if grouped {
            group_digits(&digits, 3)
        } else {
            digits
        }
    }
}

impl<D: Digit> fmt::Display for BigInt<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "", &self.decimal_string(f.alternate()))
    }
}
impl<D: Digit> fmt::LowerHex for BigInt<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0x", &self.to_string_radix(16).to_lowercase())
    }
}
impl<D: Digit> fmt::UpperHex for BigInt<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0x", &self.to_string_radix(16))
    }
}
impl<D: Digit> fmt::Octal for BigInt<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0o", &self.to_string_radix(8))
    }
}
impl<D: Digit> fmt::Binary for BigInt<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0b", &self.to_string_radix(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Num = BigInt<u32>;

    mod parse {
        use super::*;

        #[test]
        fn radix() {
            assert_eq!(Num::from_str_radix("ff", 16), Ok(Num::from(255u8)));
            assert_eq!(Num::from_str_radix("FF", 16), Ok(Num::from(255u8)));
            assert_eq!(Num::from_str_radix("1000", 2), Ok(Num::from(8u8)));
            assert_eq!(Num::from_str_radix("777", 8), Ok(Num::from(511u16)));
            assert_eq!(Num::from_str_radix("zz", 36), Ok(Num::from(1295u16)));
            assert_eq!(
                Num::from_str_radix("1_000_000", 10),
                Ok(Num::from(1_000_000u32))
            );
        }

        #[test]
        fn long_power_of_two() {
            assert_eq!(
                Num::from_str_radix("123456789abcdef0123456789abcdef", 16),
                Ok(Num::from(0x0123_4567_89ab_cdef_0123_4567_89ab_cdefu128))
            );
            assert_eq!(
                BigInt::<u8>::from_str_radix("7777777777", 8),
                Ok(BigInt::from(0o7_777_777_777u64))
            );
        }

        #[test]
        fn long_decimal() {
            assert_eq!(
                "340282366920938463463374607431768211455".parse::<Num>(),
                Ok(Num::from(u128::MAX))
            );
        }

        #[test]
        fn errors() {
            assert_eq!(
                Num::from_str_radix("12a", 10),
                Err(Error::InvalidDigit {
                    digit: 'a',
                    position: 2
                })
            );
            assert_eq!(
                Num::from_str_radix("102", 2),
                Err(Error::InvalidDigit {
                    digit: '2',
                    position: 2
                })
            );
            assert_eq!(Num::from_str_radix("1", 37), Err(Error::InvalidRadix(37)));
            assert_eq!(Num::from_str_radix("1", 1), Err(Error::InvalidRadix(1)));
            assert_eq!(Num::from_str_radix("", 10), Err(Error::Empty));
            assert_eq!("".parse::<Num>(), Err(Error::Empty));
        }

        #[test]
        fn prefixes() {
            assert_eq!(Num::parse("0x1F", false), Ok(Num::from(31u8)));
            assert_eq!(Num::parse("0X1f", true), Ok(Num::from(31u8)));
            assert_eq!(Num::parse("017", true), Ok(Num::from(15u8)));
            assert_eq!(Num::parse("017", false), Ok(Num::from(17u8)));
            assert_eq!(Num::parse("0", true), Ok(Num::zero()));
            assert_eq!(
                Num::parse("0x1g", false),
                Err(Error::InvalidDigit {
                    digit: 'g',
                    position: 3
                })
            );
            assert_eq!(
                Num::parse("019", true),
                Err(Error::InvalidDigit {
                    digit: '9',
                    position: 2
                })
            );
            assert_eq!(Num::parse("0x", false), Err(Error::Empty));
        }
    }

    mod render {
        use super::*;

        #[test]
        fn radix() {
            assert_eq!(Num::from(255u8).to_string_radix(16), "FF");
            assert_eq!(Num::from(8u8).to_string_radix(2), "1000");
            assert_eq!(Num::zero().to_string_radix(7), "0");
            assert_eq!(Num::from(1295u16).to_string_radix(36), "ZZ");
            assert_eq!(
                Num::from(u128::MAX).to_string_radix(10),
                "340282366920938463463374607431768211455"
            );
            assert_eq!(
                BigInt::<u8>::from(1_000_000_007u32).to_string_radix(10),
                "1000000007"
            );
        }

        #[test]
        #[should_panic = "radix 1 is not in 2..=36"]
        fn invalid_radix() {
            let _ = Num::one().to_string_radix(1);
        }

        #[test]
        fn fmt() {
            let num = Num::from(1_234_567u32);
            assert_eq!(format!("{num}"), "1234567");
            assert_eq!(format!("{num:#}"), "1_234_567");
            assert_eq!(format!("{num:>9}"), "  1234567");
            assert_eq!(format!("{:#}", Num::from(123u8)), "123");
            assert_eq!(format!("{:x}", Num::from(0xabcu16)), "abc");
            assert_eq!(format!("{:#X}", Num::from(0xabcu16)), "0xABC");
            assert_eq!(format!("{:#010x}", Num::from(0xabcu16)), "0x00000abc");
            assert_eq!(format!("{:o}", Num::from(8u8)), "10");
            assert_eq!(format!("{:#b}", Num::from(5u8)), "0b101");
        }
    }

    mod bytes {
        use super::*;

        #[test]
        fn hex() {
            assert_eq!(Num::from_hex_bytes("4142"), Ok(Num::from(0x4142u16)));
            assert_eq!(Num::from_hex_bytes("0001ff"), Ok(Num::from(0x01ffu16)));
            assert_eq!(Num::from(0x4142u16).to_hex_bytes(), "4142");
            assert_eq!(Num::from(1u64 << 32).to_hex_bytes(), "0100000000");
            assert_eq!(Num::zero().to_hex_bytes(), "00");
            assert_eq!(Num::from_hex_bytes("414"), Err(Error::OddLength));
            assert_eq!(
                Num::from_hex_bytes("41g2"),
                Err(Error::InvalidDigit {
                    digit: 'g',
                    position: 2
                })
            );
        }

        #[test]
        fn raw() {
            let num = Num::from_be_bytes(b"AB");
            assert_eq!(num, Num::from(0x4142u16));
            assert_eq!(num.to_be_bytes(), b"AB");
            assert_eq!(Num::from_be_bytes(&[]), Num::zero());
            assert_eq!(Num::zero().to_be_bytes(), [0]);
            assert_eq!(
                BigInt::<u64>::from_be_bytes(b"This is a test.").to_be_bytes(),
                b"This is a test."
            );
        }
    }

    #[cfg(feature = "base64")]
    mod base64 {
        use super::*;

        #[test]
        fn vectors() {
            for (value, text) in [
                (0u64, "AA=="),
                (1, "AQ=="),
                (255, "/w=="),
                (256, "AQA="),
                (0x4142, "QUI="),
                (0x41_4243, "QUJD"),
                (0x4142_4344, "QUJDRA=="),
                (1 << 32, "AQAAAAA="),
            ] {
                let num = Num::from(value);
                assert_eq!(num.to_base64(), text, "encoding {value:#x}");
                assert_eq!(Num::from_base64(text), Ok(num), "decoding {text}");
            }
        }

        #[test]
        fn padding_optional() {
            assert_eq!(Num::from_base64("QUI"), Ok(Num::from(0x4142u16)));
            assert_eq!(Num::from_base64("AQAAAAA"), Ok(Num::from(1u64 << 32)));
        }

        #[test]
        fn errors() {
            assert_eq!(
                Num::from_base64("QU*="),
                Err(Error::InvalidDigit {
                    digit: '*',
                    position: 2
                })
            );
            assert!(matches!(Num::from_base64("Q"), Err(Error::Base64(_))));
            assert_eq!(Num::from_base64(""), Err(Error::Empty));
        }

        #[test]
        fn custom_engine() {
            let num = Num::from(0xfbffu16);
            let text = num.to_base64_with(&::base64::engine::general_purpose::URL_SAFE_NO_PAD);
            assert_eq!(text, "-_8");
            assert_eq!(
                Num::from_base64_with(
                    text,
                    &::base64::engine::general_purpose::URL_SAFE_NO_PAD
                ),
                Ok(num)
            );
        }
    }
}
