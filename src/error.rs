// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("division by zero")]
    DivideByZero,
    #[error("subtraction would underflow an unsigned number")]
    Underflow,
    #[error("invalid digit {digit:?} at position {position}")]
    InvalidDigit { digit: char, position: usize },
    #[error("radix {0} is not in 2..=36")]
    InvalidRadix(u32),
    #[error("no digits to parse")]
    Empty,
    #[error("hex byte string has an odd number of digits")]
    OddLength,
    #[error("exponent is negative")]
    NegativeExponent,
    #[error("can't convert a negative number into an unsigned one")]
    SignConversion,
    #[error("number doesn't fit into the target type")]
    Overflow,
    #[cfg(feature = "base64")]
    #[error("malformed base64: {0}")]
    Base64(base64::DecodeError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
