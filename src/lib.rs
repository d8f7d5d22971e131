// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0
//! arbitrary precision integers, stored as words in shared copy-on-write buffers
pub mod big_int;
pub mod error;
pub mod modular_potentiation;

pub use big_int::{
    signed::{BigInt as BigIInt, SigNum, Sign},
    unsigned::BigInt as BigUInt,
};
pub use error::{Error, Result};

/// the default word size
pub type Word = u32;
pub type BigUnsigned = BigUInt<Word>;
pub type BigInteger = BigIInt<Word>;

#[cfg(test)]
mod util {
    pub mod rng;
}
