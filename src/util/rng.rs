// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0
//! reproducible randomness for the tests
use rand::{Rng, RngCore, SeedableRng};

use crate::{big_int::digits::Digit, BigUInt};

/// a fresh seed and a rng built from it, the seed should be printed on failure
pub fn seeded_rng() -> ([u8; 32], rand::rngs::StdRng) {
    let mut seed = [0; 32];
    rand::thread_rng().fill_bytes(&mut seed);
    (seed, rand::rngs::StdRng::from_seed(seed))
}

/// a number with up to `max_bytes` random bytes
pub fn random_number<D: Digit>(max_bytes: usize, rng: &mut impl RngCore) -> BigUInt<D> {
    let len = rng.gen_range(1..=max_bytes);
    let mut bytes = vec![0; len];
    rng.fill_bytes(&mut bytes);
    BigUInt::from_be_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respects_size() {
        let (seed, mut rng) = seeded_rng();
        for _ in 0..100 {
            let num = random_number::<u32>(9, &mut rng);
            assert!(num.bits() <= 72, "{num:?} too big with seed {seed:?}");
        }
    }

    #[test]
    fn same_seed_same_numbers() {
        let (seed, mut a) = seeded_rng();
        let mut b = rand::rngs::StdRng::from_seed(seed);
        assert_eq!(
            random_number::<u8>(32, &mut a),
            random_number::<u8>(32, &mut b)
        );
    }
}
