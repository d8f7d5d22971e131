// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0
pub mod codec;
pub mod digits;
pub mod math_algos;
pub mod primitve;
pub mod word_buffer;

pub mod signed;
pub mod unsigned;
