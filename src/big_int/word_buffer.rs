// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0
use std::{
    fmt::Debug,
    ops::{Index, IndexMut},
};

use super::digits::Digit;

/// resizable word storage in LE order, shared between numbers behind an `Arc`
///
/// the logical length never drops below one word
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct WordBuffer<D> {
    words: Vec<D>,
}

impl<D: Debug> Debug for WordBuffer<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.words.iter()).finish()
    }
}

impl<'a, D> IntoIterator for &'a WordBuffer<D> {
    type Item = &'a D;
    type IntoIter = std::slice::Iter<'a, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}

#[allow(clippy::len_without_is_empty)]
impl<D: Digit> WordBuffer<D> {
    /// `size` words with `word` at index 0 and zeros above
    pub fn new(word: D, size: usize) -> Self {
        let mut words = vec![D::ZERO; size.max(1)];
        words[0] = word;
        Self { words }
    }
    /// takes `words` in LE order and normalizes them
    pub fn from_vec(mut words: Vec<D>) -> Self {
        if words.is_empty() {
            words.push(D::ZERO);
        }
        let mut buf = Self { words };
        buf.normalize();
        buf
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }
    pub fn capacity(&self) -> usize {
        self.words.capacity()
    }
    pub fn as_slice(&self) -> &[D] {
        &self.words
    }
    pub fn as_mut_slice(&mut self) -> &mut [D] {
        &mut self.words
    }
    pub fn iter(&self) -> std::slice::Iter<'_, D> {
        self.words.iter()
    }
    /// the most significant word
    pub fn last(&self) -> D {
        self.words.last().copied().unwrap_or(D::ZERO)
    }
    pub fn is_normalized(&self) -> bool {
        self.words.len() == 1 || self.last() != D::ZERO
    }

    /// makes room for `new_len` words, with about 25% headroom on reallocation
    fn reserve(&mut self, new_len: usize) {
        if new_len > self.words.capacity() {
            let target = new_len + self.words.len() / 4;
            self.words.reserve_exact(target - self.words.len());
        }
    }
    /// extends the length to `new_len`, filling new high words with zero
    ///
    /// never shrinks
    pub fn grow(&mut self, new_len: usize) {
        if new_len <= self.words.len() {
            return;
        }
        self.reserve(new_len);
        self.words.resize(new_len, D::ZERO);
    }
    /// sets the logical length, shrinking keeps the allocation
    pub fn resize(&mut self, new_len: usize) {
        let new_len = new_len.max(1);
        if new_len > self.words.len() {
            self.grow(new_len);
        } else {
            self.words.truncate(new_len);
        }
    }
    /// strips zero words from the top, but keeps at least one word
    pub fn normalize(&mut self) {
        let len = self
            .words
            .iter()
            .rposition(|&it| it != D::ZERO)
            .map_or(1, |it| it + 1);
        self.words.truncate(len);
    }
    pub fn push(&mut self, word: D) {
        self.reserve(self.words.len() + 1);
        self.words.push(word);
    }
    /// overwrites the whole content with `word`
    pub fn set_single(&mut self, word: D) {
        self.words.truncate(1);
        self.words[0] = word;
    }
}

impl<D> Index<usize> for WordBuffer<D> {
    type Output = D;

    fn index(&self, index: usize) -> &Self::Output {
        &self.words[index]
    }
}
impl<D> IndexMut<usize> for WordBuffer<D> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.words[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new() {
        let buf = WordBuffer::new(7u32, 3);
        assert_eq!(buf.as_slice(), [7, 0, 0]);
        assert_eq!(WordBuffer::new(7u32, 0).as_slice(), [7]);
    }

    #[test]
    fn grow_adds_headroom() {
        let mut buf = WordBuffer::from_vec(vec![1u8; 8]);
        assert_eq!(buf.len(), 8);
        buf.grow(10);
        assert_eq!(buf.len(), 10);
        assert_eq!(&buf.as_slice()[8..], [0, 0]);
        assert!(buf.capacity() >= 12, "capacity {} without headroom", buf.capacity());

        let capacity = buf.capacity();
        buf.grow(5);
        assert_eq!(buf.len(), 10);
        assert_eq!(buf.capacity(), capacity);
    }

    #[test]
    fn resize_keeps_storage() {
        let mut buf = WordBuffer::from_vec(vec![1u16, 2, 3, 4]);
        let capacity = buf.capacity();
        buf.resize(2);
        assert_eq!(buf.as_slice(), [1, 2]);
        assert_eq!(buf.capacity(), capacity);
        buf.resize(0);
        assert_eq!(buf.as_slice(), [1]);
        buf.resize(3);
        assert_eq!(buf.as_slice(), [1, 0, 0]);
    }

    #[test]
    fn normalize() {
        let mut buf = WordBuffer::new(0u32, 4);
        buf[1] = 5;
        buf.normalize();
        assert_eq!(buf.as_slice(), [0, 5]);

        let mut buf = WordBuffer::new(0u32, 4);
        buf.normalize();
        assert_eq!(buf.as_slice(), [0]);
        assert!(buf.is_normalized());
        assert_eq!(WordBuffer::<u8>::from_vec(vec![]).as_slice(), [0]);
    }

    #[test]
    fn push() {
        let mut buf = WordBuffer::new(1u64, 1);
        buf.push(2);
        buf.push(3);
        assert_eq!(buf.as_slice(), [1, 2, 3]);
        assert_eq!(buf.last(), 3);
        buf.set_single(9);
        assert_eq!(buf.as_slice(), [9]);
    }

    #[test]
    fn iterate() {
        let buf = WordBuffer::from_vec(vec![3u8, 2, 1]);
        let mut sum = 0u8;
        for word in &buf {
            sum += *word;
        }
        assert_eq!(sum, 6);
        assert!(buf.iter().rev().copied().eq([1, 2, 3]));
    }
}
