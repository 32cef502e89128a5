//! Memory subsystem
//!
//! Sparse word-addressed memory. Unwritten cells read as zero, so programs
//! can use addresses far beyond their initial image without resizing.

use std::collections::{BTreeMap, HashMap};
use std::ops::Range;

#[derive(Debug, Clone, Default)]
pub struct Memory {
    data: HashMap<u64, i64>,
    /// One past the highest address ever written
    high_water: u64,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create memory holding `words` at addresses `0..words.len()`
    pub fn from_words(words: &[i64]) -> Self {
        let mut memory = Self::new();
        memory.load_program(words);
        memory
    }

    /// Copy a program image into addresses `0..words.len()`
    pub fn load_program(&mut self, words: &[i64]) {
        for (addr, &word) in (0u64..).zip(words) {
            self.write(addr, word);
        }
    }

    #[inline]
    pub fn read(&self, addr: u64) -> i64 {
        self.data.get(&addr).copied().unwrap_or(0)
    }

    pub fn write(&mut self, addr: u64, value: i64) {
        if value == 0 {
            self.data.remove(&addr);
        } else {
            self.data.insert(addr, value);
        }
        self.high_water = self.high_water.max(addr.saturating_add(1));
    }

    /// One past the highest address ever written.
    ///
    /// The machine halts when its program counter reaches this mark.
    #[inline]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    /// Every non-zero cell, ordered by address.
    ///
    /// Cells missing from the map read as zero. The size follows the number
    /// of written cells, not the highest address.
    pub fn snapshot(&self) -> BTreeMap<u64, i64> {
        self.data.iter().map(|(&addr, &value)| (addr, value)).collect()
    }

    /// Dense copy of the cells in `range`
    pub fn dump(&self, range: Range<u64>) -> Vec<i64> {
        range.map(|addr| self.read(addr)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwritten_reads_zero() {
        let mem = Memory::new();
        assert_eq!(mem.read(0), 0);
        assert_eq!(mem.read(1_000_000), 0);
        assert_eq!(mem.high_water(), 0);
    }

    #[test]
    fn test_load_program_sets_high_water() {
        let mem = Memory::from_words(&[1, 0, 0, 0, 99]);
        assert_eq!(mem.high_water(), 5);
        assert_eq!(mem.read(0), 1);
        assert_eq!(mem.read(4), 99);
        assert_eq!(mem.dump(0..5), vec![1, 0, 0, 0, 99]);
    }

    #[test]
    fn test_trailing_zeros_count_toward_high_water() {
        let mem = Memory::from_words(&[99, 0, 0]);
        assert_eq!(mem.high_water(), 3);
        assert_eq!(mem.snapshot(), BTreeMap::from([(0, 99)]));
        assert_eq!(mem.dump(0..mem.high_water()), vec![99, 0, 0]);
    }

    #[test]
    fn test_far_write_grows_high_water() {
        let mut mem = Memory::from_words(&[99]);
        mem.write(1000, 7);
        assert_eq!(mem.high_water(), 1001);
        assert_eq!(mem.read(1000), 7);
        assert_eq!(mem.read(500), 0);
    }

    #[test]
    fn test_snapshot_after_far_write() {
        let mut mem = Memory::from_words(&[99]);
        mem.write(i64::MAX as u64, 2);
        mem.write(u64::MAX, 3);
        assert_eq!(mem.high_water(), u64::MAX);
        assert_eq!(
            mem.snapshot(),
            BTreeMap::from([(0, 99), (i64::MAX as u64, 2), (u64::MAX, 3)])
        );
        assert_eq!(mem.dump(u64::MAX - 1..u64::MAX), vec![0]);
    }

    #[test]
    fn test_low_write_keeps_high_water() {
        let mut mem = Memory::from_words(&[1, 2, 3, 4]);
        mem.write(1, 0);
        assert_eq!(mem.high_water(), 4);
        assert_eq!(mem.read(1), 0);
        assert_eq!(mem.snapshot(), BTreeMap::from([(0, 1), (2, 3), (3, 4)]));
    }
}
