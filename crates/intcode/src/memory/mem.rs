use std::collections::BTreeMap;

use crate::Word;

/// Sparse, unbounded memory: a mapping from non-negative address to [`Word`].
///
/// Any address that has never been written reads as `0`. A materializing
/// read ([`Self::read`]) inserts the zero cell on first access, so the set
/// of known addresses grows as the program touches memory and is observable
/// through [`Self::known_addresses`]. Addresses are `usize`; the checks that
/// keep effective addresses non-negative live in the run context, before an
/// address ever reaches this type.
#[derive(Debug, Clone, Default)]
pub struct Memory {
    pub(crate) cells: BTreeMap<usize, Word>,
}

impl Memory {
    /// Builds a memory whose lowest addresses hold `image`, i.e. address `i`
    /// is initialized to `image[i]`. Everything above reads as `0`.
    #[must_use]
    pub fn from_image(image: &[Word]) -> Self {
        Self {
            cells: image.iter().copied().enumerate().collect(),
        }
    }

    /// Reads the value at `address`, materializing the cell if it has never
    /// been accessed before.
    pub fn read(&mut self, address: usize) -> Word {
        *self.cells.entry(address).or_insert(0)
    }

    /// Reads the value at `address` without materializing it.
    ///
    /// This is the inspection entry point for hosts and tests: it never
    /// changes the set of known addresses.
    #[must_use]
    pub fn peek(&self, address: usize) -> Word {
        self.cells.get(&address).copied().unwrap_or(0)
    }

    /// Writes `value` at `address`, materializing the cell if needed.
    pub fn write(&mut self, address: usize, value: Word) {
        self.cells.insert(address, value);
    }

    /// Iterates over every address that has been materialized so far, in
    /// increasing order.
    pub fn known_addresses(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.keys().copied()
    }
}
