use super::{Address, Word};
use crate::error;
use crate::lang::Error;
use std::collections::HashMap;
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

/// Writes this far past the dense end grow it; anything further is sparse.
const DENSE_SLACK: usize = 4096;

/// ## Sparse, growable memory
///
/// The program image and nearby cells live in a vector. Distant cells,
/// typically reached through relative addressing, live in a hash map.
/// Cells never written read as zero.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Memory {
    dense: Vec<Word>,
    sparse: HashMap<Address, Word>,
}

impl Memory {
    pub fn new(image: Vec<Word>) -> Memory {
        Memory {
            dense: image,
            sparse: HashMap::new(),
        }
    }

    pub fn read(&self, address: Word) -> Result<Word> {
        let address = Memory::address(address)?;
        Ok(self.fetch(address))
    }

    pub fn write(&mut self, address: Word, value: Word) -> Result<()> {
        let address = Memory::address(address)?;
        self.store(address, value);
        Ok(())
    }

    /// Infallible read by resolved address.
    pub fn fetch(&self, address: Address) -> Word {
        match self.dense.get(address) {
            Some(word) => *word,
            None => self.sparse.get(&address).copied().unwrap_or(0),
        }
    }

    pub fn store(&mut self, address: Address, value: Word) {
        let len = self.dense.len();
        if address < len {
            self.dense[address] = value;
        } else if address - len < DENSE_SLACK {
            self.dense.resize(address + 1, 0);
            if !self.sparse.is_empty() {
                for addr in len..address {
                    if let Some(word) = self.sparse.remove(&addr) {
                        self.dense[addr] = word;
                    }
                }
                self.sparse.remove(&address);
            }
            self.dense[address] = value;
        } else {
            self.sparse.insert(address, value);
        }
    }

    /// The contiguous region starting at address 0.
    pub fn image(&self) -> &[Word] {
        &self.dense
    }

    /// One past the highest address ever written or loaded.
    pub fn len(&self) -> usize {
        let sparse_end = self.sparse.keys().max().map_or(0, |a| a + 1);
        self.dense.len().max(sparse_end)
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_empty() && self.sparse.is_empty()
    }

    fn address(address: Word) -> Result<Address> {
        if address < 0 {
            return Err(error!(NegativeAddress, address));
        }
        Address::try_from(address).map_err(|_| error!(Overflow, address))
    }
}
