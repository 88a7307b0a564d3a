use types::{PTE_SIZE, Pte, TABLE_SIZE, TableDescriptor};

use crate::error::{MmuError, Result};

/// Read side of the memory collaborator. Translators never write.
pub trait PageTableStore {
    /// Read raw entry `index` of the 256-entry table starting at physical
    /// `base`.
    fn read_entry(&self, base: u32, index: u8) -> Result<u32>;

    fn read_pte(&self, base: u32, index: u8) -> Result<Pte> {
        self.read_entry(base, index).map(Pte)
    }

    fn read_descriptor(&self, base: u32, index: u8) -> Result<TableDescriptor> {
        self.read_entry(base, index).map(TableDescriptor)
    }
}

impl<S: PageTableStore + ?Sized> PageTableStore for &S {
    fn read_entry(&self, base: u32, index: u8) -> Result<u32> {
        (**self).read_entry(base, index)
    }
}

/// Physical address of entry `index` in the table at `base`.
pub fn entry_address(base: u32, index: u8) -> Option<usize> {
    (base as usize).checked_add(index as usize * PTE_SIZE)
}

/// Simulated physical memory: a flat little-endian byte buffer.
///
/// All accesses are bounds checked and report `MmuError::OutOfBounds`
/// instead of panicking.
#[derive(Debug, Clone)]
pub struct PhysicalMemory {
    backing: Vec<u8>,
}

impl PhysicalMemory {
    pub fn new(size: usize) -> Self {
        Self {
            backing: vec![0u8; size],
        }
    }

    pub fn size(&self) -> usize {
        self.backing.len()
    }

    fn range(&self, addr: usize, len: usize) -> Result<core::ops::Range<usize>> {
        let out_of_bounds = MmuError::OutOfBounds {
            addr,
            len,
            size: self.size(),
        };
        let end = addr.checked_add(len).ok_or(out_of_bounds)?;
        if end > self.size() {
            return Err(out_of_bounds);
        }
        Ok(addr..end)
    }

    pub fn load_u32(&self, addr: usize) -> Result<u32> {
        let range = self.range(addr, 4)?;
        let mut word = [0u8; 4];
        word.copy_from_slice(&self.backing[range]);
        Ok(u32::from_le_bytes(word))
    }

    pub fn store_u32(&mut self, addr: usize, val: u32) -> Result<()> {
        let range = self.range(addr, 4)?;
        self.backing[range].copy_from_slice(&val.to_le_bytes());
        Ok(())
    }

    /// Write entry `index` of the table at `base`.
    pub fn write_entry(&mut self, base: u32, index: u8, entry: impl Into<u32>) -> Result<()> {
        let addr = self.entry_address(base, index)?;
        self.store_u32(addr, entry.into())
    }

    /// Raw bytes of the full table at `base`, if it lies inside memory.
    pub fn table_bytes(&self, base: u32) -> Option<&[u8]> {
        let range = self.range(base as usize, TABLE_SIZE).ok()?;
        Some(&self.backing[range])
    }

    fn entry_address(&self, base: u32, index: u8) -> Result<usize> {
        entry_address(base, index).ok_or(MmuError::OutOfBounds {
            addr: base as usize,
            len: PTE_SIZE,
            size: self.size(),
        })
    }
}

impl PageTableStore for PhysicalMemory {
    fn read_entry(&self, base: u32, index: u8) -> Result<u32> {
        let addr = self.entry_address(base, index)?;
        self.load_u32(addr)
    }
}
