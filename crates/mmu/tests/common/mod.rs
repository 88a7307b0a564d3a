#![allow(dead_code)]

use std::cell::Cell;

use mmu::{
    MmuError, PagePerms, PageTableStore, PhysicalMemory, Pte, TableDescriptor, VirtualAddress,
};

pub const MEMORY_SIZE: usize = 0x1_0000;

/// Fixed table placement used by the fixtures; each table is 1 KiB.
pub const ROOT_BASE: u32 = 0x0400;
pub const DIR_BASE: u32 = 0x0800;
pub const TABLE_BASE: u32 = 0x0c00;

/// Store wrapper counting entry reads.
pub struct CountingStore<'a> {
    inner: &'a PhysicalMemory,
    reads: Cell<usize>,
}

impl<'a> CountingStore<'a> {
    pub fn new(inner: &'a PhysicalMemory) -> Self {
        Self {
            inner,
            reads: Cell::new(0),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl PageTableStore for CountingStore<'_> {
    fn read_entry(&self, base: u32, index: u8) -> Result<u32, MmuError> {
        self.reads.set(self.reads.get() + 1);
        self.inner.read_entry(base, index)
    }
}

pub fn new_memory() -> PhysicalMemory {
    PhysicalMemory::new(MEMORY_SIZE)
}

/// Link the root, directory and page table for `va` and map it to `ppn`.
pub fn map_extended(mem: &mut PhysicalMemory, va: VirtualAddress, ppn: u32, perms: PagePerms) {
    mem.write_entry(ROOT_BASE, va.dir_index(), TableDescriptor::new(DIR_BASE))
        .expect("root entry");
    mem.write_entry(DIR_BASE, va.table_index(), TableDescriptor::new(TABLE_BASE))
        .expect("directory entry");
    mem.write_entry(TABLE_BASE, va.entry_index(), Pte::leaf(ppn, perms))
        .expect("page table entry");
}
