use core::fmt;

use crate::mmu::{INDEX_MASK, PAGE_OFFSET_MASK, PAGE_SHIFT};
use crate::result::Level;

/// 16-bit legacy-mode address: `vpn[15:8] | offset[7:0]`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LegacyAddress(pub u16);

impl LegacyAddress {
    pub const fn from_parts(vpn: u8, offset: u8) -> Self {
        LegacyAddress(((vpn as u16) << PAGE_SHIFT) | offset as u16)
    }

    pub const fn vpn(self) -> u8 {
        (self.0 >> PAGE_SHIFT) as u8
    }

    pub const fn offset(self) -> u8 {
        (self.0 as u32 & PAGE_OFFSET_MASK) as u8
    }
}

impl From<u16> for LegacyAddress {
    fn from(value: u16) -> Self {
        LegacyAddress(value)
    }
}

impl fmt::Debug for LegacyAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LegacyAddress(0x{:04x})", self.0)
    }
}

impl fmt::Display for LegacyAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x}", self.0)
    }
}

const DIR_SHIFT: u32 = PAGE_SHIFT + 16;
const TABLE_SHIFT: u32 = PAGE_SHIFT + 8;
const ENTRY_SHIFT: u32 = PAGE_SHIFT;

/// 32-bit extended-mode address.
///
/// ```text
///  31......24 23......16 15.......8 7........0
/// +----------+----------+----------+----------+
/// | dir idx  | table idx| entry idx|  offset  |
/// +----------+----------+----------+----------+
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct VirtualAddress(pub u32);

impl VirtualAddress {
    pub const fn from_parts(dir: u8, table: u8, entry: u8, offset: u8) -> Self {
        VirtualAddress(
            ((dir as u32) << DIR_SHIFT)
                | ((table as u32) << TABLE_SHIFT)
                | ((entry as u32) << ENTRY_SHIFT)
                | offset as u32,
        )
    }

    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Index into the root directory (CR3).
    pub const fn dir_index(self) -> u8 {
        ((self.0 >> DIR_SHIFT) & INDEX_MASK) as u8
    }

    /// Index into the directory.
    pub const fn table_index(self) -> u8 {
        ((self.0 >> TABLE_SHIFT) & INDEX_MASK) as u8
    }

    /// Index into the page table.
    pub const fn entry_index(self) -> u8 {
        ((self.0 >> ENTRY_SHIFT) & INDEX_MASK) as u8
    }

    pub const fn offset(self) -> u8 {
        (self.0 & PAGE_OFFSET_MASK) as u8
    }

    /// Index used at the given walk level.
    pub const fn index(self, level: Level) -> u8 {
        match level {
            Level::Root => self.dir_index(),
            Level::Directory => self.table_index(),
            Level::PageTable => self.entry_index(),
        }
    }
}

impl From<u32> for VirtualAddress {
    fn from(value: u32) -> Self {
        VirtualAddress(value)
    }
}

impl fmt::Debug for VirtualAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VirtualAddress(0x{:08x}: dir={:#04x} table={:#04x} entry={:#04x} off={:#04x})",
            self.0,
            self.dir_index(),
            self.table_index(),
            self.entry_index(),
            self.offset()
        )
    }
}

impl fmt::Display for VirtualAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}
