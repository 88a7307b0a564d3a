//! Entry layouts shared by the legacy and extended translators.
//!
//! Page-table entries (legacy table, extended level 3):
//!
//! ```text
//!  31    30..28 27 ......................... 4 3 2 1 0
//! +-----+------+-----------------------------+-+-+-+-+
//! |Valid|unused| 24-bit physical page number |P|R|W|X|
//! +-----+------+-----------------------------+-+-+-+-+
//! ```
//!
//! Directory pointers (extended levels 1 and 2):
//!
//! ```text
//!  31 ...................................... 4 3....1   0
//! +-----------------------------------------+------+-----+
//! | address of next table                   |unused|Valid|
//! +-----------------------------------------+------+-----+
//! ```
//!
//! Pages are 256 bytes, so a page number shifted left by 8 is a physical
//! address. Tables start on a page boundary, which leaves the low bits of a
//! directory pointer free for the valid bit.

use core::fmt;

pub const PAGE_SHIFT: u32 = 8;
pub const PAGE_OFFSET_MASK: u32 = 0xff;

/// Every table level holds 256 entries, one per 8-bit index.
pub const ENTRIES_PER_TABLE: usize = 256;
pub const INDEX_MASK: u32 = 0xff;
pub const PTE_SIZE: usize = 4;
/// Bytes occupied by one table (1 KiB).
pub const TABLE_SIZE: usize = ENTRIES_PER_TABLE * PTE_SIZE;

/// PTE flag bits.
pub const PTE_X: u32 = 1 << 0;
pub const PTE_W: u32 = 1 << 1;
pub const PTE_R: u32 = 1 << 2;
pub const PTE_P: u32 = 1 << 3;
pub const PTE_VALID: u32 = 1 << 31;

pub const PTE_PERM_MASK: u32 = PTE_X | PTE_W | PTE_R | PTE_P;
pub const PTE_PPN_SHIFT: u32 = 4;
/// Page number field width is 24 bits.
pub const PTE_PPN_MASK: u32 = 0x00ff_ffff;

/// Directory pointer bits.
pub const DIR_VALID: u32 = 1 << 0;
pub const DIR_ADDR_MASK: u32 = !0xf;

/// Kind of access a translation is performed for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessKind {
    Read,
    Write,
    Execute,
}

impl AccessKind {
    pub const ALL: [AccessKind; 3] = [AccessKind::Read, AccessKind::Write, AccessKind::Execute];

    /// PTE bit that grants this access.
    pub const fn pte_flag(self) -> u32 {
        match self {
            AccessKind::Read => PTE_R,
            AccessKind::Write => PTE_W,
            AccessKind::Execute => PTE_X,
        }
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccessKind::Read => "read",
            AccessKind::Write => "write",
            AccessKind::Execute => "execute",
        };
        f.write_str(name)
    }
}

/// Decoded permission bits of an entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PagePerms {
    pub read: bool,
    pub write: bool,
    pub exec: bool,
    /// Page is only reachable in supervisor mode.
    pub privileged: bool,
}

impl PagePerms {
    pub const fn new(read: bool, write: bool, exec: bool, privileged: bool) -> Self {
        Self {
            read,
            write,
            exec,
            privileged,
        }
    }

    pub const fn none() -> Self {
        Self::new(false, false, false, false)
    }

    pub const fn user_rwx() -> Self {
        Self::new(true, true, true, false)
    }

    pub const fn user_ro() -> Self {
        Self::new(true, false, false, false)
    }

    pub const fn user_rw() -> Self {
        Self::new(true, true, false, false)
    }

    pub const fn user_rx() -> Self {
        Self::new(true, false, true, false)
    }

    pub const fn kernel_rw() -> Self {
        Self::new(true, true, false, true)
    }

    pub const fn kernel_rwx() -> Self {
        Self::new(true, true, true, true)
    }

    /// Whether the R/W/X bits grant `access`. The privileged bit is not
    /// consulted here.
    pub const fn allows(self, access: AccessKind) -> bool {
        self.to_pte_flags() & access.pte_flag() != 0
    }

    pub const fn to_pte_flags(self) -> u32 {
        let mut flags = 0;
        if self.read {
            flags |= PTE_R;
        }
        if self.write {
            flags |= PTE_W;
        }
        if self.exec {
            flags |= PTE_X;
        }
        if self.privileged {
            flags |= PTE_P;
        }
        flags
    }

    pub const fn from_pte_flags(raw: u32) -> Self {
        Self {
            read: raw & PTE_R != 0,
            write: raw & PTE_W != 0,
            exec: raw & PTE_X != 0,
            privileged: raw & PTE_P != 0,
        }
    }
}

/// A raw 32-bit page-table entry.
///
/// Decoding never fails; an invalid entry simply reports `is_valid() == false`
/// and its other fields must not be relied on.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Pte(pub u32);

impl Pte {
    pub const fn invalid() -> Self {
        Pte(0)
    }

    /// Leaf entry mapping a data page.
    pub const fn leaf(ppn: u32, perms: PagePerms) -> Self {
        Pte(PTE_VALID | ((ppn & PTE_PPN_MASK) << PTE_PPN_SHIFT) | perms.to_pte_flags())
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0 & PTE_VALID != 0
    }

    /// 24-bit page number field.
    pub const fn ppn(self) -> u32 {
        (self.0 >> PTE_PPN_SHIFT) & PTE_PPN_MASK
    }

    pub const fn perms(self) -> PagePerms {
        PagePerms::from_pte_flags(self.0 & PTE_PERM_MASK)
    }

    /// Physical address of the page (or next table) this entry names.
    pub const fn frame_base(self) -> u32 {
        self.ppn() << PAGE_SHIFT
    }

    /// Physical address of byte `offset` within the named page.
    pub const fn page_address(self, offset: u8) -> u32 {
        self.frame_base() | offset as u32
    }
}

impl From<u32> for Pte {
    fn from(value: u32) -> Self {
        Pte(value)
    }
}

impl From<Pte> for u32 {
    fn from(value: Pte) -> Self {
        value.0
    }
}

impl fmt::Debug for Pte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "Pte(0x{:08x}, invalid)", self.0);
        }
        let perms = self.perms();
        write!(
            f,
            "Pte(0x{:08x}, ppn=0x{:06x}, {}{}{}{})",
            self.0,
            self.ppn(),
            if perms.privileged { 'p' } else { '-' },
            if perms.read { 'r' } else { '-' },
            if perms.write { 'w' } else { '-' },
            if perms.exec { 'x' } else { '-' },
        )
    }
}

impl fmt::Display for Pte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

/// A raw 32-bit directory pointer naming the next-level table.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct TableDescriptor(pub u32);

impl TableDescriptor {
    pub const fn invalid() -> Self {
        TableDescriptor(0)
    }

    /// Valid pointer to the table starting at `base`. The low four bits of
    /// `base` are dropped.
    pub const fn new(base: u32) -> Self {
        TableDescriptor((base & DIR_ADDR_MASK) | DIR_VALID)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0 & DIR_VALID != 0
    }

    /// Physical address of the next table: the entry with its low
    /// valid/unused bits stripped.
    pub const fn table_address(self) -> u32 {
        self.0 & DIR_ADDR_MASK
    }
}

impl From<u32> for TableDescriptor {
    fn from(value: u32) -> Self {
        TableDescriptor(value)
    }
}

impl From<TableDescriptor> for u32 {
    fn from(value: TableDescriptor) -> Self {
        value.0
    }
}

impl fmt::Debug for TableDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "TableDescriptor(0x{:08x}, invalid)", self.0);
        }
        write!(f, "TableDescriptor(0x{:08x}, table=0x{:08x})", self.0, self.table_address())
    }
}

impl fmt::Display for TableDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}
