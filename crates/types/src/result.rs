use core::fmt;

/// Table level of a walk, top-down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    /// Root directory named by CR3. Legacy mode only has this level.
    Root,
    Directory,
    PageTable,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Root => "root",
            Level::Directory => "directory",
            Level::PageTable => "page table",
        };
        f.write_str(name)
    }
}

/// Where a walk stopped on an invalid entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PageFault {
    pub level: Level,
    pub index: u8,
}

impl PageFault {
    pub const fn new(level: Level, index: u8) -> Self {
        Self { level, index }
    }
}

impl fmt::Display for PageFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} index 0x{:02x}", self.level, self.index)
    }
}

/// Outcome of one translation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TranslationResult {
    /// Translated physical address.
    Success(u32),
    PageFault(PageFault),
    /// All levels valid but the access was denied; carries the physical
    /// address the walk reached.
    ProtectionFault(u32),
    /// Placeholder outcome for an unfinished translation path. No translator
    /// in this workspace produces it.
    NotImplemented,
}

impl TranslationResult {
    pub const fn is_success(&self) -> bool {
        matches!(self, TranslationResult::Success(_))
    }

    /// Physical address carried by `Success` or `ProtectionFault`.
    pub const fn physical_address(&self) -> Option<u32> {
        match self {
            TranslationResult::Success(pa) | TranslationResult::ProtectionFault(pa) => Some(*pa),
            _ => None,
        }
    }

    pub const fn page_fault(&self) -> Option<PageFault> {
        match self {
            TranslationResult::PageFault(fault) => Some(*fault),
            _ => None,
        }
    }
}

impl fmt::Display for TranslationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationResult::Success(pa) => write!(f, "success pa=0x{:08x}", pa),
            TranslationResult::PageFault(fault) => write!(f, "page fault at {}", fault),
            TranslationResult::ProtectionFault(pa) => write!(f, "protection fault pa=0x{:08x}", pa),
            TranslationResult::NotImplemented => f.write_str("not implemented"),
        }
    }
}
