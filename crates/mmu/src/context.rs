use core::fmt;

/// Addressing mode a translator runs in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// 16-bit addresses, one level, no permission enforcement.
    Legacy,
    /// 32-bit addresses, three levels, permissions and supervisor checks.
    Extended,
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressingMode::Legacy => f.write_str("legacy"),
            AddressingMode::Extended => f.write_str("extended"),
        }
    }
}

/// Snapshot of the processor state a translation reads.
///
/// Both fields are owned by whoever builds the page tables; translators only
/// borrow the snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TranslationContext {
    /// Physical address of the root table.
    pub cr3: u32,
    /// Supervisor mode flag.
    pub supervisor: bool,
}

impl TranslationContext {
    pub const fn new(cr3: u32, supervisor: bool) -> Self {
        Self { cr3, supervisor }
    }

    pub const fn user(cr3: u32) -> Self {
        Self::new(cr3, false)
    }

    pub const fn supervisor(cr3: u32) -> Self {
        Self::new(cr3, true)
    }

    pub const fn with_supervisor(self, supervisor: bool) -> Self {
        Self { supervisor, ..self }
    }
}
