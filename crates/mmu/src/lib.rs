//! Software MMU: legacy one-level and extended three-level page-table
//! translation over simulated physical memory.

pub mod context;
pub mod error;
pub mod extended;
pub mod legacy;
pub mod memory;
pub mod translator;

pub use context::{AddressingMode, TranslationContext};
pub use error::MmuError;
pub use memory::{PageTableStore, PhysicalMemory};
pub use translator::Mmu;
pub use types::mmu::*;
pub use types::{LegacyAddress, Level, PageFault, TranslationResult, VirtualAddress};
