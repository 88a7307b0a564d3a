use types::{AccessKind, LegacyAddress, Pte, TranslationResult, VirtualAddress};

use crate::context::{AddressingMode, TranslationContext};
use crate::error::{MmuError, Result};
use crate::memory::PageTableStore;
use crate::{extended, legacy};

/// Translator bound to a memory store, a CR3/supervisor snapshot and an
/// addressing mode.
pub struct Mmu<'a, S: PageTableStore + ?Sized> {
    store: &'a S,
    ctx: TranslationContext,
    mode: AddressingMode,
}

impl<'a, S: PageTableStore + ?Sized> Mmu<'a, S> {
    pub fn new(store: &'a S, ctx: TranslationContext, mode: AddressingMode) -> Self {
        Self { store, ctx, mode }
    }

    pub fn legacy(store: &'a S, ctx: TranslationContext) -> Self {
        Self::new(store, ctx, AddressingMode::Legacy)
    }

    pub fn extended(store: &'a S, ctx: TranslationContext) -> Self {
        Self::new(store, ctx, AddressingMode::Extended)
    }

    pub fn mode(&self) -> AddressingMode {
        self.mode
    }

    /// Legacy 16-bit translation, regardless of the configured mode.
    pub fn resolve_legacy(&self, va: u16) -> Result<TranslationResult> {
        legacy::resolve(self.store, &self.ctx, LegacyAddress(va))
    }

    /// Extended 32-bit translation, regardless of the configured mode.
    pub fn resolve(&self, va: u32, access: AccessKind) -> Result<TranslationResult> {
        extended::resolve(self.store, &self.ctx, VirtualAddress(va), access)
    }

    /// Raw legacy entry for `va`.
    pub fn find_pte(&self, va: u16) -> Result<Pte> {
        legacy::find_pte(self.store, &self.ctx, LegacyAddress(va))
    }

    /// Translate in the configured mode. Legacy mode ignores `access` and
    /// rejects addresses wider than 16 bits.
    pub fn translate(&self, va: u32, access: AccessKind) -> Result<TranslationResult> {
        match self.mode {
            AddressingMode::Legacy => {
                let va = u16::try_from(va).map_err(|_| MmuError::AddressWidth {
                    va,
                    mode: AddressingMode::Legacy,
                })?;
                self.resolve_legacy(va)
            }
            AddressingMode::Extended => self.resolve(va, access),
        }
    }
}
