mod common;

use common::{CountingStore, ROOT_BASE, new_memory};
use mmu::{
    AccessKind, AddressingMode, Level, Mmu, MmuError, PageFault, PagePerms, PhysicalMemory, Pte,
    TranslationContext, TranslationResult,
};

fn legacy_memory(vpn: u8, raw: u32) -> PhysicalMemory {
    let mut mem = new_memory();
    mem.write_entry(ROOT_BASE, vpn, Pte(raw)).unwrap();
    mem
}

#[test]
fn test_valid_entry_translates() {
    // Page number 0x000003 with bit 31 set as the valid bit.
    let mem = legacy_memory(0x12, 0x8000_0031);
    let mmu = Mmu::legacy(&mem, TranslationContext::user(ROOT_BASE));
    assert_eq!(mmu.resolve_legacy(0x1234).unwrap(), TranslationResult::Success(0x0334));
}

#[test]
fn test_entry_without_bit_31_faults() {
    // Entries are valid only with bit 31 set; bit 0 is the X permission.
    let mem = legacy_memory(0x12, 0x0000_0031);
    let mmu = Mmu::legacy(&mem, TranslationContext::user(ROOT_BASE));
    assert_eq!(
        mmu.resolve_legacy(0x1234).unwrap(),
        TranslationResult::PageFault(PageFault::new(Level::Root, 0x12))
    );
}

#[test]
fn test_invalid_entry_faults_with_vpn() {
    let mem = legacy_memory(0x12, 0x0000_0030);
    let mmu = Mmu::legacy(&mem, TranslationContext::user(ROOT_BASE));
    let result = mmu.resolve_legacy(0x1234).unwrap();
    assert_eq!(result, TranslationResult::PageFault(PageFault::new(Level::Root, 0x12)));
    assert_eq!(result.physical_address(), None);
}

#[test]
fn test_neighbouring_vpn_is_unmapped() {
    let mem = legacy_memory(0x12, 0x8000_0031);
    let mmu = Mmu::legacy(&mem, TranslationContext::user(ROOT_BASE));
    assert_eq!(
        mmu.resolve_legacy(0x1334).unwrap(),
        TranslationResult::PageFault(PageFault::new(Level::Root, 0x13))
    );
}

#[test]
fn test_permission_bits_are_ignored() {
    // Privileged, no R/W/X, user mode: still a plain success.
    let pte = Pte::leaf(0x42, PagePerms::new(false, false, false, true));
    let mem = legacy_memory(0x01, pte.raw());
    let mmu = Mmu::legacy(&mem, TranslationContext::user(ROOT_BASE));
    assert_eq!(mmu.resolve_legacy(0x01ff).unwrap(), TranslationResult::Success(0x42ff));
    for access in AccessKind::ALL {
        assert_eq!(mmu.translate(0x01ff, access).unwrap(), TranslationResult::Success(0x42ff));
    }
}

#[test]
fn test_single_read_per_translation() {
    let mem = legacy_memory(0x7f, 0x8000_0100);
    let store = CountingStore::new(&mem);
    let mmu = Mmu::legacy(&store, TranslationContext::user(ROOT_BASE));
    mmu.resolve_legacy(0x7f00).unwrap();
    mmu.resolve_legacy(0x8000).unwrap();
    assert_eq!(store.reads(), 2);
}

#[test]
fn test_find_pte_returns_raw_entry() {
    let mem = legacy_memory(0x12, 0x0000_0030);
    let mmu = Mmu::legacy(&mem, TranslationContext::user(ROOT_BASE));
    assert_eq!(mmu.find_pte(0x12ab).unwrap(), Pte(0x0000_0030));
    assert_eq!(mmu.find_pte(0x13ab).unwrap(), Pte::invalid());
}

#[test]
fn test_cr3_outside_memory_is_an_error() {
    let mem = new_memory();
    let cr3 = mem.size() as u32;
    let mmu = Mmu::legacy(&mem, TranslationContext::user(cr3));
    assert!(matches!(
        mmu.resolve_legacy(0x0000),
        Err(MmuError::OutOfBounds { .. })
    ));
}

#[test]
fn test_translate_rejects_wide_address() {
    let mem = new_memory();
    let mmu = Mmu::legacy(&mem, TranslationContext::user(ROOT_BASE));
    assert_eq!(mmu.mode(), AddressingMode::Legacy);
    assert_eq!(
        mmu.translate(0x1_0000, AccessKind::Read),
        Err(MmuError::AddressWidth {
            va: 0x1_0000,
            mode: AddressingMode::Legacy
        })
    );
}

#[test]
fn test_every_outcome_is_implemented() {
    let mem = legacy_memory(0x00, 0x8000_0010);
    let mmu = Mmu::legacy(&mem, TranslationContext::user(ROOT_BASE));
    for va in [0x0000u16, 0x00ff, 0x0100, 0xffff] {
        let result = mmu.resolve_legacy(va).unwrap();
        assert_ne!(result, TranslationResult::NotImplemented);
    }
}
