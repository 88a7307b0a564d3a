use types::{AccessKind, PTE_P, PTE_R, PTE_VALID, PTE_W, PTE_X, PagePerms, Pte, TableDescriptor};

#[test]
fn test_valid_bit_is_bit_31() {
    assert!(Pte(0x8000_0000).is_valid());
    assert!(Pte(0xffff_ffff).is_valid());
    assert!(!Pte(0x7fff_ffff).is_valid());
    assert!(!Pte(0x0000_0031).is_valid());
}

#[test]
fn test_ppn_field_is_24_bits_at_offset_4() {
    assert_eq!(Pte(0x0000_0031).ppn(), 0x3);
    assert_eq!(Pte(0x8123_4567).ppn(), 0x12_3456);
    // Bits 28..31 never leak into the page number.
    assert_eq!(Pte(0xffff_fff0).ppn(), 0xff_ffff);
    assert_eq!(Pte(0x0000_000f).ppn(), 0);
}

#[test]
fn test_permission_bits() {
    let perms = Pte(PTE_VALID | PTE_R | PTE_X).perms();
    assert_eq!(perms, PagePerms::new(true, false, true, false));

    let perms = Pte(PTE_W | PTE_P).perms();
    assert!(perms.write);
    assert!(perms.privileged);
    assert!(!perms.read);
    assert!(!perms.exec);
}

#[test]
fn test_leaf_constructor_layout() {
    let pte = Pte::leaf(0xab_cdef, PagePerms::kernel_rwx());
    assert_eq!(pte.raw(), PTE_VALID | (0xab_cdef << 4) | PTE_P | PTE_R | PTE_W | PTE_X);
    assert!(pte.is_valid());
    assert_eq!(pte.ppn(), 0xab_cdef);
    assert_eq!(pte.perms(), PagePerms::kernel_rwx());
}

#[test]
fn test_leaf_constructor_masks_oversized_ppn() {
    let pte = Pte::leaf(0x0100_0001, PagePerms::none());
    assert_eq!(pte.ppn(), 0x1);
    assert!(pte.is_valid());
}

#[test]
fn test_descriptor_valid_bit_is_bit_0() {
    assert!(TableDescriptor(0x0000_0031).is_valid());
    assert!(!TableDescriptor(0x0000_0030).is_valid());
    // A leaf-style valid bit means nothing in a directory pointer.
    assert!(!TableDescriptor(0x8000_0000).is_valid());
}

#[test]
fn test_descriptor_strips_low_bits() {
    let desc = TableDescriptor(0x0000_0c0f);
    assert_eq!(desc.table_address(), 0x0c00);
    assert_eq!(TableDescriptor(0xffff_fff1).table_address(), 0xffff_fff0);
}

#[test]
fn test_descriptor_constructor() {
    let desc = TableDescriptor::new(0x0000_0800);
    assert_eq!(desc.raw(), 0x0000_0801);
    assert!(desc.is_valid());
    assert_eq!(desc.table_address(), 0x0800);
    assert_eq!(TableDescriptor::new(0x0000_080f).table_address(), 0x0800);
    assert!(!TableDescriptor::invalid().is_valid());
}

#[test]
fn test_page_address_combines_frame_and_offset() {
    let pte = Pte(0x0000_0031);
    assert_eq!(pte.frame_base(), 0x0300);
    assert_eq!(pte.page_address(0x34), 0x0334);

    let pte = Pte::leaf(0xff_ffff, PagePerms::user_rw());
    assert_eq!(pte.page_address(0xff), 0xffff_ffff);
}

#[test]
fn test_perms_round_trip_through_flags() {
    for raw in 0u32..16 {
        let perms = PagePerms::from_pte_flags(raw);
        assert_eq!(perms.to_pte_flags(), raw);
    }
}

#[test]
fn test_allows_ignores_privileged_bit() {
    let perms = PagePerms::kernel_rw();
    assert!(perms.allows(AccessKind::Read));
    assert!(perms.allows(AccessKind::Write));
    assert!(!perms.allows(AccessKind::Execute));

    let none = PagePerms::none();
    for access in AccessKind::ALL {
        assert!(!none.allows(access));
    }
}

#[test]
fn test_access_kind_flags() {
    assert_eq!(AccessKind::Read.pte_flag(), PTE_R);
    assert_eq!(AccessKind::Write.pte_flag(), PTE_W);
    assert_eq!(AccessKind::Execute.pte_flag(), PTE_X);
}

#[test]
fn test_debug_format() {
    assert_eq!(format!("{:?}", Pte(0x30)), "Pte(0x00000030, invalid)");
    assert_eq!(
        format!("{:?}", Pte::leaf(0x3, PagePerms::user_rx())),
        "Pte(0x80000035, ppn=0x000003, -r-x)"
    );
}

#[test]
fn test_descriptor_debug_format() {
    assert_eq!(format!("{:?}", TableDescriptor(0x800)), "TableDescriptor(0x00000800, invalid)");
    assert_eq!(
        format!("{:?}", TableDescriptor::new(0x800)),
        "TableDescriptor(0x00000801, table=0x00000800)"
    );
}

#[test]
fn test_privileged_bit_grants_no_access() {
    let perms = PagePerms::new(false, false, false, true);
    for access in AccessKind::ALL {
        assert!(!perms.allows(access), "{access}");
    }
    assert!(PagePerms::kernel_rwx().allows(AccessKind::Execute));
}
