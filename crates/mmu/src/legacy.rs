//! 16-bit legacy translation.
//!
//! CR3 names a single 256-entry table indexed by the VPN. Legacy mode does
//! not enforce permissions: every valid mapping is readable, writable and
//! executable whatever its permission bits say, privileged bit included.

use log::{debug, trace};
use types::{LegacyAddress, Level, PageFault, Pte, TranslationResult};

use crate::context::TranslationContext;
use crate::error::Result;
use crate::memory::PageTableStore;

/// Raw entry `va` resolves through, uninterpreted.
pub fn find_pte<S>(store: &S, ctx: &TranslationContext, va: LegacyAddress) -> Result<Pte>
where
    S: PageTableStore + ?Sized,
{
    store.read_pte(ctx.cr3, va.vpn())
}

pub fn resolve<S>(
    store: &S,
    ctx: &TranslationContext,
    va: LegacyAddress,
) -> Result<TranslationResult>
where
    S: PageTableStore + ?Sized,
{
    let vpn = va.vpn();
    let pte = find_pte(store, ctx, va)?;
    trace!("legacy va={} cr3=0x{:08x} vpn=0x{:02x} pte={:?}", va, ctx.cr3, vpn, pte);

    if !pte.is_valid() {
        debug!("legacy page fault va={} vpn=0x{:02x}", va, vpn);
        return Ok(TranslationResult::PageFault(PageFault::new(Level::Root, vpn)));
    }
    Ok(TranslationResult::Success(pte.page_address(va.offset())))
}
