//! 32-bit extended translation: root directory → directory → page table.
//!
//! The root and directory levels hold directory pointers (valid bit 0,
//! table address in the upper bits); the last level holds page-table
//! entries. Validity is checked strictly top-down and the walk stops at the
//! first invalid entry, so nothing below it is ever read. Permissions are
//! only looked at once all three levels are valid.

use log::{debug, trace};
use types::{AccessKind, Level, PageFault, PagePerms, Pte, TranslationResult, VirtualAddress};

use crate::context::TranslationContext;
use crate::error::Result;
use crate::memory::PageTableStore;

/// Levels holding directory pointers, top-down.
const DIRECTORY_LEVELS: [Level; 2] = [Level::Root, Level::Directory];

/// Outcome of the validity walk alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Walk {
    /// All three levels valid; the page-table entry mapping the page.
    Leaf(Pte),
    Fault(PageFault),
}

/// Walk the three table levels for `va` without checking permissions.
pub fn walk<S>(store: &S, ctx: &TranslationContext, va: VirtualAddress) -> Result<Walk>
where
    S: PageTableStore + ?Sized,
{
    let mut base = ctx.cr3;
    for level in DIRECTORY_LEVELS {
        let index = va.index(level);
        let desc = store.read_descriptor(base, index)?;
        trace!(
            "walk va={} level={} base=0x{:08x} index=0x{:02x} entry={:?}",
            va,
            level,
            base,
            index,
            desc
        );
        if !desc.is_valid() {
            debug!("page fault va={} at {} index 0x{:02x}", va, level, index);
            return Ok(Walk::Fault(PageFault::new(level, index)));
        }
        base = desc.table_address();
    }

    let index = va.entry_index();
    let pte = store.read_pte(base, index)?;
    trace!(
        "walk va={} level={} base=0x{:08x} index=0x{:02x} entry={:?}",
        va,
        Level::PageTable,
        base,
        index,
        pte
    );
    if !pte.is_valid() {
        debug!("page fault va={} at {} index 0x{:02x}", va, Level::PageTable, index);
        return Ok(Walk::Fault(PageFault::new(Level::PageTable, index)));
    }
    Ok(Walk::Leaf(pte))
}

/// Whether a leaf with `perms` may be accessed as `access`.
///
/// The privilege and R/W/X checks are independent: supervisor mode unlocks
/// privileged pages but does not override the R/W/X bits.
pub fn check_access(perms: PagePerms, access: AccessKind, supervisor: bool) -> bool {
    if perms.privileged && !supervisor {
        return false;
    }
    perms.allows(access)
}

pub fn resolve<S>(
    store: &S,
    ctx: &TranslationContext,
    va: VirtualAddress,
    access: AccessKind,
) -> Result<TranslationResult>
where
    S: PageTableStore + ?Sized,
{
    let leaf = match walk(store, ctx, va)? {
        Walk::Leaf(pte) => pte,
        Walk::Fault(fault) => return Ok(TranslationResult::PageFault(fault)),
    };

    let pa = leaf.page_address(va.offset());
    let perms = leaf.perms();
    if !check_access(perms, access, ctx.supervisor) {
        debug!(
            "protection fault va={} pa=0x{:08x} access={} perms={:?} supervisor={}",
            va, pa, access, perms, ctx.supervisor
        );
        return Ok(TranslationResult::ProtectionFault(pa));
    }
    Ok(TranslationResult::Success(pa))
}
