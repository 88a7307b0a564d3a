#![no_std]

pub mod address;
pub use address::{LegacyAddress, VirtualAddress};

pub mod mmu;
pub use mmu::*;

pub mod result;
pub use result::{Level, PageFault, TranslationResult};
