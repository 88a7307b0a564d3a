use thiserror::Error;

use crate::context::AddressingMode;

/// Failures that are not translation faults: the store could not serve a read
/// or the caller handed in an address the mode cannot decode.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MmuError {
    #[error("physical access out of bounds: addr=0x{addr:x} len={len} memory size=0x{size:x}")]
    OutOfBounds { addr: usize, len: usize, size: usize },
    #[error("virtual address 0x{va:08x} does not fit {mode} addressing")]
    AddressWidth { va: u32, mode: AddressingMode },
}

pub type Result<T> = core::result::Result<T, MmuError>;
