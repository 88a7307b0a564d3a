use colored::*;
use serde::Serialize;

use mmu::{AccessKind, PhysicalMemory, TranslationResult};

/// Bytes per line in table dumps (four entries).
const DUMP_ROW: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    PageFault,
    ProtectionFault,
    NotImplemented,
}

impl From<&TranslationResult> for Outcome {
    fn from(result: &TranslationResult) -> Self {
        match result {
            TranslationResult::Success(_) => Outcome::Success,
            TranslationResult::PageFault(_) => Outcome::PageFault,
            TranslationResult::ProtectionFault(_) => Outcome::ProtectionFault,
            TranslationResult::NotImplemented => Outcome::NotImplemented,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TraceRecord {
    pub va: String,
    pub access: String,
    pub outcome: Outcome,
    pub physical_address: Option<String>,
    pub fault_level: Option<String>,
    pub fault_index: Option<u8>,
}

impl TraceRecord {
    pub fn new(va: u32, access: AccessKind, result: &TranslationResult) -> Self {
        let fault = result.page_fault();
        Self {
            va: format!("0x{:08x}", va),
            access: access.to_string(),
            outcome: result.into(),
            physical_address: result.physical_address().map(|pa| format!("0x{:08x}", pa)),
            fault_level: fault.map(|f| f.level.to_string()),
            fault_index: fault.map(|f| f.index),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub successes: usize,
    pub page_faults: usize,
    pub protection_faults: usize,
    pub not_implemented: usize,
}

impl Summary {
    pub fn from_records(records: &[TraceRecord]) -> Self {
        let mut summary = Summary {
            total: records.len(),
            ..Default::default()
        };
        for record in records {
            match record.outcome {
                Outcome::Success => summary.successes += 1,
                Outcome::PageFault => summary.page_faults += 1,
                Outcome::ProtectionFault => summary.protection_faults += 1,
                Outcome::NotImplemented => summary.not_implemented += 1,
            }
        }
        summary
    }
}

pub fn print_record(record: &TraceRecord) {
    let status = match record.outcome {
        Outcome::Success => "OK   ".green(),
        Outcome::PageFault => "PF   ".yellow(),
        Outcome::ProtectionFault => "PROT ".red(),
        Outcome::NotImplemented => "N/I  ".magenta(),
    };
    let detail = match (&record.physical_address, &record.fault_level, record.fault_index) {
        (_, Some(level), Some(index)) => format!("{} index 0x{:02x}", level, index),
        (Some(pa), _, _) => format!("pa={}", pa),
        _ => String::new(),
    };
    println!("  {} va={} {:<7} {}", status, record.va, record.access, detail);
}

pub fn print_summary(summary: &Summary) {
    println!();
    println!("  {}", "Summary:".bold());
    println!("    Translations: {}", summary.total);
    println!("    Success: {}", summary.successes.to_string().green());
    println!("    Page faults: {}", summary.page_faults.to_string().yellow());
    println!("    Protection faults: {}", summary.protection_faults.to_string().red());
    if summary.not_implemented > 0 {
        println!("    Not implemented: {}", summary.not_implemented.to_string().magenta());
    }
}

/// Hex dump of the non-zero rows of the table at `base`.
pub fn dump_table(mem: &PhysicalMemory, base: u32) {
    println!();
    println!("  {} 0x{:08x}", "Table".bold(), base);
    let bytes = match mem.table_bytes(base) {
        Some(bytes) => bytes,
        None => {
            println!("    ⚠️  table does not fit in memory");
            return;
        }
    };
    let mut printed = false;
    for (row, chunk) in bytes.chunks(DUMP_ROW).enumerate() {
        if chunk.iter().all(|b| *b == 0) {
            continue;
        }
        printed = true;
        let first_index = row * DUMP_ROW / 4;
        println!("    [{:02x}] {}", first_index, hex::encode(chunk));
    }
    if !printed {
        println!("    (empty)");
    }
}
