use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use mmu::{AccessKind, AddressingMode, PhysicalMemory, TranslationContext};

const DEFAULT_MEMORY_SIZE: usize = 0x1_0000;

/// A page-table setup plus the translations to run against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub mode: ModeName,
    #[serde(default = "default_memory_size")]
    pub memory_size: usize,
    pub cr3: String,
    #[serde(default)]
    pub supervisor: bool,
    #[serde(default)]
    pub entries: Vec<EntrySpec>,
    pub translations: Vec<TranslationSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModeName {
    Legacy,
    Extended,
}

impl From<ModeName> for AddressingMode {
    fn from(value: ModeName) -> Self {
        match value {
            ModeName::Legacy => AddressingMode::Legacy,
            ModeName::Extended => AddressingMode::Extended,
        }
    }
}

/// One raw word written into a table before translating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntrySpec {
    pub base: String,
    pub index: u8,
    pub entry: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationSpec {
    pub va: String,
    #[serde(default)]
    pub access: AccessName,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessName {
    #[default]
    Read,
    Write,
    Execute,
}

impl From<AccessName> for AccessKind {
    fn from(value: AccessName) -> Self {
        match value {
            AccessName::Read => AccessKind::Read,
            AccessName::Write => AccessKind::Write,
            AccessName::Execute => AccessKind::Execute,
        }
    }
}

fn default_memory_size() -> usize {
    DEFAULT_MEMORY_SIZE
}

/// Parse a 32-bit hex word such as `0x8000_0031`, `80000031` or `0x31`.
pub fn parse_hex_u32(text: &str) -> Result<u32> {
    let trimmed = text.trim();
    let digits: String = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed)
        .chars()
        .filter(|c| *c != '_')
        .collect();
    if digits.is_empty() {
        bail!("empty hex value: {:?}", text);
    }
    if digits.len() > 8 {
        bail!("hex value wider than 32 bits: {:?}", text);
    }
    let padded = format!("{:0>8}", digits);
    let bytes = hex::decode(&padded).with_context(|| format!("invalid hex value: {:?}", text))?;
    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes);
    Ok(u32::from_be_bytes(word))
}

pub fn parse(content: &str) -> Result<Scenario> {
    let scenario: Scenario =
        serde_json::from_str(content).context("Failed to parse scenario JSON")?;
    if scenario.memory_size == 0 {
        bail!("memory_size must be > 0");
    }
    Ok(scenario)
}

pub fn load(path: &Path) -> Result<Scenario> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
    parse(&content)
}

impl Scenario {
    pub fn context(&self) -> Result<TranslationContext> {
        let cr3 = parse_hex_u32(&self.cr3).context("cr3")?;
        Ok(TranslationContext::new(cr3, self.supervisor))
    }

    /// Fresh physical memory with every entry of the scenario written in.
    pub fn build_memory(&self) -> Result<PhysicalMemory> {
        let mut mem = PhysicalMemory::new(self.memory_size);
        for (i, item) in self.entries.iter().enumerate() {
            let base = parse_hex_u32(&item.base).with_context(|| format!("entries[{}].base", i))?;
            let entry = parse_hex_u32(&item.entry)
                .with_context(|| format!("entries[{}].entry", i))?;
            mem.write_entry(base, item.index, entry)
                .with_context(|| format!("entries[{}] does not fit in memory", i))?;
        }
        Ok(mem)
    }

    /// Distinct table bases touched by the scenario, ascending.
    pub fn table_bases(&self) -> Result<Vec<u32>> {
        let mut bases = vec![self.context()?.cr3];
        for item in &self.entries {
            bases.push(parse_hex_u32(&item.base)?);
        }
        bases.sort_unstable();
        bases.dedup();
        Ok(bases)
    }
}
