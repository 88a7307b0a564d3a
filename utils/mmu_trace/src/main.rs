use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use log::LevelFilter;
use std::path::PathBuf;

mod report;
mod scenario;

use mmu::{AccessKind, AddressingMode, Mmu};
use report::{Summary, TraceRecord};
use scenario::ModeName;

/// Runs the translations of a page-table scenario through the software MMU
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the scenario JSON file
    #[arg(short, long)]
    scenario: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Override the scenario's addressing mode
    #[arg(short, long, value_enum)]
    mode: Option<ModeName>,

    /// Translate in supervisor mode regardless of the scenario
    #[arg(long)]
    supervisor: bool,

    /// Hex dump every table the scenario touches
    #[arg(short, long)]
    dump_tables: bool,

    /// Log every walk step
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::new()
            .filter_level(LevelFilter::Trace)
            .format_timestamp(None)
            .init();
    }

    if args.format != "text" && args.format != "json" {
        anyhow::bail!("Unknown output format: {}", args.format);
    }

    let scenario = scenario::load(&args.scenario)?;
    let mode: AddressingMode = args.mode.unwrap_or(scenario.mode).into();
    let mut ctx = scenario.context()?;
    if args.supervisor {
        ctx = ctx.with_supervisor(true);
    }
    let mem = scenario.build_memory()?;
    let mmu = Mmu::new(&mem, ctx, mode);

    let text = args.format == "text";
    if text {
        println!("{}", "MMU Trace v0.1.0".bold().blue());
        println!("{}", "=====================================".blue());
        println!(
            "  mode={} cr3=0x{:08x} supervisor={} memory=0x{:x}",
            mode,
            ctx.cr3,
            ctx.supervisor,
            mem.size()
        );
        println!();
    }

    let mut records = Vec::with_capacity(scenario.translations.len());
    for (i, item) in scenario.translations.iter().enumerate() {
        let va = scenario::parse_hex_u32(&item.va)
            .with_context(|| format!("translations[{}].va", i))?;
        let access: AccessKind = item.access.into();
        let result = mmu
            .translate(va, access)
            .with_context(|| format!("translations[{}] (va=0x{:08x})", i, va))?;
        let record = TraceRecord::new(va, access, &result);
        if text {
            report::print_record(&record);
        }
        records.push(record);
    }

    if !text {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    report::print_summary(&Summary::from_records(&records));

    if args.dump_tables {
        for base in scenario.table_bases()? {
            report::dump_table(&mem, base);
        }
    }

    Ok(())
}
