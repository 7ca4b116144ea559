//! Virtual-memory simulator CLI.
//!
//! This binary provides a single entry point for both simulators. It performs:
//! 1. **Clock run:** Feed a reference string through Clock page replacement and report faults.
//! 2. **Translate run:** Install mappings, translate probe addresses and report TLB behaviour.
//! 3. **Breakdown:** Split one virtual address into outer index, inner index and offset.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use vmsim_core::common::{FrameNumber, VirtAddr};
use vmsim_core::config::Config;
use vmsim_core::mmu::Translator;
use vmsim_core::replacement::{ClockReplacer, PageReplacer};
use vmsim_core::sim::trace::references_or_default;
use vmsim_core::sim::{ReferenceSource, report, simulator};

/// Exit status for configuration errors.
const EXIT_CONFIG: i32 = 2;

/// Address broken down after the demo translation run.
const DEMO_BREAKDOWN: u32 = 0x0040_1ABC;

#[derive(Parser, Debug)]
#[command(
    name = "vmsim",
    author,
    version,
    about = "Clock page replacement and two-level page table simulators",
    long_about = "Reproduce classic OS memory-management behaviour deterministically.\n\nExamples:\n  vmsim clock -f 3 -v\n  vmsim clock -i refs.txt\n  vmsim translate --map 0x00400000=200 --probe 0x00400ABC\n  vmsim breakdown 0x00401ABC"
)]
struct Cli {
    /// Log filter (overrides `RUST_LOG`), e.g. `debug` or `vmsim_core=trace`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// JSON configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a reference string through Clock (second-chance) replacement.
    Clock {
        /// Number of physical frames (overrides the config file; default 4).
        #[arg(short = 'f', long = "frames")]
        frames: Option<usize>,

        /// Print the frame table after every step.
        #[arg(short, long)]
        verbose: bool,

        /// Reference-string file of `<R|W> <page>` pairs.
        #[arg(short = 'i', long = "input")]
        input: Option<PathBuf>,
    },

    /// Translate addresses through the two-level page table and TLB.
    Translate {
        /// Mapping `VADDR=FRAME`; repeatable. Defaults to the demo mappings.
        #[arg(long = "map", value_parser = parse_mapping)]
        mappings: Vec<(VirtAddr, FrameNumber)>,

        /// Address to translate; repeatable. Defaults to the demo probes.
        #[arg(long = "probe", value_parser = parse_addr)]
        probes: Vec<VirtAddr>,
    },

    /// Show how a virtual address splits into table indices and offset.
    Breakdown {
        /// Virtual address (hex with `0x` or decimal).
        #[arg(value_parser = parse_addr, default_value = "0x00401ABC")]
        addr: VirtAddr,
    },
}

/// Parses `0x`-prefixed hex or decimal into a `u32`.
fn parse_u32(s: &str) -> Result<u32, String> {
    let s = s.trim();
    let digits = s.replace('_', "");
    let parsed = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .map_or_else(
            || digits.parse::<u32>(),
            |hex| u32::from_str_radix(hex, 16),
        );
    parsed.map_err(|e| format!("invalid number '{s}': {e}"))
}

fn parse_addr(s: &str) -> Result<VirtAddr, String> {
    parse_u32(s).map(VirtAddr::new)
}

fn parse_mapping(s: &str) -> Result<(VirtAddr, FrameNumber), String> {
    let (va, frame) = s
        .split_once('=')
        .ok_or_else(|| format!("expected VADDR=FRAME, got '{s}'"))?;
    Ok((parse_addr(va)?, parse_u32(frame)?))
}

fn init_logging(level: Option<&str>) {
    let filter = level
        .map(EnvFilter::new)
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Config {
    let Some(path) = path else {
        return Config::default();
    };
    Config::from_file(path).unwrap_or_else(|e| {
        error!(error = %e, "configuration rejected");
        eprintln!("Error: {e}");
        process::exit(EXIT_CONFIG);
    })
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());
    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Clock {
            frames,
            verbose,
            input,
        } => cmd_clock(config, frames, verbose, input.as_deref()),
        Commands::Translate { mappings, probes } => cmd_translate(&config, mappings, probes),
        Commands::Breakdown { addr } => println!("{}", report::format_breakdown(addr)),
    }
}

/// Runs the Clock simulator over a file or the built-in reference string.
fn cmd_clock(mut config: Config, frames: Option<usize>, verbose: bool, input: Option<&Path>) {
    if let Some(frames) = frames {
        config.clock.frames = frames;
    }

    println!("Clock Page Replacement Simulator");
    let mut clock = ClockReplacer::from_config(&config.clock).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(EXIT_CONFIG);
    });
    println!("Number of frames: {}\n", clock.num_frames());

    let (references, source, load_error) =
        references_or_default(input, config.clock.max_references);
    if let Some(e) = &load_error {
        println!("Error: {e}");
        println!("Using default reference string instead.\n");
    }
    if let ReferenceSource::File(path) = &source {
        println!(
            "Loaded {} page references from {}\n",
            references.len(),
            path.display()
        );
    }

    println!("Processing page references...");
    if verbose {
        println!("\n{}", report::step_header());
    }
    simulator::run_clock(&mut clock, &references, |record, replacer| {
        if verbose {
            println!("{}", report::format_step(record, &replacer.snapshot()));
        }
    });

    if !verbose {
        println!("\nFinal memory state:");
        println!("{}", clock.snapshot());
    }
    println!();
    clock.stats().print();
}

/// Runs the translator over the given (or demo) mappings and probes.
fn cmd_translate(config: &Config, mappings: Vec<(VirtAddr, FrameNumber)>, probes: Vec<VirtAddr>) {
    println!("Two-Level Page Table with TLB Simulator");
    let mut translator = Translator::from_config(&config.translator).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(EXIT_CONFIG);
    });

    let demo = mappings.is_empty() && probes.is_empty();
    let mappings = if mappings.is_empty() {
        simulator::default_mappings()
    } else {
        mappings
    };
    let probes = if probes.is_empty() {
        simulator::default_probes()
    } else {
        probes
    };

    println!("Installing {} page mappings...", mappings.len());
    let records = simulator::run_translations(&mut translator, &mappings, &probes);

    println!("\nTranslating addresses:");
    println!("{}", report::probe_header());
    for record in &records {
        println!("{}", report::format_probe(record));
    }
    println!();
    translator.stats().print();

    if demo {
        println!("\nAddress Component Breakdown");
        let breakdown = report::format_breakdown(VirtAddr::new(DEMO_BREAKDOWN));
        println!("{breakdown}");
    }
}
