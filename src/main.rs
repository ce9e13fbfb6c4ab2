//! RISC-V pipeline simulator CLI.
//!
//! Loads a hex instruction image, runs the five-stage pipeline until
//! termination (x9 == 10) or the cycle ceiling, then prints the final
//! cycle count, PC, and register file to stdout.

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use riscv_pipeline_sim::config::Config;
use riscv_pipeline_sim::core::Cpu;
use riscv_pipeline_sim::sim::{loader, report};

/// `riscv-pipeline-sim <IMAGE> [--trace] [--config <FILE>] [--max-cycles <N>]`
#[derive(Parser, Debug)]
#[command(author, version, about = "Cycle-accurate RV64I subset pipeline simulator")]
struct Args {
    /// Path to the hex instruction image.
    image: PathBuf,

    /// Enable per-stage trace lines on stderr.
    #[arg(long)]
    trace: bool,

    /// Optional TOML run configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the configured/default cycle ceiling.
    #[arg(long)]
    max_cycles: Option<u64>,
}

fn main() {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match fs::read_to_string(path) {
            Ok(text) => match toml::from_str(&text) {
                Ok(cfg) => cfg,
                Err(e) => {
                    eprintln!("failed to parse config {:?}: {}", path, e);
                    process::exit(1);
                }
            },
            Err(e) => {
                eprintln!("failed to read config {:?}: {}", path, e);
                process::exit(1);
            }
        },
        None => Config::default(),
    };

    if let Some(max_cycles) = args.max_cycles {
        config.run.max_cycles = max_cycles;
    }

    let mut cpu = Cpu::new();
    cpu.trace = args.trace || config.run.trace;

    if let Err(e) = loader::load_into(&mut cpu, &args.image) {
        eprintln!("{}", e);
        process::exit(1);
    }

    let terminated = match cpu.run(config.run.max_cycles) {
        Ok(terminated) => terminated,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    if !terminated {
        eprintln!(
            "warning: reached the {}-cycle ceiling before x9 == 10",
            config.run.max_cycles
        );
    }

    let mut stdout = std::io::stdout();
    if let Err(e) = report::write_report(&mut stdout, cpu.cycles, cpu.exit_pc, &cpu.regs) {
        eprintln!("failed to write report: {}", e);
        process::exit(1);
    }
}
