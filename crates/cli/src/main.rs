//! Mystic Falls ISA command-line front end.
//!
//! This binary exposes the extension's catalog and the reference machine. It performs:
//! 1. **Catalog:** List every instruction with its format, syntax, and bit template.
//! 2. **Disassembly:** Render raw 32-bit encodings as assembler text.
//! 3. **Names:** Resolve register names (themed aliases first, then MIPS names).
//! 4. **Run:** Execute a hex program listing and report diagnostics and final registers.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::{fs, process};
use tracing_subscriber::EnvFilter;

use mystic_core::catalog;
use mystic_core::config::Config;
use mystic_core::isa::abi::{self, MipsNames};
use mystic_core::isa::catalog::{DESCRIPTION, NAME};
use mystic_core::isa::disasm::disassemble;
use mystic_core::sim::{Machine, loader};

#[derive(Parser, Debug)]
#[command(
    name = "mystic",
    author,
    version,
    about = "Mystic Falls instruction-set extension",
    long_about = "Inspect the Mystic Falls instruction catalog or run a program on the reference machine.\n\nPrograms are text listings with one hex word per line; `#` starts a comment.\n\nExamples:\n  mystic catalog\n  mystic disasm 0x012A4022\n  mystic resolve '$Damon'\n  mystic run -f demo.hex --set '$Stefan=5' --set '$Damon=3'"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the instruction catalog in dispatch order.
    Catalog,

    /// Disassemble one or more 32-bit words (hex, `0x` prefix optional).
    Disasm {
        /// Encodings to disassemble.
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Resolve a register name to its index.
    Resolve {
        /// Register name including the `$` sigil.
        name: String,
    },

    /// Run a program listing on the reference machine.
    Run {
        /// Program listing to execute.
        #[arg(short, long)]
        file: PathBuf,

        /// JSON configuration file; defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Initial register value, `NAME=VALUE` (decimal or `0x` hex). May be repeated.
        #[arg(long = "set", value_name = "REG=VALUE")]
        set: Vec<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Catalog => {
            cmd_catalog();
            Ok(())
        }
        Commands::Disasm { words } => cmd_disasm(&words),
        Commands::Resolve { name } => cmd_resolve(&name),
        Commands::Run { file, config, set } => cmd_run(&file, config.as_deref(), &set),
    };

    if let Err(msg) = result {
        eprintln!("error: {msg}");
        process::exit(1);
    }
}

/// Prints the extension header and every catalog entry in dispatch order.
fn cmd_catalog() {
    println!("{NAME}");
    println!("{DESCRIPTION}");
    println!();
    for desc in catalog() {
        println!(
            "{:<14} {:<7} {:<40} {}",
            desc.mnemonic(),
            desc.format().to_string(),
            desc.syntax(),
            desc.template().pattern()
        );
    }
}

fn cmd_disasm(words: &[String]) -> Result<(), String> {
    for text in words {
        let word =
            loader::parse_word(text).ok_or_else(|| format!("`{text}` is not a 32-bit hex word"))?;
        println!("{word:#010x}  {}", disassemble(word));
    }
    Ok(())
}

fn cmd_resolve(name: &str) -> Result<(), String> {
    let idx = abi::resolve(name, &MipsNames).map_err(|e| e.to_string())?;
    println!("{name} = ${idx} ({})", abi::display_name(idx));
    Ok(())
}

/// Loads the program and configuration, applies `--set` values, and runs to completion.
///
/// Diagnostic lines are printed as they were emitted, followed by every non-zero register.
fn cmd_run(file: &Path, config: Option<&Path>, set: &[String]) -> Result<(), String> {
    let config = match config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("could not read {}: {e}", path.display()))?;
            Config::from_json(&text)
                .map_err(|e| format!("invalid config {}: {e}", path.display()))?
        }
        None => Config::default(),
    };

    let program = loader::load_file(file).map_err(|e| format!("{}: {e}", file.display()))?;

    let mut machine = Machine::new(&config);
    machine.load_program(&program);
    for assignment in set {
        let (idx, val) =
            loader::parse_assignment(assignment, &MipsNames).map_err(|e| e.to_string())?;
        machine.set_reg(idx, val);
    }

    let outcome = machine.run();

    for line in machine.take_output() {
        println!("{line}");
    }
    let summary = outcome.map_err(|e| {
        machine.registers().dump();
        e.to_string()
    })?;

    println!(
        "[*] Halted at {:#010x} after {} instructions",
        summary.final_pc, summary.retired
    );
    for (idx, val) in machine.registers().non_zero() {
        println!("  {:<28} {val:>11} ({val:#010x})", abi::display_name(idx));
    }
    Ok(())
}
