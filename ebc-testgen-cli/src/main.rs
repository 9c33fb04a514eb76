use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use ebc_testgen::{FragmentStyle, GenerateOptions};

#[derive(Parser)]
#[command(
    name = "ebc-testgen",
    about = "Generate EBC disassembler test assertions from compact test-case descriptions"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand a test-case description into assertion fragments
    Generate {
        /// Path to the test-case description
        input: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Spell out instruction bytes as hex arrays instead of `byte(..)` calls
        #[arg(long)]
        raw: bool,
    },
    /// Parse and assemble every test case without writing output
    Check {
        /// Path to the test-case description
        input: PathBuf,
    },
    /// List the opcode table
    Opcodes,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { input, output, raw } => cmd_generate(&input, output.as_deref(), raw),
        Commands::Check { input } => cmd_check(&input),
        Commands::Opcodes => cmd_opcodes(),
    }
}

fn read_input(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error reading {}: {e}", path.display());
            std::process::exit(1);
        }
    }
}

fn cmd_generate(input: &Path, output: Option<&Path>, raw: bool) {
    let document = read_input(input);
    let options = GenerateOptions {
        style: if raw {
            FragmentStyle::Raw
        } else {
            FragmentStyle::Symbolic
        },
    };

    let result = match output {
        Some(path) => {
            let file = match fs::File::create(path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Error creating {}: {e}", path.display());
                    std::process::exit(1);
                }
            };
            ebc_testgen::generate(&document, BufWriter::new(file), &options)
        }
        None => ebc_testgen::generate(&document, io::stdout().lock(), &options),
    };

    match result {
        Ok(summary) => {
            log::info!(
                "{}: {} test cases, {} operands",
                input.display(),
                summary.fragments,
                summary.operands
            );
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_check(input: &Path) {
    let document = read_input(input);
    match ebc_testgen::check(&document) {
        Ok(summary) => {
            println!(
                "{}: {} test cases, {} operands OK",
                input.display(),
                summary.fragments,
                summary.operands
            );
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_opcodes() {
    println!("# EBC opcodes ({})", ebc_isa::opcode_count());
    for info in ebc_isa::opcode_table() {
        println!(
            "{:#04x}  {:<10} {}",
            info.raw(),
            info.mnemonic(),
            info.category()
        );
    }
}
