//! mcc CLI
//!
//! Command-line interface for compiling source files and dumping the
//! intermediate stages of the pipeline.

use clap::{CommandFactory, Parser as ClapParser};
use clap_complete::{Shell, generate};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

#[derive(ClapParser)]
#[command(name = "mcc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "mcc - compile a small subset of C to x86-64 executables", long_about = None)]
struct Cli {
    /// Input source file to compile
    #[arg(required_unless_present = "completions")]
    input_file: Option<PathBuf>,

    /// Print tokens from lexical analysis
    #[arg(short = 'l', long)]
    lex: bool,

    /// Print the abstract syntax tree
    #[arg(short = 'p', long)]
    parse: bool,

    /// Print generated assembly instead of building
    #[arg(short = 'c', long, alias = "cg")]
    codegen: bool,

    /// Enable all output phases
    #[arg(long)]
    all: bool,

    /// Output executable path (defaults to bin/out.exe)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Build configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Generate shell completion scripts and exit
    #[arg(long, value_enum)]
    completions: Option<Shell>,
}

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        run_completions(shell);
        return;
    }

    let Some(input) = cli.input_file else {
        // Unreachable through clap, but never panic on the way out.
        eprintln!("Error: no input file given");
        process::exit(1);
    };

    let mut config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    if let Some(output) = cli.output {
        config = config.with_exe_override(output);
    }

    let dump_lex = cli.lex || cli.all;
    let dump_parse = cli.parse || cli.all;
    let dump_codegen = cli.codegen || cli.all;

    if let Err(e) = run(&input, &config, dump_lex, dump_parse, dump_codegen) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "mcc", &mut io::stdout());
}

fn load_config(path: Option<&Path>) -> Result<mcc::BuildConfig, String> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read config '{}': {}", path.display(), e))?;
            mcc::BuildConfig::from_toml(&content)
        }
        None => Ok(mcc::BuildConfig::default()),
    }
}

fn run(
    input: &Path,
    config: &mcc::BuildConfig,
    dump_lex: bool,
    dump_parse: bool,
    dump_codegen: bool,
) -> Result<(), String> {
    let source = fs::read_to_string(input)
        .map_err(|e| format!("Failed to read source file '{}': {}", input.display(), e))?;

    let tokens = mcc::tokenize(&source)?;
    if dump_lex {
        println!("---------- Tokens ----------");
        for token in &tokens {
            println!("{}", token);
        }
        println!();
    }

    let program = mcc::Parser::from_tokens(tokens).parse()?;
    if dump_parse {
        println!("---------- Abstract Syntax Tree ----------");
        print!("{}", mcc::ast::format_program(&program));
        println!();
    }

    let asm = mcc::CodeGen::new()
        .codegen_program(&program)
        .map_err(|e| e.to_string())?;
    if dump_codegen {
        println!("---------- Generated Assembly ----------");
        print!("{}", asm);
        println!();
    }

    // Any dump flag turns the invocation into an inspection run.
    if dump_lex || dump_parse || dump_codegen {
        return Ok(());
    }

    mcc::emitter::write_assembly(&asm, &config.asm_path())?;
    mcc::emitter::check_nasm_version(&config.tools.assembler)?;
    mcc::emitter::assemble_and_link(config)?;

    println!(
        "Compiled {} -> {}",
        input.display(),
        config.exe_path().display()
    );
    Ok(())
}
