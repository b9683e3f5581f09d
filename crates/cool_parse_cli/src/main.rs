// Copyright 2025 Diivanand Ramalingam
// Licensed under the Apache License, Version 2.0
use std::{fs, path::PathBuf, process};

use clap::{ArgAction, Parser};
use cool_frontend::{lex, parse_program, Error, Program};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Lex and parse Cool source files, printing the tokens or the AST.
#[derive(Debug, Parser)]
#[command(name = "cool_parse_cli")]
struct Cli {
    /// Cool source files (`.cl`), parsed in order
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Print the token stream instead of the AST
    #[arg(long)]
    tokens: bool,

    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "cool_parse_cli=warn,cool_frontend=warn",
        1 => "cool_parse_cli=debug,cool_frontend=debug",
        _ => "cool_parse_cli=trace,cool_frontend=trace",
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        .with_writer(std::io::stderr)
        .init();

    for path in &cli.files {
        if path.extension().and_then(|e| e.to_str()) != Some("cl") {
            eprintln!("{}: not a Cool source file (expected a .cl extension)", path.display());
            process::exit(1);
        }
    }

    let mut program = Program {
        classes: Vec::new(),
    };

    for path in &cli.files {
        let src = fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Failed to read {}: {e}", path.display());
            process::exit(2);
        });
        info!(path = %path.display(), bytes = src.len(), "read source");

        let result = if cli.tokens {
            dump_tokens(&src)
        } else {
            parse_file(&src).map(|prog| program.classes.extend(prog.classes))
        };

        if let Err(e) = result {
            eprintln!("{}:{e}", path.display());
            process::exit(1);
        }
    }

    if !cli.tokens {
        debug!(classes = program.classes.len(), "parsed all files");
        println!("{program:#?}");
    }
}

fn parse_file(src: &str) -> Result<Program, Error> {
    let toks = lex(src)?;
    Ok(parse_program(&toks)?)
}

fn dump_tokens(src: &str) -> Result<(), Error> {
    let toks = lex(src)?;
    for (tok, span) in toks.iter() {
        let pos = toks.position(span.start);
        println!("{pos}\t{tok}");
    }
    Ok(())
}
