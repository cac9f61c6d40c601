use std::{
    io::{stdin, stdout, Write},
    path::PathBuf,
};

use clap::Parser;
use errors::LoxErrors;
use log::info;
use parser::{AstPrinter, RpnPrinter};
use scanner::ScanErrors;

/// Parse a Lox expression and print its syntax tree.
#[derive(clap::Parser)]
struct Args {
    /// File holding a single expression. Anything after the expression is an error.
    /// Starts a prompt when omitted.
    file: Option<PathBuf>,

    /// Print the expression in reverse Polish notation instead.
    #[arg(long)]
    rpn: bool,
}

#[derive(thiserror::Error, Debug)]
enum RunError {
    #[error("{0}")]
    Scan(#[from] ScanErrors),
    #[error("{0}")]
    Parse(LoxErrors),
}

fn run_file(path: PathBuf, args: &Args) -> anyhow::Result<()> {
    info!("Parsing {}", path.display());
    run(&std::fs::read_to_string(path)?, args, &mut stdout())?;
    Ok(())
}

fn run_prompt(args: &Args) -> anyhow::Result<()> {
    loop {
        print!("> ");
        stdout().flush()?;
        let mut line = String::new();
        if stdin().read_line(&mut line)? == 0 {
            return Ok(());
        }
        if let Err(e) = run(&line, args, &mut stdout()) {
            eprintln!("{e}");
        }
    }
}

fn run(source: &str, args: &Args, out: &mut impl Write) -> Result<(), anyhow::Error> {
    let tokens = scanner::scan(source).map_err(RunError::from)?;

    let mut errors = LoxErrors::default();
    let mut parser = parser::Parser::new(&tokens, &mut errors);
    let expr = match parser.parse() {
        Some(expr) if parser.expect_end() => expr,
        _ => return Err(RunError::Parse(errors).into()),
    };

    let printed = if args.rpn { RpnPrinter.print(&expr) } else { AstPrinter.print(&expr) };
    writeln!(out, "{printed}")?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    match &args.file {
        Some(file) => run_file(file.clone(), &args),
        None => run_prompt(&args),
    }
}
