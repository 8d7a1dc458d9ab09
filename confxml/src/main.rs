use std::fs;
use std::io::ErrorKind;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use confxml::backends::xml::DEFAULT_ROOT;
use confxml::error::CompileError;
use confxml::parser;

#[derive(Parser)]
#[command(name = "confxml")]
#[command(about = "Converts Variant 24 configuration files to XML", version)]
struct Cli {
    /// Path to the input configuration file
    input_file: String,

    /// Name of the root XML element
    #[arg(long, default_value = DEFAULT_ROOT)]
    root: String,

    /// Write the XML to this file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Dump the token stream to stderr
    #[arg(long)]
    show_tokens: bool,

    /// Dump the parse tree to stderr
    #[arg(long)]
    show_ast: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CompileError> {
    let source = read_source(&cli.input_file)?;

    if cli.show_tokens {
        eprintln!("=== TOKENS ===");
        for token in parser::lexer::tokenize(&source)? {
            eprintln!("{:?}", token);
        }
    }
    if cli.show_ast {
        eprintln!("=== AST ===");
        eprintln!("{:#?}", parser::parse(&source)?);
    }

    let xml = confxml::compile(&source, &cli.root)?;

    match &cli.output {
        Some(path) => {
            fs::write(path, format!("{}\n", xml)).map_err(|source| CompileError::IoError {
                path: path.clone(),
                source,
            })?;
            log::info!("wrote {} bytes to {}", xml.len() + 1, path);
        }
        None => println!("{}", xml),
    }

    Ok(())
}

fn read_source(path: &str) -> Result<String, CompileError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => CompileError::FileNotFound {
            path: path.to_string(),
        },
        _ => CompileError::IoError {
            path: path.to_string(),
            source,
        },
    })
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
