use browsr_lexer::{Lexer, TokenKind};
use browsr_parser::{Dialect, ParseOptions};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

#[derive(Parser)]
#[command(name = "browsr")]
#[command(about = "Browsr: check, inspect and format Browsr documents")]
#[command(version)]
struct Cli {
    /// Log parser activity (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check a document, including the single-form rule (grammar only with --legacy)
    Check {
        /// Input document, or `-` for standard input
        path: String,

        /// Use the older grammar without forms and inputs
        #[arg(long)]
        legacy: bool,
    },

    /// Build the content-span tree and print it
    Tree {
        /// Input document, or `-` for standard input
        path: String,

        /// Print the tree as JSON instead of an outline
        #[arg(long)]
        json: bool,
    },

    /// Print the token stream of a document
    Tokens {
        /// Input document, or `-` for standard input
        path: String,
    },

    /// Rewrite a document in canonical layout
    Fmt {
        /// Input document, or `-` for standard input
        path: String,

        /// Overwrite the input file instead of printing to stdout
        #[arg(long)]
        write: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Check { path, legacy } => cmd_check(&path, legacy),
        Command::Tree { path, json } => cmd_tree(&path, json),
        Command::Tokens { path } => cmd_tokens(&path),
        Command::Fmt { path, write } => cmd_fmt(&path, write),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

fn open_input(path: &str) -> Box<dyn Read> {
    if path == "-" {
        return Box::new(io::stdin().lock());
    }
    let p = Path::new(path);
    if !p.exists() {
        fail(format!("file not found: {path}"));
    }
    match File::open(p) {
        Ok(file) => {
            log::info!("reading {path}");
            Box::new(file)
        }
        Err(e) => fail(format!("reading {path}: {e}")),
    }
}

fn read_source(path: &str) -> String {
    let mut source = String::new();
    if let Err(e) = open_input(path).read_to_string(&mut source) {
        fail(format!("reading {path}: {e}"));
    }
    source
}

/// Check a document the way `browsr check` does: one pass, which for the
/// full dialect also catches a second form the grammar alone accepts.
fn check_source(source: &str, legacy: bool) -> Result<(), browsr_parser::ParseError> {
    if legacy {
        let options = ParseOptions::with_dialect(Dialect::Legacy);
        browsr_parser::validate_with_options(source, options)
    } else {
        browsr_parser::parse(source).map(|_| ())
    }
}

fn cmd_check(path: &str, legacy: bool) {
    let source = read_source(path);

    if let Err(e) = check_source(&source, legacy) {
        fail(e);
    }

    eprintln!("OK: {path}");
}

fn cmd_tree(path: &str, json: bool) {
    let doc = match browsr_parser::parse_reader(BufReader::new(open_input(path))) {
        Ok(doc) => doc,
        Err(e) => fail(e),
    };

    if json {
        match serde_json::to_string_pretty(&doc) {
            Ok(text) => println!("{text}"),
            Err(e) => fail(format!("serializing tree: {e}")),
        }
    } else {
        print!("{}", browsr_writer::outline(&doc));
    }
}

fn cmd_tokens(path: &str) {
    let mut lexer = match Lexer::for_reader(BufReader::new(open_input(path))) {
        Ok(lexer) => lexer,
        Err(e) => fail(e),
    };

    loop {
        let token = match lexer.next_token() {
            Ok(token) => token,
            Err(e) => fail(e),
        };
        println!(
            "{:>4}:{:<4} {:?} {}",
            token.span.line,
            token.span.column,
            token.kind.token_type(),
            token.kind.value()
        );
        if token.kind == TokenKind::Eof {
            break;
        }
    }
}

fn cmd_fmt(path: &str, write: bool) {
    if write && path == "-" {
        fail("--write needs a file path, not standard input");
    }

    let doc = match browsr_parser::parse_reader(BufReader::new(open_input(path))) {
        Ok(doc) => doc,
        Err(e) => fail(e),
    };

    let output = match browsr_writer::write_document(&doc) {
        Ok(output) => output,
        Err(e) => fail(e),
    };

    if write {
        if let Err(e) = std::fs::write(path, &output) {
            fail(format!("writing {path}: {e}"));
        }
        eprintln!("Formatted: {path}");
    } else {
        print!("{output}");
    }
}
