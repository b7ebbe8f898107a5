/*!
Main binary for jsontok.
*/

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::generate;
use clap_verbosity_flag::Verbosity;
use log::info;
use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, IsTerminal, Write, stdout},
    path::PathBuf,
};

use jsontok::{
    commands,
    tokenizer::{JsonTokenizer, ReaderSource},
    utils::{OutputFormat, write_token},
};

/// Tokenize a JSON document and print its tokens, one per line.
#[derive(Parser)]
#[command(
    name = "jt",
    version,
    about,
    long_about = None,
    disable_help_subcommand = true,
    args_conflicts_with_subcommands = true
)]
struct Args {
    /// Optional subcommands
    #[command(subcommand)]
    command: Option<Commands>,
    #[arg(value_name = "FILE")]
    /// Optional path to a JSON file. If omitted, reads from STDIN
    input: Option<PathBuf>,
    /// Print each token as a JSON object instead of text
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
    /// Include the start position of each token in JSON output
    #[arg(long, action = ArgAction::SetTrue, requires = "json")]
    positions: bool,
    /// Display the number of tokens after the stream
    #[arg(long, action = ArgAction::SetTrue)]
    count: bool,
    /// Disable colored output
    #[arg(long, action = ArgAction::SetTrue)]
    no_color: bool,
    #[command(flatten)]
    verbose: Verbosity,
}

/// Available subcommands for `jt`
#[derive(Subcommand)]
enum Commands {
    /// Print the token types the tokenizer can produce
    Types,
    #[command(subcommand)]
    /// Generate additional documentation and/or completions
    Generate(GenerateCommand),
}

/// Generate shell completions and man page
#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate shell completions for the given shell to stdout.
    Shell { shell: clap_complete::Shell },
    /// Generate a man page for jt to output directory if specified, else
    /// the current directory.
    Man {
        /// The output directory to write the man pages.
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}

/// Entry point for main binary.
///
/// Tokens are printed as soon as they are scanned, so piped input is
/// processed as it arrives. The first lexical error stops the scan and exits
/// with status 1.
fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .parse_default_env()
        .init();

    match args.command {
        Some(Commands::Types) => {
            commands::types::write_token_types(&mut stdout().lock())?;
        }
        Some(Commands::Generate(cmd)) => match cmd {
            GenerateCommand::Shell { shell } => {
                let mut cmd = Args::command();
                generate(shell, &mut cmd, "jt", &mut stdout().lock());
            }
            GenerateCommand::Man { output_dir } => {
                let pages = commands::generate::generate_man_pages(
                    &Args::command(),
                    output_dir,
                )?;
                for page in pages {
                    println!("Generated: {}", page.display());
                }
            }
        },
        None => {
            if args.no_color || !stdout().is_terminal() {
                colored::control::set_override(false);
            }

            let (reader, name): (Box<dyn BufRead>, String) = match args.input {
                Some(path) => {
                    let file = File::open(&path).with_context(|| {
                        format!("Failed to read file {}", path.display())
                    })?;
                    (Box::new(BufReader::new(file)), path.display().to_string())
                }
                None => {
                    if io::stdin().is_terminal() {
                        // No piped input and no file specified
                        let mut cmd = Args::command();
                        return Ok(cmd.print_help()?);
                    }
                    (Box::new(io::stdin().lock()), "<stdin>".to_string())
                }
            };

            let format = match (args.json, args.positions) {
                (false, _) => OutputFormat::Text,
                (true, false) => OutputFormat::Json,
                (true, true) => OutputFormat::JsonWithPositions,
            };

            info!("tokenizing {name}");
            let mut out = BufWriter::new(stdout().lock());
            let mut count = 0usize;
            for spanned in JsonTokenizer.tokens(ReaderSource::new(reader)).spanned() {
                let spanned = spanned
                    .with_context(|| format!("Failed to tokenize {name}"))?;
                count += 1;
                if !write_token(&mut out, &spanned, format)? {
                    return Ok(());
                }
            }

            if args.count {
                writeln!(out, "Found tokens: {count}")?;
            }
            out.flush().context("flush stdout")?;
        }
    }

    Ok(())
}
