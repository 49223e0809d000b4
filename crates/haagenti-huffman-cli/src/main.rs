//! Haagenti Huffman command-line tool
//!
//! ## Usage
//!
//! ```bash
//! # Compress; the tree goes to notes.huff.tree
//! haagenti-huffman encode notes.txt notes.huff
//!
//! # Restore to stdout, decoding exactly the reported character count
//! haagenti-huffman decode notes.huff notes.huff.tree --symbols 1234
//!
//! # Reuse a tree, substituting characters it does not cover
//! haagenti-huffman --config lenient.toml encode other.txt other.huff --use-tree notes.huff.tree
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use haagenti_huffman_cli::{commands, CliError, CliResult, Config, DecodeOptions, EncodeOptions};

#[derive(Parser, Debug)]
#[command(name = "haagenti-huffman")]
#[command(author = "Daemoniorum LLC")]
#[command(version)]
#[command(about = "Static Huffman text compressor", long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a text file
    Encode {
        /// Text file to compress
        input: PathBuf,

        /// Payload file to write
        output: PathBuf,

        /// Tree file to write (default: <output>.<tree_extension>)
        #[arg(long)]
        tree: Option<PathBuf>,

        /// Encode with an existing tree file instead of building one
        #[arg(long)]
        use_tree: Option<PathBuf>,
    },

    /// Decompress a payload file
    Decode {
        /// Payload file
        input: PathBuf,

        /// Tree file written by encode
        tree: PathBuf,

        /// Write text here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of characters to decode; drops padding artifacts
        #[arg(long)]
        symbols: Option<usize>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    // The config supplies the log level, so load it before logging is up
    let config = Config::load_or_default(args.config.as_deref());
    let log_level = args.log_level.clone().unwrap_or_else(|| {
        config
            .as_ref()
            .map(|c| c.log_level.clone())
            .unwrap_or_else(|_| "info".to_string())
    });
    init_logging(&log_level);

    let result = config.and_then(|config| run(args.command, &config));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(category = err.category(), "{}", err);
            ExitCode::from(err.exit_code())
        }
    }
}

fn init_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

fn run(command: Command, config: &Config) -> CliResult<()> {
    match command {
        Command::Encode {
            input,
            output,
            tree,
            use_tree,
        } => {
            let options = EncodeOptions {
                input,
                output,
                tree,
                use_tree,
            };
            commands::encode(&options, config)?;
        }
        Command::Decode {
            input,
            tree,
            output,
            symbols,
        } => {
            let to_stdout = output.is_none();
            let options = DecodeOptions {
                input,
                tree,
                output,
                symbols,
            };
            let text = commands::decode(&options)?;
            if to_stdout {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(text.as_bytes())
                    .and_then(|()| stdout.flush())
                    .map_err(|e| CliError::io("<stdout>", e))?;
            }
        }
    }
    Ok(())
}
