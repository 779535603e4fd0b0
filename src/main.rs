use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use v6sf::batch::{self, BatchRecord, Direction};
use v6sf::{EncodeOptions, decode, encode_with, normalize};

#[derive(Parser)]
#[command(name = "v6sf", about = "Encode and decode IPv6 addresses in the v6sf format")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum BatchDirection {
    Encode,
    Decode,
}

impl From<BatchDirection> for Direction {
    fn from(d: BatchDirection) -> Self {
        match d {
            BatchDirection::Encode => Direction::Encode,
            BatchDirection::Decode => Direction::Decode,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Encode an IPv6 address (any standard form)
    Encode {
        address: String,
        /// Emit the body without ':' block separators
        #[arg(long)]
        no_separators: bool,
    },
    /// Decode a v6sf value to the fully expanded address
    Decode {
        encoded: String,
    },
    /// Check a v6sf value without printing the address
    Verify {
        encoded: String,
    },
    /// Print the fully expanded form of an IPv6 address
    Normalize {
        address: String,
    },
    /// Convert one value per line from a file or stdin
    Batch {
        #[arg(value_enum)]
        direction: BatchDirection,
        /// Input file (stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// One JSON record per line instead of plain output
        #[arg(long)]
        json: bool,
        #[arg(long)]
        no_separators: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    match Cli::parse().command {

        // ── Encode ───────────────────────────────────────────────────────────
        Commands::Encode { address, no_separators } => {
            let opts = EncodeOptions { separators: !no_separators };
            println!("{}", encode_with(&address, &opts)?);
        }

        // ── Decode ───────────────────────────────────────────────────────────
        Commands::Decode { encoded } => {
            println!("{}", decode(&encoded)?);
        }

        // ── Verify ───────────────────────────────────────────────────────────
        Commands::Verify { encoded } => {
            let code = verify_exit_code(&encoded);
            if code != 0 {
                std::process::exit(code);
            }
        }

        // ── Normalize ────────────────────────────────────────────────────────
        Commands::Normalize { address } => {
            println!("{}", normalize(&address)?);
        }

        // ── Batch ────────────────────────────────────────────────────────────
        Commands::Batch { direction, input, json, no_separators } => {
            let inputs = match &input {
                Some(path) => batch::read_lines(BufReader::new(std::fs::File::open(path)?))?,
                None       => batch::read_lines(io::stdin().lock())?,
            };
            let opts = EncodeOptions { separators: !no_separators };
            let records = batch::convert_many(&inputs, direction.into(), &opts);

            let stdout = io::stdout();
            let mut out = stdout.lock();
            for record in &records {
                if json {
                    serde_json::to_writer(&mut out, record)?;
                    writeln!(out)?;
                } else {
                    match (&record.output, &record.error) {
                        (Some(output), _) => writeln!(out, "{output}")?,
                        (None, Some(error)) => {
                            writeln!(out)?;
                            eprintln!("line {}: {}: {error}", record.line, record.input);
                        }
                        (None, None) => writeln!(out)?,
                    }
                }
            }
            out.flush()?;

            let code = batch_exit_code(&records);
            if code != 0 {
                std::process::exit(code);
            }
        }
    }

    Ok(())
}

// ── helpers ──────────────────────────────────────────────────────────────────

/// Print the verdict for `encoded`; 0 when it decodes, 1 otherwise.
fn verify_exit_code(encoded: &str) -> i32 {
    match decode(encoded) {
        Ok(_) => {
            println!("ok");
            0
        }
        Err(e) => {
            eprintln!("invalid: {e}");
            1
        }
    }
}

/// 1 if any record failed, reporting the count on stderr.
fn batch_exit_code(records: &[BatchRecord]) -> i32 {
    let failed = batch::failed_count(records);
    if failed > 0 {
        eprintln!("{failed} of {} line(s) failed", records.len());
        1
    } else {
        0
    }
}

/// Log to stderr so stdout stays clean for piping.  `RUST_LOG` overrides the
/// default `warn` level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}
