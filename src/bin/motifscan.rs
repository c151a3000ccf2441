use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::error;

use motifscan::accession;
use motifscan::config::Config;
use motifscan::provider::{FastaStore, FlatFileStore, RecordProvider, UniProtClient};
use motifscan::report::{Format, Report, ReportSink, WriterSink};
use motifscan::{detect, logging, Outcome, Session};

/// Exit status when the input is not an accession.
const EXIT_REJECTED: u8 = 2;

/// motifscan CLI
#[derive(Parser)]
#[command(name = "motifscan")]
#[command(version)]
#[command(about = "Find the six-residue motif in UniProtKB proteins", long_about = None)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Silence all log output
    #[arg(short, long, global = true)]
    quiet: bool,
    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    /// UniProtKB REST base URL [env: MOTIFSCAN_BASE_URL]
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Lookup timeout in seconds [env: MOTIFSCAN_TIMEOUT_SECS]
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up an accession and list its motif occurrences
    Scan {
        /// UniProtKB accession (e.g. "P12345")
        accession: String,
        #[command(flatten)]
        source: Source,
        /// Output layout
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Check whether a string is a well-formed accession (no lookup)
    Check {
        accession: String,
    },

    /// Scan a raw amino-acid sequence given on the command line
    Sequence {
        sequence: String,
        /// Output layout
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Read accessions from stdin, one per line, and scan each
    Interactive {
        #[command(flatten)]
        source: Source,
        /// Output layout
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Print the motif's per-position constraints
    Motif,
}

/// Where records come from; the UniProtKB REST API unless a local file is given.
#[derive(clap::Args)]
#[group(multiple = false)]
struct Source {
    /// Local Swiss-Prot flat file (.dat/.txt)
    #[arg(long)]
    flat_file: Option<PathBuf>,
    /// Local FASTA file
    #[arg(long)]
    fasta: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref()) {
        eprintln!("warning: {e}");
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!(error = ?e, "command failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Scan { ref accession, ref source, format } => {
            let config = build_config(&cli)?;
            let session = Session::new(open_provider(source, &config)?);
            let mut sink = WriterSink::new(io::stdout().lock(), format);
            configure_polars_display(format);
            scan_one(&session, &mut sink, accession)
        }

        Commands::Check { ref accession } => cmd_check(accession),

        Commands::Sequence { ref sequence, format } => {
            let results = detect::scan_str(sequence.trim());
            let report = Report {
                accession: String::new(),
                description: "(command line sequence)".to_string(),
                length: sequence.trim().len(),
                results,
            };
            configure_polars_display(format);
            WriterSink::new(io::stdout().lock(), format).render(&report)?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Interactive { ref source, format } => {
            let config = build_config(&cli)?;
            let session = Session::new(open_provider(source, &config)?);
            configure_polars_display(format);
            cmd_interactive(&session, format)
        }

        Commands::Motif => {
            for (pos, constraint) in motifscan::motif_rows() {
                println!("{pos}\t{constraint}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Defaults, then `MOTIFSCAN_*` environment variables, then flags.
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::from_env()?;
    if let Some(url) = &cli.base_url {
        config.set_base_url(url.as_str());
    }
    if let Some(secs) = cli.timeout {
        config.set_timeout_secs(secs).context("invalid --timeout")?;
    }
    Ok(config)
}

fn open_provider(source: &Source, config: &Config) -> anyhow::Result<Box<dyn RecordProvider>> {
    Ok(match (&source.flat_file, &source.fasta) {
        (Some(path), _) => Box::new(FlatFileStore::new(path)),
        (None, Some(path)) => Box::new(FastaStore::new(path)),
        (None, None) => Box::new(UniProtClient::new(config).context("could not create the UniProtKB client")?),
    })
}

/// One trigger: rejection exits 2, lookup failures bubble up as errors.
fn scan_one<P: RecordProvider, S: ReportSink>(session: &Session<P>, sink: &mut S, input: &str) -> anyhow::Result<ExitCode> {
    match session.run(input).with_context(|| format!("could not scan {:?}", input.trim()))? {
        Outcome::Rejected { input, reason } => {
            sink.reject(&input, &reason)?;
            Ok(ExitCode::from(EXIT_REJECTED))
        }
        Outcome::Scanned(report) => {
            sink.render(&report)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn cmd_check(input: &str) -> anyhow::Result<ExitCode> {
    match accession::validate(input) {
        Ok(acc) => {
            println!("{acc}: valid (shape {})", acc.shape());
            Ok(ExitCode::SUCCESS)
        }
        Err(reason) => {
            println!("{input:?}: invalid ({reason})");
            Ok(ExitCode::from(EXIT_REJECTED))
        }
    }
}

fn cmd_interactive<P: RecordProvider>(session: &Session<P>, format: Format) -> anyhow::Result<ExitCode> {
    let stdin = io::stdin();
    let mut sink = WriterSink::new(io::stdout(), format);
    loop {
        print!("UniProtKB accession number: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input, "quit" | "exit") {
            break;
        }
        // A failed lookup is reported and the prompt comes back.
        if let Err(e) = scan_one(session, &mut sink, input) {
            error!(error = ?e, "lookup failed");
            eprintln!("error: {e:#}");
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn configure_polars_display(format: Format) {
    if format != Format::Table {
        return;
    }
    // Read by polars' pretty-printer; show every row and never truncate.
    std::env::set_var("POLARS_FMT_TABLE_FORMATTING", "UTF8_FULL");
    std::env::set_var("POLARS_FMT_MAX_ROWS", "1000000");
    std::env::set_var("POLARS_FMT_STR_LEN", "100000");
}
