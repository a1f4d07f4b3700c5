use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use keebgen_layout::HullSource;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

mod commands;
mod error;

use commands::{InterpretArgs, run_hull, run_interpret};
use error::ErrorCode;

#[derive(Parser)]
#[command(name = "keebgen", version, about = "Turn keyboard layouts into board geometry")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Interpret a layout (KLE JSON or raw data) and write the board model as JSON
    Interpret {
        /// Layout file, or `-` for stdin
        #[arg(value_name = "LAYOUT")]
        input: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Board config (YAML)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Distance of one layout unit, overriding the config
        #[arg(short, long, value_name = "LENGTH")]
        unit: Option<f64>,

        /// Points the outline is hulled from
        #[arg(long, value_enum, default_value_t = HullArg::Corners)]
        hull: HullArg,

        /// Reject rotation metadata outside the first item of a row
        #[arg(long)]
        strict: bool,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Convex hull of a JSON array of [x, y] points
    Hull {
        /// Points file, or `-` for stdin
        #[arg(value_name = "POINTS")]
        input: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HullArg {
    None,
    Centers,
    Corners,
}

impl From<HullArg> for HullSource {
    fn from(arg: HullArg) -> Self {
        match arg {
            HullArg::None => HullSource::None,
            HullArg::Centers => HullSource::Centers,
            HullArg::Corners => HullSource::KeyCorners,
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ErrorCode::Usage.into()
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Interpret {
            input,
            output,
            config,
            unit,
            hull,
            strict,
            pretty,
        } => run_interpret(InterpretArgs {
            input,
            output,
            config,
            unit,
            hull: hull.into(),
            strict,
            pretty,
        }),
        Command::Hull {
            input,
            output,
            pretty,
        } => run_hull(&input, output.as_deref(), pretty),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            err.code.into()
        }
    }
}
