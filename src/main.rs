use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::time::Duration;

mod cmd;
mod remote;
mod utils;

use cmd::{Command, CommandParser};
use remote::{DEFAULT_PORT, RemoteClient};
use utils::ConsoleReporter;

/// DSCT client - line-oriented front end for the numeric-processing service
///
/// Command grammar (keywords are case-insensitive):
///   ping
///   echo <free text>
///   generate "<path>" <count> <integer|decimal> <min> <max>
///   process "<input path>" "<output path>"
///   help [command]
///
/// Global flags / env:
///   -v / -vv        Increase verbosity
///   -q / --quiet    Errors only
///   -t / --target   Server address (or DSCT_TARGET env); default 127.0.0.1:7878
///   --timeout-ms    Per-request timeout
///
/// Examples:
///   dsct-client                                 (interactive; one command per line)
///   dsct-client -t tcp://10.0.0.5:7878 exec ping
///   dsct-client exec 'generate "nums.txt" 100 decimal -50 50'
///   dsct-client help process
#[derive(Parser, Debug)]
#[command(
    name = "dsct-client",
    version,
    author,
    about = "DSCT client - send ping/echo/generate/process commands to a numeric-processing server",
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Server address (tcp://host:port or host:port)
    #[arg(short = 't', long = "target", global = true, value_name = "ADDR")]
    target: Option<String>,

    /// Per-request timeout in milliseconds
    #[arg(
        long = "timeout-ms",
        global = true,
        value_name = "MS",
        default_value_t = remote::client::DEFAULT_TIMEOUT.as_millis() as u64
    )]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read commands from stdin, one per line (default)
    Repl,

    /// Run a single command line and exit non-zero if it fails
    Exec {
        /// Full command line, quoted as one argument
        #[arg(value_name = "LINE", allow_hyphen_values = true)]
        line: String,
    },

    /// Describe one or all commands
    Help {
        #[arg(value_enum, ignore_case = true)]
        command: Option<Command>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = utils::derive_level(cli.verbose, cli.quiet);
    utils::init_logging(level);

    match &cli.command {
        Some(Commands::Help { command }) => {
            match command {
                Some(c) => print!("{}", cmd::help_for(*c)),
                None => print!("{}", cmd::help()),
            }
            Ok(())
        }
        Some(Commands::Exec { line }) => connect(&cli)?.call(line),
        Some(Commands::Repl) | None => {
            let parser = connect(&cli)?;
            let stdin = std::io::stdin();
            let prompt = stdin.is_terminal().then_some(cmd::PROMPT);
            let executed = cmd::run_lines(&parser, stdin.lock(), std::io::stdout(), prompt)?;
            log_debug!("session ended after {executed} commands");
            Ok(())
        }
    }
}

/// Resolve the target (CLI flag > DSCT_TARGET env > default) and build the parser.
fn connect(cli: &Cli) -> Result<CommandParser<RemoteClient, ConsoleReporter>> {
    let raw = cli
        .target
        .clone()
        .or_else(|| {
            std::env::var("DSCT_TARGET")
                .ok()
                .filter(|s| !s.trim().is_empty())
        })
        .unwrap_or_else(|| format!("127.0.0.1:{DEFAULT_PORT}"));

    let spec = match remote::parse_target(&raw) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Invalid target '{}': {e}", raw);
            std::process::exit(2);
        }
    };
    let client = RemoteClient::new(spec, Duration::from_millis(cli.timeout_ms))?;
    log_debug!(
        "target {} (from '{}')",
        client.target(),
        client.target().original
    );
    Ok(CommandParser::new(client, ConsoleReporter))
}
