//! `doevil`: load an evil program from a file and run it against the terminal.

mod loader;
mod terminal;

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use evil_core::{EofPolicy, Machine, RunReport, Snapshot, StdIo, VmConfig, DEFAULT_EOF_BYTE};
use serde::Serialize;
use tracing::{debug, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::loader::load_program;
use crate::terminal::TerminalGuard;

/// doevil command line.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Program file to execute.
    #[arg(value_name = "FILE")]
    program: PathBuf,
    /// Increase diagnostic verbosity on stderr.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Byte stored in A when a read hits end of input.
    #[arg(
        long,
        env = "DOEVIL_EOF_BYTE",
        default_value_t = DEFAULT_EOF_BYTE,
        value_name = "BYTE"
    )]
    eof_byte: u8,
    /// Leave A untouched when a read hits end of input. Takes precedence over
    /// `--eof-byte`.
    #[arg(long)]
    eof_unchanged: bool,
    /// Stop after this many fetched program bytes.
    #[arg(long, env = "DOEVIL_MAX_STEPS", value_name = "N")]
    max_steps: Option<u64>,
    /// Leave terminal echo and line buffering as they are.
    #[arg(long)]
    no_raw: bool,
    /// Print the final machine state and run counters as JSON on stderr.
    #[arg(long)]
    dump_state: bool,
}

impl Cli {
    fn vm_config(&self) -> VmConfig {
        let eof = if self.eof_unchanged {
            EofPolicy::Unchanged
        } else {
            EofPolicy::Sentinel(self.eof_byte)
        };
        VmConfig {
            eof,
            step_limit: self.max_steps,
        }
    }
}

/// Final state written by `--dump-state`.
#[derive(Serialize)]
struct StateDump {
    report: RunReport,
    state: Snapshot,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let program = load_program(&cli.program)?;
    let config = cli.vm_config();
    let mut machine = Machine::new(program, config);

    let report = {
        let guard = TerminalGuard::enter(!cli.no_raw).context("failed to configure terminal")?;
        debug!(terminal_input = guard.is_active(), "starting run");
        let mut io = StdIo::new();
        machine
            .run(&mut io)
            .with_context(|| format!("run of {} aborted", cli.program.display()))?
    };
    debug!(steps = report.steps, halt = ?report.halt, "done");

    if cli.dump_state {
        let dump = StateDump {
            report,
            state: machine.snapshot(),
        };
        serde_json::to_writer_pretty(std::io::stderr(), &dump)?;
        eprintln!();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_ff_sentinel() {
        let cli = Cli::parse_from(["doevil", "prog.evil"]);
        assert_eq!(cli.vm_config(), VmConfig::default());
    }

    #[test]
    fn flags_map_onto_config() {
        let cli = Cli::parse_from(["doevil", "--eof-byte", "0", "--max-steps", "7", "p"]);
        assert_eq!(cli.vm_config().eof, EofPolicy::Sentinel(0));
        assert_eq!(cli.vm_config().step_limit, Some(7));

        let cli = Cli::parse_from(["doevil", "--eof-unchanged", "p"]);
        assert_eq!(cli.vm_config().eof, EofPolicy::Unchanged);
    }

    #[test]
    fn eof_unchanged_wins_over_eof_byte() {
        let cli = Cli::try_parse_from(["doevil", "--eof-byte", "1", "--eof-unchanged", "p"])
            .unwrap();
        assert_eq!(cli.vm_config().eof, EofPolicy::Unchanged);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
