use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use ctxsw::config::{Config, OutputFormat, load_config, load_config_from_path};
use ctxsw::format::{render_json, render_text};
use ctxsw::logging::init_tracing;
use ctxsw::system::lookup::pids_by_name;
use ctxsw::system::source::ProcFs;
use ctxsw::{Reader, Snapshot};

#[derive(Parser)]
#[command(
    name = "ctxsw",
    about = "Report voluntary and involuntary context switches for a process and its threads"
)]
struct Cli {
    /// Process id to inspect; prompted for on stdin when omitted
    #[arg(conflicts_with = "name")]
    pid: Option<u32>,

    /// Inspect every process with this exact name
    #[arg(long)]
    name: Option<String>,

    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Root of the process filesystem
    #[arg(long)]
    proc_root: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Only read and report the process-level counters
    #[arg(long, default_value_t = false)]
    no_threads: bool,

    /// Log level: error, warn, info, debug, trace
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);
    init_tracing(&config.logging)?;

    let pids = resolve_pids(&cli)?;
    let reader = Reader::new(ProcFs::new(&config.general.proc_root));
    tracing::debug!(?pids, root = %reader.source().root().display(), "querying");

    let snapshots = pids
        .iter()
        .map(|&pid| {
            if config.display.show_threads {
                reader.query(pid)
            } else {
                reader.query_process(pid)
            }
        })
        .collect::<Result<Vec<Snapshot>>>()?;

    let output = match config.general.format {
        OutputFormat::Json => render_json(&snapshots)?,
        OutputFormat::Text => snapshots
            .iter()
            .map(|snapshot| render_text(snapshot, &config.display))
            .collect::<Vec<_>>()
            .join("\n"),
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", output.trim_end())?;
    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(ref root) = cli.proc_root {
        config.general.proc_root = root.clone();
    }
    if let Some(format) = cli.format {
        config.general.format = format;
    }
    if cli.no_threads {
        config.display.show_threads = false;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    config
}

fn resolve_pids(cli: &Cli) -> Result<Vec<u32>> {
    if let Some(pid) = cli.pid {
        return Ok(vec![pid]);
    }
    if let Some(ref name) = cli.name {
        let pids = pids_by_name(name);
        if pids.is_empty() {
            return Err(eyre!("no running process named `{name}`"));
        }
        return Ok(pids);
    }
    Ok(vec![prompt_pid()?])
}

fn prompt_pid() -> Result<u32> {
    let mut stdout = io::stdout();
    write!(stdout, "Enter PID to monitor: ")?;
    stdout.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim();
    answer
        .parse::<u32>()
        .wrap_err_with(|| format!("`{answer}` is not a process id"))
}
