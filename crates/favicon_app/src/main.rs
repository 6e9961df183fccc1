mod cli;
mod report;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use engine_logging::{engine_debug, level_for_verbosity, LogDestination};
use favicon_engine::{ensure_output_dir, EngineConfig, FaviconEngine};
use tokio::io::BufReader;

use crate::cli::Cli;
use crate::report::RunSummary;

fn main() -> ExitCode {
    let cli = match Cli::try_parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version go to stdout and are not failures.
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let Some(addrs) = cli.addrs.clone() else {
        eprintln!("-addrs is required");
        return ExitCode::FAILURE;
    };

    let destination = match &cli.log_file {
        Some(path) => LogDestination::TerminalAndFile(path.clone()),
        None => LogDestination::Terminal,
    };
    engine_logging::initialize(level_for_verbosity(cli.verbose), destination);

    match run(&cli, addrs) {
        Ok(summary) => {
            summary.log();
            summary.exit_code()
        }
        Err(err) => {
            eprintln!("favicon-harvester error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, addrs: PathBuf) -> Result<RunSummary> {
    let file = std::fs::File::open(&addrs)
        .with_context(|| format!("opening addrs file {}", addrs.display()))?;
    ensure_output_dir(&cli.output)
        .with_context(|| format!("preparing output directory {}", cli.output.display()))?;

    let mut config = EngineConfig::default_with_output(cli.output.clone());
    config.max_concurrency = cli.concurrency.map(|n| n.get());

    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    runtime.block_on(async move {
        engine_debug!("reading addresses from {}", addrs.display());
        let engine = FaviconEngine::new(config);
        let mut results = engine.run(BufReader::new(tokio::fs::File::from_std(file)));

        let mut summary = RunSummary::default();
        let stdout = std::io::stdout();
        while let Some(item) = results.recv().await {
            let mut out = stdout.lock();
            summary
                .record(&mut out, &item)
                .context("writing results to stdout")?;
            out.flush().context("writing results to stdout")?;
        }
        Ok::<_, anyhow::Error>(summary)
    })
}
