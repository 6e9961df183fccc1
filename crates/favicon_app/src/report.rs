use std::io::{self, Write};
use std::process::ExitCode;

use engine_logging::{engine_error, engine_info};
use favicon_engine::{ItemError, WorkItem};

/// `<source url> [<favicon url> <favicon url> ...]`
pub fn format_item(item: &WorkItem) -> String {
    format!("{} [{}]", item.source_url, item.favicon_urls.join(" "))
}

/// Tallies what the sink has seen; decides the exit code.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub items: usize,
    pub failed: usize,
    pub saved_files: usize,
    pub input_aborted: bool,
}

impl RunSummary {
    /// Print one finished item and account for it.
    pub fn record(&mut self, out: &mut impl Write, item: &WorkItem) -> io::Result<()> {
        writeln!(out, "{}", format_item(item))?;

        self.items += 1;
        self.saved_files += item.saved_paths.len();
        if let Some(err) = &item.error {
            self.failed += 1;
            if let ItemError::Input(input) = err {
                engine_error!("input aborted: {}", input);
                self.input_aborted = true;
            }
        }
        Ok(())
    }

    /// Per-page failures are part of a normal run; broken input is not.
    pub fn succeeded(&self) -> bool {
        !self.input_aborted
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.succeeded() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }

    pub fn log(&self) {
        engine_info!(
            "processed {} pages: {} failed, {} files saved",
            self.items,
            self.failed,
            self.saved_files
        );
    }
}
