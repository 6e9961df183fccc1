use std::path::PathBuf;
use std::time::Duration;

use crate::fetch::FetchSettings;

/// Pause between consecutive favicon downloads of one page.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub output_dir: PathBuf,
    pub fetch: FetchSettings,
    pub request_delay: Duration,
    /// `None` spawns a task for every item as soon as it arrives.
    pub max_concurrency: Option<usize>,
}

impl EngineConfig {
    pub fn default_with_output(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            fetch: FetchSettings::default(),
            request_delay: DEFAULT_REQUEST_DELAY,
            max_concurrency: None,
        }
    }
}
