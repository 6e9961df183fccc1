use std::path::Path;
use std::sync::Arc;

use engine_logging::engine_info;
use tokio::io::AsyncBufRead;
use tokio::sync::mpsc;

use crate::config::EngineConfig;
use crate::fetch::{Fetcher, ReqwestFetcher};
use crate::input::spawn_input_stage;
use crate::pipeline::{spawn_fan_out, ItemProcessor};
use crate::save::FaviconSaver;
use crate::WorkItem;

/// Wires the input stage into the fan-out stage.
pub struct FaviconEngine {
    config: EngineConfig,
    processor: Arc<ItemProcessor>,
}

impl FaviconEngine {
    pub fn new(config: EngineConfig) -> Self {
        let fetcher = Arc::new(ReqwestFetcher::new(config.fetch.clone()));
        Self::with_fetcher(config, fetcher)
    }

    pub fn with_fetcher(config: EngineConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        let saver = FaviconSaver::new(
            fetcher.clone(),
            config.output_dir.clone(),
            config.request_delay,
        );
        let processor = Arc::new(ItemProcessor::new(fetcher, saver));
        Self { config, processor }
    }

    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }

    /// Start processing `input`; must be called from within a tokio runtime.
    ///
    /// The returned stream yields one item per accepted line (plus at most
    /// one input failure) and ends when every item is done.
    pub fn run<R>(&self, input: R) -> mpsc::Receiver<WorkItem>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        engine_info!(
            "starting run into {} (concurrency {:?})",
            self.config.output_dir.display(),
            self.config.max_concurrency
        );
        let items = spawn_input_stage(input);
        spawn_fan_out(items, self.processor.clone(), self.config.max_concurrency)
    }
}
