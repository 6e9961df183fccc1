//! Favicon engine: fetch pipeline, downloads and file output.
mod config;
mod engine;
mod favicon;
mod fetch;
mod input;
mod persist;
mod pipeline;
mod save;
mod types;

pub use config::{EngineConfig, DEFAULT_REQUEST_DELAY};
pub use engine::FaviconEngine;
pub use favicon::find_favicon_urls;
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use input::spawn_input_stage;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use pipeline::{spawn_fan_out, ItemProcessor};
pub use save::FaviconSaver;
pub use types::{
    FailureKind, FetchError, FetchMetadata, FetchOutput, InputError, ItemError, SaveError,
    WorkItem,
};

/// Smallest buffer tokio channels allow; each send waits for the consumer.
pub(crate) const CHANNEL_CAPACITY: usize = 1;
