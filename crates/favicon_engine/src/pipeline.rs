use std::sync::Arc;

use engine_logging::{engine_debug, engine_error, engine_warn};
use tokio::sync::{mpsc, Semaphore};
use tokio::task::{JoinError, JoinSet};

use crate::favicon::find_favicon_urls;
use crate::fetch::Fetcher;
use crate::save::FaviconSaver;
use crate::{WorkItem, CHANNEL_CAPACITY};

/// Runs the fetch and save stages for a single work item.
pub struct ItemProcessor {
    fetcher: Arc<dyn Fetcher>,
    saver: FaviconSaver,
}

impl ItemProcessor {
    pub fn new(fetcher: Arc<dyn Fetcher>, saver: FaviconSaver) -> Self {
        Self { fetcher, saver }
    }

    /// Items that already failed come back untouched.
    pub async fn process(&self, mut item: WorkItem) -> WorkItem {
        if item.is_failed() {
            return item;
        }

        let found = find_favicon_urls(self.fetcher.as_ref(), &item.source_url).await;
        match found {
            Ok(urls) => item.favicon_urls = urls,
            Err(err) => {
                engine_warn!("{}: fetch failed: {}", item.source_url, err);
                item.error = Some(err.into());
                return item;
            }
        }

        let saved = self
            .saver
            .save(&item.favicon_urls, item.file_name_prefix())
            .await;
        match saved {
            Ok(paths) => item.saved_paths = paths,
            Err(err) => {
                engine_warn!("{}: save failed: {}", item.source_url, err);
                item.error = Some(err.into());
            }
        }
        item
    }
}

/// Spawn one task per incoming item and forward results as they finish.
///
/// With `max_concurrency` unset the fan-out is unbounded. The output closes
/// only after every spawned task has been joined; emission order follows
/// completion order.
pub fn spawn_fan_out(
    mut input: mpsc::Receiver<WorkItem>,
    processor: Arc<ItemProcessor>,
    max_concurrency: Option<usize>,
) -> mpsc::Receiver<WorkItem> {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    let limit = max_concurrency.map(|n| Arc::new(Semaphore::new(n.max(1))));

    tokio::spawn(async move {
        let mut tasks = JoinSet::new();
        while let Some(item) = input.recv().await {
            while let Some(joined) = tasks.try_join_next() {
                log_join_failure(joined);
            }
            // Waiting here holds back the input stage once the cap is reached.
            let permit = match &limit {
                Some(semaphore) => match semaphore.clone().acquire_owned().await {
                    Ok(permit) => Some(permit),
                    Err(_) => break,
                },
                None => None,
            };
            let processor = processor.clone();
            let tx = tx.clone();
            tasks.spawn(async move {
                let _permit = permit;
                let item = processor.process(item).await;
                let _ = tx.send(item).await;
            });
        }

        while let Some(joined) = tasks.join_next().await {
            log_join_failure(joined);
        }
        engine_debug!("all work items finished");
    });
    rx
}

fn log_join_failure(joined: Result<(), JoinError>) {
    if let Err(err) = joined {
        engine_error!("work item task failed to complete: {}", err);
    }
}
