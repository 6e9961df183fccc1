use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use engine_logging::{engine_debug, engine_info};
use favicon_core::{data_url_file_name, extension_for_mime, http_file_name, DataUrl};
use url::Url;

use crate::fetch::Fetcher;
use crate::persist::{AtomicFileWriter, PersistError};
use crate::{FailureKind, FetchError, SaveError};

const DATA_SCHEME: &str = "data:";
const STATUS_OK: u16 = 200;

/// Downloads or decodes each favicon URL and writes it under the output dir.
pub struct FaviconSaver {
    fetcher: Arc<dyn Fetcher>,
    writer: AtomicFileWriter,
    request_delay: Duration,
}

impl FaviconSaver {
    pub fn new(fetcher: Arc<dyn Fetcher>, output_dir: PathBuf, request_delay: Duration) -> Self {
        Self {
            fetcher,
            writer: AtomicFileWriter::new(output_dir),
            request_delay,
        }
    }

    /// Save every URL in order, returning the written paths.
    ///
    /// Non-200 responses are skipped. The first error aborts the batch and
    /// the paths written so far are not reported. A delay follows every
    /// entry, the last one included.
    pub async fn save(&self, urls: &[String], prefix: &str) -> Result<Vec<PathBuf>, SaveError> {
        let mut saved = Vec::with_capacity(urls.len());
        for url in urls {
            if let Some(path) = self.save_one(url, prefix).await? {
                engine_info!("saved {} to {}", url, path.display());
                saved.push(path);
            }
            tokio::time::sleep(self.request_delay).await;
        }
        Ok(saved)
    }

    async fn save_one(&self, url: &str, prefix: &str) -> Result<Option<PathBuf>, SaveError> {
        let (file_name, content) = if is_data_url(url) {
            let data_url = DataUrl::parse(url)?;
            let extension = extension_for_mime(data_url.content_type())
                .ok_or_else(|| SaveError::UnknownMimeType(data_url.content_type().to_string()))?;
            (data_url_file_name(prefix, &extension), data_url.into_data())
        } else {
            let response = self
                .fetcher
                .get(url)
                .await
                .map_err(|source| SaveError::Fetch {
                    url: url.to_string(),
                    source,
                })?;
            let metadata = &response.metadata;
            let content_type = metadata.content_type.as_deref().unwrap_or("unknown type");
            if response.status != STATUS_OK {
                engine_debug!("skipping {}: status {} ({})", url, response.status, content_type);
                return Ok(None);
            }
            engine_debug!(
                "downloaded {} ({}, {} redirects)",
                url,
                content_type,
                metadata.redirect_count
            );
            let final_url = Url::parse(&metadata.final_url).map_err(|err| SaveError::Fetch {
                url: url.to_string(),
                source: FetchError::new(FailureKind::InvalidUrl, err.to_string()),
            })?;
            (http_file_name(prefix, &final_url), response.bytes)
        };

        let writer = self.writer.clone();
        let path = tokio::task::spawn_blocking(move || writer.write(&file_name, &content))
            .await
            .map_err(|err| PersistError::Io {
                path: self.writer.dir().to_path_buf(),
                source: io::Error::other(err),
            })??;
        Ok(Some(path))
    }
}

fn is_data_url(url: &str) -> bool {
    url.get(..DATA_SCHEME.len())
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case(DATA_SCHEME))
}
