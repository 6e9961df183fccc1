use engine_logging::engine_debug;
use favicon_core::{extract_favicon_urls, LinkError};
use url::Url;

use crate::fetch::Fetcher;
use crate::{FailureKind, FetchError};

/// Fetch a page and list the favicon URLs it references.
///
/// The page status is ignored on purpose: error pages are scanned too, and
/// links resolve against the URL as given, not the redirect target.
pub async fn find_favicon_urls(fetcher: &dyn Fetcher, page_url: &str) -> Result<Vec<String>, FetchError> {
    let base = Url::parse(page_url)
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;

    let page = fetcher.get(page_url).await?;
    engine_debug!(
        "page {} answered {} with {} bytes",
        page_url,
        page.status,
        page.metadata.byte_len
    );

    extract_favicon_urls(&page.bytes, &base).map_err(|err| match &err {
        LinkError::Resolve { href, .. } => FetchError::new(
            FailureKind::InvalidHref { href: href.clone() },
            err.to_string(),
        ),
    })
}
