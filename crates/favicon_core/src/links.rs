use std::collections::HashSet;

use thiserror::Error;
use url::Url;

const TAG_START: &str = "<link";
const TAG_END: &str = ">";
const HREF_START: &str = "href=\"";
const QUOTE: &str = "\"";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("cannot resolve href {href:?}: {source}")]
    Resolve {
        href: String,
        #[source]
        source: url::ParseError,
    },
}

/// Flat cursor over `<link ... >` intervals.
///
/// Not a parser: each item is whatever text lies between a `<link` marker and
/// the next `>`, so attribute values containing `>` cut the tag short.
#[derive(Debug, Clone)]
pub struct LinkTagScanner<'a> {
    content: &'a str,
    cursor: usize,
}

impl<'a> LinkTagScanner<'a> {
    pub fn new(content: &'a str) -> Self {
        Self { content, cursor: 0 }
    }
}

impl<'a> Iterator for LinkTagScanner<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.content.get(self.cursor..)?;
        let start = self.cursor + rest.find(TAG_START)?;
        let after_marker = start + TAG_START.len();
        let end = after_marker + self.content[after_marker..].find(TAG_END)? + TAG_END.len();
        self.cursor = end;
        Some(&self.content[start..end])
    }
}

/// Collect the absolute favicon URLs referenced by a page.
///
/// Single quotes are rewritten to double quotes before scanning, which also
/// rewrites apostrophes inside unrelated attribute values. Falls back to
/// `scheme://host/favicon.ico` when nothing qualifies. Result order is not
/// meaningful.
pub fn extract_favicon_urls(page: &[u8], base: &Url) -> Result<Vec<String>, LinkError> {
    let content = String::from_utf8_lossy(page).replace('\'', "\"");

    let mut seen = HashSet::new();
    let mut urls = Vec::new();
    for tag in LinkTagScanner::new(&content).filter(|tag| is_icon_tag(tag)) {
        let Some(href) = href_value(tag) else {
            continue;
        };
        let resolved = base
            .join(href)
            .map_err(|source| LinkError::Resolve {
                href: href.to_string(),
                source,
            })?
            .to_string();
        if seen.insert(resolved.clone()) {
            urls.push(resolved);
        }
    }

    if urls.is_empty() {
        urls.push(fallback_favicon_url(base));
    }
    Ok(urls)
}

fn is_icon_tag(tag: &str) -> bool {
    tag.contains("\"icon") || tag.contains("\"shortcut icon\"")
}

fn href_value(tag: &str) -> Option<&str> {
    let start = tag.find(HREF_START)? + HREF_START.len();
    let len = tag[start..].find(QUOTE)?;
    Some(&tag[start..start + len])
}

fn fallback_favicon_url(base: &Url) -> String {
    let host = base.host_str().unwrap_or_default();
    match base.port() {
        Some(port) => format!("{}://{host}:{port}/favicon.ico", base.scheme()),
        None => format!("{}://{host}/favicon.ico", base.scheme()),
    }
}
