use std::fmt;
use std::io;
use std::path::PathBuf;

use favicon_core::DataUrlError;
use thiserror::Error;

use crate::persist::PersistError;

/// One input line in flight through the pipeline.
#[derive(Debug)]
pub struct WorkItem {
    pub source_url: String,
    file_name_prefix: String,
    pub error: Option<ItemError>,
    pub favicon_urls: Vec<String>,
    pub saved_paths: Vec<PathBuf>,
}

impl WorkItem {
    pub fn new(source_url: impl Into<String>, hostname: &str) -> Self {
        Self {
            source_url: source_url.into(),
            file_name_prefix: format!("{hostname}-"),
            error: None,
            favicon_urls: Vec::new(),
            saved_paths: Vec::new(),
        }
    }

    /// Item carrying only an error, emitted when the input itself is broken.
    pub fn failed(error: impl Into<ItemError>) -> Self {
        Self {
            source_url: String::new(),
            file_name_prefix: String::new(),
            error: Some(error.into()),
            favicon_urls: Vec::new(),
            saved_paths: Vec::new(),
        }
    }

    /// `hostname-`, fixed from the original URL at creation.
    pub fn file_name_prefix(&self) -> &str {
        &self.file_name_prefix
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Error)]
pub enum ItemError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Save(#[from] SaveError),
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("line {line}: invalid url {raw:?}: {source}")]
    Parse {
        line: usize,
        raw: String,
        #[source]
        source: url::ParseError,
    },
    #[error("reading input: {0}")]
    Read(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub status: u16,
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub final_url: String,
    pub redirect_count: usize,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    InvalidHref { href: String },
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::InvalidHref { href } => write!(f, "invalid favicon href {href:?}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("downloading {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },
    #[error("decoding data url: {0}")]
    DataUrl(#[from] DataUrlError),
    #[error("unknown mime type: {0}")]
    UnknownMimeType(String),
    #[error(transparent)]
    Persist(#[from] PersistError),
}
