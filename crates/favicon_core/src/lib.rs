//! Favicon core: pure parsing and naming helpers, no IO.
mod dataurl;
mod input;
mod links;
mod mime;
mod naming;

pub use dataurl::{DataUrl, DataUrlError};
pub use input::{parse_source_line, SourceLine};
pub use links::{extract_favicon_urls, LinkError, LinkTagScanner};
pub use mime::extension_for_mime;
pub use naming::{data_url_file_name, http_file_name};
