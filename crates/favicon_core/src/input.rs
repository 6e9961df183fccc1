use url::{ParseError, Url};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub url: String,
    pub hostname: String,
}

/// Parse one line of the address list.
///
/// Returns `Ok(None)` for blank lines. Scheme-less references such as
/// `example.com` are kept with an empty hostname; they fail later when fetched.
pub fn parse_source_line(raw: &str) -> Result<Option<SourceLine>, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let hostname = match Url::parse(trimmed) {
        Ok(url) => url.host_str().unwrap_or_default().to_string(),
        Err(ParseError::RelativeUrlWithoutBase) => String::new(),
        Err(err) => return Err(err),
    };

    Ok(Some(SourceLine {
        url: trimmed.to_string(),
        hostname,
    }))
}
