use url::Url;

/// `{prefix}favicon{ext}` for icons inlined as data URLs.
pub fn data_url_file_name(prefix: &str, extension: &str) -> String {
    format!("{prefix}favicon{extension}")
}

/// `{prefix}{basename}` where basename is the last segment of the decoded
/// final URL path. A root path leaves just the prefix.
///
/// A decoded backslash becomes `_` so the name cannot leave the output
/// directory on Windows.
pub fn http_file_name(prefix: &str, final_url: &Url) -> String {
    let decoded = urlencoding::decode_binary(final_url.path().as_bytes());
    let path = String::from_utf8_lossy(&decoded);
    let trimmed = path.trim_end_matches('/');
    let base = trimmed.rsplit('/').next().unwrap_or_default();
    format!("{prefix}{}", base.replace('\\', "_"))
}
