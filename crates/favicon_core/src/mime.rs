/// Extensions preferred over the registry's first pick for common icon types.
const PREFERRED: &[(&str, &str)] = &[
    ("image/x-icon", ".ico"),
    ("image/vnd.microsoft.icon", ".ico"),
    ("image/png", ".png"),
    ("image/gif", ".gif"),
    ("image/jpeg", ".jpg"),
    ("image/svg+xml", ".svg"),
    ("image/webp", ".webp"),
    ("image/avif", ".avif"),
    ("image/bmp", ".bmp"),
];

/// File extension (with leading dot) for a content type, if one is known.
pub fn extension_for_mime(content_type: &str) -> Option<String> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_ascii_lowercase();
    if essence.is_empty() {
        return None;
    }

    if let Some((_, ext)) = PREFERRED.iter().find(|(mime, _)| *mime == essence) {
        return Some((*ext).to_string());
    }

    mime_guess::get_mime_extensions_str(&essence)
        .and_then(|exts| exts.first())
        .map(|ext| format!(".{ext}"))
}
