use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use thiserror::Error;

const SCHEME: &str = "data:";
const DEFAULT_MEDIA_TYPE: &str = "text/plain";

/// Standard alphabet, padding optional: inline icons in the wild often drop it.
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataUrlError {
    #[error("not a data url")]
    NotDataUrl,
    #[error("data url has no ',' separator")]
    MissingComma,
    #[error("invalid media type {0:?}")]
    InvalidMediaType(String),
    #[error("invalid base64 payload: {0}")]
    Base64(String),
}

/// Decoded `data:[<mediatype>][;base64],<payload>` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    media_type: String,
    data: Vec<u8>,
}

impl DataUrl {
    pub fn parse(raw: &str) -> Result<Self, DataUrlError> {
        let body = strip_scheme(raw.trim()).ok_or(DataUrlError::NotDataUrl)?;
        let (header, payload) = body.split_once(',').ok_or(DataUrlError::MissingComma)?;

        let mut parts = header.split(';').map(str::trim);
        let media_type = parts.next().unwrap_or_default().to_ascii_lowercase();
        // Parameters such as `charset` do not affect the stored bytes.
        let is_base64 = parts.any(|part| part.eq_ignore_ascii_case("base64"));

        let media_type = if media_type.is_empty() {
            DEFAULT_MEDIA_TYPE.to_string()
        } else if is_valid_media_type(&media_type) {
            media_type
        } else {
            return Err(DataUrlError::InvalidMediaType(media_type));
        };

        let decoded = urlencoding::decode_binary(payload.as_bytes());
        let data = if is_base64 {
            let compact: Vec<u8> = decoded
                .iter()
                .copied()
                .filter(|b| !b.is_ascii_whitespace())
                .collect();
            BASE64
                .decode(compact)
                .map_err(|err| DataUrlError::Base64(err.to_string()))?
        } else {
            decoded.into_owned()
        };

        Ok(Self { media_type, data })
    }

    /// Lower-cased `type/subtype`, without parameters.
    pub fn content_type(&self) -> &str {
        &self.media_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

fn strip_scheme(raw: &str) -> Option<&str> {
    let head = raw.get(..SCHEME.len())?;
    head.eq_ignore_ascii_case(SCHEME)
        .then(|| &raw[SCHEME.len()..])
}

fn is_valid_media_type(media_type: &str) -> bool {
    match media_type.split_once('/') {
        Some((kind, subtype)) => !kind.is_empty() && !subtype.is_empty() && !subtype.contains('/'),
        None => false,
    }
}
