use url::Url;
use crate::error::UrlError;

/// Checks the `/download_mp3` argument before it reaches the downloader.
///
/// Only the first whitespace-separated token is used. Only absolute http(s)
/// links pass, so nothing starting with `-` can be mistaken for a downloader
/// option.
pub fn validate_media_url(input: &str) -> Result<Url, UrlError> {
    let Some(input) = input.split_whitespace().next() else {
        return Err(UrlError::Empty);
    };

    let url = Url::parse(input).map_err(|_| UrlError::Malformed(input.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(UrlError::UnsupportedScheme(other.to_string())),
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::Malformed(input.to_string()));
    }

    Ok(url)
}
