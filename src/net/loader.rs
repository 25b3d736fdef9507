use super::http::HttpClient;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Unsupported scheme: {0}")]
    UnsupportedScheme(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fetches help pages as text. The HTTP client is only built the first
/// time a remote page is requested.
pub struct Loader {
    http_client: Option<HttpClient>,
}

impl Loader {
    pub fn new() -> Self {
        Self { http_client: None }
    }

    pub fn fetch(&mut self, url: &Url) -> Result<String, LoadError> {
        log::info!("Loading page: {}", url);
        match url.scheme() {
            "http" | "https" => self.http()?.get(url),
            "file" => fetch_file(url),
            "data" => fetch_data(url),
            scheme => Err(LoadError::UnsupportedScheme(scheme.to_string())),
        }
    }

    fn http(&mut self) -> Result<&HttpClient, LoadError> {
        let client = match self.http_client.take() {
            Some(client) => client,
            None => HttpClient::new()?,
        };
        Ok(self.http_client.insert(client))
    }
}

impl LoadError {
    fn invalid(url: impl ToString, reason: impl ToString) -> Self {
        LoadError::InvalidUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns a command-line argument into a URL. Anything that is not an
/// absolute URL is treated as a filesystem path.
pub fn resolve_location(arg: &str) -> Result<Url, LoadError> {
    match Url::parse(arg) {
        // Single-letter schemes are Windows drive letters.
        Ok(url) if url.scheme().len() > 1 => Ok(url),
        _ => {
            let path = std::path::absolute(arg)?;
            Url::from_file_path(&path).map_err(|_| LoadError::invalid(arg, "not an absolute path"))
        }
    }
}

fn fetch_file(url: &Url) -> Result<String, LoadError> {
    let path = url
        .to_file_path()
        .map_err(|_| LoadError::invalid(url, "not a local file path"))?;
    Ok(std::fs::read_to_string(path)?)
}

/// Decodes `data:[<mediatype>][;base64],<payload>` into page text.
fn fetch_data(url: &Url) -> Result<String, LoadError> {
    let (media_type, payload) = url
        .path()
        .split_once(',')
        .ok_or_else(|| LoadError::invalid(url, "missing ',' before the payload"))?;

    let bytes = if media_type.ends_with(";base64") {
        STANDARD
            .decode(payload.trim())
            .map_err(|e| LoadError::invalid(url, e))?
    } else {
        urlencoding::decode_binary(payload.as_bytes()).into_owned()
    };

    String::from_utf8(bytes).map_err(|e| LoadError::invalid(url, e))
}
