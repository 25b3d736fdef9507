use super::loader::LoadError;
use reqwest::blocking::Client;
use url::Url;

pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    const USER_AGENT: &'static str = concat!("helpnav/", env!("CARGO_PKG_VERSION"));

    pub fn new() -> Result<Self, LoadError> {
        let client = Client::builder()
            .user_agent(Self::USER_AGENT)
            .timeout(std::time::Duration::from_secs(30))
            .cookie_store(true)
            .build()?;

        Ok(Self { client })
    }

    pub fn get(&self, url: &Url) -> Result<String, LoadError> {
        let response = self
            .client
            .get(url.as_str())
            .header("Accept", "text/html,application/xhtml+xml,text/plain;q=0.9,*/*;q=0.8")
            .send()?
            .error_for_status()?;

        let final_url = response.url().to_string();
        let text = response.text()?;
        log::info!("Received {} bytes from {}", text.len(), final_url);

        Ok(text)
    }
}
