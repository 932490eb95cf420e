use std::time::Duration;

use crate::error::{FetchError, FetchResult};

/// One JSON-RPC round trip. Seam for tests; the production implementation is
/// [`HttpTransport`].
pub trait RpcTransport: Send + Sync {
    fn post(&self, url: &str, body: &str) -> FetchResult<String>;
}

/// Blocking HTTPS transport over a shared connection pool.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(request_timeout: Duration) -> FetchResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        Ok(Self { client })
    }
}

impl RpcTransport for HttpTransport {
    fn post(&self, url: &str, body: &str) -> FetchResult<String> {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .send()
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transport(format!("{url} answered {status}")));
        }
        response.text().map_err(|err| FetchError::Transport(err.to_string()))
    }
}
