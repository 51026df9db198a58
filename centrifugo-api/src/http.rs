use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, RETRY_AFTER};
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::{Config, RetryPolicy};
use crate::decoder::ErrorDecoder;
use crate::error::{Error, Result};

const API_KEY_HEADER: &str = "x-api-key";

/// Shared transport for the Centrifugo API. Owns the connection pool, base
/// URL, auth header, retry policy and error decoder. Clone is a cheap Arc
/// refcount bump.
#[derive(Clone)]
pub(crate) struct HttpClient {
    inner: Arc<Inner>,
}

struct Inner {
    client: Client,
    base_url: String,
    retry: RetryPolicy,
    decoder: Arc<dyn ErrorDecoder>,
}

impl HttpClient {
    pub fn new(config: Config) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let headers = build_headers(&config)?;

        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("http client: {e}")))?;

        debug!(
            base_url = %base_url,
            api_key = !config.api_key.trim().is_empty(),
            max_attempts = config.retry.max_attempts,
            "centrifugo client initialized"
        );

        Ok(Self {
            inner: Arc::new(Inner {
                client,
                base_url,
                retry: config.retry,
                decoder: config.error_decoder,
            }),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// POST `body` to `{base_url}/{method}` and decode the JSON reply.
    ///
    /// Non-2xx responses are handed to the configured [`ErrorDecoder`]. A
    /// generic status error whose response carried `Retry-After` is retried
    /// while attempts remain.
    pub async fn post<Req, Resp>(&self, method: &str, body: &Req) -> Result<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let retry = &self.inner.retry;
        let max_attempts = retry.max_attempts.max(1);

        let mut attempt = 1;
        loop {
            let resp = self.send(method, body, &mut attempt).await?;
            let status = resp.status();
            if status.is_success() {
                return Ok(resp.json::<Resp>().await?);
            }

            let wait = retry_after(resp.headers());
            let err = self.decode_error(method, status, resp).await;
            match wait {
                Some(delay) if attempt < max_attempts && matches!(err, Error::Status { .. }) => {
                    let delay = delay.min(retry.max_interval);
                    warn!(
                        method,
                        status = status.as_u16(),
                        "server asked to retry (attempt {attempt}/{max_attempts}), retrying in {delay:?}"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                _ => return Err(err),
            }
        }
    }

    /// Send the request, retrying transient transport failures. `attempt` is
    /// shared with [`post`](Self::post) so both retry paths draw on one budget.
    async fn send<Req>(&self, method: &str, body: &Req, attempt: &mut u32) -> Result<Response>
    where
        Req: Serialize + ?Sized,
    {
        let url = format!("{}/{method}", self.inner.base_url);
        let retry = &self.inner.retry;
        let max_attempts = retry.max_attempts.max(1);

        loop {
            let current = *attempt;
            debug!(method, attempt = current, "POST {url}");
            match self.inner.client.post(&url).json(body).send().await {
                Ok(resp) => return Ok(resp),
                Err(e) if current < max_attempts && is_transient(&e) => {
                    let delay = retry.backoff(current);
                    warn!(
                        method,
                        "request failed (attempt {current}/{max_attempts}), retrying in {delay:?}: {e}"
                    );
                    tokio::time::sleep(delay).await;
                    *attempt += 1;
                }
                Err(e) => return Err(Error::Http(e)),
            }
        }
    }

    async fn decode_error(&self, method: &str, status: StatusCode, resp: Response) -> Error {
        match resp.bytes().await {
            Ok(bytes) => self
                .inner
                .decoder
                .decode(method, status, Box::new(Cursor::new(bytes))),
            Err(e) => {
                debug!(method, status = status.as_u16(), "failed to read error body: {e}");
                Error::Status {
                    method: method.to_string(),
                    status,
                    body: String::new(),
                }
            }
        }
    }
}

/// `Retry-After` in delta-seconds form. HTTP-date values are ignored.
fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get(RETRY_AFTER)?.to_str().ok()?;
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

fn is_transient(e: &reqwest::Error) -> bool {
    e.is_connect() || e.is_timeout()
}

fn parse_base_url(raw: &str) -> Result<String> {
    let url = url::Url::parse(raw).map_err(|e| Error::Config(format!("base url {raw:?}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "base url {raw:?}: unsupported scheme {}",
            url.scheme()
        )));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

fn build_headers(config: &Config) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, value) in &config.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::Config(format!("header name {name:?}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::Config(format!("header {name} value: {e}")))?;
        headers.insert(name, value);
    }

    let api_key = config.api_key.trim();
    if !api_key.is_empty() {
        let mut value = HeaderValue::from_str(api_key)
            .map_err(|e| Error::Config(format!("api key: {e}")))?;
        value.set_sensitive(true);
        headers.insert(API_KEY_HEADER, value);
    }
    Ok(headers)
}
