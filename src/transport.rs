use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use std::error::Error as StdError;
use std::io;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::{ProbeFailure, ScanError};
use crate::identity::BrowserIdentity;

pub const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub final_url: String,
    pub status: u16,
    pub body: String,
}

pub type FetchOutcome = std::result::Result<FetchedPage, ProbeFailure>;

pub trait Transport {
    fn fetch(&self, url: &Url, identity: &BrowserIdentity, timeout: Duration) -> FetchOutcome;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn fetch(&self, url: &Url, identity: &BrowserIdentity, timeout: Duration) -> FetchOutcome {
        (**self).fetch(url, identity, timeout)
    }
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, ScanError> {
        let client = Client::builder()
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, url: &Url, identity: &BrowserIdentity, timeout: Duration) -> FetchOutcome {
        let response = self
            .client
            .get(url.as_str())
            .header(USER_AGENT, identity.user_agent)
            .header(ACCEPT, identity.accept)
            .header(ACCEPT_LANGUAGE, identity.accept_language)
            .timeout(timeout)
            .send()
            .map_err(|e| classify_request_error(&e))?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            return Err(ProbeFailure::Forbidden);
        }
        if !(status.is_success() || status.is_redirection()) {
            return Err(ProbeFailure::HttpStatus(status.as_u16()));
        }

        let final_url = response.url().to_string();
        let body = response.text().map_err(|e| classify_request_error(&e))?;
        debug!(
            action = "fetched",
            component = "transport",
            url = %final_url,
            status = status.as_u16(),
            body_bytes = body.len(),
            "Homepage fetched"
        );

        Ok(FetchedPage {
            final_url,
            status: status.as_u16(),
            body,
        })
    }
}

// A failed handshake also reports is_connect, so TLS is checked first.
pub fn classify_request_error(err: &reqwest::Error) -> ProbeFailure {
    if err.is_timeout() {
        ProbeFailure::Timeout
    } else if is_tls_error(err) {
        ProbeFailure::Tls
    } else if err.is_connect() {
        ProbeFailure::Connection
    } else {
        ProbeFailure::request(err.to_string())
    }
}

fn is_tls_error(err: &reqwest::Error) -> bool {
    const TLS_MARKERS: [&str; 4] = ["certificate", "tls", "ssl", "handshake"];

    // The top-level message embeds the URL, so only the sources are inspected.
    let mut current: Option<&(dyn StdError + 'static)> = err.source();
    while let Some(e) = current {
        if is_rustls_error(e) {
            return true;
        }
        let message = e.to_string().to_lowercase();
        if TLS_MARKERS.iter().any(|marker| message.contains(marker)) {
            return true;
        }
        current = e.source();
    }
    false
}

// io::Error::source skips the wrapped error itself, hence get_ref.
fn is_rustls_error(e: &(dyn StdError + 'static)) -> bool {
    if e.downcast_ref::<rustls::Error>().is_some() {
        return true;
    }
    e.downcast_ref::<io::Error>()
        .and_then(io::Error::get_ref)
        .is_some_and(|inner| inner.downcast_ref::<rustls::Error>().is_some())
}
