use clap::ValueEnum;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::error::ProbeFailure;
use crate::identity::IdentitySelector;
use crate::signatures::Classifier;
use crate::transport::Transport;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum UrlVariants {
    /// https://d, https://www.d, http://d, http://www.d
    #[default]
    Full,
    /// https://d, http://d
    Bare,
}

impl UrlVariants {
    pub fn urls_for(self, domain: &str) -> Vec<String> {
        match self {
            UrlVariants::Full => vec![
                format!("https://{domain}"),
                format!("https://www.{domain}"),
                format!("http://{domain}"),
                format!("http://www.{domain}"),
            ],
            UrlVariants::Bare => vec![format!("https://{domain}"), format!("http://{domain}")],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TimeoutPolicy {
    /// Give up on the domain.
    #[default]
    Abort,
    /// Keep trying the next variant.
    Continue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Yes,
    No,
    Error(ProbeFailure),
}

impl Classification {
    pub fn is_match(&self) -> bool {
        matches!(self, Classification::Yes)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Classification::Error(_))
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Yes => f.write_str("Yes"),
            Classification::No => f.write_str("No"),
            Classification::Error(failure) => write!(f, "Error: {failure}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub domain: String,
    pub resolved_url: String,
    pub classification: Classification,
}

pub trait DomainProbe {
    fn probe(&mut self, domain: &str) -> ProbeResult;
}

pub struct Prober<T, S> {
    transport: T,
    selector: S,
    classifier: Classifier,
    variants: UrlVariants,
    timeout: Duration,
    timeout_policy: TimeoutPolicy,
}

impl<T: Transport, S: IdentitySelector> Prober<T, S> {
    pub fn new(transport: T, selector: S, classifier: Classifier) -> Self {
        Self {
            transport,
            selector,
            classifier,
            variants: UrlVariants::default(),
            timeout: DEFAULT_TIMEOUT,
            timeout_policy: TimeoutPolicy::default(),
        }
    }

    pub fn with_variants(mut self, variants: UrlVariants) -> Self {
        self.variants = variants;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_timeout_policy(mut self, policy: TimeoutPolicy) -> Self {
        self.timeout_policy = policy;
        self
    }

    pub fn probe(&mut self, domain: &str) -> ProbeResult {
        let identity = *self.selector.select();
        let mut last_failure = None;

        for candidate in self.variants.urls_for(domain) {
            let url = match Url::parse(&candidate) {
                Ok(url) => url,
                Err(e) => {
                    debug!(action = "skip", component = "prober", url = %candidate, error = %e, "Unparseable URL variant");
                    last_failure = Some(ProbeFailure::request(format!("Invalid URL: {e}")));
                    continue;
                }
            };

            info!(action = "fetch", component = "prober", url = %url, identity = identity.name, "Checking URL variant");

            match self.transport.fetch(&url, &identity, self.timeout) {
                Ok(page) => {
                    let body = page.body.to_lowercase();
                    let classification = match self.classifier.first_match(&body) {
                        Some(signature) => {
                            debug!(action = "match", component = "prober", url = %page.final_url, signature, "Signature found");
                            Classification::Yes
                        }
                        None => Classification::No,
                    };
                    return ProbeResult {
                        domain: domain.to_string(),
                        resolved_url: page.final_url,
                        classification,
                    };
                }
                Err(failure) => {
                    debug!(action = "fail", component = "prober", url = %url, reason = %failure, "URL variant failed");
                    let stop = failure == ProbeFailure::Timeout
                        && self.timeout_policy == TimeoutPolicy::Abort;
                    last_failure = Some(failure);
                    if stop {
                        break;
                    }
                }
            }
        }

        ProbeResult {
            domain: domain.to_string(),
            resolved_url: String::new(),
            classification: Classification::Error(last_failure.unwrap_or(ProbeFailure::Unknown)),
        }
    }
}

impl<T: Transport, S: IdentitySelector> DomainProbe for Prober<T, S> {
    fn probe(&mut self, domain: &str) -> ProbeResult {
        Prober::probe(self, domain)
    }
}
