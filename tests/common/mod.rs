//! Shared helpers for the integration tests: a scripted transport that never
//! touches the network.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

use hubscan::identity::{BrowserIdentity, FixedIdentity};
use hubscan::transport::{FetchOutcome, FetchedPage, Transport};
use hubscan::{Classifier, ProbeFailure, Prober};

/// Answers from a URL -> outcome table; unknown URLs fail to connect.
#[derive(Default)]
pub struct ScriptedTransport {
    outcomes: HashMap<String, FetchOutcome>,
    calls: RefCell<Vec<(String, &'static str)>>,
}

#[allow(dead_code)]
impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, body: &str) -> Self {
        self.outcomes.insert(
            url.to_string(),
            Ok(FetchedPage {
                final_url: format!("{url}/"),
                status: 200,
                body: body.to_string(),
            }),
        );
        self
    }

    pub fn failure(mut self, url: &str, failure: ProbeFailure) -> Self {
        self.outcomes.insert(url.to_string(), Err(failure));
        self
    }

    /// URLs requested so far, in order.
    pub fn requested(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(url, _)| url.clone()).collect()
    }

    pub fn identities(&self) -> Vec<&'static str> {
        self.calls.borrow().iter().map(|(_, name)| *name).collect()
    }

    /// Number of distinct domains that saw at least one request.
    pub fn domains_probed(&self) -> usize {
        let mut hosts: Vec<String> = self
            .requested()
            .iter()
            .filter_map(|u| Url::parse(u).ok()?.host_str().map(str::to_string))
            .map(|h| h.trim_start_matches("www.").to_string())
            .collect();
        hosts.sort();
        hosts.dedup();
        hosts.len()
    }
}

impl Transport for ScriptedTransport {
    fn fetch(&self, url: &Url, identity: &BrowserIdentity, _timeout: Duration) -> FetchOutcome {
        // Url normalises "https://x.com" to "https://x.com/".
        let key = url.as_str().trim_end_matches('/').to_string();
        self.calls.borrow_mut().push((key.clone(), identity.name));
        self.outcomes
            .get(&key)
            .cloned()
            .unwrap_or(Err(ProbeFailure::Connection))
    }
}

#[allow(dead_code)]
pub fn prober(transport: &ScriptedTransport) -> Prober<&ScriptedTransport, FixedIdentity> {
    Prober::new(transport, FixedIdentity::default(), Classifier::default())
}
