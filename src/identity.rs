//! Browser identities presented to probed sites.
//!
//! Some homepages serve bot-detection pages (or a 403) to obvious HTTP
//! clients, so every probe goes out with a realistic header set. Which one is
//! decided by an [`IdentitySelector`] handed to the prober.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserIdentity {
    pub name: &'static str,
    pub user_agent: &'static str,
    pub accept: &'static str,
    pub accept_language: &'static str,
}

const CHROME_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7";
const SAFARI_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

pub const BROWSER_IDENTITIES: &[BrowserIdentity] = &[
    BrowserIdentity {
        name: "chrome131",
        user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
        accept: CHROME_ACCEPT,
        accept_language: "en-US,en;q=0.9",
    },
    BrowserIdentity {
        name: "chrome124",
        user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
        accept: CHROME_ACCEPT,
        accept_language: "en-US,en;q=0.9",
    },
    BrowserIdentity {
        name: "chrome123",
        user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
        accept: CHROME_ACCEPT,
        accept_language: "en-US,en;q=0.9",
    },
    BrowserIdentity {
        name: "safari18.4",
        user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.4 Safari/605.1.15",
        accept: SAFARI_ACCEPT,
        accept_language: "en-US,en;q=0.9",
    },
    BrowserIdentity {
        name: "safari18.0",
        user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.0 Safari/605.1.15",
        accept: SAFARI_ACCEPT,
        accept_language: "en-US,en;q=0.9",
    },
];

/// Strategy for choosing the identity of the next probe.
pub trait IdentitySelector {
    fn select(&mut self) -> &BrowserIdentity;
}

/// Uniformly random choice from [`BROWSER_IDENTITIES`].
pub struct RandomIdentity {
    rng: StdRng,
}

impl RandomIdentity {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible sequence of identities for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentitySelector for RandomIdentity {
    fn select(&mut self) -> &BrowserIdentity {
        let index = self.rng.random_range(0..BROWSER_IDENTITIES.len());
        &BROWSER_IDENTITIES[index]
    }
}

/// Cycles through [`BROWSER_IDENTITIES`] in order.
#[derive(Debug, Default)]
pub struct RotatingIdentity {
    next: usize,
}

impl IdentitySelector for RotatingIdentity {
    fn select(&mut self) -> &BrowserIdentity {
        let identity = &BROWSER_IDENTITIES[self.next % BROWSER_IDENTITIES.len()];
        self.next = self.next.wrapping_add(1);
        identity
    }
}

/// Always the same identity.
#[derive(Debug, Clone, Copy)]
pub struct FixedIdentity(pub BrowserIdentity);

impl Default for FixedIdentity {
    fn default() -> Self {
        Self(BROWSER_IDENTITIES[0])
    }
}

impl IdentitySelector for FixedIdentity {
    fn select(&mut self) -> &BrowserIdentity {
        &self.0
    }
}
