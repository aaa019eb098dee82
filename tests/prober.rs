mod common;

use common::{prober, ScriptedTransport};
use hubscan::identity::RotatingIdentity;
use hubscan::probe::{TimeoutPolicy, UrlVariants};
use hubscan::{Classification, Classifier, ProbeFailure, Prober};

#[test]
fn forbidden_bare_host_falls_back_to_www() {
    let transport = ScriptedTransport::new()
        .failure("https://example.com", ProbeFailure::Forbidden)
        .page("https://www.example.com", "<script>var HubSpot = 1;</script>");

    let result = prober(&transport).probe("example.com");

    assert_eq!(result.classification, Classification::Yes);
    assert_eq!(result.resolved_url, "https://www.example.com/");
    assert_eq!(
        transport.requested(),
        ["https://example.com", "https://www.example.com"]
    );
}

#[test]
fn all_variants_refused_reports_connection_error() {
    let transport = ScriptedTransport::new();

    let result = prober(&transport).probe("down.example");

    assert_eq!(result.resolved_url, "");
    assert_eq!(
        result.classification,
        Classification::Error(ProbeFailure::Connection)
    );
    assert_eq!(result.classification.to_string(), "Error: Connection Error");
    assert_eq!(transport.requested().len(), 4);
}

#[test]
fn first_success_stops_the_fallback() {
    let transport = ScriptedTransport::new()
        .page("https://plain.io", "<html><body>hello</body></html>")
        .page("https://www.plain.io", "hubspot");

    let result = prober(&transport).probe("plain.io");

    assert_eq!(result.classification, Classification::No);
    assert_eq!(transport.requested(), ["https://plain.io"]);
}

#[test]
fn last_failure_wins() {
    let transport = ScriptedTransport::new()
        .failure("https://mixed.org", ProbeFailure::Tls)
        .failure("https://www.mixed.org", ProbeFailure::Forbidden)
        .failure("http://mixed.org", ProbeFailure::HttpStatus(500))
        .failure("http://www.mixed.org", ProbeFailure::HttpStatus(502));

    let result = prober(&transport).probe("mixed.org");

    assert_eq!(result.classification.to_string(), "Error: HTTP Error 502");
}

#[test]
fn tls_failure_falls_back_to_plain_http() {
    let transport = ScriptedTransport::new()
        .failure("https://old.net", ProbeFailure::Tls)
        .failure("https://www.old.net", ProbeFailure::Tls)
        .page("http://old.net", "<script src=\"//js.hsforms.net/forms/v2.js\">");

    let result = prober(&transport).probe("old.net");

    assert_eq!(result.classification, Classification::Yes);
    assert_eq!(result.resolved_url, "http://old.net/");
}

#[test]
fn timeout_aborts_remaining_variants_by_default() {
    let transport = ScriptedTransport::new()
        .failure("https://slow.com", ProbeFailure::Timeout)
        .page("https://www.slow.com", "hubspot");

    let result = prober(&transport).probe("slow.com");

    assert_eq!(
        result.classification,
        Classification::Error(ProbeFailure::Timeout)
    );
    assert_eq!(transport.requested(), ["https://slow.com"]);
}

#[test]
fn timeout_can_continue_to_next_variant() {
    let transport = ScriptedTransport::new()
        .failure("https://slow.com", ProbeFailure::Timeout)
        .page("https://www.slow.com", "HBSPT.CTA.load()");

    let result = prober(&transport)
        .with_timeout_policy(TimeoutPolicy::Continue)
        .probe("slow.com");

    assert_eq!(result.classification, Classification::Yes);
    assert_eq!(result.resolved_url, "https://www.slow.com/");
}

#[test]
fn bare_variants_try_two_urls() {
    let transport = ScriptedTransport::new();

    prober(&transport)
        .with_variants(UrlVariants::Bare)
        .probe("x.com");

    assert_eq!(transport.requested(), ["https://x.com", "http://x.com"]);
}

#[test]
fn unparseable_domain_is_an_error_without_requests() {
    let transport = ScriptedTransport::new();

    let result = prober(&transport).probe("bad domain");

    assert!(result.classification.is_error());
    assert!(result
        .classification
        .to_string()
        .starts_with("Error: Invalid URL"));
    assert!(transport.requested().is_empty());
}

#[test]
fn one_identity_per_probe() {
    let transport = ScriptedTransport::new();
    let mut prober = Prober::new(&transport, RotatingIdentity::default(), Classifier::default());

    prober.probe("a.com");
    prober.probe("b.com");

    let identities = transport.identities();
    assert_eq!(identities.len(), 8);
    assert!(identities[..4].iter().all(|name| *name == "chrome131"));
    assert!(identities[4..].iter().all(|name| *name == "chrome124"));
}
