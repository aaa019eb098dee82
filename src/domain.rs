use std::collections::BTreeSet;

/// Returns the lowercased part of `email` after its last `@`.
///
/// No syntax validation happens here; a nonsense domain simply fails to
/// connect later. Addresses without `@` or with nothing after it yield `None`.
pub fn extract_domain(email: &str) -> Option<String> {
    let (_, domain) = email.trim().rsplit_once('@')?;
    if domain.is_empty() {
        return None;
    }
    Some(domain.to_lowercase())
}

/// Unique domains of `emails`, sorted ascending so progress output is stable.
pub fn unique_domains<'a, I>(emails: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    emails
        .into_iter()
        .filter_map(extract_domain)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
