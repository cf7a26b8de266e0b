//! URL canonicalization (§4.1).

use url::Url;

/// Query parameters recognized as tracking noise and stripped (§4.1).
/// `utm_*` is a prefix match; the rest are exact.
const TRACKING_EXACT: &[&str] = &["fbclid", "gclid", "ref", "source"];

/// Lowercase the host, strip a default port, drop tracking query
/// parameters, sort the remaining ones, and drop the fragment.
///
/// Idempotent: canonicalizing an already-canonical URL is a no-op.
/// Relative URLs are resolved against `base` first.
pub fn canonicalize(raw_url: &str, base: Option<&Url>) -> Option<String> {
    let parsed = match Url::parse(raw_url) {
        Ok(u) => u,
        Err(_) => {
            let base = base?;
            base.join(raw_url).ok()?
        }
    };
    let mut canonical = parsed.clone();

    canonical.set_fragment(None);

    if let Some(host) = parsed.host_str() {
        let _ = canonical.set_host(Some(&host.to_lowercase()));
    }

    if is_default_port(&canonical) {
        let _ = canonical.set_port(None);
    }

    let mut kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| !is_tracking_param(key))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    kept.sort();

    if kept.is_empty() {
        canonical.set_query(None);
    } else {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (k, v) in &kept {
            serializer.append_pair(k, v);
        }
        canonical.set_query(Some(&serializer.finish()));
    }

    Some(canonical.to_string())
}

fn is_tracking_param(key: &str) -> bool {
    key.starts_with("utm_") || TRACKING_EXACT.contains(&key)
}

fn is_default_port(url: &Url) -> bool {
    match (url.scheme(), url.port()) {
        ("http", Some(80)) => true,
        ("https", Some(443)) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tracking_params_and_fragment() {
        let a = canonicalize("https://www.eBay.com/itm/123?utm_source=x&ref=y#desc", None).unwrap();
        let b = canonicalize("https://www.ebay.com/itm/123", None).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn sorts_remaining_query_params_deterministically() {
        let a = canonicalize("https://x.test/p?b=2&a=1", None).unwrap();
        let b = canonicalize("https://x.test/p?a=1&b=2", None).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn strips_default_port() {
        let a = canonicalize("https://x.test:443/p", None).unwrap();
        let b = canonicalize("https://x.test/p", None).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn resolves_relative_urls_against_base() {
        let base = Url::parse("https://x.test/listings/").unwrap();
        let resolved = canonicalize("../itm/55", Some(&base)).unwrap();
        assert_eq!(resolved, "https://x.test/itm/55");
    }

    #[test]
    fn is_idempotent() {
        let once = canonicalize("https://www.ebay.com/itm/123?utm_source=x&z=9#desc", None).unwrap();
        let twice = canonicalize(&once, None).unwrap();
        assert_eq!(once, twice);
    }
}
