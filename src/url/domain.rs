use url::Url;

/// Returns true if two URLs share the same host (and port)
///
/// Hosts are compared case-insensitively by virtue of the `url` crate
/// lowercasing them during parsing. The port takes part in the comparison
/// because it is part of the authority: `x.test:8080` is a different site from
/// `x.test`. Default ports are elided by the parser, so `http://x.test:80/` and
/// `http://x.test/` match. URLs without a host (e.g. `mailto:`) never match.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use webmap::url::same_host;
///
/// let base = Url::parse("http://x.test/").unwrap();
/// assert!(same_host(&base, &Url::parse("http://X.TEST/about").unwrap()));
/// assert!(!same_host(&base, &Url::parse("http://other.test/").unwrap()));
/// ```
pub fn same_host(base: &Url, resolved: &Url) -> bool {
    match (base.host_str(), resolved.host_str()) {
        (Some(a), Some(b)) => a == b && base.port() == resolved.port(),
        _ => false,
    }
}
