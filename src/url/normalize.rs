use url::Url;

/// Resolves a possibly-relative reference against an absolute base URL
///
/// Resolution follows the standard reference-resolution rules (RFC 3986 via the
/// `url` crate); the fragment is then stripped, since two references that only
/// differ by fragment name the same page.
///
/// # Arguments
///
/// * `base` - The absolute URL of the page the reference was found on
/// * `reference` - The raw `href`/`src` attribute value
///
/// # Returns
///
/// * `Ok(Url)` - The canonical, fragment-free absolute URL
/// * `Err(url::ParseError)` - The reference could not be resolved
///
/// # Examples
///
/// ```
/// use url::Url;
/// use webmap::url::resolve;
///
/// let base = Url::parse("http://x.test/docs/").unwrap();
/// let url = resolve(&base, "../about#team").unwrap();
/// assert_eq!(url.as_str(), "http://x.test/about");
/// ```
pub fn resolve(base: &Url, reference: &str) -> Result<Url, url::ParseError> {
    let mut url = base.join(reference)?;
    url.set_fragment(None);
    Ok(url)
}

/// Parses an absolute URL into its canonical (fragment-free) form
///
/// Used for the seed, which has no base to resolve against.
pub fn canonicalize(raw: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(raw.trim())?;
    url.set_fragment(None);
    Ok(url)
}
