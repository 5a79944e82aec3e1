use url::Url;

/// Derives the detail page URL for a seed title URL
///
/// Trailing slashes are stripped from the seed path and `suffix` is
/// appended. Scheme, host, port, query and fragment are kept exactly as
/// given.
///
/// # Arguments
///
/// * `seed` - Absolute URL of a ranked title
/// * `suffix` - Detail path segment, e.g. `/fullcredits/`
///
/// # Examples
///
/// ```
/// use cast_harvest::url::derive_detail_url;
/// use url::Url;
///
/// let seed = Url::parse("https://example.test/item/42").unwrap();
/// let detail = derive_detail_url(&seed, "/fullcredits/");
/// assert_eq!(detail.as_str(), "https://example.test/item/42/fullcredits/");
/// ```
pub fn derive_detail_url(seed: &Url, suffix: &str) -> Url {
    let mut detail = seed.clone();
    let path = format!("{}{}", seed.path().trim_end_matches('/'), suffix);
    detail.set_path(&path);
    detail
}
