//! URL Validity Hook
//!
//! The frontier does not normalize or parse URLs. A validator can be injected
//! to reject URLs before they touch the visited set; rejections are counted
//! as `invalid_skipped`.

/// Decides whether a (pre-normalized) URL may enter the frontier
pub trait UrlValidator: Send + Sync {
    fn is_valid(&self, url: &str) -> bool;
}

impl<F> UrlValidator for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_valid(&self, url: &str) -> bool {
        self(url)
    }
}

/// Accepts URLs whose scheme is in an allow-list
#[derive(Debug, Clone)]
pub struct SchemeValidator {
    schemes: Vec<String>,
}

impl SchemeValidator {
    pub fn new<I, S>(schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            schemes: schemes
                .into_iter()
                .map(|s| s.into().to_ascii_lowercase())
                .collect(),
        }
    }
}

impl Default for SchemeValidator {
    fn default() -> Self {
        Self::new(["http", "https"])
    }
}

impl UrlValidator for SchemeValidator {
    fn is_valid(&self, url: &str) -> bool {
        match url.split_once("://") {
            Some((scheme, rest)) if !rest.is_empty() => self
                .schemes
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(scheme)),
            _ => false,
        }
    }
}
