//! Stock URL resolver backed by a site base URL.

use url::Url;

use gateway_types::{UrlError, UrlResolver};

/// Resolves action routes against a single site base URL.
///
/// Suits hosts whose payment actions all live under one origin. Hosts
/// with per-site or signed action URLs implement
/// [`UrlResolver`] themselves.
pub struct SiteUrls {
    base: Url,
}

impl SiteUrls {
    pub fn new(base: impl AsRef<str>) -> Result<Self, UrlError> {
        let base = Url::parse(base.as_ref()).map_err(|e| UrlError::Invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(UrlError::Invalid(format!(
                "{base} cannot be used as a base URL"
            )));
        }
        Ok(Self { base })
    }
}

impl UrlResolver for SiteUrls {
    fn action_url(&self, route: &str, params: &[(&str, &str)]) -> Result<String, UrlError> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| UrlError::Invalid(format!("{} has no path", self.base)))?;
            segments.pop_if_empty();
            for segment in route.split('/').filter(|s| !s.is_empty()) {
                segments.push(segment);
            }
        }
        for (key, value) in params {
            url.query_pairs_mut().append_pair(key, value);
        }
        Ok(url.into())
    }
}
