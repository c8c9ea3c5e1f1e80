//! Site URL resolver port.

use crate::error::UrlError;

/// Resolves host-site action routes into absolute URLs.
///
/// Return, cancel, and webhook URLs point back at the host
/// application, so their construction belongs to the host.
pub trait UrlResolver: Send + Sync {
    /// Builds an absolute URL for an action route with query
    /// parameters.
    fn action_url(&self, route: &str, params: &[(&str, &str)]) -> Result<String, UrlError>;
}
