//! URL construction helpers for the update endpoints.

use url::Url;

/// Append an endpoint path to the base URL, keeping any path prefix the
/// base already carries.
pub fn build_endpoint_url(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    let base_path = url.path().trim_end_matches('/');
    let endpoint = path.trim_start_matches('/');
    url.set_path(&format!("{base_path}/{endpoint}"));
    url.set_query(None);
    url
}
