//! Query-string construction for upstream endpoints
//!
//! Pure helper shared by every tool in the catalogue: takes a base URL and
//! an ordered parameter list, drops absent/empty values, percent-encodes the
//! rest. Parameter order follows the input slice so that identical calls
//! produce identical URLs (the URL is the cache key).

use url::form_urlencoded;

/// Build a request URL from a base and an ordered list of optional
/// parameters.
///
/// Parameters with a `None` or empty-string value are dropped entirely (no
/// dangling `key=`). The `?` separator is appended only when at least one
/// parameter survives filtering. Total for any input; never fails.
#[must_use]
pub fn build_url(base: &str, params: &[(&str, Option<&str>)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (name, value) in params {
        match value {
            Some(v) if !v.is_empty() => {
                serializer.append_pair(name, v);
                any = true;
            }
            _ => {}
        }
    }
    if any {
        format!("{base}?{}", serializer.finish())
    } else {
        base.to_string()
    }
}
