//! Header profile resolution

use std::collections::HashMap;

use super::boundary::boundary_token;
use super::profile::{HeaderProfileRegistry, APPLE_MAIL_PROFILE, DEFAULT_PROFILE};

/// Header set ready to be attached to an outgoing message.
#[derive(Clone, Debug)]
pub struct ResolvedHeaders {
    /// MIME headers, always including a `Content-Type` carrying the boundary
    pub headers: HashMap<String, String>,

    /// Multipart boundary referenced by the `Content-Type` header
    pub boundary: String,
}

/// Resolves `profile_name` into the header set a message is sent with.
///
/// Unknown or empty names fall back to the default profile instead of
/// failing, so sending stays robust against stale profile fields on
/// previously stored records. The returned headers are a copy; the registry
/// is never mutated.
pub fn resolve(registry: &HeaderProfileRegistry, profile_name: &str) -> ResolvedHeaders {
    let key = if registry.contains(profile_name) && !profile_name.is_empty() {
        profile_name
    } else {
        if !profile_name.is_empty() {
            tracing::debug!(
                profile = profile_name,
                "unknown header profile, falling back to default"
            );
        }
        DEFAULT_PROFILE
    };

    let mut headers = registry
        .get(key)
        .map(|profile| profile.headers.clone())
        .unwrap_or_default();

    let prefix = if key == APPLE_MAIL_PROFILE {
        "Apple-Mail=_"
    } else {
        "----=_NextPart_"
    };
    let boundary = format!("{prefix}{}", boundary_token());
    headers.insert(
        "Content-Type".to_string(),
        format!("multipart/alternative; boundary=\"{boundary}\""),
    );

    ResolvedHeaders { headers, boundary }
}
