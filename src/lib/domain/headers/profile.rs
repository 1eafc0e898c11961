//! Predefined mail-client header profiles

use std::collections::HashMap;

/// Key of the profile substituted when a record carries an unknown or empty
/// profile name.
pub const DEFAULT_PROFILE: &str = "default";

/// Key of the Apple Mail profile, which uses a different boundary prefix.
pub(super) const APPLE_MAIL_PROFILE: &str = "apple_mail";

/// A named set of MIME headers emulating a specific mail client's
/// fingerprint.
#[derive(Clone, Debug)]
pub struct HeaderProfile {
    /// Human-readable profile name
    pub name: String,

    /// Static headers sent with the message
    pub headers: HashMap<String, String>,
}

impl HeaderProfile {
    fn new(name: &str, headers: &[(&str, &str)]) -> Self {
        Self {
            name: name.to_string(),
            headers: headers
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }
}

/// Read-only table of the predefined header profiles.
///
/// Built once at process start and passed by reference wherever headers are
/// resolved or template records are validated; never mutated afterwards, so
/// it is safe to share across threads without coordination.
#[derive(Clone, Debug)]
pub struct HeaderProfileRegistry {
    profiles: HashMap<&'static str, HeaderProfile>,
}

impl HeaderProfileRegistry {
    /// Creates the registry of predefined profiles.
    pub fn new() -> Self {
        let profiles = HashMap::from([
            (
                DEFAULT_PROFILE,
                HeaderProfile::new("Default", &[("MIME-Version", "1.0")]),
            ),
            (
                APPLE_MAIL_PROFILE,
                HeaderProfile::new(
                    "Apple Mail (macOS)",
                    &[
                        ("MIME-Version", "1.0 (Mac OS X Mail 11.5 (3445.9.1))"),
                        ("X-Mailer", "Apple Mail (2.3445.9.1)"),
                    ],
                ),
            ),
            (
                "outlook",
                HeaderProfile::new(
                    "Microsoft Outlook (Desktop)",
                    &[
                        ("MIME-Version", "1.0"),
                        ("X-Mailer", "Microsoft Outlook 16.0"),
                        ("Content-Language", "en-us"),
                        ("x-ms-has-attach", ""),
                        ("x-ms-tnef-correlator", ""),
                    ],
                ),
            ),
            (
                "gmail_web",
                HeaderProfile::new("Gmail (Web Interface)", &[("MIME-Version", "1.0")]),
            ),
            (
                "yahoo_web",
                HeaderProfile::new("Yahoo Mail (Web Interface)", &[("MIME-Version", "1.0")]),
            ),
        ]);

        Self { profiles }
    }

    /// Looks up a profile by key.
    pub fn get(&self, key: &str) -> Option<&HeaderProfile> {
        self.profiles.get(key)
    }

    /// Returns whether a profile with the given key exists.
    pub fn contains(&self, key: &str) -> bool {
        self.profiles.contains_key(key)
    }

    /// Iterates over the known profile keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().copied()
    }
}

impl Default for HeaderProfileRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_contains_the_default_profile() {
        let registry = HeaderProfileRegistry::new();

        assert!(registry.contains(DEFAULT_PROFILE));
    }

    #[test]
    fn test_registry_contains_all_predefined_profiles() {
        let registry = HeaderProfileRegistry::new();

        for key in ["default", "apple_mail", "outlook", "gmail_web", "yahoo_web"] {
            assert!(registry.contains(key), "missing profile {key}");
        }
    }

    #[test]
    fn test_stored_profiles_have_no_content_type() {
        // Content-Type is injected at resolve time with a fresh boundary
        let registry = HeaderProfileRegistry::new();

        for key in registry.keys().collect::<Vec<_>>() {
            let profile = registry.get(key);
            assert!(profile.is_some());
            if let Some(profile) = profile {
                assert!(!profile.headers.contains_key("Content-Type"));
            }
        }
    }
}
