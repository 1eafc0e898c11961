//! Per-recipient phishing template context

use lettre::message::Mailbox;
use serde::{Deserialize, Serialize};
use url::Url;

#[cfg(test)]
use mockall::mock;

use super::engine;
use super::errors::TemplateContextError;

/// Query parameter carrying the recipient identifier in phishing and
/// tracking URLs.
pub const RECIPIENT_PARAMETER: &str = "rid";

/// Path segment appended to the phishing URL to form the tracking URL.
const TRACKING_PATH: &str = "track";

/// Supplier of the From address and base-URL template for a render.
///
/// Implemented by whichever higher-level entity initiates a render (a
/// campaign, an ad-hoc send request); the core never inspects concrete
/// types.
pub trait TemplateContext {
    /// The From address the message is sent with
    fn from_address(&self) -> String;

    /// The base URL template body, rendered against the recipient
    fn base_url(&self) -> String;
}

#[cfg(test)]
mock! {
    pub TemplateContext {}

    impl TemplateContext for TemplateContext {
        fn from_address(&self) -> String;
        fn base_url(&self) -> String;
    }
}

/// Minimal identity of a message recipient.
///
/// The serialized field names are the ones templates reference
/// (`{{.Email}}`, `{{.FirstName}}`, `{{.LastName}}`, `{{.Position}}`).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Recipient {
    /// Email address
    pub email: String,

    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Job position
    pub position: String,
}

/// The context a template is rendered against: the resolved From display
/// name, phishing/tracking URLs, tracker markup, and the recipient fields
/// flattened to the top level.
///
/// Created fresh per render, owned by the call that created it and
/// discarded after rendering; never persisted.
#[derive(Clone, Debug, Serialize)]
pub struct PhishingTemplateContext {
    /// Display name of the From address, or the bare address when the
    /// mailbox carries no display name
    #[serde(rename = "From")]
    pub from: String,

    /// Phishing URL carrying the recipient identifier
    #[serde(rename = "URL")]
    pub url: String,

    /// Hidden image tag pointing at the tracking URL
    #[serde(rename = "Tracker")]
    pub tracker: String,

    /// Open-tracking URL
    #[serde(rename = "TrackingURL")]
    pub tracking_url: String,

    /// Recipient identifier, kept as a variable for templates written
    /// against the legacy `{{.RId}}` name
    #[serde(rename = "RId")]
    pub rid: String,

    /// Scheme and host of the rendered base URL, path and query stripped
    #[serde(rename = "BaseURL")]
    pub base_url: String,

    /// Recipient fields, flattened so templates reference them at top level
    #[serde(flatten)]
    pub recipient: Recipient,
}

impl PhishingTemplateContext {
    /// Builds the context for one recipient.
    ///
    /// The provider's base URL is itself a template body rendered against
    /// the recipient, so hosts and paths may depend on recipient fields.
    pub fn new(
        provider: &dyn TemplateContext,
        recipient: &Recipient,
        rid: &str,
    ) -> Result<Self, TemplateContextError> {
        let from_address = provider.from_address();
        let mailbox: Mailbox =
            from_address
                .parse()
                .map_err(|source| TemplateContextError::InvalidFromAddress {
                    address: from_address.clone(),
                    source,
                })?;
        let from = match mailbox.name {
            Some(name) if !name.is_empty() => name,
            _ => mailbox.email.to_string(),
        };

        let rendered = engine::render(&provider.base_url(), recipient)
            .map_err(TemplateContextError::BaseUrlTemplate)?;
        let rendered_url =
            Url::parse(&rendered).map_err(|source| TemplateContextError::InvalidBaseUrl {
                url: rendered.clone(),
                source,
            })?;

        let phishing_url = with_recipient_parameter(&rendered_url, rid);
        let tracking_url = with_tracking_path(&phishing_url);

        tracing::debug!(rid, url = %phishing_url, "built phishing template context");

        Ok(Self {
            from,
            base_url: strip_to_origin(&rendered_url),
            url: phishing_url.into(),
            tracker: tracker_markup(tracking_url.as_str()),
            tracking_url: tracking_url.into(),
            rid: rid.to_string(),
            recipient: recipient.clone(),
        })
    }
}

/// Scheme and host of `url`, with path, query and fragment stripped.
fn strip_to_origin(url: &Url) -> String {
    let mut base = url.clone();
    base.set_path("");
    base.set_query(None);
    base.set_fragment(None);
    base.as_str().trim_end_matches('/').to_string()
}

/// Returns `url` with the recipient identifier query parameter set,
/// overriding any existing value for that key.
fn with_recipient_parameter(url: &Url, rid: &str) -> Url {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key.as_ref() != RECIPIENT_PARAMETER)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut tagged = url.clone();
    {
        let mut pairs = tagged.query_pairs_mut();
        pairs.clear();
        for (key, value) in &kept {
            pairs.append_pair(key, value);
        }
        pairs.append_pair(RECIPIENT_PARAMETER, rid);
    }
    tagged
}

/// Returns `url` with the tracking path segment joined onto its path,
/// keeping the query parameters.
fn with_tracking_path(url: &Url) -> Url {
    let mut tracking = url.clone();
    let joined = format!("{}/{}", url.path().trim_end_matches('/'), TRACKING_PATH);
    tracking.set_path(&joined);
    tracking
}

/// Hidden image tag used to detect message opens.
fn tracker_markup(tracking_url: &str) -> String {
    format!(
        "<img alt='' style='display: none' src='{}'/>",
        escape_attribute(tracking_url)
    )
}

/// HTML-attribute escaping for the tracking URL before it is embedded in
/// markup; the rendered URL can carry recipient-influenced characters.
fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
