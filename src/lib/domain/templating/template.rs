//! Email template record

use lettre::message::Mailbox;
use serde::{Deserialize, Serialize};

use crate::domain::headers::HeaderProfileRegistry;

use super::errors::TemplateError;
use super::validator::validate_template;

/// An email template to be sent to targets.
///
/// The record itself is owned by the persistence layer; it is carried here
/// so create/update requests can be validated before being accepted.
/// `header_profile` is a key into the header profile registry.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Template {
    /// Template name
    pub name: String,

    /// Envelope sender address, optional
    #[serde(default)]
    pub envelope_sender: String,

    /// Subject template body
    #[serde(default)]
    pub subject: String,

    /// Plaintext template body
    #[serde(default)]
    pub text: String,

    /// HTML template body
    #[serde(default)]
    pub html: String,

    /// Header profile key; empty means the default profile
    #[serde(default)]
    pub header_profile: String,
}

impl Template {
    /// Checks that the template is complete and that its bodies render.
    ///
    /// Unknown header profiles are rejected here even though the resolver
    /// falls back to the default at send time: strict at save time,
    /// permissive at send time.
    pub fn validate(&self, registry: &HeaderProfileRegistry) -> Result<(), TemplateError> {
        if !self.header_profile.is_empty() && !registry.contains(&self.header_profile) {
            return Err(TemplateError::InvalidHeaderProfile(
                self.header_profile.clone(),
            ));
        }
        if self.name.is_empty() {
            return Err(TemplateError::NameNotSpecified);
        }
        if self.text.is_empty() && self.html.is_empty() {
            return Err(TemplateError::MissingContent);
        }
        if !self.envelope_sender.is_empty() {
            self.envelope_sender.parse::<Mailbox>().map_err(|source| {
                TemplateError::InvalidEnvelopeSender {
                    address: self.envelope_sender.clone(),
                    source,
                }
            })?;
        }
        validate_template(&self.html)?;
        validate_template(&self.text)?;
        Ok(())
    }
}
