//! Error types for template rendering and validation

use lettre::address::AddressError;
use thiserror::Error;

/// Errors that can occur when rendering a template body
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template body failed to parse
    #[error("error parsing template: {0}")]
    Parse(String),

    /// The template referenced a field the data does not carry
    #[error("error executing template: {0}")]
    Execution(String),

    /// The template data could not be serialized
    #[error("error serializing template data")]
    Data(#[from] serde_json::Error),
}

/// Errors that can occur when building a phishing template context
#[derive(Debug, Error)]
pub enum TemplateContextError {
    /// The from address did not parse as an RFC 5322 mailbox
    #[error("invalid from address {address:?}")]
    InvalidFromAddress {
        /// The address that failed to parse
        address: String,

        /// Failure reported by the address parser
        #[source]
        source: AddressError,
    },

    /// The base URL template failed to render against the recipient
    #[error("failed to render base URL template")]
    BaseUrlTemplate(#[source] RenderError),

    /// The rendered base URL is not a valid URL
    #[error("invalid base URL {url:?}")]
    InvalidBaseUrl {
        /// The rendered URL that failed to parse
        url: String,

        /// Failure reported by the URL parser
        #[source]
        source: url::ParseError,
    },
}

/// Errors that can occur when validating a template body
#[derive(Debug, Error)]
pub enum TemplateValidationError {
    /// Building the synthetic validation context failed
    #[error("error creating validation context")]
    Context(#[from] TemplateContextError),

    /// Rendering the body against the synthetic context failed
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Errors that can occur when validating a template record
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template name not specified
    #[error("template name not specified")]
    NameNotSpecified,

    /// Neither a plaintext nor an HTML body was provided
    #[error("need to specify at least plaintext or HTML content")]
    MissingContent,

    /// Unknown header profile
    #[error("invalid header profile {0:?} specified")]
    InvalidHeaderProfile(String),

    /// The envelope sender did not parse as an RFC 5322 mailbox
    #[error("invalid envelope sender address {address:?}")]
    InvalidEnvelopeSender {
        /// The address that failed to parse
        address: String,

        /// Failure reported by the address parser
        #[source]
        source: AddressError,
    },

    /// A template body failed validation
    #[error(transparent)]
    InvalidBody(#[from] TemplateValidationError),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}
