//! Template rendering module.

mod context;
mod engine;
mod template;
mod validator;

pub mod errors;

pub use context::{PhishingTemplateContext, Recipient, TemplateContext, RECIPIENT_PARAMETER};
pub use engine::render;
pub use template::Template;
pub use validator::validate_template;
