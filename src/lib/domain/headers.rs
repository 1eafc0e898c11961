//! MIME header profiles module.

mod boundary;
mod profile;
mod resolver;

pub use profile::{HeaderProfile, HeaderProfileRegistry, DEFAULT_PROFILE};
pub use resolver::{resolve, ResolvedHeaders};
