//! Domain modules

pub mod headers;
pub mod templating;
