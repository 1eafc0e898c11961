#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Rendering core for a phishing-simulation platform.
//!
//! Renders per-recipient email and landing-page content from user-authored
//! templates, builds the tracking and click URLs bound to a recipient
//! identifier, and resolves the MIME header profile a simulated message is
//! sent with. Persistence, HTTP routing and the SMTP transport live outside
//! this crate and call into it with plain data.

pub mod domain;
