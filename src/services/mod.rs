//! Code sources, built-in templates, and artifact export.

pub mod export;
pub mod source;
pub mod templates;
