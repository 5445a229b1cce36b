//! Conversion between typed message contracts and addressable envelopes.

pub mod converter;
pub mod description;
pub mod formatter;
pub mod message;

pub use converter::*;
pub use description::*;
pub use formatter::*;
pub use message::*;

// Re-exports for derive macros
pub use nexus_envelope_derive_rs::MessageContract;
