//! Authentication module
//!
//! NCM APIv3 uses a single bearer token per account. The [`Authenticator`]
//! attaches it to every outgoing request; the key itself is held in an
//! [`ApiKey`] that never prints.

mod authenticator;

pub use authenticator::{ApiKey, Authenticator};
